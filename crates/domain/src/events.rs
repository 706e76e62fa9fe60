//! Domain Events
//!
//! Every state-changing escrow operation returns structured events for
//! off-chain observers: append-only side effects, never read back by the
//! core. Each payout-relevant event carries pool id, participant id,
//! address, and amount.

use serde::{Deserialize, Serialize};

use crate::ids::{CapabilityId, EntityId, PoolId};
use crate::value_objects::Address;
use crate::wager::PayoutMode;

/// Observation emitted by a state-changing escrow operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WagerEvent {
    PoolCreated {
        pool_id: PoolId,
        stake_amount: u64,
        max_players: u32,
        fee_bps: u16,
        payout_mode: PayoutMode,
    },
    StakePlaced {
        pool_id: PoolId,
        participant: EntityId,
        owner: Address,
        amount: u64,
    },
    WagersLocked {
        pool_id: PoolId,
        locked: u32,
    },
    FeeCollected {
        pool_id: PoolId,
        recipient: Address,
        amount: u64,
    },
    /// One per winner in every settlement mode.
    SettlementPaid {
        pool_id: PoolId,
        participant: EntityId,
        recipient: Address,
        amount: u64,
    },
    WagerLost {
        pool_id: PoolId,
        participant: EntityId,
        owner: Address,
        amount: u64,
    },
    StakeRefunded {
        pool_id: PoolId,
        participant: EntityId,
        owner: Address,
        amount: u64,
    },
    PoolDestroyed {
        pool_id: PoolId,
    },
    CapabilityDestroyed {
        capability: CapabilityId,
        pool_id: PoolId,
    },
}

impl WagerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PoolCreated { .. } => "pool_created",
            Self::StakePlaced { .. } => "stake_placed",
            Self::WagersLocked { .. } => "wagers_locked",
            Self::FeeCollected { .. } => "fee_collected",
            Self::SettlementPaid { .. } => "settlement_paid",
            Self::WagerLost { .. } => "wager_lost",
            Self::StakeRefunded { .. } => "stake_refunded",
            Self::PoolDestroyed { .. } => "pool_destroyed",
            Self::CapabilityDestroyed { .. } => "capability_destroyed",
        }
    }
}
