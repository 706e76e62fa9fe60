//! Refund paths
//!
//! A single pending stake can be handed back unilaterally; once a wager is
//! locked, only the bulk path (or settlement) releases it.

use tracing::info;

use wagerhall_domain::{
    DomainError, Entity, EscrowPool, SettlementCap, WagerEvent, WagerRecord, WagerStatus,
};

use crate::ports::PaymentRail;
use crate::settlement::EscrowService;

impl<R: PaymentRail> EscrowService<R> {
    /// Refund one participant's stake. The record must still be pending.
    pub fn refund_one(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        participant: &mut Entity,
    ) -> Result<WagerEvent, DomainError> {
        let pool = self.pool_view(cap, pool_entity)?;
        let pool_id = pool.id();

        let record = participant.component::<WagerRecord>()?;
        record.ensure_pending()?;
        let amount = record.amount();
        let owner = record.owner().clone();

        let pool = pool_entity.component_mut::<EscrowPool>()?;
        let funds = pool.split_stake(amount)?;
        participant.component_mut::<WagerRecord>()?.mark_refunded()?;
        self.rail.pay(&owner, funds);

        info!(
            pool_id = %pool_id,
            participant = %participant.id(),
            amount,
            "stake refunded"
        );
        Ok(WagerEvent::StakeRefunded {
            pool_id,
            participant: participant.id(),
            owner,
            amount,
        })
    }

    /// Refund every pending or locked wager in the supplied list.
    ///
    /// Participants without a record, or whose wager already reached a
    /// terminal status, are silently skipped.
    pub fn refund_all<'a>(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        participants: impl IntoIterator<Item = &'a mut Entity>,
    ) -> Result<Vec<WagerEvent>, DomainError> {
        let pool = self.pool_view(cap, pool_entity)?;
        let pool_id = pool.id();
        let balance = pool.balance();

        // First pass: select refundable wagers and check the pool can
        // cover them all, before any mutation.
        let mut refundable: Vec<&mut Entity> = Vec::new();
        let mut owed = 0u64;
        for participant in participants {
            if !participant.has_component::<WagerRecord>() {
                continue;
            }
            let record = participant.component::<WagerRecord>()?;
            if matches!(record.status(), WagerStatus::Pending | WagerStatus::Locked) {
                owed = owed
                    .checked_add(record.amount())
                    .ok_or(DomainError::ArithmeticOverflow)?;
                refundable.push(participant);
            }
        }
        if owed > balance {
            return Err(DomainError::InsufficientFunds {
                available: balance,
                requested: owed,
            });
        }

        let mut events = Vec::with_capacity(refundable.len());
        for participant in refundable {
            let record = participant.component::<WagerRecord>()?;
            let amount = record.amount();
            let owner = record.owner().clone();

            let pool = pool_entity.component_mut::<EscrowPool>()?;
            let funds = pool.split_stake(amount)?;
            participant.component_mut::<WagerRecord>()?.mark_refunded()?;
            self.rail.pay(&owner, funds);
            events.push(WagerEvent::StakeRefunded {
                pool_id,
                participant: participant.id(),
                owner,
                amount,
            });
        }

        info!(pool_id = %pool_id, refunded = events.len(), "wagers refunded");
        Ok(events)
    }
}
