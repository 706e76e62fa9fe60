//! Pool and capability lifecycle: creation and teardown.

use tracing::info;

use wagerhall_domain::{
    Address, BasisPoints, DomainError, Entity, EscrowPool, PayoutMode, SettlementCap, Timestamp,
    WagerEvent,
};

use crate::ports::PaymentRail;
use crate::settlement::EscrowService;

impl<R: PaymentRail> EscrowService<R> {
    /// Create a pool entity and mint its settlement capability.
    ///
    /// The pool starts with zero balance, zero participants, unsettled.
    /// `now` comes from the caller's clock and seeds the timeout deadline.
    pub fn create_pool(
        &mut self,
        stake_amount: u64,
        max_players: u32,
        fee_bps: BasisPoints,
        fee_recipient: Address,
        payout_mode: PayoutMode,
        now: Timestamp,
        timeout_ms: u64,
    ) -> Result<(Entity, SettlementCap, WagerEvent), DomainError> {
        self.config.ensure_active()?;
        let (pool, cap) = EscrowPool::new(
            stake_amount,
            max_players,
            fee_bps,
            fee_recipient,
            payout_mode,
            now,
            timeout_ms,
        )?;
        let pool_id = pool.id();
        let mut pool_entity = Entity::new(now);
        pool_entity.attach_component(pool)?;
        self.config.register_pool()?;

        info!(
            pool_id = %pool_id,
            stake_amount,
            max_players,
            fee_bps = fee_bps.value(),
            "escrow pool created"
        );
        let event = WagerEvent::PoolCreated {
            pool_id,
            stake_amount,
            max_players,
            fee_bps: fee_bps.value(),
            payout_mode,
        };
        Ok((pool_entity, cap, event))
    }

    /// Tear down a fully drained pool.
    ///
    /// Requires the capability and the pool attribute; fails with
    /// `PoolNotEmpty` while any value remains. Runs even while paused.
    pub fn destroy_empty(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
    ) -> Result<WagerEvent, DomainError> {
        let pool = self.pool_view(cap, pool_entity)?;
        let balance = pool.balance();
        if balance != 0 {
            return Err(DomainError::PoolNotEmpty { balance });
        }
        let pool_id = pool.id();

        let retired = pool_entity.detach_component::<EscrowPool>()?;
        drop(retired);
        self.config.release_pool();

        info!(pool_id = %pool_id, "escrow pool destroyed");
        Ok(WagerEvent::PoolDestroyed { pool_id })
    }

    /// Burn a settlement capability.
    ///
    /// Unconditional: freeing an authorization token is never blocked, not
    /// even while paused or while the pool still exists.
    pub fn destroy_capability(&mut self, cap: SettlementCap) -> WagerEvent {
        let event = WagerEvent::CapabilityDestroyed {
            capability: cap.id(),
            pool_id: cap.pool_id(),
        };
        info!(capability = %cap.id(), pool_id = %cap.pool_id(), "capability destroyed");
        drop(cap);
        event
    }
}
