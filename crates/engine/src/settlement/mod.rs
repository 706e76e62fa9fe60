//! Escrow settlement service
//!
//! One application service owns every privileged escrow operation. Each
//! method is a whole-transaction state transition: capability first, every
//! precondition next, mutation last. Scalars needed by the mutation phase
//! (ids, addresses, totals) are captured from an immutable view of the pool
//! before the single mutable borrow is taken.

mod lifecycle;
mod refund;
mod settle;
mod staking;

use wagerhall_domain::{DomainError, Entity, EscrowPool, SettlementCap};

use crate::admin::GameConfig;
use crate::ports::PaymentRail;

/// Application service for staking, settlement, refunds, and teardown.
///
/// Generic over the payment rail so hosts and tests can supply their own
/// delivery mechanism.
pub struct EscrowService<R: PaymentRail> {
    rail: R,
    config: GameConfig,
}

impl<R: PaymentRail> EscrowService<R> {
    pub fn new(rail: R) -> Self {
        Self {
            rail,
            config: GameConfig::default(),
        }
    }

    pub fn with_config(rail: R, config: GameConfig) -> Self {
        Self { rail, config }
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut GameConfig {
        &mut self.config
    }

    #[inline]
    pub fn rail(&self) -> &R {
        &self.rail
    }

    pub fn into_rail(self) -> R {
        self.rail
    }

    /// Shared preamble: the pool attribute must be present and the
    /// capability must be bound to it.
    fn pool_view<'a>(
        &self,
        cap: &SettlementCap,
        pool_entity: &'a Entity,
    ) -> Result<&'a EscrowPool, DomainError> {
        let pool = pool_entity.component::<EscrowPool>()?;
        cap.ensure_bound(pool)?;
        Ok(pool)
    }
}
