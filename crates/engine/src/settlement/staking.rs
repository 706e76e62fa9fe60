//! Staking: depositing a payment into the pool and locking wagers for play.

use tracing::info;

use wagerhall_domain::{
    Address, DomainError, Entity, EscrowPool, Funds, RejectedStake, SettlementCap, WagerEvent,
    WagerRecord,
};

use crate::ports::PaymentRail;
use crate::settlement::EscrowService;

impl<R: PaymentRail> EscrowService<R> {
    /// Stake `payment` for `participant` in the pool.
    ///
    /// The payment must match the pool's stake amount exactly. On any
    /// rejection the untouched payment travels back inside the error.
    pub fn place_stake(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        participant: &mut Entity,
        owner: Address,
        payment: Funds,
    ) -> Result<WagerEvent, RejectedStake> {
        // All preconditions against the immutable view
        if let Err(reason) = self.stake_preconditions(cap, pool_entity, participant, &payment) {
            return Err(RejectedStake::new(payment, reason));
        }

        let amount = payment.value();
        let record = WagerRecord::new(amount, owner.clone());
        if let Err(reason) = participant.attach_component(record) {
            return Err(RejectedStake::new(payment, reason));
        }
        let pool = match pool_entity.component_mut::<EscrowPool>() {
            Ok(pool) => pool,
            Err(reason) => {
                let _ = participant.detach_component::<WagerRecord>();
                return Err(RejectedStake::new(payment, reason));
            }
        };
        let pool_id = pool.id();
        if let Err(rejected) = pool.deposit(payment) {
            // Roll the record back so the rejection leaves no trace
            let _ = participant.detach_component::<WagerRecord>();
            return Err(rejected);
        }

        info!(
            pool_id = %pool_id,
            participant = %participant.id(),
            owner = %owner,
            amount,
            "stake placed"
        );
        Ok(WagerEvent::StakePlaced {
            pool_id,
            participant: participant.id(),
            owner,
            amount,
        })
    }

    fn stake_preconditions(
        &self,
        cap: &SettlementCap,
        pool_entity: &Entity,
        participant: &Entity,
        payment: &Funds,
    ) -> Result<(), DomainError> {
        self.config.ensure_active()?;
        let pool = self.pool_view(cap, pool_entity)?;
        if participant.has_component::<WagerRecord>() {
            return Err(DomainError::AlreadyStaked);
        }
        pool.ensure_accepts(payment.value())
    }

    /// Lock every supplied participant's wager for play.
    ///
    /// Participants without a record are skipped - callers may pass a mixed
    /// list. Any present record that is not pending fails the whole call
    /// before a single wager is locked.
    pub fn lock_all<'a>(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &Entity,
        participants: impl IntoIterator<Item = &'a mut Entity>,
    ) -> Result<WagerEvent, DomainError> {
        let pool = self.pool_view(cap, pool_entity)?;
        let pool_id = pool.id();

        let mut staked: Vec<&mut Entity> = participants
            .into_iter()
            .filter(|participant| participant.has_component::<WagerRecord>())
            .collect();
        // Validate every record before mutating any
        for participant in &staked {
            participant.component::<WagerRecord>()?.ensure_pending()?;
        }
        for participant in &mut staked {
            participant.component_mut::<WagerRecord>()?.lock()?;
        }

        let locked = staked.len() as u32;
        info!(pool_id = %pool_id, locked, "wagers locked");
        Ok(WagerEvent::WagersLocked { pool_id, locked })
    }
}
