//! Settlement modes
//!
//! Exactly one settlement path runs per pool, guarded by the `settled`
//! flag. Shared preamble for every mode: capability binding, unsettled
//! check, totals captured before any mutation, and every supplied record
//! validated as locked. The flag is flipped as the final pool mutation of
//! the path.

use tracing::info;

use wagerhall_domain::{
    BasisPoints, DomainError, Entity, EscrowPool, SettlementCap, Timestamp, WagerEvent,
    WagerRecord,
};

use crate::fees;
use crate::ports::PaymentRail;
use crate::settlement::EscrowService;

impl<R: PaymentRail> EscrowService<R> {
    /// Drain the entire pool balance to the winner. No fee.
    pub fn settle_winner_take_all(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        winner: &mut Entity,
        losers: Vec<&mut Entity>,
    ) -> Result<Vec<WagerEvent>, DomainError> {
        self.fee_settlement(cap, pool_entity, winner, losers, false)
    }

    /// Take the protocol fee off the top, then pay the remainder to the
    /// winner.
    pub fn settle_with_fee(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        winner: &mut Entity,
        losers: Vec<&mut Entity>,
    ) -> Result<Vec<WagerEvent>, DomainError> {
        self.fee_settlement(cap, pool_entity, winner, losers, true)
    }

    /// Forfeit a stalled game: fee-then-winner for one designated winner
    /// and one designated loser.
    ///
    /// Only a lobby that provably filled and then stalled past its
    /// deadline qualifies; an under-filled lobby must use refunds instead.
    /// One error code covers both failure modes.
    pub fn settle_timeout(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        winner: &mut Entity,
        loser: &mut Entity,
        now: Timestamp,
    ) -> Result<Vec<WagerEvent>, DomainError> {
        let pool = self.pool_view(cap, pool_entity)?;
        pool.ensure_unsettled()?;
        if !pool.timed_out(now) || !pool.is_full() {
            return Err(DomainError::TimeoutNotExpired);
        }
        self.fee_settlement(cap, pool_entity, winner, vec![loser], true)
    }

    /// Split the post-fee remainder across N winners by basis-point
    /// shares. The shares must sum to exactly 10000; the last winner
    /// receives whatever remains after the earlier floored cuts, absorbing
    /// all rounding dust so payouts plus fee equal the original total
    /// exactly.
    pub fn settle_proportional(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        winners: Vec<&mut Entity>,
        shares: &[BasisPoints],
        losers: Vec<&mut Entity>,
    ) -> Result<Vec<WagerEvent>, DomainError> {
        let pool = self.pool_view(cap, pool_entity)?;
        pool.ensure_unsettled()?;
        let pool_id = pool.id();
        let total = pool.balance();
        let fee_recipient = pool.fee_recipient().clone();
        let fee = fees::protocol_fee(total, pool.fee_bps());

        let expected = u64::from(BasisPoints::FULL.value());
        let sum: u64 = shares.iter().map(|share| u64::from(share.value())).sum();
        if winners.is_empty() || winners.len() != shares.len() || sum != expected {
            return Err(DomainError::SharesSumInvalid { sum, expected });
        }
        for winner in &winners {
            winner.component::<WagerRecord>()?.ensure_locked()?;
        }
        for loser in &losers {
            loser.component::<WagerRecord>()?.ensure_locked()?;
        }

        // Mutation phase
        let pool = pool_entity.component_mut::<EscrowPool>()?;
        let mut payout = pool.drain();
        pool.mark_settled();

        let mut events = Vec::with_capacity(winners.len() + losers.len() + 1);
        if fee > 0 {
            let fee_funds = payout.split(fee)?;
            self.rail.pay(&fee_recipient, fee_funds);
            events.push(WagerEvent::FeeCollected {
                pool_id,
                recipient: fee_recipient,
                amount: fee,
            });
        }

        let remainder = payout.value();
        let last = winners.len() - 1;
        let mut distributed = 0u64;
        for (index, (winner, share)) in winners.into_iter().zip(shares.iter()).enumerate() {
            let amount = if index == last {
                remainder - distributed
            } else {
                fees::proportional_share(remainder, *share)
            };
            distributed += amount;

            let record = winner.component_mut::<WagerRecord>()?;
            record.mark_won()?;
            let recipient = record.owner().clone();
            let cut = payout.split(amount)?;
            self.rail.pay(&recipient, cut);
            events.push(WagerEvent::SettlementPaid {
                pool_id,
                participant: winner.id(),
                recipient,
                amount,
            });
        }

        for loser in losers {
            events.push(Self::mark_loser(pool_id, loser)?);
        }

        info!(pool_id = %pool_id, total, fee, winners = last + 1, "pool settled proportionally");
        Ok(events)
    }

    /// Shared core of the single-winner modes.
    fn fee_settlement(
        &mut self,
        cap: &SettlementCap,
        pool_entity: &mut Entity,
        winner: &mut Entity,
        losers: Vec<&mut Entity>,
        charge_fee: bool,
    ) -> Result<Vec<WagerEvent>, DomainError> {
        // Preamble: scalars from the immutable view
        let pool = self.pool_view(cap, pool_entity)?;
        pool.ensure_unsettled()?;
        let pool_id = pool.id();
        let total = pool.balance();
        let fee_recipient = pool.fee_recipient().clone();
        let fee = if charge_fee {
            fees::protocol_fee(total, pool.fee_bps())
        } else {
            0
        };

        winner.component::<WagerRecord>()?.ensure_locked()?;
        for loser in &losers {
            loser.component::<WagerRecord>()?.ensure_locked()?;
        }

        // Mutation phase
        let pool = pool_entity.component_mut::<EscrowPool>()?;
        let mut payout = pool.drain();
        pool.mark_settled();

        let mut events = Vec::with_capacity(losers.len() + 2);
        if fee > 0 {
            let fee_funds = payout.split(fee)?;
            self.rail.pay(&fee_recipient, fee_funds);
            events.push(WagerEvent::FeeCollected {
                pool_id,
                recipient: fee_recipient,
                amount: fee,
            });
        }

        let amount = payout.value();
        let record = winner.component_mut::<WagerRecord>()?;
        record.mark_won()?;
        let recipient = record.owner().clone();
        self.rail.pay(&recipient, payout);
        events.push(WagerEvent::SettlementPaid {
            pool_id,
            participant: winner.id(),
            recipient,
            amount,
        });

        for loser in losers {
            events.push(Self::mark_loser(pool_id, loser)?);
        }

        info!(pool_id = %pool_id, total, fee, "pool settled");
        Ok(events)
    }

    fn mark_loser(
        pool_id: wagerhall_domain::PoolId,
        loser: &mut Entity,
    ) -> Result<WagerEvent, DomainError> {
        let participant = loser.id();
        let record = loser.component_mut::<WagerRecord>()?;
        record.mark_lost()?;
        Ok(WagerEvent::WagerLost {
            pool_id,
            participant,
            owner: record.owner().clone(),
            amount: record.amount(),
        })
    }
}
