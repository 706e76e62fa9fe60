//! Escrow pool aggregate - session-scoped holder of pooled stake value
//!
//! # Invariants
//!
//! - `balance == sum of unrefunded, unsettled stake amounts` until
//!   settlement completes
//! - The pool is never copyable and never implicitly discardable: the
//!   balance is a linear [`Funds`] token, so a nonzero pool cannot reach
//!   scope exit without an explicit drain
//! - `settled` is set exactly once, by whichever settlement path runs,
//!   and is the sole guard against double settlement

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wagerhall_domain::{
    Address, Attribute, AttributeBit, BasisPoints, DomainError, Funds, PoolId, RejectedStake,
    SettlementCap, Timestamp,
};

/// How the pool intends to pay out at settlement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutMode {
    WinnerAll,
    Proportional,
    Consolation,
}

impl fmt::Display for PayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WinnerAll => write!(f, "WinnerAll"),
            Self::Proportional => write!(f, "Proportional"),
            Self::Consolation => write!(f, "Consolation"),
        }
    }
}

impl FromStr for PayoutMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WinnerAll" => Ok(Self::WinnerAll),
            "Proportional" => Ok(Self::Proportional),
            "Consolation" => Ok(Self::Consolation),
            _ => Err(DomainError::parse(format!("unknown payout mode: {s}"))),
        }
    }
}

/// Pooled stake value plus payout configuration for one game session.
#[must_use = "a pool holds value and must be explicitly torn down"]
#[derive(Debug)]
pub struct EscrowPool {
    id: PoolId,
    balance: Funds,
    stake_amount: u64,
    max_players: u32,
    player_count: u32,
    settled: bool,
    fee_bps: BasisPoints,
    fee_recipient: Address,
    payout_mode: PayoutMode,
    created_at: Timestamp,
    timeout_ms: u64,
}

impl Attribute for EscrowPool {
    const BIT: AttributeBit = AttributeBit::new(33);
    const KEY: &'static str = "escrow_pool";
}

impl EscrowPool {
    pub const MIN_PLAYERS: u32 = 2;

    /// Create an empty, unsettled pool and mint its settlement capability.
    ///
    /// This is the only place a capability comes from; one capability per
    /// pool, bound to the pool id for its whole life.
    pub fn new(
        stake_amount: u64,
        max_players: u32,
        fee_bps: BasisPoints,
        fee_recipient: Address,
        payout_mode: PayoutMode,
        now: Timestamp,
        timeout_ms: u64,
    ) -> Result<(Self, SettlementCap), DomainError> {
        if stake_amount == 0 {
            return Err(DomainError::InvalidStake);
        }
        if max_players < Self::MIN_PLAYERS {
            return Err(DomainError::InsufficientParticipants {
                min: Self::MIN_PLAYERS,
                got: max_players,
            });
        }
        let id = PoolId::new();
        let cap = SettlementCap::mint(id);
        let pool = Self {
            id,
            balance: Funds::zero(),
            stake_amount,
            max_players,
            player_count: 0,
            settled: false,
            fee_bps,
            fee_recipient,
            payout_mode,
            created_at: now,
            timeout_ms,
        };
        Ok((pool, cap))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PoolId {
        self.id
    }

    #[inline]
    pub fn balance(&self) -> u64 {
        self.balance.value()
    }

    #[inline]
    pub fn stake_amount(&self) -> u64 {
        self.stake_amount
    }

    #[inline]
    pub fn max_players(&self) -> u32 {
        self.max_players
    }

    #[inline]
    pub fn player_count(&self) -> u32 {
        self.player_count
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.player_count >= self.max_players
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    #[inline]
    pub fn fee_bps(&self) -> BasisPoints {
        self.fee_bps
    }

    #[inline]
    pub fn fee_recipient(&self) -> &Address {
        &self.fee_recipient
    }

    #[inline]
    pub fn payout_mode(&self) -> PayoutMode {
        self.payout_mode
    }

    #[inline]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    #[inline]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    // =========================================================================
    // Preconditions
    // =========================================================================

    pub fn ensure_unsettled(&self) -> Result<(), DomainError> {
        if self.settled {
            return Err(DomainError::AlreadySettled);
        }
        Ok(())
    }

    /// Check whether a stake of `amount` would be accepted, without
    /// touching any state.
    pub fn ensure_accepts(&self, amount: u64) -> Result<(), DomainError> {
        if self.settled {
            return Err(DomainError::PoolSettled);
        }
        if self.is_full() {
            return Err(DomainError::PoolFull {
                max: self.max_players,
            });
        }
        if amount != self.stake_amount {
            return Err(DomainError::AmountMismatch {
                expected: self.stake_amount,
                got: amount,
            });
        }
        if self.balance.value().checked_add(amount).is_none() {
            return Err(DomainError::ArithmeticOverflow);
        }
        Ok(())
    }

    /// True once the externally supplied clock has passed the pool's
    /// forfeiture deadline.
    pub fn timed_out(&self, now: Timestamp) -> bool {
        now.is_after(self.created_at.saturating_add_millis(self.timeout_ms))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Merge a participant's payment into the pool and take their seat.
    /// On rejection the payment flows back unchanged.
    pub fn deposit(&mut self, payment: Funds) -> Result<(), RejectedStake> {
        if let Err(reason) = self.ensure_accepts(payment.value()) {
            return Err(RejectedStake::new(payment, reason));
        }
        match self.balance.merge(payment) {
            Ok(()) => {
                self.player_count += 1;
                Ok(())
            }
            Err(payment) => Err(RejectedStake::new(payment, DomainError::ArithmeticOverflow)),
        }
    }

    /// Move the entire balance out for settlement payouts.
    pub fn drain(&mut self) -> Funds {
        self.balance.take_all()
    }

    /// Split exactly one refunded stake back out of the balance.
    pub fn split_stake(&mut self, amount: u64) -> Result<Funds, DomainError> {
        self.balance.split(amount)
    }

    /// Flip the settlement-complete flag. Each settlement path calls this
    /// exactly once, as its final pool mutation.
    pub fn mark_settled(&mut self) {
        self.settled = true;
    }
}
