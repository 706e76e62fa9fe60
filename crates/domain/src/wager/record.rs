//! Wager record - one participant's stake within a pool
//!
//! Attached to the participant entity at stake time and mutated only
//! through the transitions below; never deleted except by pool cleanup.
//!
//! ```text
//! Pending -> Locked -> Won | Lost
//! Pending -> Refunded
//! Locked  -> Refunded   (bulk refund path only)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wagerhall_domain::{Address, Attribute, AttributeBit, DomainError};

/// Lifecycle status of a single wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WagerStatus {
    Pending,
    Locked,
    Won,
    Lost,
    Refunded,
}

impl WagerStatus {
    /// Terminal statuses admit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Refunded)
    }
}

impl fmt::Display for WagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Locked => write!(f, "Locked"),
            Self::Won => write!(f, "Won"),
            Self::Lost => write!(f, "Lost"),
            Self::Refunded => write!(f, "Refunded"),
        }
    }
}

impl FromStr for WagerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Locked" => Ok(Self::Locked),
            "Won" => Ok(Self::Won),
            "Lost" => Ok(Self::Lost),
            "Refunded" => Ok(Self::Refunded),
            _ => Err(DomainError::parse(format!("unknown wager status: {s}"))),
        }
    }
}

/// One participant's stake: amount, owning address, lifecycle status.
///
/// The amount is bookkeeping; the value itself sits in the pool balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WagerRecord {
    amount: u64,
    owner: Address,
    status: WagerStatus,
}

impl Attribute for WagerRecord {
    const BIT: AttributeBit = AttributeBit::new(32);
    const KEY: &'static str = "wager_record";
}

impl WagerRecord {
    pub fn new(amount: u64, owner: Address) -> Self {
        Self {
            amount,
            owner,
            status: WagerStatus::Pending,
        }
    }

    #[inline]
    pub fn amount(&self) -> u64 {
        self.amount
    }

    #[inline]
    pub fn owner(&self) -> &Address {
        &self.owner
    }

    #[inline]
    pub fn status(&self) -> WagerStatus {
        self.status
    }

    pub fn ensure_pending(&self) -> Result<(), DomainError> {
        if self.status != WagerStatus::Pending {
            return Err(DomainError::WagerNotPending {
                status: self.status,
            });
        }
        Ok(())
    }

    pub fn ensure_locked(&self) -> Result<(), DomainError> {
        if self.status != WagerStatus::Locked {
            return Err(DomainError::WagerNotLocked {
                status: self.status,
            });
        }
        Ok(())
    }

    /// Pending -> Locked
    pub fn lock(&mut self) -> Result<(), DomainError> {
        self.ensure_pending()?;
        self.status = WagerStatus::Locked;
        Ok(())
    }

    /// Locked -> Won
    pub fn mark_won(&mut self) -> Result<(), DomainError> {
        self.ensure_locked()?;
        self.status = WagerStatus::Won;
        Ok(())
    }

    /// Locked -> Lost
    pub fn mark_lost(&mut self) -> Result<(), DomainError> {
        self.ensure_locked()?;
        self.status = WagerStatus::Lost;
        Ok(())
    }

    /// Pending | Locked -> Refunded
    pub fn mark_refunded(&mut self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::WagerNotPending {
                status: self.status,
            });
        }
        self.status = WagerStatus::Refunded;
        Ok(())
    }
}
