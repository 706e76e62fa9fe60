//! Escrow types: per-participant wager records, the pooled escrow balance,
//! and the settlement capability that authorizes privileged pool operations.

mod capability;
mod pool;
mod record;

pub use capability::SettlementCap;
pub use pool::{EscrowPool, PayoutMode};
pub use record::{WagerRecord, WagerStatus};

use thiserror::Error;

use wagerhall_domain::{DomainError, Funds};

/// A stake the pool refused, carrying the untouched payment back to the
/// caller. A linear value token cannot ride an ordinary error path.
#[derive(Debug, Error)]
#[error("stake rejected: {reason}")]
pub struct RejectedStake {
    payment: Funds,
    reason: DomainError,
}

impl RejectedStake {
    pub fn new(payment: Funds, reason: DomainError) -> Self {
        Self { payment, reason }
    }

    pub fn reason(&self) -> &DomainError {
        &self.reason
    }

    /// Recover the payment and the rejection reason.
    pub fn into_parts(self) -> (Funds, DomainError) {
        (self.payment, self.reason)
    }
}
