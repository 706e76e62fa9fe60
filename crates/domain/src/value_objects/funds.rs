//! Linear value token
//!
//! `Funds` stands in for the payment rail's value: it cannot be copied,
//! cloned, serialized, or silently dropped while nonzero. Value moves only
//! through `merge`/`split`/`take_all`, which conserve the total exactly, or
//! crosses the rail boundary through `from_raw`/`into_raw`.

use wagerhall_domain::DomainError;

/// An owned quantity of base units that must be explicitly routed somewhere.
#[must_use = "funds must be deposited, paid out, or explicitly unwrapped"]
#[derive(Debug)]
pub struct Funds {
    amount: u64,
}

impl Funds {
    pub const fn zero() -> Self {
        Self { amount: 0 }
    }

    /// Wrap a raw amount arriving from the payment rail.
    pub const fn from_raw(amount: u64) -> Self {
        Self { amount }
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.amount
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Unwrap into a raw amount at the payment-rail boundary. The token is
    /// emptied before it drops.
    pub fn into_raw(mut self) -> u64 {
        std::mem::take(&mut self.amount)
    }

    /// Absorb `other` into `self`. On overflow `other` is handed back
    /// untouched and `self` is unchanged.
    pub fn merge(&mut self, other: Funds) -> Result<(), Funds> {
        match self.amount.checked_add(other.amount) {
            Some(merged) => {
                other.into_raw();
                self.amount = merged;
                Ok(())
            }
            None => Err(other),
        }
    }

    /// Split `amount` base units out of `self`.
    pub fn split(&mut self, amount: u64) -> Result<Funds, DomainError> {
        if amount > self.amount {
            return Err(DomainError::InsufficientFunds {
                available: self.amount,
                requested: amount,
            });
        }
        self.amount -= amount;
        Ok(Funds { amount })
    }

    /// Move the entire contents into a fresh token, leaving `self` empty.
    pub fn take_all(&mut self) -> Funds {
        Funds {
            amount: std::mem::take(&mut self.amount),
        }
    }
}

impl Drop for Funds {
    fn drop(&mut self) {
        // A nonzero token reaching scope exit means value vanished.
        // Not re-checked during unwind; the thread is already failing.
        if self.amount != 0 && !std::thread::panicking() {
            panic!("funds dropped holding {} base units", self.amount);
        }
    }
}
