//! Basis points value object
//!
//! Fee rates and payout shares are integers in [0, 10000], hundredths of a
//! percent. 10000 bps = 100%.

use serde::{Deserialize, Serialize};

use wagerhall_domain::DomainError;

/// A validated basis-point rate or share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    pub const ZERO: Self = Self(0);
    /// 100% - also the denominator of every bps computation.
    pub const FULL: Self = Self(10_000);

    pub fn new(value: u16) -> Result<Self, DomainError> {
        if value > Self::FULL.0 {
            return Err(DomainError::InvalidBasisPoints { value });
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}
