//! Fee and share arithmetic
//!
//! All basis-point products run through a double-width intermediate so the
//! math cannot overflow even when the pooled total sits near the u64
//! ceiling. Division floors; any rounding dust is assigned by the caller's
//! payout policy.

use wagerhall_domain::BasisPoints;

/// `floor(total * rate / 10000)`.
///
/// The result always fits in u64 because `rate <= 10000`.
pub fn protocol_fee(total: u64, rate: BasisPoints) -> u64 {
    let product = u128::from(total) * u128::from(rate.value());
    (product / u128::from(BasisPoints::FULL.value())) as u64
}

/// `floor(remainder * share / 10000)` - one winner's cut of the
/// post-fee remainder.
pub fn proportional_share(remainder: u64, share: BasisPoints) -> u64 {
    protocol_fee(remainder, share)
}
