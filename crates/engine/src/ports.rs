//! Outbound ports
//!
//! The engine treats the payment rail as "addressed transfer out": it hands
//! over a linear [`Funds`] token and an address, and never inspects the
//! rail's internals beyond the numeric value.

use wagerhall_domain::{Address, Funds};

/// Delivery of settled or refunded value to an account.
#[cfg_attr(test, mockall::automock)]
pub trait PaymentRail {
    /// Deliver `funds` to `to`. The rail takes ownership of the token and
    /// is trusted to complete the transfer.
    fn pay(&mut self, to: &Address, funds: Funds);
}
