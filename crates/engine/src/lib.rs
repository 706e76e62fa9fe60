//! Wagerhall Engine
//!
//! The settlement engine over the `wagerhall-domain` substrate: placing
//! stakes, locking, the four settlement modes, the two refund paths, and
//! pool teardown. Every operation is one synchronous, atomic invocation:
//! all preconditions are checked before any mutation, and the explicit
//! `settled` / per-record status flags are the concurrency discipline -
//! the host environment serializes invocations but never prevents a second
//! one from following the first.

pub mod admin;
pub mod fees;
pub mod ports;
pub mod settlement;


pub use admin::GameConfig;
pub use ports::PaymentRail;
pub use settlement::EscrowService;
