//! Unified error types for the domain layer
//!
//! Every check is a precondition evaluated before any mutation; on failure
//! the whole invocation aborts with no partial effect. Nothing here is
//! recovered locally - the caller decides whether to resubmit.

use thiserror::Error;

use crate::ids::PoolId;
use crate::wager::WagerStatus;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // -- Attribute store --
    /// The target bit or key is already occupied on this entity
    #[error("attribute already attached under key '{key}'")]
    AlreadyExists { key: String },

    /// No attribute under the given bit/key
    #[error("attribute not found: {key}")]
    NotFound { key: String },

    /// The slot exists but holds a different concrete type
    #[error("attribute under key '{key}' has a different type")]
    TypeMismatch { key: String },

    // -- Authorization --
    /// The presented capability was minted for a different pool
    #[error("capability is bound to pool {bound}, not {target}")]
    CapabilityMismatch { bound: PoolId, target: PoolId },

    // -- Pool lifecycle --
    #[error("stake amount must be nonzero")]
    InvalidStake,

    #[error("a pool needs at least {min} participants, got {got}")]
    InsufficientParticipants { min: u32, got: u32 },

    #[error("pool still holds {balance} base units")]
    PoolNotEmpty { balance: u64 },

    // -- Staking --
    #[error("participant already holds a wager record")]
    AlreadyStaked,

    #[error("pool settlement has completed; no further stakes accepted")]
    PoolSettled,

    #[error("pool is full ({max} participants)")]
    PoolFull { max: u32 },

    #[error("stake must be exactly {expected} base units, got {got}")]
    AmountMismatch { expected: u64, got: u64 },

    // -- State machine --
    #[error("wager is {status}, expected pending")]
    WagerNotPending { status: WagerStatus },

    #[error("wager is {status}, expected locked")]
    WagerNotLocked { status: WagerStatus },

    #[error("pool has already been settled")]
    AlreadySettled,

    // -- Arithmetic / policy --
    #[error("payout shares sum to {sum} basis points, expected {expected}")]
    SharesSumInvalid { sum: u64, expected: u64 },

    #[error("insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds { available: u64, requested: u64 },

    #[error("arithmetic overflow in balance accounting")]
    ArithmeticOverflow,

    #[error("basis points out of range: {value} > 10000")]
    InvalidBasisPoints { value: u16 },

    // -- Timing --
    /// Covers both "timeout not yet elapsed" and "lobby never filled"
    #[error("timeout has not expired or the lobby never filled")]
    TimeoutNotExpired,

    // -- Admin boundary --
    #[error("operations are paused")]
    GamePaused,

    #[error("live pool limit reached ({max})")]
    PoolLimitReached { max: u32 },

    /// Parse error (for value objects)
    #[error("parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an already-exists error for an occupied attribute slot
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }

    /// Create a not-found error for a missing attribute slot
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a type-mismatch error for a slot holding a different type
    pub fn type_mismatch(key: impl Into<String>) -> Self {
        Self::TypeMismatch { key: key.into() }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
