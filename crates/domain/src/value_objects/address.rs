//! Account address value object
//!
//! The payment rail addresses transfers by opaque account strings. The core
//! never interprets them beyond equality and display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wagerhall_domain::DomainError;

const MAX_LEN: usize = 128;

/// An opaque, validated account address.
///
/// # Invariants
///
/// - Never empty, never longer than 128 characters
/// - No whitespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::parse("address cannot be empty"));
        }
        if value.len() > MAX_LEN {
            return Err(DomainError::parse(format!(
                "address exceeds {MAX_LEN} characters"
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::parse("address cannot contain whitespace"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
