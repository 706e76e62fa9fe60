extern crate self as wagerhall_domain;

pub mod attributes;
pub mod components;
pub mod entity;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;
pub mod wager;

// Re-export the attribute-store kernel
pub use attributes::{Attribute, AttributeBit, AttributeMask};
pub use entity::Entity;

pub use error::DomainError;
pub use events::WagerEvent;

// Re-export ID types
pub use ids::{CapabilityId, EntityId, PoolId};

// Re-export value objects
pub use value_objects::{Address, BasisPoints, Funds, Timestamp};

// Re-export escrow types
pub use wager::{
    EscrowPool, PayoutMode, RejectedStake, SettlementCap, WagerRecord, WagerStatus,
};

// Re-export gameplay components
pub use components::{Health, Position};
