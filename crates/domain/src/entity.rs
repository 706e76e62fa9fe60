//! Entity - the attribute-store kernel
//!
//! An entity owns the identity of a game object and every typed attribute
//! attached to it. Attributes live in a keyed slot map; a 256-bit existence
//! mask mirrors the slot map for O(1) presence checks.
//!
//! # Invariants
//!
//! - Bit *k* is set in the mask iff the slot for the attribute reserved
//!   under bit *k* exists. Mask and slot map are only ever mutated together,
//!   inside the same call.
//! - `attach` never overwrites in place; replacement requires
//!   `detach` + `attach`, or mutation through `borrow_mut`.
//! - An entity can only be destroyed once every attribute has been
//!   detached.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use wagerhall_domain::{Attribute, AttributeBit, AttributeMask, DomainError, EntityId, Timestamp};

struct Slot {
    bit: AttributeBit,
    value: Box<dyn Any + Send + Sync>,
}

/// An identified subject carrying zero or more typed attributes.
pub struct Entity {
    id: EntityId,
    created_at: Timestamp,
    mask: AttributeMask,
    slots: HashMap<String, Slot>,
}

impl Entity {
    /// Create a fresh entity with no attributes. The timestamp is supplied
    /// by the caller; the kernel never reads a clock.
    pub fn new(now: Timestamp) -> Self {
        Self {
            id: EntityId::new(),
            created_at: now,
            mask: AttributeMask::EMPTY,
            slots: HashMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// True iff every bit of the supplied mask is set. Accepts a single bit
    /// or an OR of several bits for multi-attribute queries.
    pub fn has(&self, query: impl Into<AttributeMask>) -> bool {
        self.mask.contains_all(query.into())
    }

    /// Attach `value` under the given bit/key pair.
    ///
    /// Fails with `AlreadyExists` if the bit is already set or the key is
    /// already occupied; the existing attribute is never overwritten.
    pub fn attach<T: Send + Sync + 'static>(
        &mut self,
        bit: AttributeBit,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), DomainError> {
        let key = key.into();
        if self.mask.contains(bit) || self.slots.contains_key(&key) {
            return Err(DomainError::already_exists(key));
        }
        self.slots.insert(
            key,
            Slot {
                bit,
                value: Box::new(value),
            },
        );
        self.mask.set(bit);
        Ok(())
    }

    /// Detach and return the attribute stored under the given bit/key pair.
    ///
    /// Fails with `NotFound` if the bit is not set (or the key belongs to a
    /// different bit), `TypeMismatch` if the slot holds another type. All
    /// checks happen before the mask or slot map is touched.
    pub fn detach<T: Send + Sync + 'static>(
        &mut self,
        bit: AttributeBit,
        key: &str,
    ) -> Result<T, DomainError> {
        if !self.mask.contains(bit) {
            return Err(DomainError::not_found(key));
        }
        let slot = self.slots.get(key).ok_or_else(|| DomainError::not_found(key))?;
        if slot.bit != bit {
            return Err(DomainError::not_found(key));
        }
        if !slot.value.is::<T>() {
            return Err(DomainError::type_mismatch(key));
        }
        let slot = self
            .slots
            .remove(key)
            .ok_or_else(|| DomainError::not_found(key))?;
        self.mask.clear(bit);
        let value = slot
            .value
            .downcast::<T>()
            .map_err(|_| DomainError::type_mismatch(key))?;
        Ok(*value)
    }

    /// Borrow the attribute stored under `key`, independent of the bitmask.
    pub fn borrow<T: Send + Sync + 'static>(&self, key: &str) -> Result<&T, DomainError> {
        self.slots
            .get(key)
            .ok_or_else(|| DomainError::not_found(key))?
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| DomainError::type_mismatch(key))
    }

    /// Mutably borrow the attribute stored under `key`.
    pub fn borrow_mut<T: Send + Sync + 'static>(&mut self, key: &str) -> Result<&mut T, DomainError> {
        self.slots
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found(key))?
            .value
            .downcast_mut::<T>()
            .ok_or_else(|| DomainError::type_mismatch(key))
    }

    // =========================================================================
    // Typed convenience layer over the raw bit/key operations
    // =========================================================================

    pub fn has_component<A: Attribute>(&self) -> bool {
        self.has(A::BIT)
    }

    pub fn attach_component<A: Attribute>(&mut self, value: A) -> Result<(), DomainError> {
        self.attach(A::BIT, A::KEY, value)
    }

    pub fn detach_component<A: Attribute>(&mut self) -> Result<A, DomainError> {
        self.detach(A::BIT, A::KEY)
    }

    pub fn component<A: Attribute>(&self) -> Result<&A, DomainError> {
        self.borrow(A::KEY)
    }

    pub fn component_mut<A: Attribute>(&mut self) -> Result<&mut A, DomainError> {
        self.borrow_mut(A::KEY)
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Consume the entity. Fails if any attribute is still attached, handing
    /// the entity back untouched - a live attribute may hold value that must
    /// not be dropped on an error path.
    pub fn destroy(self) -> Result<(), Self> {
        if self.mask.is_empty() && self.slots.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("attributes", &keys)
            .finish()
    }
}
