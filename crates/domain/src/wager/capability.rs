//! Settlement capability - unforgeable authorization token
//!
//! Minted once per pool by [`EscrowPool::new`] and permanently bound to
//! that pool's id. Possession of a matching capability is the only
//! authorization check privileged pool operations perform; there is no
//! secondary owner or address check.

use wagerhall_domain::{CapabilityId, DomainError, PoolId};

use crate::wager::EscrowPool;

/// Authorization token for exactly one escrow pool.
///
/// Deliberately not `Clone`, `Copy`, or serializable: the only way to hold
/// one is to have received it from pool creation.
#[derive(Debug)]
pub struct SettlementCap {
    id: CapabilityId,
    pool_id: PoolId,
}

impl SettlementCap {
    pub(crate) fn mint(pool_id: PoolId) -> Self {
        Self {
            id: CapabilityId::new(),
            pool_id,
        }
    }

    #[inline]
    pub fn id(&self) -> CapabilityId {
        self.id
    }

    #[inline]
    pub fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    /// Assert this capability was minted for `pool`.
    pub fn ensure_bound(&self, pool: &EscrowPool) -> Result<(), DomainError> {
        if self.pool_id != pool.id() {
            return Err(DomainError::CapabilityMismatch {
                bound: self.pool_id,
                target: pool.id(),
            });
        }
        Ok(())
    }
}
