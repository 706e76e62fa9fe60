//! Admin boundary - pause control and live-pool limits
//!
//! The facade above this engine can pause play and bound how many pools
//! exist at once. Pause gates only the value-entry operations
//! (`create_pool`, `place_stake`); settlement, refunds, and teardown always
//! run - freeing value or an authorization token must never itself be
//! blocked.

use serde::{Deserialize, Serialize};

use wagerhall_domain::DomainError;

pub const DEFAULT_MAX_LIVE_POOLS: u32 = 1_024;

/// Operator-facing switches honored at the engine boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    paused: bool,
    max_live_pools: u32,
    live_pools: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LIVE_POOLS)
    }
}

impl GameConfig {
    pub fn new(max_live_pools: u32) -> Self {
        Self {
            paused: false,
            max_live_pools,
            live_pools: 0,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn live_pools(&self) -> u32 {
        self.live_pools
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.paused {
            return Err(DomainError::GamePaused);
        }
        Ok(())
    }

    /// Claim a slot for a new pool.
    pub fn register_pool(&mut self) -> Result<(), DomainError> {
        if self.live_pools >= self.max_live_pools {
            return Err(DomainError::PoolLimitReached {
                max: self.max_live_pools,
            });
        }
        self.live_pools += 1;
        Ok(())
    }

    /// Release the slot of a torn-down pool.
    pub fn release_pool(&mut self) {
        self.live_pools = self.live_pools.saturating_sub(1);
    }
}
