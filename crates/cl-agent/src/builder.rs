//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use cl_agent::AgentStoreBuilder;
//! use cl_core::{Position, RoleId};
//!
//! let (store, rngs) = AgentStoreBuilder::new(3, /*seed=*/ 42)
//!     .role(1, RoleId(2))
//!     .position(1, Position::new(4.0, 0.0, 0.0))
//!     .build();
//!
//! assert_eq!(store.count, 3);
//! assert_eq!(rngs.len(), 3);
//! assert_eq!(store.role[1], RoleId(2));
//! ```

use cl_core::{ContainerId, Position, RoleId, StorageSite};

use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Arrays are allocated up front; the setters are indexed writes.  Setters
/// for out-of-range indices are ignored.
pub struct AgentStoreBuilder {
    seed:  u64,
    store: AgentStore,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { seed, store: AgentStore::new(count) }
    }

    pub fn position(mut self, index: usize, pos: Position) -> Self {
        if let Some(slot) = self.store.position.get_mut(index) {
            *slot = pos;
        }
        self
    }

    pub fn role(mut self, index: usize, role: RoleId) -> Self {
        if let Some(slot) = self.store.role.get_mut(index) {
            *slot = role;
        }
        self
    }

    /// Declare the agent's job site and the storage it claimed next to it.
    pub fn workplace(mut self, index: usize, job_site: Position, storage: Option<StorageSite>) -> Self {
        if index < self.store.count {
            self.store.job_site[index] = Some(job_site);
            self.store.storage[index] = storage;
        }
        self
    }

    pub fn carry(mut self, index: usize, container: ContainerId) -> Self {
        if let Some(slot) = self.store.carry.get_mut(index) {
            *slot = Some(container);
        }
        self
    }

    pub fn speed(mut self, index: usize, speed: f32) -> Self {
        if let Some(slot) = self.store.speed.get_mut(index) {
            *slot = speed;
        }
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let rngs = AgentRngs::new(self.store.count, self.seed);
        (self.store, rngs)
    }
}
