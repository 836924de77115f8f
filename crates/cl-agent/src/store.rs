//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! RNGs live in a separate struct so the tick loop can hold `&mut AgentRngs`
//! alongside a `&mut` borrow of the world that owns the `AgentStore`.

use cl_core::{AgentId, AgentRng, ContainerId, Position, RoleId, StorageSite};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`].
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];
/// ```
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current world position.
    pub position: Vec<Position>,

    /// `false` once the external lifecycle system has killed the agent.
    pub alive: Vec<bool>,

    /// Profession.  `RoleId::INVALID` means "no role".
    pub role: Vec<RoleId>,

    /// Declared job site (workstation block), if any.
    pub job_site: Vec<Option<Position>>,

    /// Storage the agent has claimed next to its job site, if any.
    pub storage: Vec<Option<StorageSite>>,

    /// The agent's own carry container ("hand"), if any.
    pub carry: Vec<Option<ContainerId>>,

    /// Walking speed in world units per tick.
    pub speed: Vec<f32>,
}

impl AgentStore {
    /// Default walking speed for agents that never had one assigned.
    pub const DEFAULT_SPEED: f32 = 0.5;

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// `true` if `agent` exists and is alive.
    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.contains(agent) && self.alive[agent.index()]
    }

    pub fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.contains(agent).then(|| self.position[agent.index()])
    }

    /// Iterator over `(AgentId, Position)` for every living agent.
    pub fn living_positions(&self) -> impl Iterator<Item = (AgentId, Position)> + '_ {
        self.agent_ids()
            .filter(|&a| self.alive[a.index()])
            .map(|a| (a, self.position[a.index()]))
    }

    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Position::ORIGIN; count],
            alive:    vec![true; count],
            role:     vec![RoleId::INVALID; count],
            job_site: vec![None; count],
            storage:  vec![None; count],
            carry:    vec![None; count],
            speed:    vec![Self::DEFAULT_SPEED; count],
        }
    }
}
