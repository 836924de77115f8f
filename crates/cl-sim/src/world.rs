//! The concrete world every task runs against.

use tracing::debug;

use cl_agent::AgentStore;
use cl_core::{AgentId, ContainerId, ItemKind, Position, RoleId, StorageSite};
use cl_inventory::{Container, ContainerAccess, ItemSpill, ItemStack};
use cl_mobility::{Barrier, Locomotion, MobilityStore};
use cl_spatial::{AgentIndex, SpatialIndex, WorkplaceDirectory};

/// Agents, containers, movement and the spatial snapshot, in one place.
///
/// Implements [`Locomotion`], [`ContainerAccess`], [`ItemSpill`],
/// [`SpatialIndex`] and [`WorkplaceDirectory`], so any task generic over
/// those collaborators can run on it.
pub struct World {
    /// SoA agent state.
    pub agents: AgentStore,

    /// Containers indexed by `ContainerId`.
    pub containers: Vec<Container>,

    /// Outstanding movement requests.
    pub mobility: MobilityStore,

    /// Boxes agents cannot step into.
    pub barriers: Vec<Barrier>,

    index:        AgentIndex,
    adjacency_sq: f32,
    spilled:      Vec<(Position, ItemStack)>,
}

impl World {
    /// Storage within this squared distance of a job site belongs to it
    /// (one block in every axis).
    pub const DEFAULT_ADJACENCY_SQ: f32 = 3.0;

    pub fn new(agents: AgentStore) -> Self {
        let mobility = MobilityStore::new(agents.count);
        let mut world = Self {
            agents,
            containers:   Vec::new(),
            mobility,
            barriers:     Vec::new(),
            index:        AgentIndex::empty(),
            adjacency_sq: Self::DEFAULT_ADJACENCY_SQ,
            spilled:      Vec::new(),
        };
        world.rebuild_index();
        world
    }

    pub fn with_adjacency_sq(mut self, adjacency_sq: f32) -> Self {
        self.adjacency_sq = adjacency_sq;
        self
    }

    /// Add a container and return its id.
    pub fn add_container(&mut self, container: Container) -> ContainerId {
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(container);
        id
    }

    /// Mark `agent` dead and drop its movement request.
    pub fn kill(&mut self, agent: AgentId) {
        if let Some(alive) = self.agents.alive.get_mut(agent.index()) {
            *alive = false;
            self.mobility.cancel(agent);
        }
    }

    /// Items dropped into the world, in the order they were dropped.
    pub fn spilled(&self) -> &[(Position, ItemStack)] {
        &self.spilled
    }

    /// Units of `kind` in every container plus everything spilled.
    ///
    /// Items held by tasks in flight are not visible here; see
    /// [`Sim::total_of`](crate::Sim::total_of).
    pub fn total_of(&self, kind: ItemKind) -> u64 {
        let stored: u64 = self.containers.iter().map(|c| u64::from(c.count_of(kind))).sum();
        let dropped: u64 = self
            .spilled
            .iter()
            .filter(|(_, s)| s.kind == kind)
            .map(|(_, s)| u64::from(s.count))
            .sum();
        stored + dropped
    }

    /// Snapshot living agent positions into the spatial index.
    pub fn rebuild_index(&mut self) {
        self.index = AgentIndex::bulk_load(self.agents.living_positions());
    }

    /// Step every agent with a movement request.  Returns the number that
    /// arrived.
    pub fn step_movement(&mut self) -> usize {
        self.mobility.advance(&mut self.agents.position, &self.agents.alive, &self.barriers)
    }

    /// Clear the dirty flag on every container, returning how many were set.
    pub fn flush_dirty(&mut self) -> usize {
        let mut flushed = 0;
        for c in self.containers.iter_mut().filter(|c| c.is_dirty()) {
            c.clear_dirty();
            flushed += 1;
        }
        flushed
    }
}

// ── Collaborator impls ────────────────────────────────────────────────────────

impl Locomotion for World {
    fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.agents.position_of(agent)
    }

    fn move_toward(&mut self, agent: AgentId, pos: Position, speed: f32) {
        let cap = self.agents.speed.get(agent.index()).copied().unwrap_or(speed);
        self.mobility.request(agent, pos, speed.min(cap));
    }

    fn is_path_idle(&self, agent: AgentId) -> bool {
        self.mobility.is_idle(agent)
    }
}

impl ContainerAccess for World {
    fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.index())
    }

    fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(id.index())
    }
}

impl ItemSpill for World {
    fn spill(&mut self, at: Position, stack: ItemStack) {
        debug!(%at, %stack, "item dropped into world");
        self.spilled.push((at, stack));
    }
}

impl SpatialIndex for World {
    fn entities_in_radius(
        &self,
        center: Position,
        radius: f32,
        accept: &dyn Fn(AgentId) -> bool,
    ) -> Vec<AgentId> {
        self.index.entities_in_radius(center, radius, accept)
    }
}

impl WorkplaceDirectory for World {
    fn position_of_agent(&self, agent: AgentId) -> Option<Position> {
        self.agents.position_of(agent)
    }

    fn is_alive(&self, agent: AgentId) -> bool {
        self.agents.is_alive(agent)
    }

    fn has_role(&self, agent: AgentId, role: RoleId) -> bool {
        role.is_valid() && self.agents.role.get(agent.index()) == Some(&role)
    }

    fn job_site(&self, agent: AgentId) -> Option<Position> {
        self.agents.job_site.get(agent.index()).copied().flatten()
    }

    fn storage_of(&self, agent: AgentId) -> Option<StorageSite> {
        let site = self.agents.storage.get(agent.index()).copied().flatten()?;
        self.containers.get(site.container.index()).map(|_| site)
    }

    fn is_adjacent(&self, job_site: Position, storage: Position) -> bool {
        job_site.distance_squared(storage) <= self.adjacency_sq
    }
}
