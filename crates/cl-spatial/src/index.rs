//! Radius queries over agent positions.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over `[x, y, z]` points.  The world rebuilds it
//! once per tick with `AgentIndex::bulk_load`; queries during the tick see
//! that snapshot.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cl_core::{AgentId, Position};

/// Spatial index service.
pub trait SpatialIndex {
    /// Agents within `radius` of `center` (inclusive) for which `accept`
    /// returns true.  Order is unspecified.
    fn entities_in_radius(
        &self,
        center: Position,
        radius: f32,
        accept: &dyn Fn(AgentId) -> bool,
    ) -> Vec<AgentId>;
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct AgentEntry {
    point: [f32; 3],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── AgentIndex ────────────────────────────────────────────────────────────────

/// R-tree snapshot of agent positions.
pub struct AgentIndex {
    tree: RTree<AgentEntry>,
}

impl AgentIndex {
    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load from `(AgentId, Position)` pairs; O(N log N).
    pub fn bulk_load(agents: impl IntoIterator<Item = (AgentId, Position)>) -> Self {
        let entries: Vec<AgentEntry> = agents
            .into_iter()
            .map(|(id, pos)| AgentEntry { point: pos.to_array(), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nearest indexed agent to `pos`.
    pub fn nearest(&self, pos: Position) -> Option<AgentId> {
        self.tree.nearest_neighbor(&pos.to_array()).map(|e| e.id)
    }
}

impl Default for AgentIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl SpatialIndex for AgentIndex {
    fn entities_in_radius(
        &self,
        center: Position,
        radius: f32,
        accept: &dyn Fn(AgentId) -> bool,
    ) -> Vec<AgentId> {
        let r = radius.max(0.0);
        self.tree
            .locate_within_distance(center.to_array(), r * r)
            .map(|e| e.id)
            .filter(|&id| accept(id))
            .collect()
    }
}
