//! The movement collaborator trait.

use cl_core::{AgentId, Position};

/// Position/Movement service consumed by the task framework.
pub trait Locomotion {
    /// Current position of `agent`, or `None` if it does not exist.
    fn position_of(&self, agent: AgentId) -> Option<Position>;

    /// Squared distance from `agent` to `pos`.  Unknown agents are
    /// infinitely far away.
    fn distance_squared(&self, agent: AgentId, pos: Position) -> f32 {
        self.position_of(agent)
            .map_or(f32::INFINITY, |p| p.distance_squared(pos))
    }

    /// Ask the movement system to head toward `pos` at `speed` units/tick.
    fn move_toward(&mut self, agent: AgentId, pos: Position, speed: f32);

    /// `true` when the agent has no outstanding movement request.
    fn is_path_idle(&self, agent: AgentId) -> bool;
}
