//! Per-agent movement requests and the straight-line stepper.

use cl_core::{AgentId, Position};

use crate::MovementState;

/// Axis-aligned box agents cannot step into.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barrier {
    pub min: Position,
    pub max: Position,
}

impl Barrier {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Position) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

/// `Vec<MovementState>` indexed by `AgentId`.
#[derive(Clone, Debug, Default)]
pub struct MobilityStore {
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    pub fn new(agent_count: usize) -> Self {
        Self { states: vec![MovementState::default(); agent_count] }
    }

    /// Record a movement request, replacing any earlier one.
    pub fn request(&mut self, agent: AgentId, target: Position, speed: f32) {
        if let Some(state) = self.states.get_mut(agent.index()) {
            state.target = Some(target);
            state.speed = speed.max(0.0);
        }
    }

    pub fn cancel(&mut self, agent: AgentId) {
        if let Some(state) = self.states.get_mut(agent.index()) {
            *state = MovementState::default();
        }
    }

    pub fn is_idle(&self, agent: AgentId) -> bool {
        self.states.get(agent.index()).is_none_or(MovementState::is_idle)
    }

    /// Step every agent with a target one tick along the straight line.
    ///
    /// `positions` is indexed by `AgentId` and must be at least as long as
    /// `states`.  Agents whose `movable` flag is false are skipped.  Returns
    /// the number of agents that reached their target this tick.
    pub fn advance(&mut self, positions: &mut [Position], movable: &[bool], barriers: &[Barrier]) -> usize {
        let mut arrived = 0;
        for (i, state) in self.states.iter_mut().enumerate() {
            let Some(target) = state.target else { continue };
            if !movable.get(i).copied().unwrap_or(false) {
                continue;
            }
            let Some(pos) = positions.get_mut(i) else { continue };

            // A blocked step leaves the request standing; the task's
            // no-progress counter decides when to give up.
            let next = pos.step_toward(target, state.speed);
            if barriers.iter().any(|b| b.contains(next)) {
                continue;
            }
            *pos = next;
            if next == target {
                state.target = None;
                arrived += 1;
            }
        }
        arrived
    }
}
