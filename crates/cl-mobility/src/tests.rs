//! Unit tests for cl-mobility.

use cl_core::{AgentId, Position};

use crate::{Barrier, Locomotion, MobilityStore};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(x: f32) -> Position {
    Position::new(x, 0.0, 0.0)
}

/// Minimal `Locomotion` over a mobility store and a position vec.
struct Walker {
    positions: Vec<Position>,
    store:     MobilityStore,
}

impl Locomotion for Walker {
    fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.positions.get(agent.index()).copied()
    }

    fn move_toward(&mut self, agent: AgentId, pos: Position, speed: f32) {
        self.store.request(agent, pos, speed);
    }

    fn is_path_idle(&self, agent: AgentId) -> bool {
        self.store.is_idle(agent)
    }
}

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn steps_and_arrives() {
        let mut store = MobilityStore::new(1);
        let mut positions = vec![p(0.0)];
        store.request(AgentId(0), p(2.5), 1.0);
        assert_eq!(store.advance(&mut positions, &[true], &[]), 0);
        assert_eq!(store.advance(&mut positions, &[true], &[]), 0);
        assert_eq!(store.advance(&mut positions, &[true], &[]), 1);
        assert_eq!(positions[0], p(2.5));
        assert!(store.is_idle(AgentId(0)));
    }

    #[test]
    fn barrier_blocks_step() {
        let mut store = MobilityStore::new(1);
        let mut positions = vec![p(0.0)];
        let wall = Barrier::new(Position::new(0.5, -1.0, -1.0), Position::new(1.5, 1.0, 1.0));
        store.request(AgentId(0), p(5.0), 1.0);
        for _ in 0..3 {
            store.advance(&mut positions, &[true], &[wall]);
        }
        assert_eq!(positions[0], p(0.0));
        assert_eq!(store.states[0].target, Some(p(5.0)));
        assert!(!store.is_idle(AgentId(0)));
    }

    #[test]
    fn immovable_agents_stay() {
        let mut store = MobilityStore::new(1);
        let mut positions = vec![p(0.0)];
        store.request(AgentId(0), p(1.0), 1.0);
        store.advance(&mut positions, &[false], &[]);
        assert_eq!(positions[0], p(0.0));
    }

    #[test]
    fn unknown_agent_is_idle() {
        let store = MobilityStore::new(0);
        assert!(store.is_idle(AgentId(4)));
    }
}

#[cfg(test)]
mod locomotion {
    use super::*;

    #[test]
    fn default_distance_uses_position() {
        let w = Walker { positions: vec![p(3.0)], store: MobilityStore::new(1) };
        assert_eq!(w.distance_squared(AgentId(0), p(0.0)), 9.0);
        assert_eq!(w.distance_squared(AgentId(9), p(0.0)), f32::INFINITY);
    }

    #[test]
    fn move_toward_sets_target() {
        let mut w = Walker { positions: vec![p(0.0)], store: MobilityStore::new(1) };
        assert!(w.is_path_idle(AgentId(0)));
        w.move_toward(AgentId(0), p(4.0), 0.5);
        assert!(!w.is_path_idle(AgentId(0)));
        assert_eq!(w.store.states[0].speed, 0.5);
    }
}
