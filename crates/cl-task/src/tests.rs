//! Unit tests for cl-task.

use cl_core::{AgentId, Position, Tick};
use cl_mobility::Locomotion;

use crate::{Cooldown, DailyQuota, ProgressTracker, Stage, TaskMachine, TravelEvent, TravelTuning};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: AgentId = AgentId(0);

fn x(v: f32) -> Position {
    Position::new(v, 0.0, 0.0)
}

/// One agent on a line.  `step` moves it toward the requested target unless
/// `frozen`.
struct Line {
    pos:      Position,
    target:   Option<Position>,
    frozen:   bool,
    requests: usize,
}

impl Line {
    fn at(v: f32) -> Self {
        Self { pos: x(v), target: None, frozen: false, requests: 0 }
    }

    fn step(&mut self) {
        if self.frozen {
            return;
        }
        if let Some(t) = self.target {
            self.pos = self.pos.step_toward(t, 1.0);
            if self.pos == t {
                self.target = None;
            }
        }
    }
}

impl Locomotion for Line {
    fn position_of(&self, _agent: AgentId) -> Option<Position> {
        Some(self.pos)
    }
    fn move_toward(&mut self, _agent: AgentId, pos: Position, _speed: f32) {
        self.target = Some(pos);
        self.requests += 1;
    }
    fn is_path_idle(&self, _agent: AgentId) -> bool {
        self.target.is_none()
    }
}

fn machine() -> TaskMachine {
    TaskMachine::new(TravelTuning { arrive_distance_sq: 1.0, stall_limit: 5, speed: 1.0 })
}

// ── TaskMachine ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod machine {
    use super::*;

    #[test]
    fn travels_then_acts() {
        let mut line = Line::at(0.0);
        let mut m = machine();
        m.travel_to(x(4.0), None);
        let mut events = Vec::new();
        for _ in 0..10 {
            let ev = m.advance(A, &mut line);
            events.push(ev);
            if ev == TravelEvent::Arrived {
                break;
            }
            line.step();
        }
        assert_eq!(events.last(), Some(&TravelEvent::Arrived));
        assert_eq!(m.stage(), Stage::Acting);
        // 0 → 1 → 2 → 3: arrives once within distance 1 of x=4.
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn new_goal_is_requested_even_while_path_busy() {
        let mut line = Line::at(0.0);
        line.target = Some(x(-10.0));
        let mut m = machine();
        m.travel_to(x(10.0), None);
        m.advance(A, &mut line);
        assert_eq!(line.target, Some(x(10.0)));
        // Busy path is not re-requested on later ticks.
        m.advance(A, &mut line);
        assert_eq!(line.requests, 1);
    }

    #[test]
    fn stall_switches_to_returning() {
        let mut line = Line::at(0.0);
        line.frozen = true;
        let mut m = machine();
        m.travel_to(x(10.0), Some(x(-3.0)));

        // Baseline tick plus five no-progress ticks.
        for _ in 0..5 {
            assert_eq!(m.advance(A, &mut line), TravelEvent::EnRoute);
        }
        assert_eq!(m.advance(A, &mut line), TravelEvent::Stalled);
        assert_eq!(m.stage(), Stage::Returning { fallback: x(-3.0) });
        assert_eq!(line.target, Some(x(-3.0)));

        line.frozen = false;
        let mut last = TravelEvent::EnRoute;
        for _ in 0..10 {
            last = m.advance(A, &mut line);
            if last == TravelEvent::ArrivedBack {
                break;
            }
            line.step();
        }
        assert_eq!(last, TravelEvent::ArrivedBack);
        assert!(matches!(m.stage(), Stage::Returning { .. }));
        m.finish();
        assert!(m.is_done());
    }

    #[test]
    fn stall_without_fallback_gives_up() {
        let mut line = Line::at(0.0);
        line.frozen = true;
        let mut m = machine();
        m.travel_to(x(10.0), None);
        let events: Vec<TravelEvent> = (0..6).map(|_| m.advance(A, &mut line)).collect();
        assert_eq!(events[5], TravelEvent::GaveUp);
        assert!(m.is_done());
    }

    #[test]
    fn stall_while_returning_gives_up() {
        let mut line = Line::at(0.0);
        line.frozen = true;
        let mut m = machine();
        m.return_to(x(8.0));
        let events: Vec<TravelEvent> = (0..6).map(|_| m.advance(A, &mut line)).collect();
        assert_eq!(events[5], TravelEvent::GaveUp);
        assert!(m.is_done());
    }

    #[test]
    fn non_travel_stages_are_stationary() {
        let mut line = Line::at(0.0);
        let mut m = machine();
        assert_eq!(m.advance(A, &mut line), TravelEvent::Stationary);
        m.act();
        assert_eq!(m.advance(A, &mut line), TravelEvent::Stationary);
        assert!(m.is_running());
        m.reset();
        assert!(m.is_idle());
    }
}

// ── Helpers: tracker, cooldown, quota ─────────────────────────────────────────

#[cfg(test)]
mod progress {
    use super::*;

    #[test]
    fn only_strict_decrease_counts_as_progress() {
        let mut t = ProgressTracker::default();
        assert!(!t.observe(10.0, 2));
        assert!(!t.observe(10.0, 2));
        assert!(!t.observe(9.0, 2));
        assert_eq!(t.stalled_ticks(), 0);
        assert!(!t.observe(9.5, 2));
        assert!(t.observe(9.0, 2));
    }
}

#[cfg(test)]
mod cooldown {
    use super::*;

    #[test]
    fn interval_and_immediate_override() {
        let mut c = Cooldown::new(20);
        assert!(c.ready(Tick(0)));
        c.arm(Tick(0));
        assert!(!c.ready(Tick(19)));
        assert!(c.ready(Tick(20)));

        c.arm(Tick(20));
        c.trigger_immediate();
        assert!(c.ready(Tick(21)));
        c.arm(Tick(21));
        assert!(!c.ready(Tick(22)), "override applies once");
    }
}

#[cfg(test)]
mod quota {
    use super::*;

    #[test]
    fn resets_when_day_advances() {
        let mut q = DailyQuota::new(2);
        assert!(q.consume());
        assert!(q.consume());
        assert!(!q.available());
        assert!(!q.consume());
        q.refresh(0);
        assert!(!q.available());
        q.refresh(1);
        assert_eq!(q.remaining(), 2);
        assert_eq!(q.used(), 0);
    }
}
