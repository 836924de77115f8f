//! The generic task stage machine.
//!
//! `TaskMachine` owns the stage, the travel target, and the no-progress
//! counter.  It never owns a path: each tick it asks the [`Locomotion`]
//! collaborator how far the agent is from the target and, when the agent's
//! path is idle, asks it to move toward the target again.
//!
//! ```text
//!            travel_to              arrive
//!   Idle ───────────────► Traveling ───────► Acting ──► (task decides)
//!                             │ stall
//!                             ▼
//!                         Returning ──arrive──► (task undoes) ──► Done
//!                             │ stall
//!                             ▼
//!                            Done
//! ```

use tracing::debug;

use cl_core::{AgentId, Position};
use cl_mobility::Locomotion;

use crate::{ProgressTracker, Stage};

/// Travel tunables shared by every task built on the machine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TravelTuning {
    /// Arrived once the squared distance is at or below this.
    pub arrive_distance_sq: f32,
    /// Consecutive no-progress ticks before the sub-goal is abandoned.
    pub stall_limit: u32,
    /// Requested movement speed, units per tick.
    pub speed: f32,
}

impl Default for TravelTuning {
    fn default() -> Self {
        Self { arrive_distance_sq: 2.25, stall_limit: 5, speed: 0.5 }
    }
}

/// What one call to [`TaskMachine::advance`] observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TravelEvent {
    /// The stage is not a travel stage; nothing happened.
    Stationary,
    /// Still on the way.
    EnRoute,
    /// Reached the travel target; stage is now `Acting`.
    Arrived,
    /// Reached the fallback while `Returning`; stage is unchanged so the
    /// task can undo its work before calling `finish`.
    ArrivedBack,
    /// Travel stalled; stage is now `Returning` toward the fallback.
    Stalled,
    /// Stalled with nowhere to fall back to, or stalled while returning;
    /// stage is now `Done`.
    GaveUp,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskMachine {
    stage:    Stage,
    fallback: Option<Position>,
    progress: ProgressTracker,
    tuning:   TravelTuning,
    /// A movement request for the current goal has been issued.
    requested: bool,
}

impl TaskMachine {
    pub fn new(tuning: TravelTuning) -> Self {
        Self { tuning, ..Self::default() }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn tuning(&self) -> &TravelTuning {
        &self.tuning
    }

    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Still has work to do (neither idle nor done).
    pub fn is_running(&self) -> bool {
        !self.is_idle() && !self.is_done()
    }

    pub fn fallback(&self) -> Option<Position> {
        self.fallback
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Head for `target`.  `fallback` is where to return if travel stalls;
    /// `None` means give up outright.
    pub fn travel_to(&mut self, target: Position, fallback: Option<Position>) {
        self.stage = Stage::Traveling { target };
        self.fallback = fallback;
        self.progress.reset();
        self.requested = false;
    }

    /// Abandon the current sub-goal and head back to `fallback`.
    pub fn return_to(&mut self, fallback: Position) {
        self.stage = Stage::Returning { fallback };
        self.fallback = Some(fallback);
        self.progress.reset();
        self.requested = false;
    }

    /// Skip travel; act on the next tick.
    pub fn act(&mut self) {
        self.stage = Stage::Acting;
        self.progress.reset();
    }

    pub fn finish(&mut self) {
        self.stage = Stage::Done;
        self.fallback = None;
        self.progress.reset();
    }

    /// Back to `Idle` (used by `Behavior::stop`).
    pub fn reset(&mut self) {
        self.stage = Stage::Idle;
        self.fallback = None;
        self.progress.reset();
    }

    // ── Per-tick travel ───────────────────────────────────────────────────

    /// Drive a travel stage for one tick.
    pub fn advance<L>(&mut self, agent: AgentId, world: &mut L) -> TravelEvent
    where
        L: Locomotion + ?Sized,
    {
        let (goal, returning) = match self.stage {
            Stage::Traveling { target } => (target, false),
            Stage::Returning { fallback } => (fallback, true),
            _ => return TravelEvent::Stationary,
        };

        let d2 = world.distance_squared(agent, goal);
        if d2 <= self.tuning.arrive_distance_sq {
            self.progress.reset();
            if returning {
                return TravelEvent::ArrivedBack;
            }
            self.stage = Stage::Acting;
            return TravelEvent::Arrived;
        }

        if self.progress.observe(d2, self.tuning.stall_limit) {
            let stalled_for = self.progress.stalled_ticks();
            match (returning, self.fallback) {
                (false, Some(fallback)) => {
                    debug!(agent = %agent, stalled_for, "travel stalled, returning");
                    self.return_to(fallback);
                    world.move_toward(agent, fallback, self.tuning.speed);
                    self.requested = true;
                    return TravelEvent::Stalled;
                }
                _ => {
                    debug!(agent = %agent, stalled_for, returning, "travel stalled, giving up");
                    self.finish();
                    return TravelEvent::GaveUp;
                }
            }
        }

        if !self.requested || world.is_path_idle(agent) {
            world.move_toward(agent, goal, self.tuning.speed);
            self.requested = true;
        }
        TravelEvent::EnRoute
    }
}
