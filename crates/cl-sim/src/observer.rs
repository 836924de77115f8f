//! Simulation observer trait for progress reporting and data collection.

use cl_behavior::BehaviorEvent;
use cl_core::{AgentId, Tick};

use crate::World;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — fault counter
///
/// ```rust,ignore
/// struct Faults(usize);
///
/// impl SimObserver for Faults {
///     fn on_behavior_event(&mut self, _tick: Tick, _agent: AgentId, event: &BehaviorEvent) {
///         if matches!(event, BehaviorEvent::Fault { .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per start / stop / fault reported by an agent's scheduler.
    fn on_behavior_event(&mut self, _tick: Tick, _agent: AgentId, _event: &BehaviorEvent) {}

    /// Called at the end of each tick.
    ///
    /// `ticked` is the number of behaviors whose `tick` ran, `arrived` the
    /// number of agents that reached a movement target.
    fn on_tick_end(&mut self, _tick: Tick, _ticked: usize, _arrived: usize) {}

    /// Called every `config.report_interval_ticks` ticks with read-only
    /// access to the world.
    fn on_report(&mut self, _tick: Tick, _world: &World) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
