//! The `Sim` struct and its tick loop.

use tracing::info;

use cl_agent::AgentRngs;
use cl_behavior::{BehaviorContext, Scheduler};
use cl_core::{AgentId, ItemKind, SimConfig, Tick, WorldClock};

use crate::{SimObserver, SimResult, World};

/// The main simulation runner.
///
/// Holds the world, one [`Scheduler`] per agent, and the clock.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, day length, seed, …).
    pub config: SimConfig,

    /// World clock.  Behaviors read it through `BehaviorContext::clock`.
    pub clock: WorldClock,

    /// Agents, containers, movement.
    pub world: World,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Per-agent behavior schedulers, indexed by `AgentId`.
    pub schedulers: Vec<Scheduler<World>>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.world.agents.count,
            from = %self.clock.now(),
            to = %self.config.end_tick(),
            "simulation started"
        );
        while self.clock.now() < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.now());
        info!(at = %self.clock.now(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Units of `kind` in containers, spilled into the world, and held in
    /// flight by any behavior.
    pub fn total_of(&self, kind: ItemKind) -> u64 {
        let in_flight: u64 = self
            .schedulers
            .iter()
            .flat_map(|s| s.in_flight())
            .filter(|s| s.kind == kind)
            .map(|s| u64::from(s.count))
            .sum();
        self.world.total_of(kind) + in_flight
    }

    pub fn scheduler(&self, agent: AgentId) -> Option<&Scheduler<World>> {
        self.schedulers.get(agent.index())
    }

    pub fn scheduler_mut(&mut self, agent: AgentId) -> Option<&mut Scheduler<World>> {
        self.schedulers.get_mut(agent.index())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.now();
        observer.on_tick_start(now);

        let ticked = self.run_behaviors(now, observer);
        let arrived = self.world.step_movement();
        observer.on_tick_end(now, ticked, arrived);

        let interval = self.config.report_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_report(now, &self.world);
        }
        self.clock.advance();
    }

    /// One scheduler pass per agent, ascending `AgentId`.  Returns the number
    /// of behavior ticks that ran.
    fn run_behaviors<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        self.world.rebuild_index();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let clock = &self.clock;
        let world = &mut self.world;
        let rngs  = &mut self.rngs;

        let mut ticked = 0;
        for (i, scheduler) in self.schedulers.iter_mut().enumerate() {
            let agent = AgentId(i as u32);
            let alive = world.agents.is_alive(agent);
            if !alive && scheduler.active_names().next().is_none() {
                continue;
            }

            let mut ctx = BehaviorContext::new(agent, clock, rngs.get_mut(agent), &mut *world);
            let report = if alive { scheduler.tick(&mut ctx) } else { scheduler.stop_all(&mut ctx) };
            ticked += report.ticked;
            for event in &report.events {
                observer.on_behavior_event(now, agent, event);
            }
        }
        ticked
    }
}
