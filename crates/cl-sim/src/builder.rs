//! Fluent builder for constructing a [`Sim`].

use cl_agent::{AgentRngs, AgentStore};
use cl_behavior::Scheduler;
use cl_core::{AgentId, SimConfig};
use cl_inventory::Container;
use cl_mobility::Barrier;

use crate::{Sim, SimError, SimResult, World};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, day length, seed, …
/// - [`AgentStore`] + [`AgentRngs`] — from [`cl_agent::AgentStoreBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                             |
/// |----------------------|-------------------------------------|
/// | `.containers(v)`     | none                                |
/// | `.scheduler(i, s)`   | empty `Scheduler` per agent         |
/// | `.barriers(v)`       | none                                |
/// | `.adjacency_sq(d)`   | `World::DEFAULT_ADJACENCY_SQ`       |
///
/// Container ids are assigned in the order given, starting at zero.
pub struct SimBuilder {
    config:       SimConfig,
    agents:       AgentStore,
    rngs:         AgentRngs,
    containers:   Vec<Container>,
    schedulers:   Vec<(usize, Scheduler<World>)>,
    barriers:     Vec<Barrier>,
    adjacency_sq: Option<f32>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs) -> Self {
        Self {
            config,
            agents,
            rngs,
            containers:   Vec::new(),
            schedulers:   Vec::new(),
            barriers:     Vec::new(),
            adjacency_sq: None,
        }
    }

    pub fn containers(mut self, containers: Vec<Container>) -> Self {
        self.containers = containers;
        self
    }

    /// Install the behavior scheduler for the agent at `index`.  A later call
    /// for the same index replaces the earlier one.
    pub fn scheduler(mut self, index: usize, scheduler: Scheduler<World>) -> Self {
        self.schedulers.push((index, scheduler));
        self
    }

    pub fn barriers(mut self, barriers: Vec<Barrier>) -> Self {
        self.barriers = barriers;
        self
    }

    pub fn adjacency_sq(mut self, adjacency_sq: f32) -> Self {
        self.adjacency_sq = Some(adjacency_sq);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let agent_count = self.agents.count;

        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if self.config.ticks_per_day == 0 {
            return Err(SimError::Config("ticks_per_day must be at least 1".into()));
        }

        // ── Every container reference must resolve ────────────────────────
        let known = self.containers.len();
        for agent in self.agents.agent_ids() {
            let i = agent.index();
            let refs = self.agents.storage[i]
                .map(|s| s.container)
                .into_iter()
                .chain(self.agents.carry[i]);
            for container in refs {
                if container.index() >= known {
                    return Err(SimError::UnknownContainer { agent, container });
                }
            }
        }

        // ── Schedulers ────────────────────────────────────────────────────
        let mut schedulers: Vec<Scheduler<World>> =
            (0..agent_count).map(|_| Scheduler::new()).collect();
        for (index, scheduler) in self.schedulers {
            let slot = schedulers.get_mut(index).ok_or_else(|| {
                SimError::Config(format!("scheduler for {} but only {agent_count} agents", AgentId(index as u32)))
            })?;
            *slot = scheduler;
        }

        let mut world = World::new(self.agents);
        if let Some(d) = self.adjacency_sq {
            world = world.with_adjacency_sq(d);
        }
        world.containers = self.containers;
        world.barriers = self.barriers;

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            world,
            rngs:       self.rngs,
            schedulers,
        })
    }
}
