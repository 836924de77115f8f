//! Per-call view handed to every behavior hook.

use cl_core::{AgentId, AgentRng, Tick, WorldClock};

/// Everything a behavior may touch during one hook call.
///
/// Built once per agent per tick by the simulation loop.  `world` is the
/// only route to shared state, and only the behavior currently being called
/// holds it.
pub struct BehaviorContext<'a, W: ?Sized> {
    /// The agent whose behaviors are being evaluated.
    pub agent: AgentId,

    /// World/time service.
    pub clock: &'a WorldClock,

    /// Per-agent deterministic RNG.
    pub rng: &'a mut AgentRng,

    /// The world and all its collaborator services.
    pub world: &'a mut W,
}

impl<'a, W: ?Sized> BehaviorContext<'a, W> {
    #[inline]
    pub fn new(agent: AgentId, clock: &'a WorldClock, rng: &'a mut AgentRng, world: &'a mut W) -> Self {
        Self { agent, clock, rng, world }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }
}
