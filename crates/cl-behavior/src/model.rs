//! The `Behavior` trait — the extension point every task implements.

use cl_inventory::ItemStack;

use crate::{BehaviorContext, BehaviorResult, ChannelSet};

/// A prioritized, stateful unit of agent logic.
///
/// Constructed once at agent setup.  `start` / `stop` may run many times over
/// the agent's lifetime; state that must survive between runs lives in the
/// implementing struct.
///
/// # Lifecycle
///
/// ```text
///  inactive ──can_start && channels free──► start ──► active
///  active   ──can_continue──► tick      (every tick while active)
///  active   ──!can_continue / preempted / tick Err──► stop ──► inactive
/// ```
///
/// `stop` must leave the behavior safe to restart: nothing it was holding
/// may be left without an owner.
pub trait Behavior<W: ?Sized> {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Channels this behavior needs exclusively while active.
    fn channels(&self) -> ChannelSet;

    fn can_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool;

    /// Default: keep running as long as it could start.
    fn can_continue(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        self.can_start(ctx)
    }

    fn start(&mut self, _ctx: &mut BehaviorContext<'_, W>) {}

    fn tick(&mut self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<()>;

    fn stop(&mut self, _ctx: &mut BehaviorContext<'_, W>) {}

    /// Bypass any start cooldown on the next `can_start`.
    fn wake(&mut self) {}

    /// Items this behavior currently owns outside any container.
    fn in_flight(&self) -> Option<&ItemStack> {
        None
    }
}
