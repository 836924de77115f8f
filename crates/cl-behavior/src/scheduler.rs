//! Per-agent behavior arbiter.

use tracing::{debug, warn};

use cl_inventory::ItemStack;

use crate::{Behavior, BehaviorContext, ChannelSet, ControlChannel};

// ── Report types ──────────────────────────────────────────────────────────────

/// Why an active behavior was stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// `can_continue` returned false.
    Finished,
    /// A higher-priority behavior claimed one of its channels.
    Preempted { by: String },
    /// One of its channels was disabled.
    Disabled,
    /// `tick` returned an error.
    Fault,
    /// Stopped from outside via [`Scheduler::stop_all`].
    Cleared,
}

/// A lifecycle transition observed during one scheduler pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BehaviorEvent {
    Started { name: String },
    Stopped { name: String, reason: StopReason },
    Fault   { name: String, message: String },
}

/// Everything that changed for one agent during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<BehaviorEvent>,
    /// Number of active behaviors whose `tick` ran.
    pub ticked: usize,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty()
    }

    pub fn faults(&self) -> impl Iterator<Item = &BehaviorEvent> {
        self.events.iter().filter(|e| matches!(e, BehaviorEvent::Fault { .. }))
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

struct Entry<W: ?Sized> {
    priority: i32,
    active:   bool,
    behavior: Box<dyn Behavior<W>>,
}

/// Holds an agent's behaviors in priority order and arbitrates channels.
///
/// Lower `priority` numbers win.  Behaviors with equal priority never preempt
/// each other; whichever got the channel first keeps it.
pub struct Scheduler<W: ?Sized> {
    entries:  Vec<Entry<W>>,
    owners:   [Option<usize>; ControlChannel::COUNT],
    disabled: ChannelSet,
}

impl<W: ?Sized> Default for Scheduler<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ?Sized> Scheduler<W> {
    pub fn new() -> Self {
        Self {
            entries:  Vec::new(),
            owners:   [None; ControlChannel::COUNT],
            disabled: ChannelSet::EMPTY,
        }
    }

    /// Register a behavior.  Entries stay sorted by priority; ties keep
    /// registration order.
    pub fn add(&mut self, priority: i32, behavior: Box<dyn Behavior<W>>) {
        let pos = self.entries.partition_point(|e| e.priority <= priority);
        for owner in self.owners.iter_mut().flatten() {
            if *owner >= pos {
                *owner += 1;
            }
        }
        self.entries.insert(pos, Entry { priority, active: false, behavior });
    }

    /// Builder-style [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, priority: i32, behavior: Box<dyn Behavior<W>>) -> Self {
        self.add(priority, behavior);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name of the behavior currently holding `channel`.
    pub fn holder(&self, channel: ControlChannel) -> Option<&str> {
        self.owners[channel.slot()].map(|i| self.entries[i].behavior.name())
    }

    pub fn active_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter(|e| e.active).map(|e| e.behavior.name())
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.active && e.behavior.name() == name)
    }

    /// Stacks held by behaviors outside any container.
    pub fn in_flight(&self) -> impl Iterator<Item = &ItemStack> {
        self.entries.iter().filter_map(|e| e.behavior.in_flight())
    }

    /// Stop granting `channel`.  Behaviors using it are stopped on the next
    /// pass and cannot start until it is re-enabled.
    pub fn disable(&mut self, channel: ControlChannel) {
        self.disabled = self.disabled.with(channel);
    }

    pub fn enable(&mut self, channel: ControlChannel) {
        self.disabled = self.disabled.without(channel);
    }

    pub fn is_disabled(&self, channel: ControlChannel) -> bool {
        self.disabled.contains(channel)
    }

    /// Forward [`Behavior::wake`] to every behavior.
    pub fn wake_all(&mut self) {
        for entry in &mut self.entries {
            entry.behavior.wake();
        }
    }

    /// One scheduling pass, highest priority first.
    ///
    /// A behavior started during this pass gets its first `tick` on the next
    /// pass.
    pub fn tick(&mut self, ctx: &mut BehaviorContext<'_, W>) -> TickReport {
        let mut report = TickReport::default();

        for i in 0..self.entries.len() {
            if self.entries[i].active {
                self.run_active(i, ctx, &mut report);
            } else {
                self.try_start(i, ctx, &mut report);
            }
        }

        report
    }

    /// Stop every active behavior, e.g. when the agent dies.
    pub fn stop_all(&mut self, ctx: &mut BehaviorContext<'_, W>) -> TickReport {
        let mut report = TickReport::default();
        for i in 0..self.entries.len() {
            if self.entries[i].active {
                self.stop_entry(i, StopReason::Cleared, ctx, &mut report);
            }
        }
        report
    }

    // ── internals ─────────────────────────────────────────────────────────────

    fn run_active(&mut self, i: usize, ctx: &mut BehaviorContext<'_, W>, report: &mut TickReport) {
        let channels = self.entries[i].behavior.channels();
        if channels.intersects(self.disabled) {
            self.stop_entry(i, StopReason::Disabled, ctx, report);
            return;
        }
        if !self.entries[i].behavior.can_continue(ctx) {
            self.stop_entry(i, StopReason::Finished, ctx, report);
            return;
        }

        report.ticked += 1;
        if let Err(err) = self.entries[i].behavior.tick(ctx) {
            let name = self.entries[i].behavior.name().to_owned();
            warn!(agent = %ctx.agent, behavior = %name, error = %err, "behavior tick failed");
            report.events.push(BehaviorEvent::Fault { name, message: err.to_string() });
            self.stop_entry(i, StopReason::Fault, ctx, report);
        }
    }

    fn try_start(&mut self, i: usize, ctx: &mut BehaviorContext<'_, W>, report: &mut TickReport) {
        let channels = self.entries[i].behavior.channels();
        if channels.intersects(self.disabled) {
            return;
        }

        // Holders must all be strictly lower priority, checked before
        // `can_start` so a blocked behavior has no side effects.
        let priority = self.entries[i].priority;
        let mut victims: Vec<usize> = Vec::new();
        for channel in channels.iter() {
            if let Some(j) = self.owners[channel.slot()] {
                if self.entries[j].priority <= priority {
                    return;
                }
                if !victims.contains(&j) {
                    victims.push(j);
                }
            }
        }

        if !self.entries[i].behavior.can_start(ctx) {
            return;
        }

        let by = self.entries[i].behavior.name().to_owned();
        for j in victims {
            self.stop_entry(j, StopReason::Preempted { by: by.clone() }, ctx, report);
        }

        for channel in channels.iter() {
            self.owners[channel.slot()] = Some(i);
        }
        self.entries[i].active = true;
        self.entries[i].behavior.start(ctx);
        debug!(agent = %ctx.agent, behavior = %by, "behavior started");
        report.events.push(BehaviorEvent::Started { name: by });
    }

    fn stop_entry(
        &mut self,
        i:      usize,
        reason: StopReason,
        ctx:    &mut BehaviorContext<'_, W>,
        report: &mut TickReport,
    ) {
        self.entries[i].behavior.stop(ctx);
        self.entries[i].active = false;
        for owner in &mut self.owners {
            if *owner == Some(i) {
                *owner = None;
            }
        }
        let name = self.entries[i].behavior.name().to_owned();
        debug!(agent = %ctx.agent, behavior = %name, ?reason, "behavior stopped");
        report.events.push(BehaviorEvent::Stopped { name, reason });
    }
}
