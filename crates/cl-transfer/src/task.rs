//! The inventory transfer behavior.

use tracing::{debug, info, warn};

use cl_behavior::{Behavior, BehaviorContext, BehaviorError, BehaviorResult, ChannelSet, ControlChannel};
use cl_core::{AgentId, ContainerId};
use cl_inventory::{ItemFilter, ItemStack};
use cl_spatial::{find_eligible, still_eligible, RecipientRecord};
use cl_task::{Cooldown, Stage, TaskMachine, TravelEvent};

use crate::{PendingTransfer, TransferConfig, TransferSource, TransferWorld};

/// Running totals over the task's lifetime, in units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferStats {
    /// Inserted into a recipient's storage.
    pub delivered: u32,
    /// Put back into the source on rollback.
    pub returned:  u32,
    /// Source was full on rollback; went to the carry container.
    pub carried:   u32,
    /// Nowhere had room; dropped into the world.
    pub spilled:   u32,
}

/// Moves one unit per cycle from a source container to an eligible
/// recipient's storage.
///
/// `filter` decides which stacks are distributable.  Recipients come from
/// [`find_eligible`] with the configured query and must pass a dry-run
/// `can_accept` for the unit before the task commits to them.
pub struct TransferTask {
    config:   TransferConfig,
    filter:   Box<dyn ItemFilter>,
    machine:  TaskMachine,
    cooldown: Cooldown,
    /// Source slot picked by the last successful `can_start`.
    selected: Option<usize>,
    pending:  Option<PendingTransfer>,
    stats:    TransferStats,
}

impl TransferTask {
    pub fn new(config: TransferConfig, filter: impl ItemFilter + 'static) -> Self {
        Self {
            machine:  TaskMachine::new(config.travel),
            cooldown: Cooldown::new(config.scan_interval),
            filter:   Box::new(filter),
            selected: None,
            pending:  None,
            stats:    TransferStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    pub fn stats(&self) -> TransferStats {
        self.stats
    }

    pub fn stage(&self) -> Stage {
        self.machine.stage()
    }

    pub fn pending(&self) -> Option<&PendingTransfer> {
        self.pending.as_ref()
    }

    // ── Checks (no mutation) ──────────────────────────────────────────────

    /// Recipients that would take `unit` right now, nearest first.
    fn recipients_for<W>(&self, world: &W, agent: AgentId, unit: &ItemStack) -> Vec<RecipientRecord>
    where
        W: TransferWorld + ?Sized,
    {
        let source = self.config.source.container();
        find_eligible(world, agent, &self.config.query)
            .into_iter()
            .filter(|r| r.storage.container != source)
            .filter(|r| world.container(r.storage.container).is_some_and(|c| c.can_accept(unit)))
            .collect()
    }

    /// First source slot holding a distributable stack that some recipient
    /// can take a unit of.
    fn select_slot<W>(&self, world: &W, agent: AgentId) -> Option<usize>
    where
        W: TransferWorld + ?Sized,
    {
        let source_id = self.config.source.container();
        let source = world.container(source_id)?;
        let records: Vec<RecipientRecord> = find_eligible(world, agent, &self.config.query)
            .into_iter()
            .filter(|r| r.storage.container != source_id)
            .collect();
        if records.is_empty() {
            return None;
        }

        source
            .iter()
            .filter(|(_, s)| self.filter.accepts(s))
            .find(|(_, s)| {
                let unit = s.single();
                records
                    .iter()
                    .any(|r| world.container(r.storage.container).is_some_and(|c| c.can_accept(&unit)))
            })
            .map(|(slot, _)| slot)
    }

    fn slot_qualifies<W>(&self, world: &W, slot: usize) -> bool
    where
        W: TransferWorld + ?Sized,
    {
        world
            .container(self.config.source.container())
            .and_then(|c| c.get(slot))
            .is_some_and(|s| self.filter.accepts(s))
    }

    // ── Acting ────────────────────────────────────────────────────────────

    /// At the source: split one unit off and head for the nearest recipient.
    fn extract<W>(&mut self, world: &mut W, agent: AgentId) -> BehaviorResult<()>
    where
        W: TransferWorld + ?Sized,
    {
        let source_id = self.config.source.container();
        let origin = match self.config.source.position().or_else(|| world.position_of(agent)) {
            Some(p) => p,
            None => {
                self.machine.finish();
                return Ok(());
            }
        };

        let slot = match self.selected.take().filter(|&s| self.slot_qualifies(world, s)) {
            Some(s) => Some(s),
            None => self.select_slot(world, agent),
        };
        let Some(slot) = slot else {
            debug!(agent = %agent, "source no longer holds anything to move");
            self.machine.finish();
            return Ok(());
        };

        let preview = world
            .container(source_id)
            .and_then(|c| c.get(slot))
            .map(ItemStack::single)
            .ok_or(BehaviorError::MissingContainer(source_id))?;
        let candidates = self.recipients_for(world, agent, &preview);
        if candidates.is_empty() {
            debug!(agent = %agent, kind = %preview.kind, "no recipient can take the unit");
            self.machine.finish();
            return Ok(());
        }

        let unit = world
            .container_mut(source_id)
            .ok_or(BehaviorError::MissingContainer(source_id))?
            .take_one(slot)?;
        debug!(
            agent = %agent,
            kind = %unit.kind,
            slot,
            candidates = candidates.len(),
            "unit extracted"
        );
        self.pending = Some(PendingTransfer::new(unit, slot, origin, candidates));
        self.next_recipient(world, agent);
        Ok(())
    }

    /// At a recipient: re-check it and insert.
    fn deliver<W>(&mut self, world: &mut W, agent: AgentId)
    where
        W: TransferWorld + ?Sized,
    {
        let role = self.config.query.role;
        let Some(pending) = self.pending.as_mut() else { return };
        let Some(record) = pending.current else {
            self.next_recipient(world, agent);
            return;
        };

        if !still_eligible(&*world, &record, role) {
            debug!(agent = %agent, recipient = %record.agent, "recipient no longer eligible");
            self.next_recipient(world, agent);
            return;
        }
        let Some(container) = world.container_mut(record.storage.container) else {
            self.next_recipient(world, agent);
            return;
        };

        let offered = pending.stack.count;
        match container.insert(pending.stack.clone()) {
            None => {
                self.stats.delivered += offered;
                info!(
                    agent = %agent,
                    recipient = %record.agent,
                    kind = %pending.stack.kind,
                    count = offered,
                    "transfer committed"
                );
                self.pending = None;
                self.machine.finish();
            }
            Some(rest) => {
                self.stats.delivered += offered - rest.count;
                debug!(agent = %agent, recipient = %record.agent, left = rest.count, "recipient full");
                pending.stack = rest;
                self.next_recipient(world, agent);
            }
        }
    }

    /// Head for the next recipient that still qualifies, or start the way
    /// back.
    fn next_recipient<W>(&mut self, world: &mut W, agent: AgentId)
    where
        W: TransferWorld + ?Sized,
    {
        let role = self.config.query.role;
        let Some(pending) = self.pending.as_mut() else { return };

        while let Some(record) = pending.remaining.pop_front() {
            let fits = world
                .container(record.storage.container)
                .is_some_and(|c| c.can_accept(&pending.stack));
            if fits && still_eligible(&*world, &record, role) {
                pending.current = Some(record);
                self.machine.travel_to(record.storage.position, Some(pending.origin));
                return;
            }
        }

        pending.current = None;
        let origin = pending.origin;
        match self.config.source {
            TransferSource::Carried(_) => {
                debug!(agent = %agent, "no recipient left, restoring unit");
                self.rollback(world, agent);
                self.machine.finish();
            }
            TransferSource::Storage(_) => {
                debug!(agent = %agent, "no recipient left, returning to source");
                self.machine.return_to(origin);
            }
        }
    }

    /// Put the unit in flight back: source first, then the carry container,
    /// then the ground.
    fn rollback<W>(&mut self, world: &mut W, agent: AgentId)
    where
        W: TransferWorld + ?Sized,
    {
        let Some(pending) = self.pending.take() else { return };
        let mut stack = pending.stack;

        let source = self.config.source.container();
        let (moved, rest) = stash(&mut *world, source, stack);
        self.stats.returned += moved;
        let Some(rest) = rest else {
            debug!(agent = %agent, slot = pending.source_slot, "unit returned to source");
            return;
        };
        stack = rest;

        if let Some(carry) = self.config.carry {
            let (moved, rest) = stash(&mut *world, carry, stack);
            self.stats.carried += moved;
            let Some(rest) = rest else {
                debug!(agent = %agent, "unit moved to carry container");
                return;
            };
            stack = rest;
        }

        let at = world.position_of(agent).unwrap_or(pending.origin);
        warn!(agent = %agent, kind = %stack.kind, count = stack.count, %at, "no room anywhere, dropping unit");
        self.stats.spilled += stack.count;
        world.spill(at, stack);
    }
}

/// Insert into container `id` if it resolves.  Returns the units moved and
/// whatever is left.
fn stash<W>(world: &mut W, id: ContainerId, stack: ItemStack) -> (u32, Option<ItemStack>)
where
    W: TransferWorld + ?Sized,
{
    let offered = stack.count;
    match world.container_mut(id) {
        Some(container) => {
            let rest = container.insert(stack);
            (offered - rest.as_ref().map_or(0, |r| r.count), rest)
        }
        None => (0, Some(stack)),
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

impl<W> Behavior<W> for TransferTask
where
    W: TransferWorld + ?Sized,
{
    fn name(&self) -> &str {
        &self.config.name
    }

    fn channels(&self) -> ChannelSet {
        ChannelSet::of(&[ControlChannel::Movement, ControlChannel::TargetSelection])
    }

    fn can_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        let now = ctx.now();
        if !self.cooldown.ready(now) {
            return false;
        }
        self.cooldown.arm(now);

        self.selected = self.select_slot(&*ctx.world, ctx.agent);
        debug!(agent = %ctx.agent, task = %self.config.name, ready = self.selected.is_some(), "transfer scan");
        self.selected.is_some()
    }

    fn can_continue(&mut self, _ctx: &mut BehaviorContext<'_, W>) -> bool {
        self.machine.is_running()
    }

    fn start(&mut self, _ctx: &mut BehaviorContext<'_, W>) {
        match self.config.source.position() {
            Some(at) => self.machine.travel_to(at, None),
            None => self.machine.act(),
        }
    }

    fn tick(&mut self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<()> {
        let agent = ctx.agent;
        match self.machine.stage() {
            Stage::Traveling { .. } | Stage::Returning { .. } => {
                match self.machine.advance(agent, &mut *ctx.world) {
                    TravelEvent::ArrivedBack => {
                        self.rollback(&mut *ctx.world, agent);
                        self.machine.finish();
                    }
                    TravelEvent::GaveUp => self.rollback(&mut *ctx.world, agent),
                    _ => {}
                }
            }
            Stage::Acting if self.pending.is_none() => self.extract(&mut *ctx.world, agent)?,
            Stage::Acting => self.deliver(&mut *ctx.world, agent),
            Stage::Idle | Stage::Done => {}
        }
        Ok(())
    }

    fn stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if self.pending.is_some() {
            debug!(agent = %ctx.agent, task = %self.config.name, "stopped mid-transfer, rolling back");
            self.rollback(&mut *ctx.world, ctx.agent);
        }
        self.machine.reset();
        self.selected = None;
    }

    fn wake(&mut self) {
        self.cooldown.trigger_immediate();
    }

    fn in_flight(&self) -> Option<&ItemStack> {
        self.pending.as_ref().map(|p| &p.stack)
    }
}
