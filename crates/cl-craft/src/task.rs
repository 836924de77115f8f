//! The transformation (crafting) behavior.

use std::sync::Arc;

use tracing::{debug, info, warn};

use cl_behavior::{Behavior, BehaviorContext, BehaviorError, BehaviorResult, ChannelSet, ControlChannel};
use cl_core::{AgentId, AgentRng, CategoryId, ContainerId, ItemKind, Position};
use cl_inventory::{Container, ContainerAccess};
use cl_mobility::Locomotion;
use cl_task::{Cooldown, DailyQuota, Stage, TaskMachine, TravelEvent, TravelTuning};

use crate::{
    match_rule, reachable_states, satisfiable_rules, Catalog, CraftError, CraftPlan, NextStep,
    RuleMatch, TransformationGraph,
};

/// How the next rule is chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CraftStrategy {
    /// Uniformly at random among satisfiable rules, avoiding a repeat of the
    /// last output when there is an alternative.
    Varied,
    /// Work toward `target` through the catalog's two-input rules, then
    /// apply `modifier` once the target is held.
    Toward {
        target:   ItemKind,
        modifier: Option<ItemKind>,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftConfig {
    /// Behavior name for logs and reports.
    pub name:          String,
    /// The inventory inputs come from and outputs go to.
    pub inventory:     ContainerId,
    /// Only rules of this category are considered.
    pub category:      CategoryId,
    /// Walk here before crafting, if set.
    pub workstation:   Option<Position>,
    /// Crafts allowed per in-game day.
    pub daily_limit:   u32,
    /// Ticks between rule scans in `can_start`.
    pub scan_interval: u64,
    pub strategy:      CraftStrategy,
    pub travel:        TravelTuning,
}

impl CraftConfig {
    pub fn new(name: impl Into<String>, inventory: ContainerId, category: CategoryId) -> Self {
        Self {
            name:          name.into(),
            inventory,
            category,
            workstation:   None,
            daily_limit:   u32::MAX,
            scan_interval: 0,
            strategy:      CraftStrategy::Varied,
            travel:        TravelTuning::default(),
        }
    }

    pub fn at_workstation(mut self, at: Position) -> Self {
        self.workstation = Some(at);
        self
    }

    pub fn with_daily_limit(mut self, limit: u32) -> Self {
        self.daily_limit = limit;
        self
    }

    pub fn with_scan_interval(mut self, ticks: u64) -> Self {
        self.scan_interval = ticks;
        self
    }

    pub fn with_strategy(mut self, strategy: CraftStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_travel(mut self, travel: TravelTuning) -> Self {
        self.travel = travel;
        self
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftStats {
    pub crafted:    u32,
    /// Commits refused because the inventory changed after planning.
    pub mismatches: u32,
    /// Chosen rules whose output would not have fit.
    pub infeasible: u32,
}

/// Consumes held inputs and produces an output according to a shared
/// catalog, one rule application per cycle.
pub struct CraftTask {
    config:      CraftConfig,
    catalog:     Arc<Catalog>,
    graph:       Option<TransformationGraph>,
    machine:     TaskMachine,
    cooldown:    Cooldown,
    quota:       DailyQuota,
    last_output: Option<ItemKind>,
    plan:        Option<CraftPlan>,
    stats:       CraftStats,
}

impl CraftTask {
    pub fn new(config: CraftConfig, catalog: Arc<Catalog>) -> Self {
        let graph = match config.strategy {
            CraftStrategy::Toward { .. } => {
                Some(TransformationGraph::from_catalog(&catalog, Some(config.category)))
            }
            CraftStrategy::Varied => None,
        };
        Self {
            machine:     TaskMachine::new(config.travel),
            cooldown:    Cooldown::new(config.scan_interval),
            quota:       DailyQuota::new(config.daily_limit),
            graph,
            catalog,
            last_output: None,
            plan:        None,
            stats:       CraftStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &CraftConfig {
        &self.config
    }

    pub fn stats(&self) -> CraftStats {
        self.stats
    }

    pub fn quota(&self) -> &DailyQuota {
        &self.quota
    }

    pub fn last_output(&self) -> Option<ItemKind> {
        self.last_output
    }

    pub fn stage(&self) -> Stage {
        self.machine.stage()
    }

    pub fn planned(&self) -> Option<&CraftPlan> {
        self.plan.as_ref()
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Pick a rule and prove it on a snapshot of the inventory.
    fn plan_next<W>(&mut self, world: &W, agent: AgentId, rng: &mut AgentRng) -> Option<CraftPlan>
    where
        W: ContainerAccess + ?Sized,
    {
        let inventory = world.container(self.config.inventory)?;
        let matched = match self.config.strategy {
            CraftStrategy::Varied => self.pick_varied(inventory, rng),
            CraftStrategy::Toward { target, modifier } => self.pick_toward(inventory, target, modifier),
        }?;
        let rule = self.catalog.rule(matched.rule)?;

        let plan = CraftPlan::simulate(rule, &matched, inventory);
        if plan.is_none() {
            self.stats.infeasible += 1;
            debug!(agent = %agent, rule = %rule.id, "output would not fit, skipping");
        }
        plan
    }

    fn pick_varied(&self, inventory: &Container, rng: &mut AgentRng) -> Option<RuleMatch> {
        let candidates = satisfiable_rules(&self.catalog, self.config.category, inventory);
        if candidates.len() <= 1 {
            return candidates.into_iter().next();
        }

        let output_of = |m: &RuleMatch| self.catalog.rule(m.rule).map(|r| r.output.kind);
        let fresh: Vec<RuleMatch> = match self.last_output {
            Some(last) => candidates
                .iter()
                .filter(|m| output_of(m) != Some(last))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        let pool = if fresh.is_empty() { &candidates } else { &fresh };
        rng.choose(pool.as_slice()).cloned()
    }

    fn pick_toward(&self, inventory: &Container, target: ItemKind, modifier: Option<ItemKind>) -> Option<RuleMatch> {
        let graph = self.graph.as_ref()?;
        let mut held: Vec<ItemKind> = Vec::new();
        for (_, stack) in inventory.iter() {
            if !held.contains(&stack.kind) {
                held.push(stack.kind);
            }
        }
        let reagents: Vec<ItemKind> = graph
            .reagents()
            .iter()
            .copied()
            .filter(|r| held.contains(r))
            .collect();

        // Holding the target already: only a wanted modifier is left to do.
        if held.contains(&target) {
            let reach = reachable_states(graph, target, &reagents);
            return match reach.next_step(&target, modifier.as_ref()) {
                NextStep::Modifier(m) => self.bind_edge(graph, inventory, target, m),
                _ => None,
            };
        }

        // Otherwise the held state with the shortest path wins; ties go to
        // the earlier slot.
        let mut best: Option<(usize, ItemKind, ItemKind)> = None;
        for &start in held.iter().filter(|&&k| graph.is_state(k)) {
            let reach = reachable_states(graph, start, &reagents);
            let Some(path) = reach.path_to(&target) else { continue };
            let Some(&first) = path.first() else { continue };
            if best.is_none_or(|(len, _, _)| path.len() < len) {
                best = Some((path.len(), start, first));
            }
        }
        let (_, base, reagent) = best?;
        self.bind_edge(graph, inventory, base, reagent)
    }

    fn bind_edge(
        &self,
        graph:     &TransformationGraph,
        inventory: &Container,
        base:      ItemKind,
        reagent:   ItemKind,
    ) -> Option<RuleMatch> {
        let rule = self.catalog.rule(graph.rule_for(base, reagent)?)?;
        let matched = match_rule(rule, inventory, self.catalog.tags())?;

        // A rule whose output would stack with the base it consumes changes
        // nothing but the reagent count: the modifier is already applied.
        let consumed = matched.slots.first().and_then(|&slot| inventory.get(slot))?;
        if rule.output.stacks_with(consumed) {
            debug!(rule = %rule.id, base = %base, "modifier already applied");
            return None;
        }
        Some(matched)
    }

    // ── Acting ────────────────────────────────────────────────────────────

    fn commit<W>(&mut self, world: &mut W, agent: AgentId, rng: &mut AgentRng) -> BehaviorResult<()>
    where
        W: ContainerAccess + ?Sized,
    {
        let Some(plan) = self.plan.take() else {
            self.machine.finish();
            return Ok(());
        };
        let id = self.config.inventory;
        let live = world.container_mut(id).ok_or(BehaviorError::MissingContainer(id))?;

        match plan.commit(id, live) {
            Ok(()) => {
                self.quota.consume();
                self.last_output = Some(plan.output.kind);
                self.stats.crafted += 1;
                info!(agent = %agent, rule = %plan.rule, output = %plan.output, "craft committed");
                self.machine.finish();
                Ok(())
            }
            Err(CraftError::Mismatch(_)) => {
                self.stats.mismatches += 1;
                warn!(agent = %agent, rule = %plan.rule, container = %id, "inventory changed since planning, retrying");
                self.plan = self.plan_next(&*world, agent, rng);
                if self.plan.is_none() {
                    self.machine.finish();
                }
                Ok(())
            }
            Err(err) => Err(BehaviorError::Fault(err.to_string())),
        }
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

impl<W> Behavior<W> for CraftTask
where
    W: ContainerAccess + Locomotion + ?Sized,
{
    fn name(&self) -> &str {
        &self.config.name
    }

    fn channels(&self) -> ChannelSet {
        ControlChannel::Movement.into()
    }

    fn can_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        self.quota.refresh(ctx.clock.day());
        if !self.quota.available() {
            return false;
        }
        let now = ctx.now();
        if !self.cooldown.ready(now) {
            return false;
        }
        self.cooldown.arm(now);

        self.plan = self.plan_next(&*ctx.world, ctx.agent, &mut *ctx.rng);
        debug!(
            agent = %ctx.agent,
            task = %self.config.name,
            rule = ?self.plan.as_ref().map(|p| p.rule),
            "craft scan"
        );
        self.plan.is_some()
    }

    fn can_continue(&mut self, _ctx: &mut BehaviorContext<'_, W>) -> bool {
        self.machine.is_running()
    }

    fn start(&mut self, _ctx: &mut BehaviorContext<'_, W>) {
        match self.config.workstation {
            Some(at) => self.machine.travel_to(at, None),
            None => self.machine.act(),
        }
    }

    fn tick(&mut self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<()> {
        match self.machine.stage() {
            Stage::Traveling { .. } | Stage::Returning { .. } => {
                if self.machine.advance(ctx.agent, &mut *ctx.world) == TravelEvent::GaveUp {
                    debug!(agent = %ctx.agent, "workstation unreachable");
                    self.plan = None;
                }
                Ok(())
            }
            Stage::Acting => self.commit(&mut *ctx.world, ctx.agent, &mut *ctx.rng),
            Stage::Idle | Stage::Done => Ok(()),
        }
    }

    fn stop(&mut self, _ctx: &mut BehaviorContext<'_, W>) {
        self.machine.reset();
        self.plan = None;
    }

    fn wake(&mut self) {
        self.cooldown.trigger_immediate();
    }
}
