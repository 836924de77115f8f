//! Unit tests for cl-transfer, run against the `cl-sim` world.

use cl_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use cl_behavior::{Behavior, BehaviorContext, ControlChannel, Scheduler};
use cl_core::{AgentId, AgentRng, ContainerId, ItemKind, Position, RoleId, SimConfig, StorageSite, WorldClock};
use cl_inventory::{Container, ContainerAccess, ItemStack, KindFilter};
use cl_mobility::Barrier;
use cl_sim::{NoopObserver, Sim, SimBuilder, World};
use cl_spatial::RecipientQuery;
use cl_task::{Stage, TravelTuning};

use crate::{TransferConfig, TransferSource, TransferTask};

// ── Helpers ───────────────────────────────────────────────────────────────────

const COURIER: AgentId = AgentId(0);
const FARMER: RoleId = RoleId(3);
const SEED: ItemKind = ItemKind(1);
const STONE: ItemKind = ItemKind(2);
const SOURCE: ContainerId = ContainerId(0);

fn x(v: f32) -> Position {
    Position::new(v, 0.0, 0.0)
}

fn tuning() -> TravelTuning {
    TravelTuning { arrive_distance_sq: 2.25, stall_limit: 5, speed: 1.0 }
}

/// Courier at x=0 and one farmer per entry in `farmers` standing at that x.
/// Farmer `i` is `AgentId(i + 1)` and owns `ContainerId(i + 1)`, placed one
/// block further along.
fn village_agents(farmers: &[f32], seed: u64) -> (AgentStore, AgentRngs) {
    let mut builder = AgentStoreBuilder::new(farmers.len() + 1, seed)
        .position(0, x(0.0))
        .speed(0, 1.0);
    for (i, &at) in farmers.iter().enumerate() {
        let chest = StorageSite::new(ContainerId(i as u32 + 1), x(at + 1.0));
        builder = builder
            .position(i + 1, x(at))
            .role(i + 1, FARMER)
            .workplace(i + 1, x(at), Some(chest));
    }
    builder.build()
}

/// Source chest (5 seeds) followed by one empty 4-slot chest per farmer.
fn village_chests(farmers: usize) -> Vec<Container> {
    std::iter::once(Container::new(9).with_stack(ItemStack::new(SEED, 5)))
        .chain((0..farmers).map(|_| Container::new(4)))
        .collect()
}

fn village(farmers: &[f32]) -> World {
    let (store, _) = village_agents(farmers, 7);
    let mut world = World::new(store);
    world.containers = village_chests(farmers.len());
    world.rebuild_index();
    world
}

fn config() -> TransferConfig {
    TransferConfig::new(
        "distribute",
        TransferSource::Storage(StorageSite::new(SOURCE, x(1.0))),
        RecipientQuery { role: FARMER, radius: 30.0 },
    )
    .with_scan_interval(1_000)
    .with_travel(tuning())
}

fn seeds() -> KindFilter {
    KindFilter::of([SEED])
}

fn count(world: &World, id: ContainerId, kind: ItemKind) -> u32 {
    world.container(id).map_or(0, |c| c.count_of(kind))
}

/// Drives one task directly, the way the scheduler would for a lone
/// behavior.
struct Bench {
    world: World,
    clock: WorldClock,
    rng:   AgentRng,
}

impl Bench {
    fn new(world: World) -> Self {
        Self { world, clock: WorldClock::new(1_000, 500), rng: AgentRng::new(7, COURIER) }
    }

    fn ctx(&mut self) -> BehaviorContext<'_, World> {
        BehaviorContext::new(COURIER, &self.clock, &mut self.rng, &mut self.world)
    }

    fn try_start(&mut self, task: &mut TransferTask) -> bool {
        let mut ctx = self.ctx();
        let ok = task.can_start(&mut ctx);
        if ok {
            task.start(&mut ctx);
        }
        ok
    }

    /// One tick: behavior, then movement, then clock.
    fn tick(&mut self, task: &mut TransferTask) {
        self.world.rebuild_index();
        let mut ctx = self.ctx();
        if task.can_continue(&mut ctx) {
            task.tick(&mut ctx).unwrap();
        }
        self.world.step_movement();
        self.clock.advance();
    }

    fn tick_until(&mut self, task: &mut TransferTask, mut cond: impl FnMut(&TransferTask) -> bool) {
        for _ in 0..300 {
            if cond(task) {
                return;
            }
            self.tick(task);
        }
        panic!("condition never reached; stage = {}", task.stage());
    }

    fn run_to_done(&mut self, task: &mut TransferTask) {
        self.tick_until(task, |t| t.stage() == Stage::Done);
    }

    fn stop(&mut self, task: &mut TransferTask) {
        let mut ctx = self.ctx();
        task.stop(&mut ctx);
    }
}

// ── Full cycle ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle {
    use super::*;

    #[test]
    fn one_unit_reaches_the_recipient() {
        let mut bench = Bench::new(village(&[6.0]));
        let mut task = TransferTask::new(config(), seeds());

        assert!(bench.try_start(&mut task));
        bench.run_to_done(&mut task);

        assert_eq!(count(&bench.world, SOURCE, SEED), 4);
        assert_eq!(count(&bench.world, ContainerId(1), SEED), 1);
        assert_eq!(bench.world.total_of(SEED), 5);
        assert_eq!(task.stats().delivered, 1);
        assert!(task.pending().is_none());
        assert!(bench.world.container(ContainerId(1)).unwrap().is_dirty());
    }

    #[test]
    fn unit_is_owned_by_the_task_in_flight() {
        let mut bench = Bench::new(village(&[6.0]));
        let mut task = TransferTask::new(config(), seeds());

        bench.try_start(&mut task);
        bench.tick_until(&mut task, |t| t.pending().is_some());
        assert_eq!(count(&bench.world, SOURCE, SEED), 4);
        assert_eq!(bench.world.total_of(SEED), 4);
        let in_flight = Behavior::<World>::in_flight(&task).map(|s| s.count);
        assert_eq!(in_flight, Some(1));
    }

    #[test]
    fn nearest_recipient_is_served_first() {
        let mut bench = Bench::new(village(&[14.0, 6.0]));
        let mut task = TransferTask::new(config(), seeds());

        bench.try_start(&mut task);
        bench.run_to_done(&mut task);
        assert_eq!(count(&bench.world, ContainerId(2), SEED), 1);
        assert_eq!(count(&bench.world, ContainerId(1), SEED), 0);
    }

    #[test]
    fn full_recipient_falls_through_to_next() {
        let mut bench = Bench::new(village(&[6.0, 12.0]));
        let mut task = TransferTask::new(config(), seeds());

        bench.try_start(&mut task);
        bench.tick_until(&mut task, |t| t.pending().is_some());
        let first = task.pending().and_then(|p| p.current).map(|r| r.agent);
        assert_eq!(first, Some(AgentId(1)));

        // Someone else fills the nearest chest while the courier walks.
        let chest = bench.world.container_mut(ContainerId(1)).unwrap();
        assert!(chest.insert(ItemStack::new(STONE, 4 * 64)).is_none());

        bench.run_to_done(&mut task);
        assert_eq!(count(&bench.world, ContainerId(2), SEED), 1);
        assert_eq!(count(&bench.world, SOURCE, SEED), 4);
        assert_eq!(task.stats().delivered, 1);
    }

    #[test]
    fn carried_source_skips_travel_to_source() {
        let mut world = village(&[6.0]);
        let bag = world.add_container(Container::new(2).with_stack(ItemStack::new(SEED, 2)));
        let mut bench = Bench::new(world);
        let mut cfg = config();
        cfg.source = TransferSource::Carried(bag);
        let mut task = TransferTask::new(cfg, seeds());

        assert!(bench.try_start(&mut task));
        assert_eq!(task.stage(), Stage::Acting);
        bench.run_to_done(&mut task);
        assert_eq!(count(&bench.world, bag, SEED), 1);
        assert_eq!(count(&bench.world, ContainerId(1), SEED), 1);
        assert_eq!(count(&bench.world, SOURCE, SEED), 5);
    }
}

// ── Start checks ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod start_checks {
    use super::*;

    #[test]
    fn nothing_distributable_means_no_start() {
        let mut bench = Bench::new(village(&[6.0]));
        let mut task = TransferTask::new(config(), KindFilter::of([STONE]));
        assert!(!bench.try_start(&mut task));
    }

    #[test]
    fn no_recipient_in_range_means_no_start() {
        let mut bench = Bench::new(village(&[60.0]));
        let mut task = TransferTask::new(config(), seeds());
        assert!(!bench.try_start(&mut task));
    }

    #[test]
    fn recipient_without_room_is_not_eligible() {
        let mut world = village(&[6.0]);
        world.containers[1] = Container::new(1).with_stack(ItemStack::new(STONE, 64));
        let mut bench = Bench::new(world);
        let mut task = TransferTask::new(config(), seeds());
        assert!(!bench.try_start(&mut task));
        assert_eq!(count(&bench.world, SOURCE, SEED), 5);
    }

    #[test]
    fn storage_not_next_to_job_site_is_ignored() {
        let mut world = village(&[6.0]);
        world.agents.storage[1] = Some(StorageSite::new(ContainerId(1), x(20.0)));
        let mut bench = Bench::new(world);
        let mut task = TransferTask::new(config(), seeds());
        assert!(!bench.try_start(&mut task));
    }

    #[test]
    fn cooldown_gates_rescans_until_woken() {
        let mut bench = Bench::new(village(&[60.0]));
        let mut task = TransferTask::new(config(), seeds());
        assert!(!bench.try_start(&mut task));

        // Recipient walks into range, but the scan is on cooldown.
        bench.world.agents.position[1] = x(6.0);
        bench.world.agents.job_site[1] = Some(x(6.0));
        bench.world.agents.storage[1] = Some(StorageSite::new(ContainerId(1), x(7.0)));
        bench.world.rebuild_index();
        assert!(!bench.try_start(&mut task));

        Behavior::<World>::wake(&mut task);
        assert!(bench.try_start(&mut task));
    }
}

// ── Failure and rollback ──────────────────────────────────────────────────────

#[cfg(test)]
mod rollback {
    use super::*;

    #[test]
    fn recipient_lost_in_flight_returns_unit_to_source() {
        let mut bench = Bench::new(village(&[6.0]));
        let mut task = TransferTask::new(config(), seeds());

        bench.try_start(&mut task);
        bench.tick_until(&mut task, |t| t.pending().is_some());
        bench.world.kill(AgentId(1));

        bench.run_to_done(&mut task);
        assert_eq!(count(&bench.world, SOURCE, SEED), 5);
        assert_eq!(count(&bench.world, ContainerId(1), SEED), 0);
        assert_eq!(task.stats().returned, 1);
        assert!(task.pending().is_none());
    }

    #[test]
    fn full_source_falls_back_to_carry() {
        let mut world = village(&[6.0]);
        world.containers[0] = Container::new(1).with_stack_limit(5).with_stack(ItemStack::new(SEED, 5));
        let bag = world.add_container(Container::new(1));
        let mut bench = Bench::new(world);
        let mut task = TransferTask::new(config().with_carry(bag), seeds());

        bench.try_start(&mut task);
        bench.tick_until(&mut task, |t| t.pending().is_some());
        bench.world.kill(AgentId(1));
        bench.world.container_mut(SOURCE).unwrap().insert(ItemStack::new(SEED, 1));

        bench.run_to_done(&mut task);
        assert_eq!(count(&bench.world, bag, SEED), 1);
        assert_eq!(task.stats().carried, 1);
        assert_eq!(bench.world.total_of(SEED), 6);
    }

    #[test]
    fn nowhere_to_put_it_spills_into_world() {
        let mut world = village(&[6.0]);
        world.containers[0] = Container::new(1).with_stack_limit(5).with_stack(ItemStack::new(SEED, 5));
        let mut bench = Bench::new(world);
        let mut task = TransferTask::new(config(), seeds());

        bench.try_start(&mut task);
        bench.tick_until(&mut task, |t| t.pending().is_some());
        bench.world.kill(AgentId(1));
        bench.world.container_mut(SOURCE).unwrap().insert(ItemStack::new(SEED, 1));

        bench.run_to_done(&mut task);
        assert_eq!(task.stats().spilled, 1);
        assert_eq!(bench.world.spilled().len(), 1);
        assert_eq!(bench.world.total_of(SEED), 6);
    }

    #[test]
    fn blocked_route_stalls_and_returns() {
        let mut world = village(&[6.0]);
        world.barriers.push(Barrier::new(Position::new(2.5, -1.0, -1.0), Position::new(3.5, 1.0, 1.0)));
        let mut bench = Bench::new(world);
        let mut task = TransferTask::new(config(), seeds());

        bench.try_start(&mut task);
        bench.tick_until(&mut task, |t| matches!(t.stage(), Stage::Returning { .. }));
        assert!(task.pending().is_some());

        bench.run_to_done(&mut task);
        assert_eq!(count(&bench.world, SOURCE, SEED), 5);
        assert_eq!(task.stats().returned, 1);
    }

    #[test]
    fn stop_mid_transfer_restores_unit() {
        let mut bench = Bench::new(village(&[6.0]));
        let mut task = TransferTask::new(config(), seeds());

        bench.try_start(&mut task);
        bench.tick_until(&mut task, |t| t.pending().is_some());
        bench.stop(&mut task);

        assert_eq!(task.stage(), Stage::Idle);
        assert!(task.pending().is_none());
        assert_eq!(count(&bench.world, SOURCE, SEED), 5);
    }
}

// ── Through the scheduler ─────────────────────────────────────────────────────

#[cfg(test)]
mod scheduled {
    use super::*;

    fn sim_for(farmers: &[f32], cfg: TransferConfig, seed: u64) -> Sim {
        let config = SimConfig { total_ticks: 10_000, ticks_per_day: 1_000, daylight_ticks: 500, seed, report_interval_ticks: 0 };
        let (agents, rngs) = village_agents(farmers, seed);
        SimBuilder::new(config, agents, rngs)
            .containers(village_chests(farmers.len()))
            .scheduler(0, Scheduler::new().with(5, Box::new(TransferTask::new(cfg, seeds()))))
            .build()
            .unwrap()
    }

    #[test]
    fn scheduler_runs_a_full_cycle() {
        let mut sim = sim_for(&[6.0], config(), 1);
        sim.run_ticks(40, &mut NoopObserver).unwrap();

        assert_eq!(count(&sim.world, SOURCE, SEED), 4);
        assert_eq!(count(&sim.world, ContainerId(1), SEED), 1);
        assert_eq!(sim.scheduler(COURIER).unwrap().holder(ControlChannel::Movement), None);
    }

    #[test]
    fn repeated_cycles_drain_the_source() {
        let mut sim = sim_for(&[6.0], config().with_scan_interval(1), 2);
        sim.run_ticks(400, &mut NoopObserver).unwrap();

        assert_eq!(count(&sim.world, SOURCE, SEED), 0);
        assert_eq!(count(&sim.world, ContainerId(1), SEED), 5);
    }

    /// Seeded scenarios with recipients dying, chests filling and walls
    /// appearing.  The seed total never changes at any tick boundary.
    #[test]
    fn conservation_under_disruption() {
        for seed in 0..25u64 {
            let mut rng = AgentRng::new(seed, AgentId(0));
            let n = rng.gen_range(1..4usize);
            let farmers: Vec<f32> = (0..n).map(|_| rng.gen_range(3.0..20.0f32)).collect();
            let mut sim = sim_for(&farmers, config().with_scan_interval(3), seed);
            let kill_at = rng.gen_range(0..60u64);
            let wall_at = rng.gen_range(0..60u64);
            let victim = AgentId(rng.gen_range(1..=n as u32));

            for t in 0..150u64 {
                if t == kill_at {
                    sim.world.kill(victim);
                }
                if t == wall_at {
                    sim.world.barriers.push(Barrier::new(
                        Position::new(4.0, -1.0, -1.0),
                        Position::new(4.5, 1.0, 1.0),
                    ));
                }
                if t == 30 {
                    let chest = ContainerId(rng.gen_range(1..=n as u32));
                    if let Some(c) = sim.world.container_mut(chest) {
                        let _ = c.insert(ItemStack::new(STONE, 200));
                    }
                }
                sim.run_ticks(1, &mut NoopObserver).unwrap();
                assert_eq!(sim.total_of(SEED), 5, "seed {seed} tick {t}");
            }
        }
    }
}
