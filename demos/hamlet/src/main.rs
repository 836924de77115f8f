//! hamlet — smallest end-to-end run of the rust_colony behavior core.
//!
//! Agent 0 is a courier standing next to the granary.  Agents 1 and 2 are
//! bakers with a chest beside their oven.  The courier hands grain to the
//! bakers one unit at a time; the bakers turn it into flour and bread.
//!
//! ```bash
//! RUST_LOG=info cargo run -p hamlet -- [settings.toml]
//! ```

use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cl_agent::AgentStoreBuilder;
use cl_behavior::{BehaviorEvent, Scheduler};
use cl_core::{AgentId, CategoryId, ContainerId, ItemKind, Position, RoleId, SimConfig, StorageSite, Tick};
use cl_craft::{Catalog, CraftConfig, CraftTask, load_rules_reader};
use cl_inventory::{Container, ItemStack, KindFilter};
use cl_sim::{Settings, SimBuilder, SimObserver, World};
use cl_spatial::RecipientQuery;
use cl_task::TravelTuning;
use cl_transfer::{TransferConfig, TransferSource, TransferTask};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:    u64    = 42;
const BAKER:   RoleId = RoleId(1);
const KITCHEN: CategoryId = CategoryId(1);

const GRAIN: ItemKind = ItemKind(1);
const FLOUR: ItemKind = ItemKind(2);
const BREAD: ItemKind = ItemKind(3);

const GRANARY: ContainerId = ContainerId(0);

// rule_id,category,inputs,output_kind,output_count
const RECIPES_CSV: &str = "\
rule_id,category,inputs,output_kind,output_count\n\
0,1,1,2,1\n\
1,1,1+2,3,2\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct HamletObserver {
    starts: usize,
    faults: usize,
}

impl SimObserver for HamletObserver {
    fn on_behavior_event(&mut self, _tick: Tick, _agent: AgentId, event: &BehaviorEvent) {
        match event {
            BehaviorEvent::Started { .. } => self.starts += 1,
            BehaviorEvent::Fault { .. } => self.faults += 1,
            BehaviorEvent::Stopped { .. } => {}
        }
    }

    fn on_report(&mut self, tick: Tick, world: &World) {
        info!(
            %tick,
            grain = world.total_of(GRAIN),
            flour = world.total_of(FLOUR),
            bread = world.total_of(BREAD),
            "hamlet report"
        );
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn settings() -> Result<Settings> {
    match std::env::args().nth(1) {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings {
            sim: SimConfig {
                total_ticks:           2_400,
                ticks_per_day:         1_200,
                daylight_ticks:        600,
                seed:                  SEED,
                report_interval_ticks: 400,
            },
            travel: TravelTuning::default(),
        }),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let settings = settings()?;

    let granary_at = Position::new(0.0, 0.0, 0.0);
    let ovens = [Position::new(10.0, 0.0, 0.0), Position::new(-6.0, 0.0, 8.0)];
    let chests = [Position::new(11.0, 0.0, 0.0), Position::new(-6.0, 0.0, 9.0)];

    // 1. Agents.
    let mut builder = AgentStoreBuilder::new(3, settings.sim.seed).position(0, Position::new(1.0, 0.0, 0.0));
    for (i, (&oven, &chest)) in ovens.iter().zip(&chests).enumerate() {
        let idx = i + 1;
        builder = builder
            .role(idx, BAKER)
            .position(idx, oven)
            .workplace(idx, oven, Some(StorageSite::new(ContainerId(idx as u32), chest)));
    }
    let (agents, rngs) = builder.build();

    // 2. Containers: the granary, then one chest per baker.
    let containers = vec![
        Container::new(9).with_stack(ItemStack::new(GRAIN, 24)),
        Container::new(4),
        Container::new(4),
    ];

    // 3. Behaviors.
    let catalog = Arc::new(Catalog::new(load_rules_reader(Cursor::new(RECIPES_CSV))?, Default::default()));
    info!(rules = catalog.len(), "recipes loaded");

    let courier = TransferConfig::new(
        "deliver grain",
        TransferSource::Storage(StorageSite::new(GRANARY, granary_at)),
        RecipientQuery { role: BAKER, radius: 32.0 },
    )
    .with_scan_interval(40)
    .with_travel(settings.travel);

    let mut sim_builder = SimBuilder::new(settings.sim.clone(), agents, rngs)
        .containers(containers)
        .scheduler(0, Scheduler::new().with(5, Box::new(TransferTask::new(courier, KindFilter::of([GRAIN])))));
    for (i, &chest) in chests.iter().enumerate() {
        let idx = i + 1;
        let bake = CraftConfig::new(format!("bake #{idx}"), ContainerId(idx as u32), KITCHEN)
            .at_workstation(chest)
            .with_daily_limit(6)
            .with_scan_interval(60)
            .with_travel(settings.travel);
        sim_builder = sim_builder.scheduler(idx, Scheduler::new().with(3, Box::new(CraftTask::new(bake, Arc::clone(&catalog)))));
    }
    let mut sim = sim_builder.build()?;

    // 4. Run.
    let mut obs = HamletObserver::default();
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  behavior starts : {}", obs.starts);
    println!("  behavior faults : {}", obs.faults);
    println!();
    println!("{:<8} {:>6}", "Item", "Total");
    println!("{}", "-".repeat(15));
    for (name, kind) in [("grain", GRAIN), ("flour", FLOUR), ("bread", BREAD)] {
        println!("{name:<8} {:>6}", sim.total_of(kind));
    }
    Ok(())
}
