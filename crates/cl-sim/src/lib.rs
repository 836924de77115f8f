//! `cl-sim` — the concrete world and tick loop for the rust_colony behavior core.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Index     — rebuild the R-tree over living agent positions.
//!   ② Behaviors — for each agent in ascending AgentId order, run one
//!                 Scheduler pass (start / tick / stop / preempt).
//!   ③ Movement  — step every agent with an outstanding movement request.
//!   ④ Clock     — advance the world clock.
//! ```
//!
//! Agents are processed one at a time; a behavior sees every mutation made by
//! behaviors of lower-numbered agents earlier in the same tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`world`]    | `World` — implements every collaborator trait the tasks use   |
//! | [`sim`]      | `Sim` — tick loop, conservation audit                          |
//! | [`builder`]  | `SimBuilder` — validation and assembly                         |
//! | [`observer`] | `SimObserver`, `NoopObserver`                                  |
//! | [`settings`] | `Settings` — `[sim]` + `[travel]` TOML document                |
//! | [`error`]    | `SimError`, `SimResult<T>`                                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let (agents, rngs) = AgentStoreBuilder::new(2, 42).build();
//! let mut sim = SimBuilder::new(SimConfig::default(), agents, rngs)
//!     .containers(vec![Container::new(9)])
//!     .scheduler(0, Scheduler::new().with(1, Box::new(task)))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod settings;
pub mod sim;
pub mod world;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use settings::Settings;
pub use sim::Sim;
pub use world::World;
