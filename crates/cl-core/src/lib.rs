//! `cl-core` — foundational types for the `rust_colony` behavior core.
//!
//! This crate is a dependency of every other `cl-*` crate.  It has no `cl-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `ContainerId`, `ItemKind`, `RoleId`, `RuleId`, …  |
//! | [`geo`]   | `Position`, `StorageSite`                                    |
//! | [`time`]  | `Tick`, `WorldClock`, `SimConfig`                            |
//! | [`rng`]   | `AgentRng` (per-agent, deterministic)                        |
//! | [`error`] | `CoreError`, `CoreResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Position, StorageSite};
pub use ids::{AgentId, CategoryId, ContainerId, ItemKind, RoleId, RuleId, TagId};
pub use rng::AgentRng;
pub use time::{SimConfig, Tick, WorldClock};
