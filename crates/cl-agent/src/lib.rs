//! `cl-agent` — Structure-of-Arrays agent storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                 |
//!
//! Agents are created by the external lifecycle system; this crate only
//! holds the per-agent facts the behavior core reads each tick.

pub mod builder;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use store::{AgentRngs, AgentStore};
