//! `cl-craft` — turning held items into new ones.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | [`ingredient`]   | `Ingredient` — one input requirement, `TagTable`           |
//! | [`catalog`]      | `TransformationRule`, `Catalog`                             |
//! | [`matching`]     | greedy first-fit multiset matching over a snapshot          |
//! | [`plan`]         | `CraftPlan` — simulate on a clone, commit atomically        |
//! | [`reachability`] | `reachable_states` BFS, `TransformationGraph`, `NextStep`   |
//! | [`task`]         | `CraftTask` — the behavior, `CraftConfig`, `CraftStrategy`  |
//! | [`loader`]       | CSV catalog loading                                         |
//! | [`error`]        | `CraftError`, `CraftResult<T>`                              |
//!
//! # Atomicity
//!
//! A craft is planned against a snapshot of the inventory: inputs are bound,
//! consumed and the output inserted on a clone.  Only a plan whose clone
//! holds the whole output is kept.  Commit compares the live inventory to the
//! snapshot and, if they differ, refuses without touching anything.

pub mod catalog;
pub mod error;
pub mod ingredient;
pub mod loader;
pub mod matching;
pub mod plan;
pub mod reachability;
pub mod task;


pub use catalog::{Catalog, TransformationRule};
pub use error::{CraftError, CraftResult};
pub use ingredient::{Ingredient, TagTable};
pub use loader::{load_catalog_csv, load_rules_reader, load_tags_reader};
pub use matching::{match_rule, satisfiable_rules, RuleMatch};
pub use plan::CraftPlan;
pub use reachability::{reachable_states, NextStep, Reachability, TransformationGraph, TransitionGraph};
pub use task::{CraftConfig, CraftStats, CraftStrategy, CraftTask};
