//! `cl-spatial` — "who is near me, and where do they keep their things".
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`index`]     | `SpatialIndex` trait, `AgentIndex` (R-tree over agent positions) |
//! | [`directory`] | `WorkplaceDirectory` — world-model facts about other agents     |
//! | [`discovery`] | `find_eligible`, `RecipientRecord`, `RecipientQuery`            |

pub mod directory;
pub mod discovery;
pub mod index;

#[cfg(test)]
mod tests;

pub use directory::WorkplaceDirectory;
pub use discovery::{find_eligible, still_eligible, RecipientQuery, RecipientRecord};
pub use index::{AgentIndex, SpatialIndex};
