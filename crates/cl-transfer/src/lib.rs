//! `cl-transfer` — move one unit at a time from a source container to the
//! storage of a nearby recipient.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`config`]  | `TransferConfig`, `TransferSource`                           |
//! | [`pending`] | `PendingTransfer` — the unit in flight and where it may go   |
//! | [`task`]    | `TransferTask` — the behavior, `TransferStats`               |
//! | [`world`]   | `TransferWorld` — the collaborators the task needs           |
//!
//! # Cycle
//!
//! ```text
//! can_start ─► travel to source ─► take one unit ─► travel to recipient ─► insert ─► Done
//!                                       │                    │ stale / full
//!                                       │                    ▼
//!                                       │             next candidate … ─► none left
//!                                       │                                    │
//!                                       └─────────── roll back ◄── return ───┘
//!                                             source → carry → world
//! ```
//!
//! Every path out of the cycle leaves the unit in a container or on the
//! ground; the task never drops it.

pub mod config;
pub mod pending;
pub mod task;
pub mod world;

#[cfg(test)]
mod tests;

pub use config::{TransferConfig, TransferSource};
pub use pending::PendingTransfer;
pub use task::{TransferStats, TransferTask};
pub use world::TransferWorld;
