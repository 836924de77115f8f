//! `cl-mobility` — the movement service the behavior core talks to.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`locomotion`] | `Locomotion` trait — the only movement API tasks may call    |
//! | [`state`]      | `MovementState` — per-agent requested target and speed       |
//! | [`store`]      | `MobilityStore` — `Vec<MovementState>` + straight-line stepping |
//!
//! # Movement model
//!
//! Tasks never see paths.  They ask "how far am I from X" and "move toward X";
//! a world implements [`Locomotion`] however it likes.  [`MobilityStore`] is
//! the simple implementation `cl-sim` uses: each tick an agent with a target
//! steps `speed` units along the straight line, unless the step would enter a
//! [`Barrier`], in which case it stays put.  Arrival clears the target, which
//! is what `is_path_idle` reports.

pub mod locomotion;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use locomotion::Locomotion;
pub use state::MovementState;
pub use store::{Barrier, MobilityStore};
