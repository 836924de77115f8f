//! `cl-behavior` — prioritized behaviors competing for control channels.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`channel`]   | `ControlChannel`, `ChannelSet`                                 |
//! | [`context`]   | `BehaviorContext<'a, W>` — what a behavior sees each call      |
//! | [`model`]     | `Behavior<W>` trait                                            |
//! | [`scheduler`] | `Scheduler<W>` — per-agent arbiter, `TickReport`               |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! The scheduler knows nothing about what a behavior does.  It only tracks
//! which behavior holds which channel and calls the lifecycle hooks in
//! priority order.  `W` is the world type a behavior operates on; concrete
//! tasks state the collaborator traits they need as bounds on `W`.

pub mod channel;
pub mod context;
pub mod error;
pub mod model;
pub mod scheduler;


pub use channel::{ChannelSet, ControlChannel};
pub use context::BehaviorContext;
pub use error::{BehaviorError, BehaviorResult};
pub use model::Behavior;
pub use scheduler::{BehaviorEvent, Scheduler, StopReason, TickReport};
