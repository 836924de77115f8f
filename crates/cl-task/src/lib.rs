//! `cl-task` — the stage machine every multi-tick behavior is built from.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`stage`]    | `Stage` — `Idle → Traveling → Acting → Returning → Done`       |
//! | [`machine`]  | `TaskMachine`, `TravelTuning`, `TravelEvent`                   |
//! | [`progress`] | `ProgressTracker` — the no-progress counter                    |
//! | [`cooldown`] | `Cooldown` — gate on expensive start checks                    |
//! | [`quota`]    | `DailyQuota` — bounded actions per in-game day                 |
//!
//! # Suspension model
//!
//! A task that needs several ticks stores its `Stage` and resumes on the next
//! tick.  There is no blocking and nothing awaits across ticks; the stage
//! field *is* the continuation.

pub mod cooldown;
pub mod machine;
pub mod progress;
pub mod quota;
pub mod stage;

#[cfg(test)]
mod tests;

pub use cooldown::Cooldown;
pub use machine::{TaskMachine, TravelEvent, TravelTuning};
pub use progress::ProgressTracker;
pub use quota::DailyQuota;
pub use stage::Stage;
