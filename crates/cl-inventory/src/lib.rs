//! `cl-inventory` — item stacks and slotted containers.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`item`]      | `ItemStack`, `ItemData`                                     |
//! | [`container`] | `Container`, `SlotFilter`                                   |
//! | [`filter`]    | `ItemFilter` trait, `KindFilter`                            |
//! | [`access`]    | `ContainerAccess`, `ItemSpill` collaborator traits          |
//! | [`error`]     | `InventoryError`, `InventoryResult<T>`                      |
//!
//! # Conservation
//!
//! Every mutating `Container` method either moves units in or out and reports
//! exactly what it moved (`insert` returns the undelivered remainder,
//! `take_one` returns the unit it removed).  Nothing here creates or destroys
//! units; callers that hold a unit outside any container own it until they
//! put it somewhere.

pub mod access;
pub mod container;
pub mod error;
pub mod filter;
pub mod item;


pub use access::{ContainerAccess, ItemSpill};
pub use container::{Container, SlotFilter};
pub use error::{InventoryError, InventoryResult};
pub use filter::{ItemFilter, KindFilter};
pub use item::{ItemData, ItemStack};
