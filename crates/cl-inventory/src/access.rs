//! Collaborator traits the tasks use to reach containers they do not own.

use cl_core::{ContainerId, Position};

use crate::{Container, ItemStack};

/// Container service: resolve a `ContainerId` to its slots.
///
/// Mutations go through `container_mut`; implementations are expected to
/// surface the `Container` dirty flag to whatever persists it.
pub trait ContainerAccess {
    fn container(&self, id: ContainerId) -> Option<&Container>;

    fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container>;
}

/// Last-resort sink: drop a stack into the world at a position.
pub trait ItemSpill {
    fn spill(&mut self, at: Position, stack: ItemStack);
}
