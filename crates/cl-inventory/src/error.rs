use cl_core::ContainerId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("slot {slot} out of range for container of {len} slots")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("slot {0} is empty")]
    EmptySlot(usize),

    #[error("container {0} not found")]
    ContainerNotFound(ContainerId),
}

pub type InventoryResult<T> = Result<T, InventoryError>;
