use cl_core::ContainerId;
use cl_inventory::InventoryError;
use thiserror::Error;

/// A fault inside a behavior's `tick`.  Caught by the scheduler, which
/// stops the behavior and carries on with the rest of the agent.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("container {0} is not reachable")]
    MissingContainer(ContainerId),

    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("behavior fault: {0}")]
    Fault(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
