use cl_core::{ContainerId, RuleId};
use cl_inventory::InventoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CraftError {
    /// The live inventory no longer matches the snapshot the plan was made on.
    #[error("container {0} changed since the craft was planned")]
    Mismatch(ContainerId),

    /// Consuming the inputs or storing the output failed on the clone.
    #[error("rule {0} cannot be applied to this inventory")]
    Infeasible(RuleId),

    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Parse(String),
}

pub type CraftResult<T> = Result<T, CraftError>;
