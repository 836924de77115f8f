use std::collections::VecDeque;

use cl_core::Position;
use cl_inventory::ItemStack;
use cl_spatial::RecipientRecord;

/// A unit that has left the source and not yet landed anywhere.
///
/// Owned only by the task.  It is cleared by delivery or by rollback, never
/// by dropping it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingTransfer {
    pub stack:       ItemStack,
    /// Slot the unit came from.
    pub source_slot: usize,
    /// Where to walk back to on rollback.
    pub origin:      Position,
    /// The recipient currently being approached.
    pub current:     Option<RecipientRecord>,
    /// Recipients still to try, nearest first.
    pub remaining:   VecDeque<RecipientRecord>,
}

impl PendingTransfer {
    pub fn new(stack: ItemStack, source_slot: usize, origin: Position, candidates: Vec<RecipientRecord>) -> Self {
        Self {
            stack,
            source_slot,
            origin,
            current:   None,
            remaining: candidates.into(),
        }
    }
}
