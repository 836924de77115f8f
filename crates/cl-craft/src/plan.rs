//! Simulate-then-commit.

use cl_core::{ContainerId, RuleId};
use cl_inventory::{Container, ItemStack};

use crate::{CraftError, CraftResult, RuleMatch, TransformationRule};

/// A craft proven to fit on a snapshot of the inventory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftPlan {
    pub rule:   RuleId,
    pub slots:  Vec<usize>,
    pub output: ItemStack,
    /// The inventory as it was when planned.
    before: Container,
}

impl CraftPlan {
    /// Consume the matched inputs and insert the output on a clone of
    /// `inventory`.  `None` unless the clone takes the entire output.
    pub fn simulate(rule: &TransformationRule, matched: &RuleMatch, inventory: &Container) -> Option<Self> {
        let mut scratch = inventory.clone();
        apply(rule.id, &matched.slots, &rule.output, &mut scratch).ok()?;
        Some(Self {
            rule:   rule.id,
            slots:  matched.slots.clone(),
            output: rule.output.clone(),
            before: inventory.clone(),
        })
    }

    /// The snapshot this plan was made against.
    pub fn snapshot(&self) -> &Container {
        &self.before
    }

    /// Apply to the live inventory.  Refuses with [`CraftError::Mismatch`]
    /// and leaves `live` untouched if it differs from the snapshot.
    pub fn commit(&self, container: ContainerId, live: &mut Container) -> CraftResult<()> {
        if *live != self.before {
            return Err(CraftError::Mismatch(container));
        }
        let mut next = live.clone();
        apply(self.rule, &self.slots, &self.output, &mut next)?;
        next.mark_dirty();
        *live = next;
        Ok(())
    }
}

/// Take one unit from each slot, then insert `output`.  Fails if the output
/// does not fully fit; `inventory` may then be partly modified, so callers
/// only run this on a scratch copy.
fn apply(rule: RuleId, slots: &[usize], output: &ItemStack, inventory: &mut Container) -> CraftResult<()> {
    for &slot in slots {
        inventory.take_one(slot)?;
    }
    match inventory.insert(output.clone()) {
        None => Ok(()),
        Some(_) => Err(CraftError::Infeasible(rule)),
    }
}
