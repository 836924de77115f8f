//! Multiset matching of rule inputs against an inventory snapshot.
//!
//! Greedy first-fit: ingredients are bound in rule order, each to the first
//! slot (in slot order) whose stack matches and still has an unbound unit.
//! A slot holding `n` units can satisfy up to `n` ingredients.  Greedy can
//! miss a binding a full search would find when ingredients overlap (a
//! `Tag` taking the unit a later `Kind` needed); catalogs list specific
//! ingredients before general ones to avoid that.

use cl_core::{CategoryId, RuleId};
use cl_inventory::Container;

use crate::{Catalog, TagTable, TransformationRule};

/// A satisfiable rule and the slot each of its inputs is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleMatch {
    pub rule:  RuleId,
    /// `slots[i]` feeds `rule.inputs[i]`.
    pub slots: Vec<usize>,
}

/// Bind every input of `rule` to a distinct unit in `inventory`, or `None`.
pub fn match_rule(rule: &TransformationRule, inventory: &Container, tags: &TagTable) -> Option<RuleMatch> {
    let mut free: Vec<u32> = (0..inventory.len())
        .map(|slot| inventory.get(slot).map_or(0, |s| s.count))
        .collect();

    let mut slots = Vec::with_capacity(rule.inputs.len());
    for ingredient in &rule.inputs {
        let slot = (0..inventory.len()).find(|&slot| {
            free[slot] > 0 && inventory.get(slot).is_some_and(|s| ingredient.matches(s, tags))
        })?;
        free[slot] -= 1;
        slots.push(slot);
    }
    Some(RuleMatch { rule: rule.id, slots })
}

/// Every rule in `category` the inventory can satisfy, in catalog order.
pub fn satisfiable_rules(catalog: &Catalog, category: CategoryId, inventory: &Container) -> Vec<RuleMatch> {
    catalog
        .in_category(category)
        .filter(|r| !r.inputs.is_empty())
        .filter_map(|r| match_rule(r, inventory, catalog.tags()))
        .collect()
}
