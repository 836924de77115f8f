//! The rule catalog.

use cl_core::{CategoryId, RuleId};
use cl_inventory::ItemStack;

use crate::{Ingredient, TagTable};

/// Inputs in, one output stack out.  Immutable once in a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformationRule {
    pub id:       RuleId,
    /// Which crafting task may use this rule.
    pub category: CategoryId,
    /// One unit is consumed per entry; repeat an ingredient to need more.
    pub inputs:   Vec<Ingredient>,
    pub output:   ItemStack,
}

impl TransformationRule {
    pub fn new(id: RuleId, category: CategoryId, inputs: Vec<Ingredient>, output: ItemStack) -> Self {
        Self { id, category, inputs, output }
    }
}

/// Rules in catalog order plus the tag table their ingredients refer to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    rules: Vec<TransformationRule>,
    tags:  TagTable,
}

impl Catalog {
    pub fn new(rules: Vec<TransformationRule>, tags: TagTable) -> Self {
        Self { rules, tags }
    }

    pub fn with_rule(mut self, rule: TransformationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[TransformationRule] {
        &self.rules
    }

    /// Rules of one category, in catalog order.
    pub fn in_category(&self, category: CategoryId) -> impl Iterator<Item = &TransformationRule> + '_ {
        self.rules.iter().filter(move |r| r.category == category)
    }

    pub fn rule(&self, id: RuleId) -> Option<&TransformationRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagTable {
        &mut self.tags
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
