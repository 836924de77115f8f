//! Input requirements.

use std::collections::{BTreeMap, BTreeSet};

use cl_core::{ItemKind, TagId};
use cl_inventory::ItemStack;

/// Which kinds carry which tag ("any ore", "any fuel", …).  Catalog data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagTable(BTreeMap<TagId, BTreeSet<ItemKind>>);

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: TagId, kind: ItemKind) {
        self.0.entry(tag).or_default().insert(kind);
    }

    pub fn contains(&self, tag: TagId, kind: ItemKind) -> bool {
        self.0.get(&tag).is_some_and(|kinds| kinds.contains(&kind))
    }

    pub fn kinds(&self, tag: TagId) -> impl Iterator<Item = ItemKind> + '_ {
        self.0.get(&tag).into_iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One unit a rule needs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ingredient {
    /// Exactly this kind, with or without attribute data.
    Kind(ItemKind),
    /// This kind carrying no attribute data.
    Plain(ItemKind),
    /// Any one of these kinds.
    AnyOf(Vec<ItemKind>),
    /// Any kind carrying this tag.
    Tag(TagId),
}

impl Ingredient {
    pub fn matches(&self, stack: &ItemStack, tags: &TagTable) -> bool {
        match self {
            Ingredient::Kind(kind) => stack.kind == *kind,
            Ingredient::Plain(kind) => stack.kind == *kind && stack.data.is_none(),
            Ingredient::AnyOf(kinds) => kinds.contains(&stack.kind),
            Ingredient::Tag(tag) => tags.contains(*tag, stack.kind),
        }
    }

    /// The kind this ingredient names, if it names exactly one.
    pub fn single_kind(&self) -> Option<ItemKind> {
        match self {
            Ingredient::Kind(kind) | Ingredient::Plain(kind) => Some(*kind),
            Ingredient::AnyOf(kinds) if kinds.len() == 1 => Some(kinds[0]),
            _ => None,
        }
    }
}
