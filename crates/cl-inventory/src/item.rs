//! Item stacks.

use std::collections::BTreeMap;
use std::fmt;

use cl_core::ItemKind;

/// Optional attribute data carried by a stack (potency, duration, …).
///
/// Two stacks merge only when their data is identical.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemData(pub BTreeMap<String, i32>);

impl ItemData {
    pub fn with(mut self, key: impl Into<String>, value: i32) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.0.get(key).copied()
    }
}

/// A kind, a quantity, and optional attribute data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub kind:  ItemKind,
    pub count: u32,
    pub data:  Option<ItemData>,
}

impl ItemStack {
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self { kind, count, data: None }
    }

    pub fn with_data(mut self, data: ItemData) -> Self {
        self.data = Some(data);
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` if `other` could share a slot with `self` (same kind and data).
    #[inline]
    pub fn stacks_with(&self, other: &ItemStack) -> bool {
        self.kind == other.kind && self.data == other.data
    }

    /// Split up to `n` units off this stack and return them.
    pub fn split(&mut self, n: u32) -> ItemStack {
        let taken = n.min(self.count);
        self.count -= taken;
        ItemStack { kind: self.kind, count: taken, data: self.data.clone() }
    }

    /// A copy of this stack with a count of exactly one.
    pub fn single(&self) -> ItemStack {
        ItemStack { kind: self.kind, count: 1, data: self.data.clone() }
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.count, self.kind)?;
        if let Some(data) = &self.data {
            write!(f, "{:?}", data.0)?;
        }
        Ok(())
    }
}
