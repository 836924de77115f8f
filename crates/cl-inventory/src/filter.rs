//! Item predicates.
//!
//! Which kinds count as "distributable" (seeds, ores, fuels, …) is catalog
//! content; tasks receive it as an `ItemFilter`.

use std::collections::BTreeSet;

use cl_core::ItemKind;

use crate::ItemStack;

pub trait ItemFilter {
    fn accepts(&self, stack: &ItemStack) -> bool;
}

impl<F> ItemFilter for F
where
    F: Fn(&ItemStack) -> bool,
{
    fn accepts(&self, stack: &ItemStack) -> bool {
        self(stack)
    }
}

/// Accepts stacks whose kind is in a fixed set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KindFilter(pub BTreeSet<ItemKind>);

impl KindFilter {
    pub fn of(kinds: impl IntoIterator<Item = ItemKind>) -> Self {
        Self(kinds.into_iter().collect())
    }
}

impl ItemFilter for KindFilter {
    fn accepts(&self, stack: &ItemStack) -> bool {
        self.0.contains(&stack.kind)
    }
}
