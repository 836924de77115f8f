//! Slotted containers.
//!
//! A `Container` is an ordered sequence of slots, each holding zero or one
//! [`ItemStack`].  Stacks never exceed `stack_limit` and never hold zero
//! units (an emptied slot becomes `None`).

use std::collections::BTreeSet;

use cl_core::ItemKind;

use crate::{InventoryError, InventoryResult, ItemStack};

/// Which stacks a slot will take.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotFilter {
    /// Every slot takes every kind.
    #[default]
    Any,
    /// Every slot takes only these kinds.
    Kinds(BTreeSet<ItemKind>),
    /// Per-slot restriction; `None` (or a slot past the end) takes any kind.
    PerSlot(Vec<Option<BTreeSet<ItemKind>>>),
}

impl SlotFilter {
    fn allows(&self, slot: usize, kind: ItemKind) -> bool {
        match self {
            SlotFilter::Any => true,
            SlotFilter::Kinds(kinds) => kinds.contains(&kind),
            SlotFilter::PerSlot(per) => match per.get(slot) {
                Some(Some(kinds)) => kinds.contains(&kind),
                _ => true,
            },
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    slots:       Vec<Option<ItemStack>>,
    stack_limit: u32,
    filter:      SlotFilter,
    /// Set by every mutation; cleared by whoever persists the container.
    dirty:       bool,
}

/// Equality compares contents and configuration, not the dirty flag.
impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
            && self.stack_limit == other.stack_limit
            && self.filter == other.filter
    }
}

impl Container {
    pub const DEFAULT_STACK_LIMIT: u32 = 64;

    pub fn new(size: usize) -> Self {
        Self {
            slots:       vec![None; size],
            stack_limit: Self::DEFAULT_STACK_LIMIT,
            filter:      SlotFilter::Any,
            dirty:       false,
        }
    }

    pub fn with_stack_limit(mut self, limit: u32) -> Self {
        self.stack_limit = limit.max(1);
        self
    }

    pub fn with_filter(mut self, filter: SlotFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Builder-style helper for tests and setup code.  Stacks that do not
    /// fit are discarded, so only use it on containers with room.
    pub fn with_stack(mut self, stack: ItemStack) -> Self {
        let _ = self.insert(stack);
        self.dirty = false;
        self
    }

    // ── Slot access ───────────────────────────────────────────────────────

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` if no slot holds anything.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    #[inline]
    pub fn stack_limit(&self) -> u32 {
        self.stack_limit
    }

    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Replace the contents of `slot`, returning what was there.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> InventoryResult<Option<ItemStack>> {
        let len = self.slots.len();
        let cell = self
            .slots
            .get_mut(slot)
            .ok_or(InventoryError::SlotOutOfRange { slot, len })?;
        let stack = stack.filter(|s| !s.is_empty());
        self.dirty = true;
        Ok(std::mem::replace(cell, stack))
    }

    /// `true` if `stack` may be placed in `slot` (ignoring what is there now).
    pub fn is_valid_for_slot(&self, slot: usize, stack: &ItemStack) -> bool {
        slot < self.slots.len() && self.filter.allows(slot, stack.kind)
    }

    /// Occupied slots in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemStack)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
    }

    /// First occupied slot whose stack satisfies `pred`.
    pub fn first_slot_where(&self, mut pred: impl FnMut(&ItemStack) -> bool) -> Option<usize> {
        self.iter().find(|(_, s)| pred(s)).map(|(i, _)| i)
    }

    // ── Dirty tracking ────────────────────────────────────────────────────

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Total units of `kind` across all slots.
    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.iter().filter(|(_, s)| s.kind == kind).map(|(_, s)| s.count).sum()
    }

    /// Total units held.
    pub fn total_units(&self) -> u32 {
        self.iter().map(|(_, s)| s.count).sum()
    }

    /// How many units of `stack` could be inserted right now (not capped at
    /// `stack.count`).  Pure dry run; nothing is mutated.
    pub fn insert_capacity(&self, stack: &ItemStack) -> u32 {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, _)| self.filter.allows(*i, stack.kind))
            .map(|(_, cell)| match cell {
                Some(existing) if existing.stacks_with(stack) => {
                    self.stack_limit.saturating_sub(existing.count)
                }
                Some(_) => 0,
                None => self.stack_limit,
            })
            .fold(0u32, u32::saturating_add)
    }

    /// Dry-run: would all of `stack` fit?
    #[inline]
    pub fn can_accept(&self, stack: &ItemStack) -> bool {
        self.insert_capacity(stack) >= stack.count
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert as much of `stack` as fits: top up matching stacks first, then
    /// fill empty valid slots, both in slot order.  Returns the undelivered
    /// remainder, or `None` if everything went in.
    pub fn insert(&mut self, mut stack: ItemStack) -> Option<ItemStack> {
        if stack.is_empty() {
            return None;
        }
        let before = stack.count;

        for (i, cell) in self.slots.iter_mut().enumerate() {
            if stack.is_empty() {
                break;
            }
            if let Some(existing) = cell {
                if existing.stacks_with(&stack) && self.filter.allows(i, stack.kind) {
                    let room = self.stack_limit.saturating_sub(existing.count);
                    existing.count += stack.split(room).count;
                }
            }
        }

        for (i, cell) in self.slots.iter_mut().enumerate() {
            if stack.is_empty() {
                break;
            }
            if cell.is_none() && self.filter.allows(i, stack.kind) {
                *cell = Some(stack.split(self.stack_limit));
            }
        }

        if stack.count != before {
            self.dirty = true;
        }
        (!stack.is_empty()).then_some(stack)
    }

    /// Remove exactly one unit from `slot` and return it.
    pub fn take_one(&mut self, slot: usize) -> InventoryResult<ItemStack> {
        let len = self.slots.len();
        let cell = self
            .slots
            .get_mut(slot)
            .ok_or(InventoryError::SlotOutOfRange { slot, len })?;
        let existing = cell.as_mut().ok_or(InventoryError::EmptySlot(slot))?;
        let unit = existing.split(1);
        if existing.is_empty() {
            *cell = None;
        }
        self.dirty = true;
        Ok(unit)
    }
}
