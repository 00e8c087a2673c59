//! Fixed-length slot storage
//!
//! Raw positional access to a container's slots. Nothing here consults item
//! definitions; stacking decisions live in the transaction layer.

use crate::error::{ContainerError, Result};
use crate::item::{Item, ItemId};
use std::collections::HashSet;

/// Outcome of a slot search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMatch<'a> {
    /// Item found at slot
    Found(usize, &'a Item),
    /// No slot matched
    NotFound,
}

impl<'a> SlotMatch<'a> {
    /// Slot index, if found
    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::Found(slot, _) => Some(*slot),
            Self::NotFound => None,
        }
    }

    /// Matched item, if found
    pub fn item(&self) -> Option<&'a Item> {
        match self {
            Self::Found(_, item) => Some(*item),
            Self::NotFound => None,
        }
    }

    /// Whether a slot matched
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(..))
    }
}

/// Ordered, fixed-capacity sequence of optional items plus a dirty flag
#[derive(Debug, Clone)]
pub struct SlotArray {
    slots: Vec<Option<Item>>,
    dirty: bool,
}

impl SlotArray {
    /// Create an empty array. Starts dirty so the first observer sees it.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            dirty: true,
        }
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot contents
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot)?.as_ref()
    }

    /// Whether the slot holds an item
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Unchecked write. Items with `amount < 1` empty the slot.
    pub fn set(&mut self, slot: usize, item: Option<Item>) -> Result<()> {
        let capacity = self.capacity();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(ContainerError::SlotOutOfBounds { slot, capacity })?;
        *entry = item.filter(|item| item.amount() >= 1);
        self.dirty = true;
        Ok(())
    }

    /// Write to a slot already known to be in range
    pub(crate) fn put(&mut self, slot: usize, item: Option<Item>) {
        self.slots[slot] = item;
        self.dirty = true;
    }

    /// Take the item out of a slot
    pub(crate) fn take(&mut self, slot: usize) -> Option<Item> {
        let item = self.slots.get_mut(slot)?.take();
        if item.is_some() {
            self.dirty = true;
        }
        item
    }

    /// First empty slot
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// First empty slot at or after `from`
    pub fn first_free_from(&self, from: usize) -> Option<usize> {
        self.slots
            .iter()
            .skip(from)
            .position(Option::is_none)
            .map(|offset| from + offset)
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Number of empty slots
    pub fn free_count(&self) -> usize {
        self.capacity() - self.occupied_count()
    }

    /// Swap two slots. Returns false if either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.capacity() || b >= self.capacity() {
            return false;
        }
        self.slots.swap(a, b);
        self.dirty = true;
        true
    }

    /// First slot holding `id`
    pub fn find_first(&self, id: ItemId) -> SlotMatch<'_> {
        self.find_first_where(|item| item.id() == id)
    }

    /// First slot holding a property-less `id`, the stack plain additions
    /// and removals of that id go through
    pub fn find_first_stack(&self, id: ItemId) -> SlotMatch<'_> {
        self.find_first_where(|item| item.id() == id && !item.has_properties())
    }

    /// First slot holding any of `ids`
    pub fn find_first_any(&self, ids: &HashSet<ItemId>) -> SlotMatch<'_> {
        self.find_first_where(|item| ids.contains(&item.id()))
    }

    fn find_first_where(&self, mut predicate: impl FnMut(&Item) -> bool) -> SlotMatch<'_> {
        self.iter()
            .find(|(_, item)| predicate(*item))
            .map_or(SlotMatch::NotFound, |(slot, item)| SlotMatch::Found(slot, item))
    }

    /// Every slot holding `id`, in slot order
    pub fn find_all(&self, id: ItemId) -> Vec<(usize, &Item)> {
        self.iter().filter(|(_, item)| item.id() == id).collect()
    }

    /// Occupied slots in order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|item| (i, item)))
    }

    /// Raw slot view, empty slots included
    pub fn as_slice(&self) -> &[Option<Item>] {
        &self.slots
    }

    /// Cloned copy of every slot, for later `restore`
    pub fn snapshot(&self) -> Vec<Option<Item>> {
        self.slots.clone()
    }

    /// Overwrite from a snapshot, padding with empty slots and dropping
    /// anything past capacity. Performs no validation.
    pub fn restore(&mut self, snapshot: &[Option<Item>]) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = snapshot.get(i).cloned().flatten();
        }
        self.dirty = true;
    }

    /// Replace the backing sequence, resized to capacity
    pub fn replace_all(&mut self, mut items: Vec<Option<Item>>) {
        items.resize(self.capacity(), None);
        self.slots = items;
        self.dirty = true;
    }

    /// Insert at `index`, shifting later entries toward the end up to the
    /// next empty slot. If nothing after `index` is free, the array is
    /// packed first and the item lands directly after the packed entries
    /// when `index` falls beyond them.
    pub fn insert_at(&mut self, item: Item, index: usize) -> bool {
        if index >= self.capacity() || self.first_free().is_none() {
            return false;
        }

        let (index, free) = match self.first_free_from(index) {
            Some(free) => (index, free),
            None => {
                self.pack();
                let packed = self.occupied_count();
                (index.min(packed), packed)
            }
        };

        self.slots[index..=free].rotate_right(1);
        self.slots[index] = Some(item);
        self.dirty = true;
        true
    }

    /// Move occupied slots to the front, keeping their order
    pub fn pack(&mut self) {
        let capacity = self.capacity();
        let mut packed: Vec<Option<Item>> = self.slots.drain(..).filter(Option::is_some).collect();
        packed.resize(capacity, None);
        self.slots = packed;
        self.dirty = true;
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.dirty = true;
    }

    /// Changed since the last `clean`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the dirty flag on
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Acknowledge the current state as observed
    pub fn clean(&mut self) {
        self.dirty = false;
    }
}
