//! Item container and its transactions
//!
//! All ordinary mutation goes through [`ItemContainer::add_with`] and
//! [`ItemContainer::remove_with`] (or their shorthands). Both report what
//! actually happened through a [`TransactionResult`] instead of failing, so
//! a shortfall never loses or duplicates items silently.
//!
//! The container has no internal locking. It is owned and mutated by one
//! logical context; readers must run between mutations.

use crate::config::{ContainerConfig, StackPolicy};
use crate::definition::{ItemDefinition, ItemDefinitionProvider};
use crate::error::Result;
use crate::item::{Amount, Item, ItemId, MAX_AMOUNT};
use crate::placeholder;
use crate::result::TransactionResult;
use crate::slots::{SlotArray, SlotMatch};
use crate::stacking::is_stackable;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Receives the part of an addition that did not fit
pub trait OverflowSink {
    /// Take ownership of the leftover items
    fn overflow(&mut self, item: Item);
}

impl OverflowSink for Vec<Item> {
    fn overflow(&mut self, item: Item) {
        self.push(item);
    }
}

/// Fixed-capacity container of item stacks
#[derive(Clone)]
pub struct ItemContainer {
    slots: SlotArray,
    config: ContainerConfig,
    definitions: Arc<dyn ItemDefinitionProvider>,
}

impl ItemContainer {
    /// Create an empty container
    pub fn new(config: ContainerConfig, definitions: Arc<dyn ItemDefinitionProvider>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            slots: SlotArray::new(config.capacity),
            config,
            definitions,
        })
    }

    /// Create an empty container with default bank/placeholder settings
    pub fn with_capacity(
        capacity: usize,
        policy: StackPolicy,
        definitions: Arc<dyn ItemDefinitionProvider>,
    ) -> Result<Self> {
        Self::new(ContainerConfig::new(capacity).with_policy(policy), definitions)
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Stacking policy
    pub fn policy(&self) -> StackPolicy {
        self.config.policy
    }

    /// Construction parameters
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Whether placeholder handling applies
    pub fn is_bank(&self) -> bool {
        self.config.is_bank()
    }

    fn definition(&self, id: ItemId) -> Option<ItemDefinition> {
        let definition = self.definitions.definition(id);
        if definition.is_none() {
            log::warn!("No definition for item {}, treating as non-stackable", id);
        }
        definition
    }

    fn clamp_slot(&self, slot: usize) -> usize {
        slot.min(self.capacity() - 1)
    }

    // ---- transactions ----

    /// Add with the pre-check enabled, scanning from slot 0
    pub fn add(&mut self, item: &Item) -> TransactionResult {
        self.add_with(Some(item), false, 0)
    }

    /// Add without the pre-check; stack totals saturate at [`MAX_AMOUNT`]
    pub fn add_forced(&mut self, item: &Item) -> TransactionResult {
        self.add_with(Some(item), true, 0)
    }

    /// Add `item`, preferring slots from `start` onward.
    ///
    /// Without `force` the transaction is rejected up front (nothing moved)
    /// when a stack would exceed [`MAX_AMOUNT`] or there are fewer free slots
    /// than discrete units requested. With `force` as much as fits is moved.
    pub fn add_with(&mut self, item: Option<&Item>, force: bool, start: usize) -> TransactionResult {
        let item = match item {
            Some(item) if item.amount() > 0 => item,
            other => return TransactionResult::degenerate(other.map(Item::amount)),
        };

        let requested = item.amount();
        let mut start = self.clamp_slot(start);
        let definition = self.definition(item.id());
        let stackable = is_stackable(item, self.config.policy, definition.as_ref());
        let held = self.count(item.id());

        // FullStacking only trusts the first stack of an id
        let (stack, current) = if stackable {
            let found = self.slots.find_first_stack(item.id());
            (found.slot(), found.item().map_or(0, Item::amount))
        } else {
            (None, 0)
        };

        if !force {
            if stackable && current.checked_add(requested).is_none() {
                return TransactionResult::rejected(requested);
            }
            if !stackable && requested as usize > self.slots.free_count() {
                return TransactionResult::rejected(requested);
            }
        }

        if self.is_bank() {
            if let Some(definition) = &definition {
                let template = self.config.placeholder_template;
                if let Some(freed) = placeholder::resolve(&mut self.slots, definition, held, template) {
                    start = freed;
                }
            }
        }

        let result = match (stackable, stack) {
            (true, None) => self.add_new_stack(item, start),
            (true, Some(index)) => self.add_to_stack(item, index, current),
            (false, _) => self.add_discrete(item, start),
        };
        log::trace!("add {} x{}: {}", item.id(), requested, result);
        result
    }

    fn add_new_stack(&mut self, item: &Item, start: usize) -> TransactionResult {
        let requested = item.amount();
        let target = if self.slots.is_occupied(start) {
            match self.slots.first_free() {
                Some(slot) => slot,
                None => return TransactionResult::rejected(requested),
            }
        } else {
            start
        };

        self.slots.put(target, Some(Item::new(item.id(), requested)));
        TransactionResult::single(requested, requested, target)
    }

    fn add_to_stack(&mut self, item: &Item, index: usize, current: Amount) -> TransactionResult {
        let requested = item.amount();
        let total = current.saturating_add(requested);
        let added = total - current;

        if added < requested {
            log::debug!(
                "Stack of {} at slot {} saturated, {} of {} added",
                item.id(),
                index,
                added,
                requested
            );
        }
        if added > 0 {
            let updated = match self.slots.get(index) {
                Some(existing) => existing.with_amount(total),
                None => Item::new(item.id(), total),
            };
            self.slots.put(index, Some(updated));
        }
        TransactionResult::single(requested, added, index)
    }

    fn add_discrete(&mut self, item: &Item, start: usize) -> TransactionResult {
        let requested = item.amount();
        let capacity = self.capacity();
        let mut placed = Vec::new();

        for offset in 0..capacity {
            if placed.len() as Amount >= requested {
                break;
            }
            let slot = (start + offset) % capacity;
            if !self.slots.is_occupied(slot) {
                self.slots.put(slot, Some(item.with_amount(1)));
                placed.push(slot);
            }
        }

        let completed = placed.len() as Amount;
        TransactionResult::new(requested, completed, placed)
    }

    /// Forced add that hands any shortfall to `sink` as a new item
    pub fn add_or_spill(&mut self, item: &Item, sink: &mut impl OverflowSink) -> TransactionResult {
        let result = self.add_with(Some(item), true, 0);
        let leftover = result.shortfall();
        if leftover > 0 {
            log::debug!("{} x{} did not fit, spilling", item.id(), leftover);
            sink.overflow(item.with_amount(leftover));
        }
        result
    }

    /// Remove with the pre-check enabled, starting at the first match
    pub fn remove(&mut self, item: &Item) -> TransactionResult {
        self.remove_with(Some(item), false, None)
    }

    /// Remove as much as is held, up to the requested amount
    pub fn remove_forced(&mut self, item: &Item) -> TransactionResult {
        self.remove_with(Some(item), true, None)
    }

    /// Remove a single unit of `id`
    pub fn remove_id(&mut self, id: ItemId, force: bool) -> TransactionResult {
        self.remove_with(Some(&Item::single(id)), force, None)
    }

    /// Remove `item`, starting at slot `start` (first match when `None`).
    ///
    /// Stackable items are taken from the single slot at `start`; discrete
    /// items are cleared one slot at a time, scanning forward and wrapping.
    pub fn remove_with(&mut self, item: Option<&Item>, force: bool, start: Option<usize>) -> TransactionResult {
        let item = match item {
            Some(item) if item.amount() > 0 => item,
            other => return TransactionResult::degenerate(other.map(Item::amount)),
        };

        let requested = item.amount();
        let held = self.count(item.id());
        if held < 1 {
            return TransactionResult::rejected(requested);
        }
        if !force && requested > held {
            return TransactionResult::rejected(requested);
        }

        let definition = self.definition(item.id());
        let stackable = is_stackable(item, self.config.policy, definition.as_ref());
        let result = if stackable {
            let slot = match start {
                Some(slot) => Some(self.clamp_slot(slot)),
                None => self.slots.find_first_stack(item.id()).slot(),
            };
            match slot {
                Some(slot) => self.remove_from_stack(item, slot),
                None => TransactionResult::rejected(requested),
            }
        } else {
            let start = match start {
                Some(slot) => self.clamp_slot(slot),
                None => self.slot_of(item.id()).unwrap_or(0),
            };
            self.remove_discrete(item, start)
        };
        log::trace!("remove {} x{}: {}", item.id(), requested, result);
        result
    }

    fn remove_from_stack(&mut self, item: &Item, slot: usize) -> TransactionResult {
        let requested = item.amount();
        let existing = match self.slots.get(slot) {
            Some(existing) if existing.id() == item.id() && !existing.has_properties() => existing.clone(),
            Some(other) => {
                log::warn!(
                    "Remove of {} pointed at slot {} holding {} (properties: {})",
                    item.id(),
                    slot,
                    other.id(),
                    other.has_properties()
                );
                return TransactionResult::rejected(requested);
            }
            None => return TransactionResult::rejected(requested),
        };

        let removed = requested.min(existing.amount());
        let remaining = existing.amount() - removed;
        self.slots
            .put(slot, (remaining > 0).then(|| existing.with_amount(remaining)));
        TransactionResult::single(requested, removed, slot)
    }

    fn remove_discrete(&mut self, item: &Item, start: usize) -> TransactionResult {
        let requested = item.amount();
        let capacity = self.capacity();
        let mut cleared = Vec::new();

        for offset in 0..capacity {
            if cleared.len() as Amount >= requested {
                break;
            }
            let slot = (start + offset) % capacity;
            if self.slots.get(slot).map_or(false, |held| held.id() == item.id()) {
                self.slots.take(slot);
                cleared.push(slot);
            }
        }

        let completed = cleared.len() as Amount;
        TransactionResult::new(requested, completed, cleared)
    }

    // ---- counting ----

    /// Total held of `id`.
    ///
    /// For ids that stack in this container only the first property-less
    /// stack is counted, so a duplicate stack written through
    /// [`set`](Self::set) is not seen. Instances with properties never
    /// aggregate and are always counted individually.
    pub fn count(&self, id: ItemId) -> Amount {
        let definition = self.definitions.definition(id);
        let stacks = is_stackable(&Item::single(id), self.config.policy, definition.as_ref());

        let mut total: i64 = 0;
        let mut seen_stack = false;
        for (_, item) in self.slots.iter().filter(|(_, item)| item.id() == id) {
            if stacks && !item.has_properties() {
                if seen_stack {
                    continue;
                }
                seen_stack = true;
            }
            total += i64::from(item.amount());
        }
        clamp_total(total)
    }

    /// Total held of every id in `ids`, summing all matching slots
    pub fn count_any(&self, ids: &HashSet<ItemId>) -> Amount {
        let total = self
            .slots
            .iter()
            .filter(|(_, item)| ids.contains(&item.id()))
            .map(|(_, item)| i64::from(item.amount()))
            .sum();
        clamp_total(total)
    }

    /// Amount at `slot` if it holds `id`, else 0
    pub fn count_at(&self, slot: usize, id: ItemId) -> Amount {
        self.slots
            .get(slot)
            .filter(|item| item.id() == id)
            .map_or(0, Item::amount)
    }

    // ---- queries ----

    /// Slot contents
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot)
    }

    /// Item id at `slot`
    pub fn id_at(&self, slot: usize) -> Option<ItemId> {
        self.get(slot).map(Item::id)
    }

    /// Every slot in order, empty ones included
    pub fn items(&self) -> &[Option<Item>] {
        self.slots.as_slice()
    }

    /// Occupied slots in order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots.iter()
    }

    /// First empty slot
    pub fn first_free_slot(&self) -> Option<usize> {
        self.slots.first_free()
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.slots.occupied_count()
    }

    /// Number of empty slots
    pub fn free_count(&self) -> usize {
        self.slots.free_count()
    }

    /// No slot is occupied
    pub fn is_empty(&self) -> bool {
        self.free_count() == self.capacity()
    }

    /// At least one slot is occupied
    pub fn has_items(&self) -> bool {
        !self.is_empty()
    }

    /// No slot is free
    pub fn is_full(&self) -> bool {
        self.first_free_slot().is_none()
    }

    /// First slot holding `id`
    pub fn find_first(&self, id: ItemId) -> SlotMatch<'_> {
        self.slots.find_first(id)
    }

    /// First slot holding any of `ids`
    pub fn find_first_any(&self, ids: &HashSet<ItemId>) -> SlotMatch<'_> {
        self.slots.find_first_any(ids)
    }

    /// Every slot holding `id`
    pub fn find_all(&self, id: ItemId) -> Vec<(usize, &Item)> {
        self.slots.find_all(id)
    }

    /// Index of the first slot holding `id`
    pub fn slot_of(&self, id: ItemId) -> Option<usize> {
        self.find_first(id).slot()
    }

    /// Any slot holds `id`
    pub fn has(&self, id: ItemId) -> bool {
        self.find_first(id).is_found()
    }

    /// `slot` holds `id`
    pub fn has_at(&self, slot: usize, id: ItemId) -> bool {
        self.id_at(slot) == Some(id)
    }

    /// `slot` holds anything
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.slots.is_occupied(slot)
    }

    /// At least one of `ids` is held
    pub fn has_any(&self, ids: &[ItemId]) -> bool {
        ids.iter().any(|&id| self.has(id))
    }

    /// Every one of `ids` is held
    pub fn has_all(&self, ids: &[ItemId]) -> bool {
        ids.iter().all(|&id| self.has(id))
    }

    /// Rough room check: free slots >= amount. Ignores stacking, so it is
    /// advisory only and never used by transactions.
    pub fn room_for(&self, item: &Item) -> bool {
        usize::try_from(item.amount()).map_or(true, |amount| self.free_count() >= amount)
    }

    // ---- bulk operations ----

    /// Swap two slots
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        self.slots.swap(a, b)
    }

    /// Insert `item` at `index`, shifting later entries back by one
    pub fn insert_at(&mut self, item: Item, index: usize) -> bool {
        self.slots.insert_at(item, index)
    }

    /// Move all items to the front, keeping their order
    pub fn pack(&mut self) {
        self.slots.pack();
    }

    /// Empty every slot
    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    /// Cloned copy of every slot
    pub fn snapshot(&self) -> Vec<Option<Item>> {
        self.slots.snapshot()
    }

    /// Roll back to a snapshot. No validation is performed.
    pub fn restore(&mut self, snapshot: &[Option<Item>]) {
        self.slots.restore(snapshot);
    }

    /// Replace every slot, truncating or padding to capacity
    pub fn set_items(&mut self, items: Vec<Option<Item>>) {
        self.slots.replace_all(items);
    }

    /// Write a slot directly, bypassing every stacking rule.
    #[deprecated(note = "not transactional; use add/remove")]
    pub fn set(&mut self, slot: usize, item: Option<Item>) -> Result<()> {
        log::debug!("Unchecked write to slot {}", slot);
        self.slots.set(slot, item)
    }

    /// Write a single unit of `id` (or clear with `None`) directly.
    #[deprecated(note = "not transactional; use add/remove")]
    pub fn replace(&mut self, slot: usize, id: Option<ItemId>) -> Result<()> {
        log::debug!("Unchecked replace of slot {}", slot);
        self.slots.set(slot, id.map(Item::single))
    }

    // ---- dirty tracking ----

    /// Changed since the last [`clean`](Self::clean)
    pub fn is_dirty(&self) -> bool {
        self.slots.is_dirty()
    }

    /// Flag the container as changed
    pub fn mark_dirty(&mut self) {
        self.slots.mark_dirty();
    }

    /// Acknowledge the current contents as observed
    pub fn clean(&mut self) {
        self.slots.clean();
    }
}

fn clamp_total(total: i64) -> Amount {
    total.min(i64::from(MAX_AMOUNT)) as Amount
}

impl fmt::Debug for ItemContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemContainer")
            .field("config", &self.config)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a ItemContainer {
    type Item = &'a Option<Item>;
    type IntoIter = std::slice::Iter<'a, Option<Item>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.as_slice().iter()
    }
}
