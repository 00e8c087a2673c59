//! Bank placeholder substitution
//!
//! When a real item is withdrawn from a bank the bank may keep a
//! placeholder in its slot. Depositing the item again removes the
//! placeholder and puts the item back where it was.

use crate::definition::ItemDefinition;
use crate::item::Amount;
use crate::slots::SlotArray;

/// Clear the placeholder linked to `definition` and return the freed slot.
///
/// Only applies when the real item is not held at all (`held == 0`) and the
/// definition is a real item rather than a placeholder itself. Callers are
/// expected to have checked that the container is bank-style.
pub fn resolve(
    slots: &mut SlotArray,
    definition: &ItemDefinition,
    held: Amount,
    template: u32,
) -> Option<usize> {
    if held > 0 || definition.is_placeholder(template) {
        return None;
    }

    let placeholder_id = definition.placeholder_id?;
    let slot = slots.find_first(placeholder_id).slot()?;
    slots.take(slot);
    log::debug!(
        "Replaced placeholder {} at slot {} for item {}",
        placeholder_id,
        slot,
        definition.id
    );
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    const TEMPLATE: u32 = 14401;

    fn whip() -> ItemDefinition {
        ItemDefinition::new(4151).with_placeholder(14517)
    }

    #[test]
    fn test_clears_placeholder() {
        let mut slots = SlotArray::new(10);
        slots.put(6, Some(Item::single(14517)));

        assert_eq!(resolve(&mut slots, &whip(), 0, TEMPLATE), Some(6));
        assert!(!slots.is_occupied(6));
    }

    #[test]
    fn test_noop_when_item_already_held() {
        let mut slots = SlotArray::new(10);
        slots.put(6, Some(Item::single(14517)));

        assert_eq!(resolve(&mut slots, &whip(), 1, TEMPLATE), None);
        assert!(slots.is_occupied(6));
    }

    #[test]
    fn test_noop_for_placeholder_definition() {
        let mut slots = SlotArray::new(10);
        slots.put(2, Some(Item::single(4151)));
        let placeholder = ItemDefinition::new(14517)
            .with_placeholder(4151)
            .with_placeholder_marker(TEMPLATE);

        assert_eq!(resolve(&mut slots, &placeholder, 0, TEMPLATE), None);
        assert!(slots.is_occupied(2));
    }

    #[test]
    fn test_noop_without_link_or_match() {
        let mut slots = SlotArray::new(10);
        slots.clean();

        assert_eq!(resolve(&mut slots, &ItemDefinition::new(995), 0, TEMPLATE), None);
        assert_eq!(resolve(&mut slots, &whip(), 0, TEMPLATE), None);
        assert!(!slots.is_dirty());
    }
}
