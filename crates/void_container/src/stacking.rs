//! Stack aggregation rules

use crate::config::StackPolicy;
use crate::definition::ItemDefinition;
use crate::item::Item;

/// Whether additions and removals of `item` go through a single aggregated
/// stack rather than one unit per slot.
///
/// Items with properties never stack. Under [`StackPolicy::FullStacking`]
/// every other item does, regardless of its definition; the first slot
/// holding the id is then its authoritative stack.
pub fn is_stackable(item: &Item, policy: StackPolicy, definition: Option<&ItemDefinition>) -> bool {
    if item.has_properties() {
        return false;
    }
    policy == StackPolicy::FullStacking || definition.map_or(false, |def| def.stackable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemProperty;

    #[test]
    fn test_regular_policy_follows_definition() {
        let coins = ItemDefinition::new(995).with_stackable(true);
        let sword = ItemDefinition::new(1277);

        assert!(is_stackable(&Item::new(995, 10), StackPolicy::Regular, Some(&coins)));
        assert!(!is_stackable(&Item::single(1277), StackPolicy::Regular, Some(&sword)));
        assert!(!is_stackable(&Item::single(1), StackPolicy::Regular, None));
    }

    #[test]
    fn test_full_stacking_overrides_definition() {
        let sword = ItemDefinition::new(1277);

        assert!(is_stackable(&Item::single(1277), StackPolicy::FullStacking, Some(&sword)));
        assert!(is_stackable(&Item::single(1), StackPolicy::FullStacking, None));
    }

    #[test]
    fn test_properties_never_stack() {
        let coins = ItemDefinition::new(995).with_stackable(true);
        let marked = Item::new(995, 10).with_property("tradeable", ItemProperty::Bool(false));

        assert!(!is_stackable(&marked, StackPolicy::Regular, Some(&coins)));
        assert!(!is_stackable(&marked, StackPolicy::FullStacking, Some(&coins)));
    }
}
