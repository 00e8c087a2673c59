//! End-to-end container behaviour through the public API

use std::collections::HashMap;
use std::sync::Arc;
use void_container::prelude::*;

const STACKABLE: ItemId = 1;
const DISCRETE: ItemId = 7;
const FILLER: ItemId = 8;
const BANKED: ItemId = 4151;
const BANKED_PLACEHOLDER: ItemId = 14517;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn definitions() -> Arc<dyn ItemDefinitionProvider> {
    let defs: HashMap<ItemId, ItemDefinition> = [
        ItemDefinition::new(STACKABLE).with_stackable(true),
        ItemDefinition::new(DISCRETE),
        ItemDefinition::new(FILLER),
        ItemDefinition::new(BANKED).with_placeholder(BANKED_PLACEHOLDER),
        ItemDefinition::new(BANKED_PLACEHOLDER)
            .with_placeholder(BANKED)
            .with_placeholder_marker(14401),
    ]
    .into_iter()
    .map(|def| (def.id, def))
    .collect();
    Arc::new(defs)
}

fn inventory() -> ItemContainer {
    init_logging();
    ItemContainer::new(ContainerConfig::inventory(), definitions()).unwrap()
}

#[test]
fn test_empty_container() {
    let inv = inventory();

    assert_eq!(inv.capacity(), 28);
    assert_eq!(inv.occupied_count(), 0);
    assert_eq!(inv.free_count(), 28);
    assert!(inv.is_empty());
}

#[test]
fn test_add_then_remove_round_trip() {
    for (id, amount) in [(STACKABLE, 1_000), (DISCRETE, 12)] {
        let mut inv = inventory();

        assert!(inv.add(&Item::new(id, amount)).success());
        assert_eq!(inv.count(id), amount);
        assert!(inv.remove(&Item::new(id, amount)).success());
        assert!(inv.is_empty());
    }
}

#[test]
fn test_first_stackable_add() {
    let mut inv = inventory();

    let result = inv.add(&Item::new(STACKABLE, 5));
    assert_eq!(result, TransactionResult::new(5, 5, vec![0]));
    assert_eq!(inv.count(STACKABLE), 5);
}

#[test]
fn test_stack_overflow_precheck_and_force() {
    let mut inv = inventory();
    inv.add(&Item::new(STACKABLE, MAX_AMOUNT - 2));
    inv.clean();

    let rejected = inv.add(&Item::new(STACKABLE, 10));
    assert_eq!((rejected.requested(), rejected.completed()), (10, 0));
    assert_eq!(inv.count(STACKABLE), MAX_AMOUNT - 2);
    assert!(!inv.is_dirty());

    let forced = inv.add_forced(&Item::new(STACKABLE, 10));
    assert_eq!((forced.requested(), forced.completed()), (10, 2));
    assert_eq!(forced.affected_slots(), &[0]);
    assert_eq!(inv.get(0).map(Item::amount), Some(MAX_AMOUNT));
}

#[test]
fn test_stack_fits_exactly_at_max() {
    let mut inv = inventory();
    inv.add(&Item::new(STACKABLE, MAX_AMOUNT - 2));

    let result = inv.add(&Item::new(STACKABLE, 2));
    assert!(result.success());
    assert_eq!(inv.count(STACKABLE), MAX_AMOUNT);
}

#[test]
fn test_bank_placeholder_keeps_position() {
    init_logging();
    let mut bank = ItemContainer::new(ContainerConfig::bank(), definitions()).unwrap();
    bank.add_with(Some(&Item::new(FILLER, 3)), false, 0);
    bank.add_with(Some(&Item::single(BANKED_PLACEHOLDER)), false, 10);
    assert!(bank.has_at(10, BANKED_PLACEHOLDER));

    let result = bank.add(&Item::single(BANKED));
    assert_eq!(result.affected_slots(), &[10]);
    assert!(bank.has_at(10, BANKED));
    assert!(!bank.has(BANKED_PLACEHOLDER));
    assert_eq!(bank.count(BANKED), 1);
}

#[test]
fn test_bank_placeholder_ignored_when_already_banked() {
    init_logging();
    let mut bank = ItemContainer::new(ContainerConfig::bank(), definitions()).unwrap();
    bank.add(&Item::single(BANKED));
    bank.add_with(Some(&Item::single(BANKED_PLACEHOLDER)), false, 10);

    let result = bank.add(&Item::single(BANKED));
    assert_eq!(result.affected_slots(), &[0]);
    assert_eq!(bank.count(BANKED), 2);
    assert!(bank.has_at(10, BANKED_PLACEHOLDER));
}

#[test]
fn test_discrete_add_wraps_from_hint() {
    init_logging();
    let mut inv = ItemContainer::new(ContainerConfig::new(10), definitions()).unwrap();
    let layout = (0..10)
        .map(|slot| (![2, 5, 9].contains(&slot)).then(|| Item::single(FILLER)))
        .collect();
    inv.set_items(layout);
    assert_eq!(inv.free_count(), 3);

    let result = inv.add_with(Some(&Item::new(DISCRETE, 3)), false, 5);
    assert_eq!(result.completed(), 3);
    assert_eq!(result.affected_slots(), &[5, 9, 2]);
    assert!(inv.is_full());
}

#[test]
fn test_discrete_add_places_min_of_request_and_free() {
    let mut inv = inventory();
    inv.add(&Item::new(FILLER, 25));

    let result = inv.add_forced(&Item::new(DISCRETE, 10));
    assert_eq!(result.completed(), 3);
    assert_eq!(result.affected_slots(), &[25, 26, 27]);
}

#[test]
fn test_shortfall_spills_to_caller() {
    let mut inv = inventory();
    inv.add(&Item::new(FILLER, 26));
    let mut ground = Vec::new();

    let result = inv.add_or_spill(&Item::new(DISCRETE, 5), &mut ground);
    assert!(result.failed());
    assert_eq!(ground.iter().map(Item::amount).sum::<Amount>(), 3);
    assert_eq!(inv.count(DISCRETE) + ground[0].amount(), 5);
}

#[test]
fn test_failed_transaction_rollback() {
    let mut inv = inventory();
    inv.add(&Item::new(STACKABLE, 100));
    let before = inv.snapshot();

    let taken = inv.remove(&Item::new(STACKABLE, 60));
    let given = inv.add(&Item::new(DISCRETE, 40));
    assert!(taken.success());
    assert!(given.failed());

    inv.restore(&before);
    assert_eq!(inv.count(STACKABLE), 100);
    assert_eq!(inv.count(DISCRETE), 0);
}

#[test]
fn test_insert_and_pack_preserve_order() {
    let mut inv = inventory();
    inv.add_with(Some(&Item::single(FILLER)), false, 3);
    inv.add_with(Some(&Item::new(STACKABLE, 9)), false, 6);

    inv.pack();
    assert_eq!(inv.id_at(0), Some(FILLER));
    assert_eq!(inv.id_at(1), Some(STACKABLE));

    assert!(inv.insert_at(Item::single(DISCRETE), 0));
    let order: Vec<ItemId> = inv.iter().map(|(_, item)| item.id()).collect();
    assert_eq!(order, vec![DISCRETE, FILLER, STACKABLE]);
}

#[test]
fn test_catalog_reload_changes_stacking() {
    init_logging();
    let catalog = Arc::new(ItemCatalog::from_json(r#"[{"id": 7}]"#).unwrap());
    let mut inv = ItemContainer::new(ContainerConfig::inventory(), catalog.clone()).unwrap();

    inv.add(&Item::new(DISCRETE, 2));
    assert_eq!(inv.occupied_count(), 2);

    catalog.reload_json(r#"[{"id": 7, "stackable": true}]"#).unwrap();
    inv.clear_all();
    inv.add(&Item::new(DISCRETE, 2));
    assert_eq!(inv.occupied_count(), 1);
}
