//! Tests for the change-sets published by data providers.

use std::sync::Arc;

use horizon_sourcing::model::{
    AnyDataProvider, ArrayDataProvider, ChangeSet, Coordinate, DataModifier, DataModifying,
    DataProvider, DataProviderSwitcher, Edit, SectionedSource,
};
use horizon_sourcing::settings::{ModifierPolicy, SourcingConfig};
use parking_lot::Mutex;

fn record<P: SectionedSource>(provider: &P) -> Arc<Mutex<Vec<ChangeSet>>> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let recv = received.clone();
    provider
        .observable()
        .add_observer(move |change| recv.lock().push(change.clone()));
    received
}

#[test]
fn test_delete_publishes_single_edit() {
    let provider = ArrayDataProvider::from_rows(vec!["a", "b", "c"]);
    let received = record(&provider);

    provider.delete_item(Coordinate::new(0, 1), false).unwrap();

    assert_eq!(provider.content().sections(), &[vec!["a", "c"]]);
    assert_eq!(
        *received.lock(),
        vec![ChangeSet::Edits(vec![Edit::DeleteItem(Coordinate::new(0, 1))])]
    );
}

#[test]
fn test_move_between_sections() {
    let provider = ArrayDataProvider::from_sections(vec![vec!["a", "b"], vec!["c"]]);
    let received = record(&provider);

    provider
        .move_item(Coordinate::new(0, 0), Coordinate::new(1, 1), false)
        .unwrap();

    assert_eq!(provider.content().sections(), &[vec!["b"], vec!["c", "a"]]);
    assert_eq!(
        *received.lock(),
        vec![ChangeSet::Edits(vec![Edit::MoveItem {
            from: Coordinate::new(0, 0),
            to: Coordinate::new(1, 1),
        }])]
    );
}

#[test]
fn test_move_is_not_delete_plus_insert() {
    let provider = ArrayDataProvider::from_rows(vec![1, 2, 3]);
    let received = record(&provider);

    provider
        .move_item(Coordinate::new(0, 0), Coordinate::new(0, 2), false)
        .unwrap();

    let received = received.lock();
    assert_eq!(received.len(), 1);
    let edits = received[0].edits();
    assert_eq!(
        edits,
        &[Edit::MoveItem {
            from: Coordinate::new(0, 0),
            to: Coordinate::new(0, 2),
        }]
    );
    assert!(!edits.iter().any(|edit| matches!(
        edit,
        Edit::DeleteItem(_) | Edit::InsertItem(_)
    )));
}

#[test]
fn test_silent_edit_still_updates_model() {
    let provider = ArrayDataProvider::from_rows(vec!["x", "y"]);
    let received = record(&provider);

    provider
        .move_item(Coordinate::new(0, 1), Coordinate::new(0, 0), true)
        .unwrap();

    assert_eq!(provider.element_at(Coordinate::new(0, 0)).unwrap(), "y");
    assert!(received.lock()[0].is_silent());
}

#[test]
fn test_publish_order_matches_call_order() {
    let provider = ArrayDataProvider::from_rows(vec![0, 1, 2, 3]);
    let received = record(&provider);

    provider.delete_item(Coordinate::new(0, 3), false).unwrap();
    provider.insert_item(Coordinate::new(0, 0), 9, true).unwrap();
    provider.update_item(Coordinate::new(0, 1), 7, false).unwrap();
    provider.set_content(vec![vec![]]);

    assert_eq!(
        *received.lock(),
        vec![
            ChangeSet::Edits(vec![Edit::DeleteItem(Coordinate::new(0, 3))]),
            ChangeSet::SilentEdits(vec![Edit::InsertItem(Coordinate::new(0, 0))]),
            ChangeSet::Edits(vec![Edit::UpdateItem(Coordinate::new(0, 1))]),
            ChangeSet::FullReload,
        ]
    );
}

#[test]
fn test_stale_coordinate_fails_without_publishing() {
    let provider = ArrayDataProvider::from_rows(vec![1, 2]);
    let received = record(&provider);

    let err = provider
        .move_item(Coordinate::new(0, 2), Coordinate::new(0, 0), false)
        .unwrap_err();

    assert!(err.is_out_of_range());
    assert!(received.lock().is_empty());
}

#[test]
fn test_remove_observer_twice_keeps_others() {
    let provider = ArrayDataProvider::from_rows(vec![1, 2, 3]);
    let first = Arc::new(Mutex::new(0));
    let second = Arc::new(Mutex::new(0));

    let hits = first.clone();
    let token = provider.observable().add_observer(move |_| *hits.lock() += 1);
    let hits = second.clone();
    provider.observable().add_observer(move |_| *hits.lock() += 1);

    assert!(provider.observable().remove_observer(token));
    assert!(!provider.observable().remove_observer(token));

    provider.delete_item(Coordinate::new(0, 0), false).unwrap();
    assert_eq!(*first.lock(), 0);
    assert_eq!(*second.lock(), 1);
}

#[test]
fn test_reconfigure_publishes_given_change() {
    let provider = ArrayDataProvider::from_rows(vec!["a"]);
    let received = record(&provider);
    let change = ChangeSet::Edits(vec![Edit::InsertItem(Coordinate::new(0, 1))]);

    provider.reconfigure(vec![vec!["a", "b"]], change.clone());

    assert_eq!(provider.item_count(0).unwrap(), 2);
    assert_eq!(*received.lock(), vec![change]);
}

#[test]
fn test_modifier_from_config() {
    let config = SourcingConfig::from_toml_str(
        r#"
        [modifier]
        can_move_items = true
        "#,
    )
    .unwrap();
    let provider = Arc::new(ArrayDataProvider::from_rows(vec!["a", "b"]));
    let modifier = DataModifier::new(provider.clone(), config.modifier);

    assert!(modifier.can_move_item(Coordinate::new(0, 1)));
    assert!(!modifier.can_delete_item(Coordinate::new(0, 1)));
    assert_eq!(modifier.policy(), ModifierPolicy {
        can_move_items: true,
        can_delete_items: false,
    });
}

#[test]
fn test_switcher_forwards_and_reloads() {
    let lists = [
        Arc::new(ArrayDataProvider::from_rows(vec!["one"])),
        Arc::new(ArrayDataProvider::from_rows(vec!["two", "three"])),
    ];
    let handles: Vec<AnyDataProvider<&str>> = lists
        .iter()
        .map(|provider| AnyDataProvider::from_arc(provider.clone()))
        .collect();
    let switcher = DataProviderSwitcher::new(0usize, move |index: &usize| handles[*index].clone());
    let received = record(&switcher);

    lists[0].insert_item(Coordinate::new(0, 1), "uno", false).unwrap();
    switcher.set_state(1);
    lists[1].delete_item(Coordinate::new(0, 0), false).unwrap();

    assert_eq!(
        *received.lock(),
        vec![
            ChangeSet::Edits(vec![Edit::InsertItem(Coordinate::new(0, 1))]),
            ChangeSet::FullReload,
            ChangeSet::Edits(vec![Edit::DeleteItem(Coordinate::new(0, 0))]),
        ]
    );
    assert_eq!(switcher.element_at(Coordinate::new(0, 0)).unwrap(), "three");
    assert_eq!(switcher.coordinate_of(&"three"), Some(Coordinate::new(0, 0)));
}
