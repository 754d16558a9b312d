//! Session behaviour across event sequences.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use nutri_core::{
    FixedInstance, Frame, InstanceChange, NoSelectionReason, Notice, Resolution, SelectionError,
    SelectionEvent, SessionState, dispatch_at, dispatch_settled, resolve,
};
use nutri_model::{FoodTable, NutrientRow, SectionId, Slot};

fn table() -> FoodTable {
    FoodTable::from_rows(
        vec!["energia_kcal".to_string()],
        vec![
            NutrientRow::new("Apple", "Fruit").with_value("energia_kcal", 52.0),
            NutrientRow::new("Rice", "Grain").with_value("energia_kcal", 128.0),
            NutrientRow::new("Banana", "Fruit").with_value("energia_kcal", 89.0),
            NutrientRow::new("Oats", "Grain").with_value("energia_kcal", 389.0),
        ],
    )
}

fn at(minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn pick(slot: Slot, food: &str) -> SelectionEvent {
    SelectionEvent::PickFood {
        slot,
        food: Some(food.to_string()),
    }
}

fn toggle(slot: Slot, group: &str) -> SelectionEvent {
    SelectionEvent::ToggleGroup {
        slot,
        group: group.to_string(),
    }
}

fn set_picks(left: &str, right: &str) -> SelectionEvent {
    SelectionEvent::SetPicks {
        left: Some(left.to_string()),
        right: Some(right.to_string()),
    }
}

fn shown(state: &SessionState) -> Option<(String, String)> {
    state
        .instance()
        .map(|instance| (instance.food1().to_string(), instance.food2().to_string()))
}

fn pair(food1: &str, food2: &str) -> Option<(String, String)> {
    Some((food1.to_string(), food2.to_string()))
}

fn change(frame: &Frame) -> InstanceChange {
    match &frame.resolution {
        Ok(Resolution::Comparison(change)) => *change,
        other => panic!("expected a comparison, got {other:?}"),
    }
}

#[test]
fn walkthrough_from_filter_to_duplicate() {
    let table = table();
    let mut state = SessionState::new();

    let frame = dispatch_at(&mut state, &table, toggle(Slot::Left, "Fruit"), at(0));
    assert_eq!(frame.available.left, vec!["Apple", "Banana"]);
    assert_eq!(frame.available.right.len(), 4);
    assert_eq!(
        frame.resolution,
        Ok(Resolution::NoSelection(NoSelectionReason::PromptSelectTwo))
    );

    dispatch_at(&mut state, &table, pick(Slot::Left, "Apple"), at(1));
    let frame = dispatch_at(&mut state, &table, pick(Slot::Right, "Rice"), at(2));
    assert_eq!(change(&frame), InstanceChange::Created);
    assert_eq!(shown(&state), pair("Apple", "Rice"));
    let rice = Arc::clone(state.instance().expect("instance").data2());

    let frame = dispatch_at(&mut state, &table, toggle(Slot::Right, "Grain"), at(3));
    assert_eq!(change(&frame), InstanceChange::Unchanged);
    let frame = dispatch_at(&mut state, &table, toggle(Slot::Right, "Grain"), at(4));
    assert_eq!(change(&frame), InstanceChange::Unchanged);
    assert!(frame.notices.is_empty());

    let frame = dispatch_at(&mut state, &table, pick(Slot::Left, "Banana"), at(5));
    assert_eq!(change(&frame), InstanceChange::ReplacedLeft);
    assert_eq!(shown(&state), pair("Banana", "Rice"));
    let instance = state.instance().expect("instance");
    assert!(Arc::ptr_eq(instance.data2(), &rice));
    assert_eq!(instance.created_at(), at(2));

    let frame = dispatch_at(&mut state, &table, toggle(Slot::Left, "Grain"), at(6));
    assert_eq!(change(&frame), InstanceChange::Unchanged);
    assert_eq!(frame.available.left, vec!["Apple", "Banana", "Oats", "Rice"]);

    let frame = dispatch_at(&mut state, &table, pick(Slot::Left, "Rice"), at(7));
    assert_eq!(
        frame.notices,
        vec![Notice::DuplicateCleared {
            slot: Slot::Right,
            food: "Rice".to_string()
        }]
    );
    assert_eq!(state.slot(Slot::Right).picked_food(), None);
    assert_eq!(
        frame.resolution,
        Ok(Resolution::NoSelection(NoSelectionReason::Incomplete))
    );
    assert!(state.instance().is_none());
}

#[test]
fn pick_outside_group_filter_is_rejected() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, toggle(Slot::Left, "Fruit"), at(0));

    let frame = dispatch_at(&mut state, &table, pick(Slot::Left, "Rice"), at(1));
    assert_eq!(
        frame.notices,
        vec![Notice::PickOutsideFilter {
            slot: Slot::Left,
            food: "Rice".to_string()
        }]
    );
    assert_eq!(state.slot(Slot::Left).picked_food(), None);

    let frame = dispatch_at(&mut state, &table, pick(Slot::Right, "Apple"), at(2));
    assert_eq!(
        frame.resolution,
        Ok(Resolution::NoSelection(NoSelectionReason::Incomplete))
    );
    assert!(state.instance().is_none());

    dispatch_at(&mut state, &table, pick(Slot::Left, "Banana"), at(3));
    let frame = dispatch_at(&mut state, &table, set_picks("Oats", "Rice"), at(4));
    assert_eq!(
        frame.notices,
        vec![Notice::PickOutsideFilter {
            slot: Slot::Left,
            food: "Oats".to_string()
        }]
    );
    assert_eq!(change(&frame), InstanceChange::ReplacedRight);
    assert_eq!(shown(&state), pair("Banana", "Rice"));
}

#[test]
fn unknown_pick_under_a_filter_still_fails_lookup() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, toggle(Slot::Right, "Grain"), at(0));
    let frame = dispatch_at(&mut state, &table, set_picks("Apple", "Quinoa"), at(1));
    assert!(frame.notices.is_empty());
    assert_eq!(
        frame.resolution,
        Err(SelectionError::FoodLookupFailed {
            slot: Slot::Right,
            food: "Quinoa".to_string()
        })
    );
}

#[test]
fn first_valid_pair_uses_table_rows() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Oats", "Apple"), at(0));
    let instance = state.instance().expect("instance");
    assert!(Arc::ptr_eq(
        instance.data1(),
        table.row_by_food("Oats").expect("oats")
    ));
    assert!(Arc::ptr_eq(
        instance.data2(),
        table.row_by_food("Apple").expect("apple")
    ));
    assert_eq!(instance.created_at(), at(0));
}

#[test]
fn right_side_substitution_keeps_left_row() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(0));
    let apple = Arc::clone(state.instance().expect("instance").data1());

    let frame = dispatch_at(&mut state, &table, pick(Slot::Right, "Oats"), at(1));
    assert_eq!(change(&frame), InstanceChange::ReplacedRight);
    assert!(Arc::ptr_eq(state.instance().expect("instance").data1(), &apple));
}

#[test]
fn both_sides_changing_settles_over_two_renders() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(0));

    let frame = dispatch_at(&mut state, &table, set_picks("Banana", "Oats"), at(1));
    assert_eq!(change(&frame), InstanceChange::ReplacedLeft);
    assert!(!frame.settled);
    assert_eq!(shown(&state), pair("Banana", "Rice"));
    let banana = Arc::clone(state.instance().expect("instance").data1());

    let frame = dispatch_at(&mut state, &table, SelectionEvent::Refresh, at(2));
    assert_eq!(change(&frame), InstanceChange::ReplacedRight);
    assert!(frame.settled);
    assert_eq!(shown(&state), pair("Banana", "Oats"));
    assert!(Arc::ptr_eq(state.instance().expect("instance").data1(), &banana));
}

#[test]
fn settled_dispatch_catches_up_in_one_call() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_settled(&mut state, &table, set_picks("Apple", "Rice"));

    let frame = dispatch_settled(&mut state, &table, set_picks("Banana", "Oats"));
    assert!(frame.settled);
    assert_eq!(change(&frame), InstanceChange::ReplacedRight);
    assert_eq!(shown(&state), pair("Banana", "Oats"));
}

#[test]
fn swap_rebuilds_both_sides() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(0));

    let frame = dispatch_at(&mut state, &table, set_picks("Rice", "Apple"), at(1));
    assert_eq!(change(&frame), InstanceChange::Rebuilt);
    assert!(frame.settled);
    assert!(frame.notices.is_empty());
    assert_eq!(shown(&state), pair("Rice", "Apple"));
    assert_eq!(state.instance().expect("instance").created_at(), at(1));
}

#[test]
fn crossing_pick_rebuilds_instead_of_duplicating() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(0));

    let frame = dispatch_at(&mut state, &table, set_picks("Rice", "Oats"), at(1));
    assert_eq!(change(&frame), InstanceChange::Rebuilt);
    assert_eq!(shown(&state), pair("Rice", "Oats"));
}

#[test]
fn lookup_failure_aborts_and_keeps_instance() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(0));

    let frame = dispatch_at(&mut state, &table, pick(Slot::Left, "Quinoa"), at(1));
    assert_eq!(
        frame.resolution,
        Err(SelectionError::FoodLookupFailed {
            slot: Slot::Left,
            food: "Quinoa".to_string()
        })
    );
    assert!(!frame.has_comparison());
    assert_eq!(shown(&state), pair("Apple", "Rice"));

    let frame = dispatch_at(&mut state, &table, pick(Slot::Left, "Apple"), at(2));
    assert_eq!(change(&frame), InstanceChange::Unchanged);
}

#[test]
fn lookup_failure_without_instance_creates_nothing() {
    let table = table();
    let mut state = SessionState::new();
    let frame = dispatch_at(&mut state, &table, set_picks("Apple", "Quinoa"), at(0));
    assert!(matches!(
        frame.resolution,
        Err(SelectionError::FoodLookupFailed {
            slot: Slot::Right,
            ..
        })
    ));
    assert!(state.instance().is_none());
}

#[test]
fn filter_change_clears_pick_only_without_comparison() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, pick(Slot::Left, "Apple"), at(0));
    let frame = dispatch_at(&mut state, &table, toggle(Slot::Left, "Grain"), at(1));
    assert_eq!(
        frame.notices,
        vec![Notice::PickCleared {
            slot: Slot::Left,
            food: "Apple".to_string()
        }]
    );
    assert_eq!(
        frame.resolution,
        Ok(Resolution::NoSelection(NoSelectionReason::PromptSelectTwo))
    );

    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(2));
    let frame = dispatch_at(&mut state, &table, SelectionEvent::ClearGroups(Slot::Left), at(3));
    assert!(frame.notices.is_empty());
    assert_eq!(state.slot(Slot::Left).picked_food(), Some("Apple"));
    assert_eq!(change(&frame), InstanceChange::Unchanged);
}

#[test]
fn clearing_both_picks_prompts_again() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(0));
    let frame = dispatch_at(
        &mut state,
        &table,
        SelectionEvent::SetPicks {
            left: None,
            right: None,
        },
        at(1),
    );
    assert_eq!(
        frame.resolution,
        Ok(Resolution::NoSelection(NoSelectionReason::PromptSelectTwo))
    );
    assert!(state.instance().is_none());
}

#[test]
fn equal_pair_clears_instance_with_warning() {
    let table = table();
    let mut instance = None;
    resolve(&mut instance, "Apple", "Rice", &table, at(0)).expect("create");
    assert!(instance.as_ref().is_some_and(FixedInstance::is_valid));

    let resolution = resolve(&mut instance, "Apple", "Apple", &table, at(1)).expect("resolve");
    assert_eq!(
        resolution,
        Resolution::NoSelection(NoSelectionReason::MustDiffer)
    );
    assert!(NoSelectionReason::MustDiffer.is_warning());
    assert!(instance.is_none());
}

#[test]
fn setting_the_same_food_on_both_sides_never_displays_it() {
    let table = table();
    let mut state = SessionState::new();
    dispatch_at(&mut state, &table, set_picks("Apple", "Rice"), at(0));
    let frame = dispatch_at(&mut state, &table, set_picks("Apple", "Apple"), at(1));
    assert_eq!(
        frame.notices,
        vec![Notice::DuplicateCleared {
            slot: Slot::Left,
            food: "Apple".to_string()
        }]
    );
    assert!(state.instance().is_none());
}

#[test]
fn section_events_keep_report_order() {
    let table = table();
    let mut state = SessionState::new().with_sections([SectionId::BComplex]);
    dispatch_at(
        &mut state,
        &table,
        SelectionEvent::ToggleSection(SectionId::MacroComparison),
        at(0),
    );
    let frame = dispatch_at(
        &mut state,
        &table,
        SelectionEvent::ToggleSection(SectionId::Minerals),
        at(1),
    );
    assert_eq!(
        frame.sections,
        vec![
            SectionId::MacroComparison,
            SectionId::Minerals,
            SectionId::BComplex
        ]
    );
    let frame = dispatch_at(&mut state, &table, SelectionEvent::ClearSections, at(2));
    assert!(frame.sections.is_empty());
}
