//! One render: apply an event, run the transition checks, resolve.

use chrono::{DateTime, Utc};
use nutri_model::{FoodTable, PerSlot, SectionId, Slot};
use tracing::{debug, warn};

use crate::error::SelectionError;
use crate::filter::foods_in_groups;
use crate::selection::resolve::{Resolution, resolve};
use crate::selection::state::{Notice, SessionState};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    ToggleGroup { slot: Slot, group: String },
    ClearGroups(Slot),
    /// Picks a food on one side; `None` clears the pick.
    PickFood { slot: Slot, food: Option<String> },
    /// Sets both picks in one render.
    SetPicks {
        left: Option<String>,
        right: Option<String>,
    },
    ToggleSection(SectionId),
    ClearSections,
    /// Re-renders without changing anything.
    Refresh,
}

/// What a render produced.
#[derive(Debug, Clone)]
pub struct Frame {
    pub notices: Vec<Notice>,
    /// Foods each side may pick from under its current filter.
    pub available: PerSlot<Vec<String>>,
    pub resolution: Result<Resolution, SelectionError>,
    pub sections: Vec<SectionId>,
    /// False while the displayed comparison still lags behind the picks,
    /// e.g. after both sides changed in one event. Another render catches up.
    pub settled: bool,
}

impl Frame {
    /// Whether the comparison should be drawn.
    pub fn has_comparison(&self) -> bool {
        matches!(&self.resolution, Ok(resolution) if resolution.is_comparison())
    }
}

impl SelectionEvent {
    /// Sides whose pick this event sets.
    fn picked_slots(&self) -> &[Slot] {
        match self {
            SelectionEvent::PickFood { slot, .. } => std::slice::from_ref(slot),
            SelectionEvent::SetPicks { .. } => &Slot::ALL,
            _ => &[],
        }
    }
}

fn apply(state: &mut SessionState, event: SelectionEvent) {
    match event {
        SelectionEvent::ToggleGroup { slot, group } => state.toggle_group(slot, &group),
        SelectionEvent::ClearGroups(slot) => state.clear_groups(slot),
        SelectionEvent::PickFood { slot, food } => state.pick_food(slot, food),
        SelectionEvent::SetPicks { left, right } => {
            state.pick_food(Slot::Left, left);
            state.pick_food(Slot::Right, right);
        }
        SelectionEvent::ToggleSection(section) => {
            state.toggle_section(section);
        }
        SelectionEvent::ClearSections => state.clear_sections(),
        SelectionEvent::Refresh => {}
    }
}

/// Extra renders allowed for the comparison to catch up with the picks.
const MAX_CATCH_UP: usize = 2;

/// Renders `event` at the current time. See [`dispatch_at`].
pub fn dispatch(state: &mut SessionState, table: &FoodTable, event: SelectionEvent) -> Frame {
    dispatch_at(state, table, event, Utc::now())
}

/// Applies `event` and re-evaluates the whole session, in order: the event
/// itself, the group filter check on new picks, filter autoclear (left,
/// right), the duplicate-pick guard (left, right), then resolution. `now`
/// stamps a newly created comparison.
pub fn dispatch_at(
    state: &mut SessionState,
    table: &FoodTable,
    event: SelectionEvent,
    now: DateTime<Utc>,
) -> Frame {
    debug!(?event, "dispatch");
    let previous: Vec<(Slot, Option<String>)> = event
        .picked_slots()
        .iter()
        .map(|slot| (*slot, state.slot(*slot).picked_food().map(str::to_string)))
        .collect();
    apply(state, event);

    let mut notices = Vec::new();
    for (slot, food) in previous {
        notices.extend(state.reject_pick_outside_filter(slot, table, food));
    }
    for slot in Slot::ALL {
        notices.extend(state.autoclear_on_filter_change(slot));
    }
    for slot in Slot::ALL {
        notices.extend(state.guard_duplicate_pick(slot));
    }

    let (food1, food2) = state.picks();
    let (food1, food2) = (food1.to_string(), food2.to_string());
    let resolution = resolve(state.instance_mut(), &food1, &food2, table, now);
    if let Err(error) = &resolution {
        warn!(%error, "render aborted");
    }
    let settled = state
        .instance()
        .is_none_or(|instance| instance.matches(&food1, &food2));

    Frame {
        notices,
        available: PerSlot::new(
            foods_in_groups(table, state.slot(Slot::Left).selected_groups()),
            foods_in_groups(table, state.slot(Slot::Right).selected_groups()),
        ),
        resolution,
        sections: state.ordered_sections(),
        settled,
    }
}

/// Renders `event`, then refreshes until the displayed comparison matches
/// the picks. Notices of every render are kept, in order.
pub fn dispatch_settled(
    state: &mut SessionState,
    table: &FoodTable,
    event: SelectionEvent,
) -> Frame {
    let mut frame = dispatch(state, table, event);
    for _ in 0..MAX_CATCH_UP {
        if frame.settled || !frame.has_comparison() {
            break;
        }
        let mut notices = std::mem::take(&mut frame.notices);
        frame = dispatch(state, table, SelectionEvent::Refresh);
        notices.append(&mut frame.notices);
        frame.notices = notices;
    }
    frame
}
