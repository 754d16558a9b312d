//! Reconciles the two picks with the displayed comparison.
//!
//! Runs on every render. At most one change is made to the instance per
//! call: a create, a single-side replacement, a rebuild, or a clear.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use nutri_model::{FoodTable, NutrientRow, Slot};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SelectionError};
use crate::selection::instance::FixedInstance;

/// Both names are present and distinct.
pub fn valid_selection(food1: &str, food2: &str) -> bool {
    !food1.is_empty() && !food2.is_empty() && food1 != food2
}

/// How the displayed comparison changed during a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceChange {
    Created,
    /// Only the left side was replaced.
    ReplacedLeft,
    ReplacedRight,
    /// Both sides were looked up again, e.g. after a swap.
    Rebuilt,
    Unchanged,
}

/// Why nothing is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoSelectionReason {
    /// Neither side has a pick.
    PromptSelectTwo,
    /// Both sides picked the same food.
    MustDiffer,
    /// Only one side has a pick.
    Incomplete,
}

impl NoSelectionReason {
    /// Whether the reason should be shown as a warning rather than a hint.
    pub fn is_warning(self) -> bool {
        matches!(self, NoSelectionReason::MustDiffer)
    }
}

impl fmt::Display for NoSelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoSelectionReason::PromptSelectTwo => f.write_str("select two foods to compare"),
            NoSelectionReason::MustDiffer => f.write_str("the two foods must differ"),
            NoSelectionReason::Incomplete => f.write_str("select a food on the other side"),
        }
    }
}

/// Outcome of a successful render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "detail")]
pub enum Resolution {
    Comparison(InstanceChange),
    NoSelection(NoSelectionReason),
}

impl Resolution {
    pub fn is_comparison(self) -> bool {
        matches!(self, Resolution::Comparison(_))
    }
}

fn lookup(table: &FoodTable, slot: Slot, food: &str) -> Result<Arc<NutrientRow>> {
    table
        .row_by_food(food)
        .cloned()
        .ok_or_else(|| SelectionError::FoodLookupFailed {
            slot,
            food: food.to_string(),
        })
}

fn no_selection(food1: &str, food2: &str) -> NoSelectionReason {
    match (food1.is_empty(), food2.is_empty()) {
        (true, true) => NoSelectionReason::PromptSelectTwo,
        (false, false) => NoSelectionReason::MustDiffer,
        _ => NoSelectionReason::Incomplete,
    }
}

/// Resolves `(food1, food2)` against `instance`. Empty names mean "no pick".
///
/// With a valid instance and a valid, different pair:
/// - only the left name changed: the left side is replaced;
/// - only the right name changed: the right side is replaced;
/// - both changed: the left side is replaced, unless the new left name is the
///   instance's right food (a swap or crossing pick), in which case both
///   sides are rebuilt so the two sides never hold the same food.
///
/// An invalid pair clears the instance. A failed lookup returns
/// [`SelectionError::FoodLookupFailed`] and leaves the instance as it was.
pub fn resolve(
    instance: &mut Option<FixedInstance>,
    food1: &str,
    food2: &str,
    table: &FoodTable,
    now: DateTime<Utc>,
) -> Result<Resolution> {
    if !valid_selection(food1, food2) {
        let reason = no_selection(food1, food2);
        if instance.take().is_some() {
            debug!(?reason, "comparison cleared");
        }
        return Ok(Resolution::NoSelection(reason));
    }

    let current = instance.as_mut().filter(|current| current.is_valid());
    let Some(current) = current else {
        let data1 = lookup(table, Slot::Left, food1)?;
        let data2 = lookup(table, Slot::Right, food2)?;
        debug!(food1, food2, "comparison created");
        *instance = Some(FixedInstance::new(data1, data2, now));
        return Ok(Resolution::Comparison(InstanceChange::Created));
    };

    if current.matches(food1, food2) {
        return Ok(Resolution::Comparison(InstanceChange::Unchanged));
    }

    let left_changed = current.food1() != food1;
    let right_changed = current.food2() != food2;
    let change = if left_changed && food1 != current.food2() {
        let row = lookup(table, Slot::Left, food1)?;
        current.replace(Slot::Left, row);
        InstanceChange::ReplacedLeft
    } else if right_changed && !left_changed {
        let row = lookup(table, Slot::Right, food2)?;
        current.replace(Slot::Right, row);
        InstanceChange::ReplacedRight
    } else {
        let data1 = lookup(table, Slot::Left, food1)?;
        let data2 = lookup(table, Slot::Right, food2)?;
        *current = FixedInstance::new(data1, data2, now);
        InstanceChange::Rebuilt
    };
    debug!(food1, food2, ?change, "comparison updated");
    Ok(Resolution::Comparison(change))
}
