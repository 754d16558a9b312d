use std::collections::BTreeSet;
use std::fmt;

use nutri_model::{FoodTable, PerSlot, SectionId, SectionKind, Slot};
use serde::Serialize;
use tracing::debug;

use crate::filter::{exists, foods_in_groups};
use crate::selection::instance::FixedInstance;
use crate::selection::slot_selection::SlotSelection;

/// Something the user should be told about after a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Notice {
    /// The pick on `slot` was cleared because its group filter changed.
    PickCleared { slot: Slot, food: String },
    /// The pick on `slot` was cleared because the other side picked the same food.
    DuplicateCleared { slot: Slot, food: String },
    /// `food` is outside the group filter of `slot`; the previous pick stays.
    PickOutsideFilter { slot: Slot, food: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PickCleared { slot, food } => {
                write!(f, "group filter changed: cleared {food} on the {slot} side")
            }
            Notice::DuplicateCleared { slot, food } => write!(
                f,
                "foods must differ: {food} was already picked, cleared the {slot} side"
            ),
            Notice::PickOutsideFilter { slot, food } => write!(
                f,
                "{food} is not in the {slot} group filter, kept the previous pick"
            ),
        }
    }
}

/// Everything one session remembers between renders.
///
/// `last_groups` and `last_food` only exist to detect transitions: they hold
/// what the previous render saw.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    slots: PerSlot<SlotSelection>,
    instance: Option<FixedInstance>,
    sections: BTreeSet<SectionId>,
    last_groups: PerSlot<BTreeSet<String>>,
    last_food: PerSlot<Option<String>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the session with these report sections enabled.
    #[must_use]
    pub fn with_sections<I>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = SectionId>,
    {
        self.sections.extend(sections);
        self
    }

    pub fn slot(&self, slot: Slot) -> &SlotSelection {
        &self.slots[slot]
    }

    pub fn instance(&self) -> Option<&FixedInstance> {
        self.instance.as_ref()
    }

    pub(crate) fn instance_mut(&mut self) -> &mut Option<FixedInstance> {
        &mut self.instance
    }

    /// The two picks as the resolver sees them.
    pub fn picks(&self) -> (&str, &str) {
        (
            self.slots.left.pick_or_empty(),
            self.slots.right.pick_or_empty(),
        )
    }

    // === Groups ===

    pub fn toggle_group(&mut self, slot: Slot, group: &str) {
        let selected = self.slots[slot].toggle_group(group);
        debug!(%slot, group, selected, "group toggled");
    }

    pub fn clear_groups(&mut self, slot: Slot) {
        self.slots[slot].clear_groups();
        debug!(%slot, "groups cleared");
    }

    /// Clears the pick on `slot` when its group set changed since the last
    /// render, unless a comparison is on display.
    ///
    /// The new group set is recorded either way.
    pub fn autoclear_on_filter_change(&mut self, slot: Slot) -> Option<Notice> {
        let current = self.slots[slot].selected_groups();
        if *current == self.last_groups[slot] {
            return None;
        }
        self.last_groups[slot] = current.clone();
        if self.instance.is_some() {
            debug!(%slot, "filter changed with comparison active, pick kept");
            return None;
        }
        let food = self.slots[slot].take_pick()?;
        debug!(%slot, food = %food, "filter changed, pick cleared");
        Some(Notice::PickCleared { slot, food })
    }

    // === Picks ===

    pub fn pick_food(&mut self, slot: Slot, food: Option<String>) {
        self.slots[slot].pick(food);
    }

    /// Puts `previous` back when the new pick on `slot` names a known food
    /// outside that side's group filter.
    ///
    /// Unknown names are left for the resolver to report.
    pub fn reject_pick_outside_filter(
        &mut self,
        slot: Slot,
        table: &FoodTable,
        previous: Option<String>,
    ) -> Option<Notice> {
        let food = self.slots[slot].picked_food()?;
        if previous.as_deref() == Some(food) || !exists(table, food) {
            return None;
        }
        let groups = self.slots[slot].selected_groups();
        if foods_in_groups(table, groups).iter().any(|name| name == food) {
            return None;
        }
        let food = food.to_string();
        self.slots[slot].pick(previous);
        debug!(%slot, food = %food, "pick outside group filter rejected");
        Some(Notice::PickOutsideFilter { slot, food })
    }

    /// When the pick on `slot` changed since the last render and now equals
    /// the other side's pick, clears the other side.
    pub fn guard_duplicate_pick(&mut self, slot: Slot) -> Option<Notice> {
        let current = self.slots[slot].picked_food().map(str::to_string);
        if current == self.last_food[slot] {
            return None;
        }
        self.last_food[slot] = current.clone();
        let food = current?;
        let other = slot.other();
        if self.slots[other].picked_food() != Some(food.as_str()) {
            return None;
        }
        self.slots[other].take_pick();
        debug!(%slot, cleared = %other, food = %food, "duplicate pick, other side cleared");
        Some(Notice::DuplicateCleared { slot: other, food })
    }

    // === Sections ===

    /// Flips a report section. Returns whether it is now enabled.
    pub fn toggle_section(&mut self, section: SectionId) -> bool {
        let enabled = if self.sections.remove(&section) {
            false
        } else {
            self.sections.insert(section);
            true
        };
        debug!(section = %section, enabled, "section toggled");
        enabled
    }

    pub fn clear_sections(&mut self) {
        self.sections.clear();
    }

    pub fn is_section_enabled(&self, section: SectionId) -> bool {
        self.sections.contains(&section)
    }

    /// Enabled sections in report order: macro sections, then micro sections.
    pub fn ordered_sections(&self) -> Vec<SectionId> {
        let (mut macros, micros): (Vec<SectionId>, Vec<SectionId>) = self
            .sections
            .iter()
            .copied()
            .partition(|section| section.kind() == SectionKind::Macro);
        macros.extend(micros);
        macros
    }
}
