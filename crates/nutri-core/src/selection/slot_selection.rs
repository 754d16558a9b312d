use std::collections::BTreeSet;

use serde::Serialize;

/// Filter and pick of one side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotSelection {
    selected_groups: BTreeSet<String>,
    picked_food: Option<String>,
}

impl SlotSelection {
    pub fn selected_groups(&self) -> &BTreeSet<String> {
        &self.selected_groups
    }

    pub fn picked_food(&self) -> Option<&str> {
        self.picked_food.as_deref()
    }

    /// The pick as the resolver sees it: empty when nothing is picked.
    pub fn pick_or_empty(&self) -> &str {
        self.picked_food.as_deref().unwrap_or("")
    }

    /// Flips membership of `group`. Returns whether the group is now selected.
    pub fn toggle_group(&mut self, group: &str) -> bool {
        if self.selected_groups.remove(group) {
            false
        } else {
            self.selected_groups.insert(group.to_string());
            true
        }
    }

    pub fn clear_groups(&mut self) {
        self.selected_groups.clear();
    }

    /// Sets or clears the pick. Blank names clear it.
    pub fn pick(&mut self, food: Option<String>) {
        self.picked_food = food
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
    }

    /// Clears the pick, returning what was picked.
    pub fn take_pick(&mut self) -> Option<String> {
        self.picked_food.take()
    }

    pub fn is_filtered(&self) -> bool {
        !self.selected_groups.is_empty()
    }
}
