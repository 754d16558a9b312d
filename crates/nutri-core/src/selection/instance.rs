use std::sync::Arc;

use chrono::{DateTime, Utc};
use nutri_model::{NutrientRow, Slot};

/// The comparison currently on display.
///
/// `food1 != food2` and each row belongs to its name; both are checked by
/// [`FixedInstance::is_valid`]. Rows are the table's own `Arc`s, so a side
/// that is not replaced keeps its identity.
#[derive(Debug, Clone)]
pub struct FixedInstance {
    food1: String,
    food2: String,
    data1: Arc<NutrientRow>,
    data2: Arc<NutrientRow>,
    created_at: DateTime<Utc>,
}

impl FixedInstance {
    pub(crate) fn new(
        data1: Arc<NutrientRow>,
        data2: Arc<NutrientRow>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            food1: data1.food().to_string(),
            food2: data2.food().to_string(),
            data1,
            data2,
            created_at,
        }
    }

    pub fn food1(&self) -> &str {
        &self.food1
    }

    pub fn food2(&self) -> &str {
        &self.food2
    }

    pub fn data1(&self) -> &Arc<NutrientRow> {
        &self.data1
    }

    pub fn data2(&self) -> &Arc<NutrientRow> {
        &self.data2
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn food(&self, slot: Slot) -> &str {
        match slot {
            Slot::Left => &self.food1,
            Slot::Right => &self.food2,
        }
    }

    pub fn data(&self, slot: Slot) -> &Arc<NutrientRow> {
        match slot {
            Slot::Left => &self.data1,
            Slot::Right => &self.data2,
        }
    }

    /// Whether the instance shows exactly this pair, in this order.
    pub fn matches(&self, food1: &str, food2: &str) -> bool {
        self.food1 == food1 && self.food2 == food2
    }

    pub fn is_valid(&self) -> bool {
        !self.food1.is_empty()
            && self.food1 != self.food2
            && self.data1.food() == self.food1
            && self.data2.food() == self.food2
    }

    /// Replaces one side, leaving the other side's name and row untouched.
    pub(crate) fn replace(&mut self, slot: Slot, row: Arc<NutrientRow>) {
        let food = row.food().to_string();
        match slot {
            Slot::Left => {
                self.food1 = food;
                self.data1 = row;
            }
            Slot::Right => {
                self.food2 = food;
                self.data2 = row;
            }
        }
    }
}
