use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One food's nutrient vector.
///
/// Rows are immutable once the table is built; the table hands them out as
/// `Arc<NutrientRow>` so a comparison can hold on to a row without copying it.
///
/// Values are stored as parsed. Absent or non-finite values are never stored,
/// and negative values are kept but reported as "no data" by [`NutrientRow::value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRow {
    food: String,
    group: String,
    values: BTreeMap<String, f64>,
}

impl NutrientRow {
    pub fn new(food: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            food: food.into(),
            group: group.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder form of [`NutrientRow::insert`].
    #[must_use]
    pub fn with_value(mut self, column: impl Into<String>, value: f64) -> Self {
        self.insert(column, value);
        self
    }

    /// Stores a nutrient value. Non-finite values are dropped.
    pub fn insert(&mut self, column: impl Into<String>, value: f64) {
        if value.is_finite() {
            self.values.insert(column.into(), value);
        }
    }

    pub fn food(&self) -> &str {
        &self.food
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// The stored value, including negatives.
    pub fn raw(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// The value if it counts as data: present and non-negative.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.raw(column).filter(|value| *value >= 0.0)
    }

    /// The value if it may be drawn in a chart: strictly positive.
    pub fn chart_value(&self, column: &str) -> Option<f64> {
        self.raw(column).filter(|value| *value > 0.0)
    }

    /// Same as [`NutrientRow::value`] with absent mapped to zero.
    pub fn value_or_zero(&self, column: &str) -> f64 {
        self.value(column).unwrap_or(0.0)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of stored nutrient values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
