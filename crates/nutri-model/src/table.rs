use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::row::NutrientRow;

/// The loaded nutrient dataset.
///
/// Food names are unique: the first row for a name wins and later rows with
/// the same name are rejected by [`FoodTable::push`].
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    rows: Vec<Arc<NutrientRow>>,
    index: HashMap<String, usize>,
    columns: Vec<String>,
}

impl FoodTable {
    /// Creates an empty table with the given nutrient columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
            columns,
        }
    }

    pub fn from_rows<I>(columns: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = NutrientRow>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push(row);
        }
        table
    }

    /// Adds a row. Returns `false` and keeps the existing row when the food
    /// name is already present.
    pub fn push(&mut self, row: NutrientRow) -> bool {
        if self.index.contains_key(row.food()) {
            return false;
        }
        self.index.insert(row.food().to_string(), self.rows.len());
        self.rows.push(Arc::new(row));
        true
    }

    /// Exact-name lookup. Empty names never match.
    pub fn row_by_food(&self, name: &str) -> Option<&Arc<NutrientRow>> {
        if name.is_empty() {
            return None;
        }
        self.index.get(name).map(|&idx| &self.rows[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.row_by_food(name).is_some()
    }

    /// Sorted distinct group labels.
    pub fn groups(&self) -> Vec<String> {
        let groups: BTreeSet<&str> = self.rows.iter().map(|row| row.group()).collect();
        groups.into_iter().map(str::to_string).collect()
    }

    /// Sorted food names.
    pub fn food_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.index.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<NutrientRow>> {
        self.rows.iter()
    }

    /// Nutrient columns in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
