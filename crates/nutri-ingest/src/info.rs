use std::collections::BTreeMap;

use nutri_model::FoodTable;
use serde::Serialize;

use crate::provider::LoadedTable;

/// Summary of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub source: String,
    pub fingerprint: String,
    pub total_rows: usize,
    pub dropped_rows: usize,
    pub foods_count: usize,
    pub groups_count: usize,
    /// Nutrient columns, excluding the name and group columns.
    pub nutrient_columns: usize,
    pub columns: Vec<String>,
}

pub fn dataset_info(loaded: &LoadedTable) -> DatasetInfo {
    DatasetInfo {
        source: loaded.source.display().to_string(),
        fingerprint: loaded.fingerprint.clone(),
        total_rows: loaded.stats.total_rows,
        dropped_rows: loaded.stats.dropped_rows,
        foods_count: loaded.table.len(),
        groups_count: loaded.table.groups().len(),
        nutrient_columns: loaded.table.columns().len(),
        columns: loaded.table.columns().to_vec(),
    }
}

/// Number of foods per group label.
pub fn group_counts(table: &FoodTable) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in table.iter() {
        *counts.entry(row.group().to_string()).or_insert(0) += 1;
    }
    counts
}
