//! Row sanitization: turns raw CSV cells into a [`FoodTable`].

use std::path::Path;

use nutri_model::{FoodTable, NutrientRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::csv_table::CsvTable;
use crate::error::{IngestError, Result};

/// Default header of the food-name column.
pub const DEFAULT_NAME_COLUMN: &str = "alimento";
/// Default header of the group column.
pub const DEFAULT_GROUP_COLUMN: &str = "grupo";

/// Cell values that mean "no data" rather than a malformed number.
const MISSING_TOKENS: &[&str] = &["nan", "na", "n/a", "undefined", "none", "null"];

/// Which headers hold the food name and the group label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    pub name_column: String,
    pub group_column: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            group_column: DEFAULT_GROUP_COLUMN.to_string(),
        }
    }
}

/// What sanitization discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeStats {
    /// Data rows in the source, excluding the header.
    pub total_rows: usize,
    /// Rows dropped for an empty name or group.
    pub dropped_rows: usize,
    /// Names seen again after their first row; the later rows were dropped.
    pub duplicate_names: Vec<String>,
    /// Non-empty cells that were neither a number nor a missing-value token.
    pub unparsable_values: usize,
}

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `"fruits and-vegetables"` becomes `"Fruits And-Vegetables"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_alpha = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(ch);
            previous_alpha = false;
        }
    }
    out
}

fn is_missing_token(value: &str) -> bool {
    value.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| value.eq_ignore_ascii_case(token))
}

/// Parses a nutrient cell. Empty cells, missing-value tokens, non-numeric
/// text and non-finite numbers all yield `None`.
pub fn parse_nutrient(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if is_missing_token(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Builds the table from raw CSV content.
///
/// Names and groups are trimmed, groups are title-cased, and rows with an
/// empty name or group are dropped. Every other column is a nutrient column,
/// keyed by its lowercased header.
pub fn build_table(
    csv: &CsvTable,
    options: &IngestOptions,
    path: &Path,
) -> Result<(FoodTable, SanitizeStats)> {
    let name_idx = csv
        .column_index(&options.name_column)
        .ok_or_else(|| IngestError::MissingColumn {
            column: options.name_column.clone(),
            path: path.to_path_buf(),
        })?;
    let group_idx = csv
        .column_index(&options.group_column)
        .ok_or_else(|| IngestError::MissingColumn {
            column: options.group_column.clone(),
            path: path.to_path_buf(),
        })?;

    let mut nutrient_columns: Vec<(usize, String)> = Vec::new();
    for (idx, header) in csv.headers.iter().enumerate() {
        if idx == name_idx || idx == group_idx {
            continue;
        }
        if header.is_empty() {
            warn!(path = %path.display(), column = idx, "skipping column with empty header");
            continue;
        }
        let key = header.to_lowercase();
        if nutrient_columns.iter().any(|(_, existing)| *existing == key) {
            warn!(path = %path.display(), column = %header, "skipping duplicate column");
            continue;
        }
        nutrient_columns.push((idx, key));
    }

    let mut table = FoodTable::new(nutrient_columns.iter().map(|(_, key)| key.clone()).collect());
    let mut stats = SanitizeStats {
        total_rows: csv.rows.len(),
        ..SanitizeStats::default()
    };
    for record in &csv.rows {
        let name = record[name_idx].trim();
        let group = title_case(record[group_idx].trim());
        if name.is_empty() || group.is_empty() {
            stats.dropped_rows += 1;
            continue;
        }
        let mut row = NutrientRow::new(name, group);
        for (idx, key) in &nutrient_columns {
            let cell = record[*idx].trim();
            match parse_nutrient(cell) {
                Some(value) => row.insert(key.clone(), value),
                None if is_missing_token(cell) => {}
                None => {
                    stats.unparsable_values += 1;
                    debug!(food = %name, column = %key, value = %cell, "unparsable nutrient value");
                }
            }
        }
        if !table.push(row) {
            warn!(food = %name, "duplicate food name, keeping the first row");
            stats.duplicate_names.push(name.to_string());
        }
    }

    if table.is_empty() {
        return Err(IngestError::NoUsableRows {
            path: path.to_path_buf(),
            dropped: stats.dropped_rows,
        });
    }
    Ok((table, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("fruits"), "Fruits");
        assert_eq!(title_case("CEREAIS E DERIVADOS"), "Cereais E Derivados");
        assert_eq!(title_case("fruits and-vegetables"), "Fruits And-Vegetables");
        assert_eq!(title_case("açúcares"), "Açúcares");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn parse_nutrient_handles_missing_tokens() {
        assert_eq!(parse_nutrient(" 12.5 "), Some(12.5));
        assert_eq!(parse_nutrient("-3"), Some(-3.0));
        assert_eq!(parse_nutrient("NaN"), None);
        assert_eq!(parse_nutrient("undefined"), None);
        assert_eq!(parse_nutrient(""), None);
        assert_eq!(parse_nutrient("Tr"), None);
        assert_eq!(parse_nutrient("inf"), None);
    }
}
