//! Nutrient computation and number formatting.
//!
//! Only simple aggregates: percentages of a sum, the shared chart scale of
//! two rows, and the paired rows every section table is built from.

use nutri_model::nutrients::{ENERGY, FIBER, MACROS, MOISTURE};
use nutri_model::{Nutrient, NutrientRow};
use serde::{Deserialize, Serialize};

/// Default head-room added above the largest charted value.
pub const DEFAULT_CHART_MARGIN: f64 = 0.1;

/// How nutrient values are turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimal_places: usize,
    /// Decimals for lipid fractions and amino acids.
    pub fraction_places: usize,
    pub thousands_separator: String,
    pub na_value: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_places: 1,
            fraction_places: 3,
            thousands_separator: ",".to_string(),
            na_value: "N/A".to_string(),
        }
    }
}

impl NumberFormat {
    /// Formats a regular nutrient value. See [`format_number`].
    pub fn number(&self, value: Option<f64>) -> String {
        format_number(value, self)
    }

    /// Formats a fraction value. See [`format_fraction`].
    pub fn fraction(&self, value: Option<f64>) -> String {
        format_fraction(value, self)
    }
}

fn has_data(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn group_thousands(integer: &str, separator: &str) -> String {
    let digits: Vec<char> = integer.chars().collect();
    let mut out = String::with_capacity(integer.len() + digits.len() / 3 * separator.len());
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(*digit);
    }
    out
}

/// Formats a value with `decimal_places` decimals, grouping thousands once
/// the value reaches 1000. Absent, zero and negative values are "no data".
///
/// ```
/// use nutri_core::{NumberFormat, format_number};
///
/// let format = NumberFormat::default();
/// assert_eq!(format_number(Some(1234.56), &format), "1,234.6");
/// assert_eq!(format_number(Some(0.0), &format), "N/A");
/// ```
pub fn format_number(value: Option<f64>, format: &NumberFormat) -> String {
    let Some(value) = has_data(value) else {
        return format.na_value.clone();
    };
    let text = format!("{value:.prec$}", prec = format.decimal_places);
    if value < 1000.0 {
        return text;
    }
    match text.split_once('.') {
        Some((integer, decimals)) => format!(
            "{}.{decimals}",
            group_thousands(integer, &format.thousands_separator)
        ),
        None => group_thousands(&text, &format.thousands_separator),
    }
}

/// Formats a small quantity with `fraction_places` decimals.
pub fn format_fraction(value: Option<f64>, format: &NumberFormat) -> String {
    match has_data(value) {
        Some(value) => format!("{value:.prec$}", prec = format.fraction_places),
        None => format.na_value.clone(),
    }
}

/// Percentage of each part in the sum of all parts. A zero sum yields zeros.
pub fn percent(parts: &[f64]) -> Vec<f64> {
    let total: f64 = parts.iter().sum();
    if total == 0.0 {
        return vec![0.0; parts.len()];
    }
    parts.iter().map(|part| part / total * 100.0).collect()
}

/// One slice of a split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Share {
    pub label: &'static str,
    pub value: f64,
    pub percent: f64,
}

/// Carbohydrate, lipid and protein as percentages of their sum.
pub fn macro_split(row: &NutrientRow) -> Vec<Share> {
    let values: Vec<f64> = MACROS
        .iter()
        .map(|nutrient| row.value_or_zero(nutrient.column))
        .collect();
    MACROS
        .iter()
        .zip(values.iter().zip(percent(&values)))
        .map(|(nutrient, (value, percent))| Share {
            label: nutrient.label,
            value: *value,
            percent,
        })
        .collect()
}

/// Largest charted value of either row over `nutrients`, times `1 + margin`.
/// Zero when neither row has data.
pub fn upper_limit(
    row1: &NutrientRow,
    row2: &NutrientRow,
    nutrients: &[Nutrient],
    margin: f64,
) -> f64 {
    let max = nutrients
        .iter()
        .flat_map(|nutrient| [row1.chart_value(nutrient.column), row2.chart_value(nutrient.column)])
        .flatten()
        .fold(0.0_f64, f64::max);
    max * (1.0 + margin)
}

/// `(label, value)` pairs that can be charted: values strictly above zero.
pub fn chart_series(row: &NutrientRow, nutrients: &[Nutrient]) -> Vec<(&'static str, f64)> {
    nutrients
        .iter()
        .filter_map(|nutrient| {
            row.chart_value(nutrient.column)
                .map(|value| (nutrient.label, value))
        })
        .collect()
}

/// One line of a side-by-side nutrient table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairedRow {
    pub label: &'static str,
    pub unit: &'static str,
    pub left: String,
    pub right: String,
}

impl PairedRow {
    /// Label with its unit, e.g. `Calcium (mg)`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.label, self.unit)
    }
}

/// Formats `nutrients` for both rows with `formatter`.
pub fn paired_rows<F>(
    row1: &NutrientRow,
    row2: &NutrientRow,
    nutrients: &[Nutrient],
    formatter: F,
) -> Vec<PairedRow>
where
    F: Fn(Option<f64>) -> String,
{
    nutrients
        .iter()
        .map(|nutrient| PairedRow {
            label: nutrient.label,
            unit: nutrient.unit,
            left: formatter(row1.value(nutrient.column)),
            right: formatter(row2.value(nutrient.column)),
        })
        .collect()
}

/// Headline figures shown on a food card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardMetrics {
    pub food: String,
    pub group: String,
    pub energy: Option<f64>,
    pub fiber: Option<f64>,
    pub moisture: Option<f64>,
    pub macros: Vec<Share>,
}

pub fn card_metrics(row: &NutrientRow) -> CardMetrics {
    CardMetrics {
        food: row.food().to_string(),
        group: row.group().to_string(),
        energy: row.value(ENERGY.column),
        fiber: row.value(FIBER.column),
        moisture: row.value(MOISTURE.column),
        macros: macro_split(row),
    }
}
