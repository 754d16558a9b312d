//! The report model shared by the text and JSON outputs.

use chrono::{DateTime, Utc};
use nutri_core::{
    CardMetrics, DEFAULT_CHART_MARGIN, FixedInstance, NumberFormat, PairedRow, card_metrics,
    chart_series, paired_rows, upper_limit,
};
use nutri_model::{Nutrient, NutrientCategory, NutrientRow, PerSlot, SectionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::registry::default_registry;

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    #[serde(flatten)]
    pub number: NumberFormat,
    /// Width in characters of a full bar.
    pub bar_width: usize,
    /// Head-room above the largest value of a chart, as a fraction.
    pub chart_margin: f64,
    /// Emit ANSI styling in tables.
    #[serde(skip)]
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            number: NumberFormat::default(),
            bar_width: 30,
            chart_margin: DEFAULT_CHART_MARGIN,
            color: false,
        }
    }
}

/// A side-by-side nutrient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedTable {
    pub title: &'static str,
    pub rows: Vec<PairedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
}

/// Bars for both foods drawn against one shared scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub unit: &'static str,
    pub upper_limit: f64,
    pub series: PerSlot<Vec<Bar>>,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.series.left.is_empty() && self.series.right.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub id: SectionId,
    pub label: &'static str,
    pub tables: Vec<PairedTable>,
    pub charts: Vec<BarChart>,
}

impl SectionReport {
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            label: id.label(),
            tables: Vec::new(),
            charts: Vec::new(),
        }
    }
}

/// Everything drawn for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub foods: PerSlot<String>,
    pub cards: PerSlot<CardMetrics>,
    pub compared_since: DateTime<Utc>,
    pub sections: Vec<SectionReport>,
}

/// Inputs a section renderer works from.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub row1: &'a NutrientRow,
    pub row2: &'a NutrientRow,
    pub options: &'a RenderOptions,
}

impl SectionContext<'_> {
    pub fn table(&self, category: NutrientCategory) -> PairedTable {
        let format = &self.options.number;
        let rows = if category.is_fraction() {
            paired_rows(self.row1, self.row2, category.nutrients(), |value| {
                format.fraction(value)
            })
        } else {
            paired_rows(self.row1, self.row2, category.nutrients(), |value| {
                format.number(value)
            })
        };
        PairedTable {
            title: category.label(),
            rows,
        }
    }

    /// One chart per unit in the category, each with its own scale.
    pub fn charts(&self, category: NutrientCategory) -> Vec<BarChart> {
        let mut units: Vec<&'static str> = Vec::new();
        for nutrient in category.nutrients() {
            if !units.contains(&nutrient.unit) {
                units.push(nutrient.unit);
            }
        }
        let split = units.len() > 1;
        units
            .into_iter()
            .map(|unit| {
                let nutrients: Vec<Nutrient> = category
                    .nutrients()
                    .iter()
                    .filter(|nutrient| nutrient.unit == unit)
                    .copied()
                    .collect();
                let title = match nutrients.as_slice() {
                    [single] if split => single.label.to_string(),
                    _ if split => format!("{} ({unit})", category.label()),
                    _ => category.label().to_string(),
                };
                self.chart(title, unit, &nutrients)
            })
            .filter(|chart| !chart.is_empty())
            .collect()
    }

    fn chart(&self, title: String, unit: &'static str, nutrients: &[Nutrient]) -> BarChart {
        let bars = |row: &NutrientRow| -> Vec<Bar> {
            chart_series(row, nutrients)
                .into_iter()
                .map(|(label, value)| Bar { label, value })
                .collect()
        };
        BarChart {
            title,
            unit,
            upper_limit: upper_limit(self.row1, self.row2, nutrients, self.options.chart_margin),
            series: PerSlot::new(bars(self.row1), bars(self.row2)),
        }
    }
}

/// Builds the report for the displayed comparison and the enabled sections.
///
/// `sections` is expected in report order, as produced by the session.
pub fn build_report(
    instance: &FixedInstance,
    sections: &[SectionId],
    options: &RenderOptions,
) -> ComparisonReport {
    let context = SectionContext {
        row1: instance.data1(),
        row2: instance.data2(),
        options,
    };
    let registry = default_registry();
    let mut reports = Vec::with_capacity(sections.len());
    for section in sections {
        match registry.get(*section) {
            Some(renderer) => reports.push(renderer.render(&context)),
            None => warn!(section = %section, "no renderer registered for section"),
        }
    }
    debug!(
        food1 = instance.food1(),
        food2 = instance.food2(),
        sections = reports.len(),
        "report built"
    );
    ComparisonReport {
        foods: PerSlot::new(instance.food1().to_string(), instance.food2().to_string()),
        cards: PerSlot::new(card_metrics(context.row1), card_metrics(context.row2)),
        compared_since: instance.created_at(),
        sections: reports,
    }
}
