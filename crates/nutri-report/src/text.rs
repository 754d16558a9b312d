//! Terminal rendering of a [`ComparisonReport`].

use comfy_table::{Cell, CellAlignment, Table};
use nutri_core::{CardMetrics, NumberFormat, PairedRow, Share};
use nutri_model::nutrients::{ENERGY, FIBER, MOISTURE};
use nutri_model::{PerSlot, Slot};

use crate::chart::{bar, bar_line};
use crate::report::{BarChart, ComparisonReport, PairedTable, RenderOptions, SectionReport};
use crate::style::{align_column, apply_table_style, dim_cell, header_cell, label_cell};

const SHARE_LABEL_WIDTH: usize = 12;

/// Renders the full report: cards, macro split, then every section.
pub fn render_text(report: &ComparisonReport, options: &RenderOptions) -> String {
    let mut blocks = vec![
        format!(
            "Comparing {} and {}",
            report.foods.left, report.foods.right
        ),
        cards_table(&report.cards, options).to_string(),
        macro_split(&report.cards, options),
    ];
    for section in &report.sections {
        blocks.push(render_section(section, &report.foods, options));
    }
    blocks.join("\n\n")
}

/// Renders one section: its heading, paired tables and charts.
pub fn render_section(
    section: &SectionReport,
    foods: &PerSlot<String>,
    options: &RenderOptions,
) -> String {
    let mut blocks = vec![format!("## {}", section.label)];
    for table in &section.tables {
        blocks.push(paired_table(table, foods, options).to_string());
    }
    for chart in &section.charts {
        blocks.push(bar_chart(chart, foods, options));
    }
    blocks.join("\n\n")
}

fn cards_table(cards: &PerSlot<CardMetrics>, options: &RenderOptions) -> Table {
    let format = &options.number;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell(&cards.left.food),
        header_cell(&cards.right.food),
    ]);
    apply_table_style(&mut table, options.color);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        label_cell("Group"),
        Cell::new(&cards.left.group),
        Cell::new(&cards.right.group),
    ]);
    let metric = |label: String, left: Option<f64>, right: Option<f64>| {
        vec![
            label_cell(&label),
            value_cell(format, left),
            value_cell(format, right),
        ]
    };
    table.add_row(metric(
        heading(ENERGY.label, ENERGY.unit),
        cards.left.energy,
        cards.right.energy,
    ));
    for (left, right) in cards.left.macros.iter().zip(&cards.right.macros) {
        table.add_row(metric(
            heading(left.label, "g"),
            Some(left.value),
            Some(right.value),
        ));
    }
    table.add_row(metric(
        heading(FIBER.label, FIBER.unit),
        cards.left.fiber,
        cards.right.fiber,
    ));
    table.add_row(metric(
        heading(MOISTURE.label, MOISTURE.unit),
        cards.left.moisture,
        cards.right.moisture,
    ));
    table
}

fn macro_split(cards: &PerSlot<CardMetrics>, options: &RenderOptions) -> String {
    let mut lines = vec!["Macronutrient split".to_string()];
    for (_, card) in cards.iter() {
        lines.push(String::new());
        lines.push(card.food.clone());
        lines.extend(share_lines(&card.macros, options.bar_width));
    }
    lines.join("\n")
}

/// Percentage bars for a split; the pie chart of a terminal.
pub fn share_lines(shares: &[Share], width: usize) -> Vec<String> {
    if shares.iter().all(|share| share.percent <= 0.0) {
        return vec!["  no macronutrient data".to_string()];
    }
    shares
        .iter()
        .filter(|share| share.percent > 0.0)
        .map(|share| {
            format!(
                "  {}",
                bar_line(
                    share.label,
                    SHARE_LABEL_WIDTH,
                    &bar(share.percent, 100.0, width),
                    &format!("{:.1}%", share.percent),
                )
            )
        })
        .collect()
}

fn paired_table(paired: &PairedTable, foods: &PerSlot<String>, options: &RenderOptions) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(paired.title),
        header_cell(&foods.left),
        header_cell(&foods.right),
    ]);
    apply_table_style(&mut table, options.color);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &paired.rows {
        table.add_row(paired_row(row, &options.number.na_value));
    }
    table
}

fn paired_row(row: &PairedRow, na_value: &str) -> Vec<Cell> {
    let cell = |text: &str| {
        if text == na_value {
            dim_cell(text)
        } else {
            Cell::new(text)
        }
    };
    vec![label_cell(&row.heading()), cell(&row.left), cell(&row.right)]
}

/// Bars of both foods against the chart's shared limit.
pub fn bar_chart(chart: &BarChart, foods: &PerSlot<String>, options: &RenderOptions) -> String {
    let label_width = chart
        .series
        .iter()
        .flat_map(|(_, bars)| bars.iter().map(|b| b.label.chars().count()))
        .max()
        .unwrap_or(0);
    let mut lines = vec![format!("{} ({})", chart.title, chart.unit)];
    for slot in Slot::ALL {
        lines.push(format!("  {}", foods[slot]));
        let bars = &chart.series[slot];
        if bars.is_empty() {
            lines.push("    no data".to_string());
            continue;
        }
        for item in bars {
            let value = format!(
                "{} {}",
                options.number.number(Some(item.value)),
                chart.unit
            );
            lines.push(format!(
                "    {}",
                bar_line(
                    item.label,
                    label_width,
                    &bar(item.value, chart.upper_limit, options.bar_width),
                    &value,
                )
            ));
        }
    }
    lines.join("\n")
}

fn heading(label: &str, unit: &str) -> String {
    format!("{label} ({unit})")
}

fn value_cell(format: &NumberFormat, value: Option<f64>) -> Cell {
    let text = format.number(value);
    if text == format.na_value {
        dim_cell(text)
    } else {
        Cell::new(text)
    }
}
