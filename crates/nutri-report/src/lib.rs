//! Comparison report for two foods.
//!
//! [`build_report`] turns the displayed comparison into a [`ComparisonReport`];
//! [`render_text`] draws it for a terminal and [`render_json`] serializes it.

pub mod chart;
pub mod json;
pub mod registry;
pub mod report;
pub mod style;
pub mod text;

pub use json::render_json;
pub use registry::{
    FunctionRenderer, SectionRegistry, SectionRenderer, default_registry,
};
pub use report::{
    Bar, BarChart, ComparisonReport, PairedTable, RenderOptions, SectionContext, SectionReport,
    build_report,
};
pub use text::{bar_chart, render_section, render_text, share_lines};
