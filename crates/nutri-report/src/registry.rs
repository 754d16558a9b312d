//! Section renderers, looked up by [`SectionId`].
//!
//! Every id has exactly one renderer. The default registry is built once
//! and cached.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use nutri_model::SectionId;

use crate::report::{SectionContext, SectionReport};

/// Builds the report content for one section.
pub trait SectionRenderer: Send + Sync {
    fn section(&self) -> SectionId;

    fn render(&self, context: &SectionContext<'_>) -> SectionReport;
}

/// Adapts a plain function to [`SectionRenderer`].
pub struct FunctionRenderer {
    section: SectionId,
    render: fn(SectionId, &SectionContext<'_>) -> SectionReport,
}

impl FunctionRenderer {
    pub const fn new(
        section: SectionId,
        render: fn(SectionId, &SectionContext<'_>) -> SectionReport,
    ) -> Self {
        Self { section, render }
    }
}

impl SectionRenderer for FunctionRenderer {
    fn section(&self) -> SectionId {
        self.section
    }

    fn render(&self, context: &SectionContext<'_>) -> SectionReport {
        (self.render)(self.section, context)
    }
}

pub struct SectionRegistry {
    renderers: BTreeMap<SectionId, Box<dyn SectionRenderer>>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Registers a renderer, replacing any earlier one for the same section.
    pub fn register(&mut self, renderer: Box<dyn SectionRenderer>) {
        self.renderers.insert(renderer.section(), renderer);
    }

    pub fn get(&self, section: SectionId) -> Option<&dyn SectionRenderer> {
        self.renderers.get(&section).map(|renderer| renderer.as_ref())
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Registered sections in report order.
    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.renderers.keys().copied()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_REGISTRY: OnceLock<SectionRegistry> = OnceLock::new();

/// The registry covering every [`SectionId`].
pub fn default_registry() -> &'static SectionRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> SectionRegistry {
    let mut registry = SectionRegistry::new();
    registry.register(Box::new(FunctionRenderer::new(
        SectionId::MacroComparison,
        tables_and_charts,
    )));
    registry.register(Box::new(FunctionRenderer::new(
        SectionId::MacroFractions,
        tables_only,
    )));
    for section in [
        SectionId::Minerals,
        SectionId::FatSolubleVitamins,
        SectionId::VitaminAPrecursors,
        SectionId::BComplex,
        SectionId::OtherVitamins,
    ] {
        registry.register(Box::new(FunctionRenderer::new(section, tables_and_charts)));
    }
    registry
}

/// A paired table and bar charts for each category of the section.
fn tables_and_charts(section: SectionId, context: &SectionContext<'_>) -> SectionReport {
    let mut report = SectionReport::new(section);
    for category in section.categories() {
        report.tables.push(context.table(*category));
        report.charts.extend(context.charts(*category));
    }
    report
}

/// Paired tables only.
fn tables_only(section: SectionId, context: &SectionContext<'_>) -> SectionReport {
    let mut report = SectionReport::new(section);
    for category in section.categories() {
        report.tables.push(context.table(*category));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_a_renderer() {
        let registry = default_registry();
        assert_eq!(registry.len(), SectionId::ALL.len());
        assert_eq!(registry.sections().collect::<Vec<_>>(), SectionId::ALL.to_vec());
        for section in SectionId::ALL {
            let renderer = registry.get(section).expect("renderer");
            assert_eq!(renderer.section(), section);
        }
    }
}
