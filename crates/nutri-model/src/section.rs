use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::nutrients::NutrientCategory;

/// Whether a report section belongs to the macro or micro block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Macro,
    Micro,
}

/// Report sections a user can toggle on.
///
/// Declaration order is report order (macro sections before micro sections),
/// and `Ord` follows it, so any sorted collection of ids is already laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    MacroComparison,
    MacroFractions,
    Minerals,
    FatSolubleVitamins,
    VitaminAPrecursors,
    BComplex,
    OtherVitamins,
}

impl SectionId {
    /// All sections in report order.
    pub const ALL: [SectionId; 7] = [
        SectionId::MacroComparison,
        SectionId::MacroFractions,
        SectionId::Minerals,
        SectionId::FatSolubleVitamins,
        SectionId::VitaminAPrecursors,
        SectionId::BComplex,
        SectionId::OtherVitamins,
    ];

    pub fn kind(self) -> SectionKind {
        match self {
            SectionId::MacroComparison | SectionId::MacroFractions => SectionKind::Macro,
            _ => SectionKind::Micro,
        }
    }

    /// Stable identifier used on the command line and in settings.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::MacroComparison => "macro-comparison",
            SectionId::MacroFractions => "macro-fractions",
            SectionId::Minerals => "minerals",
            SectionId::FatSolubleVitamins => "fat-soluble-vitamins",
            SectionId::VitaminAPrecursors => "vitamin-a-precursors",
            SectionId::BComplex => "b-complex",
            SectionId::OtherVitamins => "other-vitamins",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionId::MacroComparison => "Macro comparison",
            SectionId::MacroFractions => "Macro fractions",
            SectionId::Minerals => "Minerals",
            SectionId::FatSolubleVitamins => "Fat-soluble vitamins",
            SectionId::VitaminAPrecursors => "Vitamin A precursors",
            SectionId::BComplex => "B complex",
            SectionId::OtherVitamins => "Other vitamins",
        }
    }

    /// Nutrient categories drawn by the section.
    pub fn categories(self) -> &'static [NutrientCategory] {
        match self {
            SectionId::MacroComparison => &[NutrientCategory::Basic, NutrientCategory::Macros],
            SectionId::MacroFractions => &[
                NutrientCategory::LipidFractions,
                NutrientCategory::AminoAcids,
            ],
            SectionId::Minerals => &[NutrientCategory::Minerals],
            SectionId::FatSolubleVitamins => &[NutrientCategory::FatSolubleVitamins],
            SectionId::VitaminAPrecursors => &[NutrientCategory::VitaminAPrecursors],
            SectionId::BComplex => &[NutrientCategory::BComplex],
            SectionId::OtherVitamins => &[NutrientCategory::OtherVitamins],
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = ModelError;

    /// Accepts the identifier or the label, case-insensitive, with `_`, `-`
    /// and spaces treated alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|ch| match ch {
                '_' | ' ' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        SectionId::ALL
            .into_iter()
            .find(|id| {
                id.as_str() == normalized
                    || id.label().to_ascii_lowercase().replace(' ', "-") == normalized
            })
            .ok_or_else(|| ModelError::UnknownSection(s.to_string()))
    }
}
