//! Nutrient catalog.
//!
//! Maps display labels to dataset columns and units, grouped by category.
//! Column identifiers are the headers of the source CSV (lowercased), so they
//! follow the dataset's naming rather than the labels shown to the user.

use std::fmt;

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nutrient {
    pub label: &'static str,
    pub column: &'static str,
    pub unit: &'static str,
}

const fn nutrient(label: &'static str, column: &'static str, unit: &'static str) -> Nutrient {
    Nutrient {
        label,
        column,
        unit,
    }
}

pub const CARBOHYDRATE: Nutrient = nutrient("Carbohydrate", "carboidrato_g", "g");
pub const LIPID: Nutrient = nutrient("Lipid", "lipideos_g", "g");
pub const PROTEIN: Nutrient = nutrient("Protein", "proteina_g", "g");
pub const ENERGY: Nutrient = nutrient("Energy", "energia_kcal", "kcal");
pub const FIBER: Nutrient = nutrient("Fiber", "fibra_alimentar_g", "g");
pub const MOISTURE: Nutrient = nutrient("Moisture", "umidade_pct", "%");

/// Carbohydrate, lipid, protein. The order is the pie slice order.
pub const MACROS: &[Nutrient] = &[CARBOHYDRATE, LIPID, PROTEIN];

pub const BASIC: &[Nutrient] = &[ENERGY, FIBER, MOISTURE];

pub const MINERALS: &[Nutrient] = &[
    nutrient("Calcium", "calcio_mg", "mg"),
    nutrient("Copper", "cobre_mg", "mg"),
    nutrient("Iron", "ferro_mg", "mg"),
    nutrient("Phosphorus", "fosforo_mg", "mg"),
    nutrient("Magnesium", "magnesio_mg", "mg"),
    nutrient("Manganese", "manganes_mg", "mg"),
    nutrient("Potassium", "potassio_mg", "mg"),
    nutrient("Selenium", "se", "µg"),
    nutrient("Sodium", "sodio_mg", "mg"),
    nutrient("Zinc", "zinco_mg", "mg"),
];

pub const FAT_SOLUBLE_VITAMINS: &[Nutrient] = &[
    nutrient("Vitamin A", "vit_a_ui", "IU"),
    nutrient("Vitamin D", "vitamina_d", "µg"),
    nutrient("Vitamin E", "vit_e_alfatocoferol", "mg"),
    nutrient("Vitamin K", "vit_k_filoquinona", "µg"),
];

pub const VITAMIN_A_PRECURSORS: &[Nutrient] = &[
    nutrient("Beta-carotene", "betacaroteno", "µg"),
    nutrient("RAE", "rae_mcg", "mcg"),
];

pub const B_COMPLEX: &[Nutrient] = &[
    nutrient("B1 | Thiamine", "tiamina_mg", "mg"),
    nutrient("B2 | Riboflavin", "riboflavina_mg", "mg"),
    nutrient("B3 | Niacin", "niacina_mg", "mg"),
    nutrient("B5 | Pantothenic acid", "ac_pantontenico", "mg"),
    nutrient("B6 | Pyridoxine", "piridoxina_mg", "mg"),
    nutrient("B9 | Folate DFE", "folato_dfe", "mcg"),
    nutrient("B12 | Cobalamin", "vit_b12", "µg"),
    nutrient("Choline", "colina_total", "mg"),
];

pub const OTHER_VITAMINS: &[Nutrient] = &[
    nutrient("Vitamin C", "c_mg", "mg"),
    nutrient("Lutein + Zeaxanthin", "luteina_zeoxantina", "µg"),
];

pub const LIPID_FRACTIONS: &[Nutrient] = &[
    nutrient("Cholesterol", "colesterol_mg", "mg"),
    nutrient("Saturated fatty acids", "ac_graxos_total_saturados", "g"),
    nutrient("18:1 undifferentiated", "col_18_e_1_indifernciado", "g"),
    nutrient("18:2 undifferentiated", "col_18_e_2_indiferenciado", "g"),
    nutrient("18:3 undifferentiated", "col_18_e_3_indiferenciado", "g"),
    nutrient("22:6 n-3 (DHA)", "col_22_e_6_n3_dha", "g"),
    nutrient("20:5 n-3 (EPA)", "col_20_e_5_n3_epa", "g"),
    nutrient("Monounsaturated fatty acids", "ac_graxos_totais_monoinsaturados", "g"),
    nutrient("Polyunsaturated fatty acids", "ac_graxos_totais_poliinsaturados", "g"),
];

pub const AMINO_ACIDS: &[Nutrient] = &[
    nutrient("Alanine", "alanina", "g"),
    nutrient("Arginine", "arginina", "g"),
    nutrient("Asparagine", "asparagina", "g"),
    nutrient("Aspartic acid", "acido_aspartico", "g"),
    nutrient("Cysteine", "cisteina", "g"),
    nutrient("Phenylalanine", "fenilalanina", "g"),
    nutrient("Glycine", "glicina", "g"),
    nutrient("Histidine", "histidina", "g"),
    nutrient("Isoleucine", "isoleucina", "g"),
    nutrient("Leucine", "leucina", "g"),
    nutrient("Lysine", "lisina", "g"),
    nutrient("Methionine", "metionina", "g"),
    nutrient("Proline", "prolina", "g"),
    nutrient("Serine", "serina", "g"),
    nutrient("Tyrosine", "tirosina", "g"),
    nutrient("Threonine", "treonina", "g"),
    nutrient("Tryptophan", "triptofano", "g"),
    nutrient("Valine", "valina", "g"),
];

/// Catalog grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NutrientCategory {
    Macros,
    Basic,
    Minerals,
    FatSolubleVitamins,
    VitaminAPrecursors,
    BComplex,
    OtherVitamins,
    LipidFractions,
    AminoAcids,
}

impl NutrientCategory {
    pub const ALL: [NutrientCategory; 9] = [
        NutrientCategory::Macros,
        NutrientCategory::Basic,
        NutrientCategory::Minerals,
        NutrientCategory::FatSolubleVitamins,
        NutrientCategory::VitaminAPrecursors,
        NutrientCategory::BComplex,
        NutrientCategory::OtherVitamins,
        NutrientCategory::LipidFractions,
        NutrientCategory::AminoAcids,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NutrientCategory::Macros => "Macronutrients",
            NutrientCategory::Basic => "Basic nutrients",
            NutrientCategory::Minerals => "Minerals",
            NutrientCategory::FatSolubleVitamins => "Fat-soluble vitamins",
            NutrientCategory::VitaminAPrecursors => "Vitamin A precursors",
            NutrientCategory::BComplex => "B complex",
            NutrientCategory::OtherVitamins => "Other vitamins",
            NutrientCategory::LipidFractions => "Lipid fractions",
            NutrientCategory::AminoAcids => "Amino acids",
        }
    }

    pub fn nutrients(self) -> &'static [Nutrient] {
        match self {
            NutrientCategory::Macros => MACROS,
            NutrientCategory::Basic => BASIC,
            NutrientCategory::Minerals => MINERALS,
            NutrientCategory::FatSolubleVitamins => FAT_SOLUBLE_VITAMINS,
            NutrientCategory::VitaminAPrecursors => VITAMIN_A_PRECURSORS,
            NutrientCategory::BComplex => B_COMPLEX,
            NutrientCategory::OtherVitamins => OTHER_VITAMINS,
            NutrientCategory::LipidFractions => LIPID_FRACTIONS,
            NutrientCategory::AminoAcids => AMINO_ACIDS,
        }
    }

    /// Fractions are small quantities shown with three decimals.
    pub fn is_fraction(self) -> bool {
        matches!(
            self,
            NutrientCategory::LipidFractions | NutrientCategory::AminoAcids
        )
    }
}

impl fmt::Display for NutrientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Looks up the unit of a dataset column across the whole catalog.
pub fn unit_for(column: &str) -> Option<&'static str> {
    NutrientCategory::ALL
        .iter()
        .flat_map(|category| category.nutrients())
        .find(|nutrient| nutrient.column.eq_ignore_ascii_case(column))
        .map(|nutrient| nutrient.unit)
}
