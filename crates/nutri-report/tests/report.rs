use chrono::{TimeZone, Utc};
use nutri_core::{SelectionEvent, SessionState, Share, dispatch_at};
use nutri_model::{FoodTable, NutrientRow, PerSlot, SectionId};
use nutri_report::{
    Bar, BarChart, RenderOptions, bar_chart, build_report, render_json, render_text, share_lines,
};

fn table() -> FoodTable {
    FoodTable::from_rows(
        Vec::new(),
        vec![
            NutrientRow::new("Apple", "Fruit")
                .with_value("energia_kcal", 52.0)
                .with_value("carboidrato_g", 13.8)
                .with_value("proteina_g", 0.3)
                .with_value("calcio_mg", 6.0)
                .with_value("ferro_mg", 0.1)
                .with_value("colesterol_mg", 0.0),
            NutrientRow::new("Rice", "Grain")
                .with_value("energia_kcal", 1280.0)
                .with_value("carboidrato_g", 28.1)
                .with_value("lipideos_g", 0.2)
                .with_value("proteina_g", 2.5)
                .with_value("calcio_mg", 4.0)
                .with_value("se", 7.5)
                .with_value("leucina", 0.0123),
        ],
    )
}

fn session(sections: &[SectionId]) -> (FoodTable, SessionState) {
    let table = table();
    let mut state = SessionState::new().with_sections(sections.iter().copied());
    let event = SelectionEvent::SetPicks {
        left: Some("Apple".to_string()),
        right: Some("Rice".to_string()),
    };
    let now = Utc
        .with_ymd_and_hms(2026, 5, 4, 10, 30, 0)
        .single()
        .expect("timestamp");
    let frame = dispatch_at(&mut state, &table, event, now);
    assert!(frame.has_comparison());
    (table, state)
}

#[test]
fn report_follows_section_order() {
    let (_table, state) = session(&[SectionId::Minerals, SectionId::MacroFractions]);
    let instance = state.instance().expect("instance");
    let report = build_report(instance, &state.ordered_sections(), &RenderOptions::default());

    let ids: Vec<SectionId> = report.sections.iter().map(|section| section.id).collect();
    assert_eq!(ids, vec![SectionId::MacroFractions, SectionId::Minerals]);
    assert_eq!(report.foods, PerSlot::new("Apple".to_string(), "Rice".to_string()));
    assert_eq!(report.cards.right.energy, Some(1280.0));
}

#[test]
fn fractions_are_tables_with_three_decimals() {
    let (_table, state) = session(&[SectionId::MacroFractions]);
    let report = build_report(
        state.instance().expect("instance"),
        &state.ordered_sections(),
        &RenderOptions::default(),
    );
    let fractions = &report.sections[0];
    assert_eq!(fractions.tables.len(), 2);
    assert!(fractions.charts.is_empty());

    let amino = &fractions.tables[1];
    let leucine = amino
        .rows
        .iter()
        .find(|row| row.label == "Leucine")
        .expect("leucine row");
    assert_eq!(leucine.left, "N/A");
    assert_eq!(leucine.right, "0.012");

    let cholesterol = &fractions.tables[0].rows[0];
    assert_eq!(cholesterol.left, "N/A");
}

#[test]
fn charts_split_by_unit_and_skip_empty_series() {
    let (_table, state) = session(&[SectionId::Minerals]);
    let report = build_report(
        state.instance().expect("instance"),
        &state.ordered_sections(),
        &RenderOptions::default(),
    );
    let minerals = &report.sections[0];
    let titles: Vec<&str> = minerals.charts.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Minerals (mg)", "Selenium"]);

    let mg = &minerals.charts[0];
    assert!((mg.upper_limit - 6.6).abs() < 1e-9);
    assert_eq!(mg.series.left.len(), 2);
    assert_eq!(mg.series.right.len(), 1);
    assert!(minerals.charts[1].series.left.is_empty());
}

#[test]
fn text_output_has_cards_and_sections() {
    let (_table, state) = session(&[SectionId::MacroComparison]);
    let report = build_report(
        state.instance().expect("instance"),
        &state.ordered_sections(),
        &RenderOptions::default(),
    );
    let text = render_text(&report, &RenderOptions::default());

    assert!(text.starts_with("Comparing Apple and Rice"));
    assert!(text.contains("Energy (kcal)"));
    assert!(text.contains("1,280.0"));
    assert!(text.contains("Macronutrient split"));
    assert!(text.contains("## Macro comparison"));
    assert!(text.contains("N/A"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn json_output_carries_ids_and_foods() {
    let (_table, state) = session(&[SectionId::BComplex, SectionId::MacroComparison]);
    let report = build_report(
        state.instance().expect("instance"),
        &state.ordered_sections(),
        &RenderOptions::default(),
    );
    let json = render_json(&report).expect("serialize report");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse report");

    assert_eq!(value["foods"]["left"], "Apple");
    assert_eq!(value["cards"]["right"]["group"], "Grain");
    assert_eq!(value["sections"][0]["id"], "macro-comparison");
    assert_eq!(value["sections"][1]["id"], "b-complex");
    assert_eq!(value["compared_since"], "2026-05-04T10:30:00Z");
}

#[test]
fn share_lines_draw_percentages() {
    let shares = [
        Share {
            label: "Carbohydrate",
            value: 3.0,
            percent: 75.0,
        },
        Share {
            label: "Lipid",
            value: 0.0,
            percent: 0.0,
        },
        Share {
            label: "Protein",
            value: 1.0,
            percent: 25.0,
        },
    ];
    assert_eq!(
        share_lines(&shares, 4),
        vec![
            "  Carbohydrate  ███·  75.0%".to_string(),
            "  Protein       █···  25.0%".to_string(),
        ]
    );
}

#[test]
fn bar_chart_marks_missing_series() {
    let chart = BarChart {
        title: "Minerals".to_string(),
        unit: "mg",
        upper_limit: 10.0,
        series: PerSlot::new(
            vec![Bar {
                label: "Iron",
                value: 5.0,
            }],
            Vec::new(),
        ),
    };
    let options = RenderOptions {
        bar_width: 10,
        ..RenderOptions::default()
    };
    let foods = PerSlot::new("Apple".to_string(), "Rice".to_string());
    let expected = [
        "Minerals (mg)",
        "  Apple",
        "    Iron  █████·····  5.0 mg",
        "  Rice",
        "    no data",
    ]
    .join("\n");
    assert_eq!(bar_chart(&chart, &foods, &options), expected);
}
