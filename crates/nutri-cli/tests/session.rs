//! Scripted sessions against an on-disk table.

use std::fs;
use std::io::Cursor;

use nutri_cli::session::{Session, run_session};
use nutri_core::SessionState;
use nutri_ingest::{IngestOptions, LoadedTable, load_table};
use nutri_model::SectionId;
use nutri_report::RenderOptions;

const FOODS_CSV: &str = "\
alimento,grupo,energia_kcal,carboidrato_g,proteina_g,lipideos_g,calcio_mg
Apple,fruit,52,13.8,0.3,0.2,6
Banana,fruit,89,22.8,1.1,0.3,5
Rice,grain,128,28.1,2.5,0.2,4
Oats,grain,389,66.3,16.9,6.9,54
";

fn load() -> LoadedTable {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("foods.csv");
    fs::write(&path, FOODS_CSV).expect("write fixture");
    load_table(&path, &IngestOptions::default()).expect("load table")
}

fn run(script: &str, sections: &[SectionId]) -> String {
    let loaded = load();
    let options = RenderOptions::default();
    let state = SessionState::new().with_sections(sections.iter().copied());
    let mut session = Session::new(&loaded.table, &options, state);
    let mut out = Vec::new();
    run_session(&mut session, Cursor::new(script), &mut out, false).expect("run session");
    String::from_utf8(out).expect("utf-8 output")
}

#[test]
fn walkthrough_prints_every_transition() {
    let script = "\
group left fruit
pick left rice
pick left apple
pick right Rice
group right grain
group right grain
pick left Banana
group left grain
pick left Rice
show
quit
pick left Apple
";
    let expected = [
        "left (Fruit): Apple, Banana",
        "select two foods to compare",
        "notice: Rice is not in the left group filter, kept the previous pick",
        "select two foods to compare",
        "select a food on the other side",
        "comparing Apple and Rice (new comparison)",
        "right (Grain): Oats, Rice",
        "comparing Apple and Rice (unchanged)",
        "right (all groups): Apple, Banana, Oats, Rice",
        "comparing Apple and Rice (unchanged)",
        "comparing Banana and Rice (left side replaced)",
        "left (Fruit, Grain): Apple, Banana, Oats, Rice",
        "comparing Banana and Rice (unchanged)",
        "notice: foods must differ: Rice was already picked, cleared the right side",
        "select a food on the other side",
        "left: groups [Fruit, Grain], pick Rice",
        "right: groups [], pick -",
        "sections: []",
        "no comparison",
        "",
    ]
    .join("\n");
    assert_eq!(run(script, &[]), expected);
}

#[test]
fn swap_and_unknown_food() {
    let script = "\
pick left Apple
pick right Rice
swap
pick right Quinoa
";
    let output = run(script, &[]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[2], "comparing Rice and Apple (rebuilt)");
    assert_eq!(
        lines[3],
        "error: food 'Quinoa' picked on the right side was not found in the table"
    );
}

#[test]
fn show_draws_enabled_sections() {
    let script = "\
pick left oats
pick right banana
section minerals
show
";
    let output = run(script, &[SectionId::MacroComparison]);
    assert!(output.contains("comparing Oats and Banana (new comparison)"));
    assert!(output.contains("section minerals on"));
    assert!(output.contains("sections: [macro-comparison, minerals]"));
    assert!(output.contains("Comparing Oats and Banana"));
    let macro_at = output.find("## Macro comparison").expect("macro section");
    let minerals_at = output.find("## Minerals").expect("minerals section");
    assert!(macro_at < minerals_at);
}

#[test]
fn section_toggles_report_their_state() {
    let script = "\
section minerals
section macro-comparison
";
    let output = run(script, &[SectionId::MacroComparison]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "section minerals on",
            "select two foods to compare",
            "section macro-comparison off",
            "select two foods to compare",
        ]
    );
}

#[test]
fn bad_lines_are_reported_and_skipped() {
    let script = "\
# comment
dance
pick middle Apple
help
";
    let output = run(script, &[]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "error: unknown command 'dance' (type help for a list)");
    assert_eq!(
        lines[1],
        "error: unknown slot 'middle' (expected left or right)"
    );
    assert_eq!(lines[2], "commands:");
}
