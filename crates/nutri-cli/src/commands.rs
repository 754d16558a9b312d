use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, CellAlignment, Table};
use nutri_cli::session::{Session, run_session as run_session_loop};
use nutri_cli::settings::{Settings, resolve_settings_path, save_settings};
use nutri_core::{
    NoSelectionReason, Resolution, SelectionEvent, SessionState, canonical_food, canonical_group,
    dispatch_settled, foods_in_groups, search_foods,
};
use nutri_ingest::{DataProvider, dataset_info, group_counts};
use nutri_model::{FoodTable, SectionId};
use nutri_report::style::{align_column, apply_table_style, header_cell, label_cell};
use nutri_report::{build_report, render_json, render_text};
use tracing::{info, info_span, warn};

use crate::cli::{CompareArgs, ConfigArgs, FoodsArgs, GroupsArgs, ReportFormatArg, SessionArgs};

pub fn data_provider(settings: &Settings) -> DataProvider {
    DataProvider::new(settings.data.path.clone()).with_options(settings.data.columns.clone())
}

pub fn run_groups(provider: &DataProvider, settings: &Settings, args: &GroupsArgs) -> Result<()> {
    let loaded = provider.load()?;
    if !args.counts {
        for group in loaded.table.groups() {
            println!("{group}");
        }
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Group"), header_cell("Foods")]);
    apply_table_style(&mut table, settings.display.color);
    align_column(&mut table, 1, CellAlignment::Right);
    for (group, count) in group_counts(&loaded.table) {
        table.add_row(vec![Cell::new(group), Cell::new(count)]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_foods(provider: &DataProvider, args: &FoodsArgs) -> Result<()> {
    let loaded = provider.load()?;
    let table = &loaded.table;
    let groups: BTreeSet<String> = args
        .groups
        .iter()
        .map(|group| {
            canonical_group(table, group).unwrap_or_else(|| {
                warn!(group = %group, "unknown group");
                group.trim().to_string()
            })
        })
        .collect();
    let mut foods = foods_in_groups(table, &groups);
    if let Some(term) = &args.search {
        let matches: BTreeSet<String> = search_foods(table, term).into_iter().collect();
        foods.retain(|food| matches.contains(food));
    }
    info!(count = foods.len(), "foods listed");
    let mut stdout = io::stdout().lock();
    for food in foods {
        writeln!(stdout, "{food}")?;
    }
    Ok(())
}

pub fn run_info(provider: &DataProvider, settings: &Settings) -> Result<()> {
    let loaded = provider.load()?;
    let info = dataset_info(&loaded);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table, settings.display.color);
    let rows = [
        ("Source", info.source.clone()),
        ("SHA-256", info.fingerprint.clone()),
        ("Rows", info.total_rows.to_string()),
        ("Dropped rows", info.dropped_rows.to_string()),
        (
            "Duplicate names",
            loaded.stats.duplicate_names.len().to_string(),
        ),
        (
            "Unparsable values",
            loaded.stats.unparsable_values.to_string(),
        ),
        ("Foods", info.foods_count.to_string()),
        ("Groups", info.groups_count.to_string()),
        ("Nutrient columns", info.nutrient_columns.to_string()),
        ("Columns", info.columns.join(", ")),
    ];
    for (field, value) in rows {
        table.add_row(vec![label_cell(field), Cell::new(value)]);
    }
    println!("{table}");
    Ok(())
}

fn resolve_name(table: &FoodTable, name: &str) -> String {
    canonical_food(table, name).map_or_else(|| name.trim().to_string(), str::to_string)
}

pub fn run_compare(provider: &DataProvider, settings: &Settings, args: &CompareArgs) -> Result<()> {
    let loaded = provider.load()?;
    let table = &loaded.table;
    let food1 = resolve_name(table, &args.food1);
    let food2 = resolve_name(table, &args.food2);
    let span = info_span!("compare", food1 = %food1, food2 = %food2);
    let _guard = span.enter();
    if !food1.is_empty() && food1 == food2 {
        bail!("cannot compare {food1} with itself: {}", NoSelectionReason::MustDiffer);
    }

    let sections: Vec<SectionId> = if args.all_sections {
        SectionId::ALL.to_vec()
    } else if args.sections.is_empty() {
        settings.report.default_sections.clone()
    } else {
        args.sections.clone()
    };
    let mut state = SessionState::new().with_sections(sections);
    let event = SelectionEvent::SetPicks {
        left: Some(food1),
        right: Some(food2),
    };
    let frame = dispatch_settled(&mut state, table, event);
    for notice in &frame.notices {
        warn!(%notice, "selection notice");
    }
    match frame.resolution.context("compare foods")? {
        Resolution::Comparison(_) => {}
        Resolution::NoSelection(reason) => bail!("nothing to compare: {reason}"),
    }
    let Some(instance) = state.instance() else {
        bail!("nothing to compare");
    };

    let report = build_report(instance, &state.ordered_sections(), &settings.display);
    let output = match args.format {
        ReportFormatArg::Text => render_text(&report, &settings.display),
        ReportFormatArg::Json => render_json(&report).context("serialize report")?,
    };
    println!("{output}");
    info!(sections = report.sections.len(), "comparison printed");
    Ok(())
}

pub fn run_session(provider: &DataProvider, settings: &Settings, args: &SessionArgs) -> Result<()> {
    let loaded = provider.load()?;
    let state = SessionState::new().with_sections(settings.report.default_sections.iter().copied());
    let mut session = Session::new(&loaded.table, &settings.display, state);
    let mut stdout = io::stdout().lock();

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("open session script {}", path.display()))?;
            run_session_loop(&mut session, BufReader::new(file), &mut stdout, false)
                .context("run session script")?;
        }
        None => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            if prompt {
                writeln!(stdout, "type help for a list of commands")?;
            }
            run_session_loop(&mut session, stdin.lock(), &mut stdout, prompt)
                .context("run session")?;
        }
    }
    info!(
        comparing = session.state().instance().is_some(),
        "session ended"
    );
    Ok(())
}

pub fn run_config(settings: &Settings, explicit: Option<&Path>, args: &ConfigArgs) -> Result<()> {
    print!(
        "{}",
        toml::to_string_pretty(settings).context("serialize settings")?
    );
    if args.write {
        let path = resolve_settings_path(explicit)?;
        save_settings(settings, &path)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
