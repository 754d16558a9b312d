//! CLI argument definitions for `nutri`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use nutri_model::SectionId;

#[derive(Parser)]
#[command(
    name = "nutri",
    version,
    about = "Compare the nutrient profiles of two foods",
    long_about = "Compare the nutrient profiles of two foods from a nutrient table.\n\n\
                  Foods are picked on a left and a right side, each with its own\n\
                  group filter. The comparison report covers macronutrients,\n\
                  fractions, minerals and vitamins."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: the platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Nutrient table CSV (overrides the settings file).
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the food groups of the table.
    Groups(GroupsArgs),

    /// List foods, optionally filtered by group or name.
    Foods(FoodsArgs),

    /// Describe the loaded table.
    Info,

    /// Compare two foods and print the report.
    Compare(CompareArgs),

    /// Run an interactive comparison session.
    Session(SessionArgs),

    /// Print the effective settings.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct GroupsArgs {
    /// Show how many foods each group holds.
    #[arg(long = "counts")]
    pub counts: bool,
}

#[derive(Parser)]
pub struct FoodsArgs {
    /// Only foods of this group (repeatable).
    #[arg(long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Only foods whose name contains TERM, ignoring case.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Food shown on the left.
    #[arg(value_name = "FOOD1")]
    pub food1: String,

    /// Food shown on the right.
    #[arg(value_name = "FOOD2")]
    pub food2: String,

    /// Report section to include (repeatable; default from settings).
    #[arg(long = "section", value_name = "ID")]
    pub sections: Vec<SectionId>,

    /// Include every report section.
    #[arg(long = "all-sections", conflicts_with = "sections")]
    pub all_sections: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct SessionArgs {
    /// Read commands from a file instead of stdin.
    #[arg(long = "script", value_name = "FILE")]
    pub script: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Also write the effective settings to the settings file.
    #[arg(long = "write")]
    pub write: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
