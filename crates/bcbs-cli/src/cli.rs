//! CLI argument definitions for the upload converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bcbs-convert",
    version,
    about = "Convert AthenaHealth clinical report exports to BCBS upload files",
    long_about = "Convert AthenaHealth clinical-report CSV exports into the fixed-column,\n\
                  pipe-delimited upload format required by the BCBS intake pipeline.\n\
                  A1C and BMI reports are supported; BP, eGFR, and uACR are recognized\n\
                  but not yet convertible."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a report export and write the upload file.
    Convert(ConvertArgs),

    /// List report kinds and their implementation status.
    Kinds,

    /// Look up a BMI growth-chart percentile.
    Percentile(PercentileArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the exported report CSV (marker line included).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output directory for the upload file (default: next to FILE).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Classify and transform without writing the upload file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the conversion summary as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PercentileArgs {
    /// Patient gender (m/male/boy, f/female/girl; case-insensitive).
    #[arg(value_name = "GENDER")]
    pub gender: String,

    /// Patient age in months.
    #[arg(value_name = "AGE_MONTHS")]
    pub age_months: f64,

    /// Measured BMI value.
    #[arg(value_name = "BMI")]
    pub bmi: f64,
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
