//! CLI argument definitions for the lab-report parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use labgrid_cli::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "labgrid",
    version,
    about = "Interpret extracted lab-report tables",
    long_about = "Interpret tables extracted from laboratory reports.\n\n\
                  Reads extracted pages (tables with geometry plus text lines) or\n\
                  flow documents as JSON and writes patient metadata and normalized\n\
                  results as JSON, CSV or text tables."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse extracted documents and write their results.
    Parse(ParseArgs),

    /// Print the effective keyword lexicon as JSON.
    Lexicon(LexiconArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Extracted documents (JSON).
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Read the inputs as flow documents (paragraphs and tables, no pages).
    #[arg(long = "flow")]
    pub flow: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,

    /// Write one output file per document into this directory instead of
    /// printing to stdout.
    #[arg(long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Keyword lexicon (JSON) replacing the built-in one.
    ///
    /// Defaults to the file named by LABGRID_LEXICON, if set.
    #[arg(long = "lexicon", value_name = "PATH")]
    pub lexicon: Option<PathBuf>,

    /// Use stricter fuzzy-matching thresholds.
    #[arg(long = "strict", conflicts_with = "relaxed")]
    pub strict: bool,

    /// Use looser fuzzy-matching thresholds for noisy extractions.
    #[arg(long = "relaxed")]
    pub relaxed: bool,

    /// Fuzzy-matching threshold (0-100) for labels, headers and keywords.
    ///
    /// Overrides the value implied by --strict or --relaxed.
    #[arg(long = "match-threshold", value_name = "SCORE")]
    pub match_threshold: Option<f64>,

    /// Vertical distance above a table searched for its section label.
    #[arg(long = "header-window", value_name = "POINTS")]
    pub header_window: Option<f64>,

    /// Category of results printed before any recognized section label.
    #[arg(long = "default-category", value_name = "NAME")]
    pub default_category: Option<String>,

    /// Keep antibiotic names exactly as printed.
    #[arg(long = "keep-antibiotic-names")]
    pub keep_antibiotic_names: bool,
}

#[derive(Parser)]
pub struct LexiconArgs {
    /// Lexicon file to validate and print instead of the default one.
    #[arg(long = "lexicon", value_name = "PATH")]
    pub lexicon: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Csv,
    Table,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Table => OutputFormat::Table,
        }
    }
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
