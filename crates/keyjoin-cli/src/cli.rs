//! CLI argument definitions for keyjoin.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use keyjoin_engine::{DEFAULT_OUTPUT, DEFAULT_SAMPLE_SIZE};

#[derive(Parser)]
#[command(
    name = "keyjoin",
    version,
    about = "Merge delimited files that share an entity key",
    long_about = "Merge comma or tab delimited files on a shared key column.\n\n\
                  Files without a group tag must all contain a key for it to be eligible;\n\
                  files named like claims_YYYY form groups, and a key needs to appear in\n\
                  at least one of them. Eligible keys are sampled uniformly at random."
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

    /// Allow key values to appear in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Join the input files and write a sampled merged table.
    Merge(MergeArgs),

    /// Show how each input file is classified without loading its rows.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Input files in output column order; directories expand to their .csv/.tsv files.
    #[arg(value_name = "FILES", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Maximum number of keys to write.
    #[arg(short = 'n', long = "sample-size", value_name = "N", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Merged output path.
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Seed the sampler for a reproducible selection.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Field separator for the merged output.
    #[arg(long = "output-delimiter", value_enum, default_value = "comma")]
    pub output_delimiter: OutputDelimiterArg,

    /// How lines that repeat a key within one file are combined.
    #[arg(long = "duplicates", value_enum, default_value = "merge")]
    pub duplicates: DuplicatesArg,

    /// Load and join the inputs and report counts without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub groups: GroupArgs,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Input files; directories expand to their .csv/.tsv files.
    #[arg(value_name = "FILES", required = true)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub groups: GroupArgs,
}

/// Source classification overrides shared by every command.
#[derive(Args)]
pub struct GroupArgs {
    /// Tag the file with stem STEM as grouped under TAG (repeatable).
    #[arg(long = "group", value_name = "STEM=TAG")]
    pub group: Vec<String>,

    /// Treat the file with stem STEM as required even if its name looks grouped (repeatable).
    #[arg(long = "required", value_name = "STEM")]
    pub required: Vec<String>,

    /// Do not infer groups from claims_YYYY file names.
    #[arg(long = "no-name-groups")]
    pub no_name_groups: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputDelimiterArg {
    Comma,
    Tab,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicatesArg {
    /// Concatenate values with " || ".
    Merge,
    /// Keep only the last line seen.
    Last,
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
