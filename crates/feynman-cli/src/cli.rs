use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Uwe Hernandez Acosta",
    version,
    about = "FeynmanDAG CLI - Generates tree-level Feynman diagrams, their matrix elements and a shared compute graph for the scalar ABC model.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the branches of a process and write one DOT graph per diagram.
    Generate(GenerateArgs),
    /// Evaluate the matrix element of every diagram and their sum.
    Evaluate(EvaluateArgs),
    /// Write the compute graph shared by all diagrams as a DOT file.
    Dag(DagArgs),
}

/// Options shared by every subcommand: the process and its model overrides.
#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    /// Path to the process definition in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Model parameter file (TOML); its values override the process file's `[model]` table.
    #[arg(short, long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Override the cubic coupling constant.
    #[arg(short = 'g', long, value_name = "FLOAT")]
    pub coupling: Option<f64>,

    /// Set a specific model value, overriding the files.
    /// Can be used multiple times. Example: -S model.masses.C=0.75
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub process: ProcessArgs,

    /// Directory for the per-diagram DOT files. Nothing is written when omitted.
    #[arg(short, long, value_name = "DIR")]
    pub dot_dir: Option<PathBuf>,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub process: ProcessArgs,

    /// Write the per-diagram amplitudes to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Arguments for the `dag` subcommand.
#[derive(Args, Debug)]
pub struct DagArgs {
    #[command(flatten)]
    pub process: ProcessArgs,

    /// Path for the DOT output.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Emphasise one branch, counted from 1 as in its label.
    #[arg(long, value_name = "N")]
    pub highlight: Option<usize>,
}
