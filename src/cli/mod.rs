//! Command-line parsing for the NPL analysis tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data/statistics code. None of the flags change the analysis
//! itself; they only pick pipelines and output side effects.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "npl", version, about = "Islamic vs conventional NPL tables and OLS figure")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Verbose logging to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands. Running without one is the same as `all`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run both pipelines.
    All,
    /// Print the RBI FSR 2025 NPL table and render the comparison figure.
    Table,
    /// Generate the synthetic panel, fit the OLS model and render Figure 4.1.
    Regress(RegressArgs),
}

/// Output side effects shared by every pipeline.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Skip writing the PNG figures.
    #[arg(long, global = true)]
    pub no_plot: bool,

    /// Also draw the synthetic panel as an ASCII plot in the terminal.
    #[arg(long, global = true)]
    pub ascii: bool,

    /// ASCII plot width (columns).
    #[arg(long, global = true, default_value_t = 72)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, global = true, default_value_t = 20)]
    pub height: usize,
}

/// Options for the regression pipeline.
#[derive(Debug, Args, Clone, Default)]
pub struct RegressArgs {
    /// Export the panel with fitted values and residuals to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the regression result to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}
