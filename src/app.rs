//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - runs the selected pipelines
//! - prints the paper tables
//! - writes figures and optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, RegressArgs};
use crate::domain::{Pipelines, RunConfig};
use crate::error::AppError;
use crate::plot::{NPL_FIGURE_FILE, PAPER_DPI, REGRESSION_FIGURE_FILE};

pub mod pipeline;

/// Entry point for the `npl` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = run_config_from_cli(&cli);
    execute(&config)
}

/// Install the stderr log subscriber; stdout is reserved for the tables.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_config_from_cli(cli: &Cli) -> RunConfig {
    let (pipelines, regress) = match &cli.command {
        None | Some(Command::All) => (Pipelines::All, RegressArgs::default()),
        Some(Command::Table) => (Pipelines::Table, RegressArgs::default()),
        Some(Command::Regress(args)) => (Pipelines::Regression, args.clone()),
    };

    RunConfig {
        pipelines,
        plot: !cli.output.no_plot,
        ascii: cli.output.ascii,
        ascii_width: cli.output.width,
        ascii_height: cli.output.height,
        output_dir: PathBuf::from("."),
        dpi: PAPER_DPI,
        export_panel: regress.export,
        export_result: regress.export_json,
    }
}

/// Run the configured pipelines, printing to stdout.
pub fn execute(config: &RunConfig) -> Result<(), AppError> {
    if config.pipelines.table() {
        handle_table(config)?;
    }
    if config.pipelines.regression() {
        if config.pipelines.table() {
            println!();
        }
        handle_regression(config)?;
    }
    Ok(())
}

fn handle_table(config: &RunConfig) -> Result<(), AppError> {
    let out = pipeline::run_table()?;

    println!("{}", crate::report::format_npl_table(&out.records));
    println!("{}", crate::report::format_key_stats(&out.summary));

    if config.plot {
        let path = config.output_dir.join(NPL_FIGURE_FILE);
        crate::plot::render_npl_figure(&path, &out.records, config.dpi)?;
        announce_saved(&path, config.dpi);
    }

    Ok(())
}

fn handle_regression(config: &RunConfig) -> Result<(), AppError> {
    let out = pipeline::run_regression()?;

    println!("{}", crate::report::format_regression_table(&out.result));
    println!("{}", crate::report::format_regression_details(&out.result));

    if config.ascii {
        let plot = crate::plot::render_panel_plot(
            &out.panel,
            Some(&out.result),
            config.ascii_width,
            config.ascii_height,
        );
        println!("{plot}");
    }

    if config.plot {
        let path = config.output_dir.join(REGRESSION_FIGURE_FILE);
        crate::plot::render_regression_figure(&path, &out.panel, &out.result, config.dpi)?;
        announce_saved(&path, config.dpi);
    }

    // Optional exports.
    if let Some(path) = &config.export_panel {
        crate::io::write_panel_csv(path, &out.panel, &out.result)?;
        tracing::info!(path = %path.display(), "wrote panel CSV");
    }
    if let Some(path) = &config.export_result {
        crate::io::write_result_json(path, &out.generation, &out.result)?;
        tracing::info!(path = %path.display(), "wrote result JSON");
    }

    Ok(())
}

fn announce_saved(path: &Path, dpi: u32) {
    tracing::info!(path = %path.display(), dpi, "wrote figure");
    println!("Saved: '{}' ({dpi} DPI)", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_invocation_runs_everything_with_plots() {
        let cli = Cli::try_parse_from(["npl"]).unwrap();
        let config = run_config_from_cli(&cli);
        assert_eq!(config.pipelines, Pipelines::All);
        assert!(config.plot);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.dpi, PAPER_DPI);
        assert!(config.export_panel.is_none());
    }

    #[test]
    fn execute_without_plots_writes_requested_exports() {
        let dir = std::env::temp_dir().join(format!("npl_app_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let csv = dir.join("panel.csv");
        let json = dir.join("result.json");

        let config = RunConfig {
            pipelines: Pipelines::All,
            plot: false,
            ascii: true,
            ascii_width: 40,
            ascii_height: 10,
            output_dir: dir.clone(),
            dpi: PAPER_DPI,
            export_panel: Some(csv.clone()),
            export_result: Some(json.clone()),
        };
        execute(&config).unwrap();

        assert!(csv.exists());
        assert!(json.exists());
        assert!(!dir.join(NPL_FIGURE_FILE).exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn execute_with_plots_writes_both_figures() {
        let dir = std::env::temp_dir().join(format!("npl_app_plots_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = RunConfig {
            pipelines: Pipelines::All,
            plot: true,
            ascii: false,
            ascii_width: 72,
            ascii_height: 20,
            output_dir: dir.clone(),
            dpi: 30,
            export_panel: None,
            export_result: None,
        };
        execute(&config).unwrap();

        for name in [NPL_FIGURE_FILE, REGRESSION_FIGURE_FILE] {
            let len = std::fs::metadata(dir.join(name)).unwrap().len();
            assert!(len > 0, "{name} is empty");
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
