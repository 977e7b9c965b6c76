//! Grid impact dashboard entry point: CLI wiring, asset loading, front-end dispatch.

use std::fmt::Display;
use std::process;

use tracing::info;

use cooling_flex::cli::{CliOptions, parse_args};
use cooling_flex::config::DashboardConfig;
use cooling_flex::impact::GridImpactCalculator;
use cooling_flex::io::export::export_csv;
use cooling_flex::logging;
use cooling_flex::predict::PredictionService;
use cooling_flex::report::TextReport;

/// API port when `--port` is not given.
#[cfg(feature = "api")]
const DEFAULT_PORT: u16 = 3000;

fn fail(message: impl Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

/// Settings file (or defaults) with CLI overrides applied and validated.
fn load_config(cli: &CliOptions) -> DashboardConfig {
    let mut config = match cli.config {
        Some(ref path) => DashboardConfig::from_toml_file(path).unwrap_or_else(|e| fail(e)),
        None => DashboardConfig::default(),
    };

    if let Some(ref path) = cli.model {
        config.assets.model_path.clone_from(path);
    }
    if let Some(ref path) = cli.scaler {
        config.assets.scaler_path.clone_from(path);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

#[cfg(feature = "tui")]
fn run_tui(service: PredictionService, config: DashboardConfig) {
    if let Err(e) = cooling_flex::tui::run(service, config) {
        fail(format!("TUI crashed: {e}"));
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(_service: PredictionService, _config: DashboardConfig) {
    fail("--tui requires building with the `tui` feature");
}

#[cfg(feature = "api")]
fn run_server(service: PredictionService, config: DashboardConfig, port: Option<u16>) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(cooling_flex::api::AppState { service, config });
    let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(DEFAULT_PORT)));
    let rt = tokio::runtime::Runtime::new()
        .unwrap_or_else(|e| fail(format!("failed to create tokio runtime: {e}")));
    if let Err(e) = rt.block_on(cooling_flex::api::serve(state, addr)) {
        fail(format!("API server stopped: {e}"));
    }
}

#[cfg(not(feature = "api"))]
fn run_server(_service: PredictionService, _config: DashboardConfig, _port: Option<u16>) {
    fail("--serve requires building with the `api` feature");
}

fn main() {
    let cli = parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        eprintln!("Run with --help for usage.");
        process::exit(1);
    });

    // The alternate screen owns the terminal in TUI mode
    if !cli.tui {
        logging::init(cli.verbose);
    }

    let config = load_config(&cli);
    let service = PredictionService::load(&config.assets.model_path, &config.assets.scaler_path)
        .unwrap_or_else(|e| fail(e));

    if cli.tui {
        run_tui(service, config);
        return;
    }

    let limits = config.inputs;
    let outdoor = limits
        .check_outdoor(cli.outdoor.unwrap_or(limits.outdoor_default_c))
        .unwrap_or_else(|e| fail(e));
    let units = limits
        .check_unit_count(cli.units.unwrap_or(limits.unit_count_default))
        .unwrap_or_else(|e| fail(e));

    let calculator = GridImpactCalculator::new(
        &service,
        config.setpoints,
        config.classification.dead_band_mw,
    );
    let report = calculator
        .compute(outdoor, units)
        .unwrap_or_else(|e| fail(e));
    println!("{}", TextReport(&report));

    if let Some(ref path) = cli.sweep_out {
        let reports = calculator
            .sweep(
                limits.outdoor_min_c,
                limits.outdoor_max_c,
                limits.outdoor_step_c,
                units,
            )
            .unwrap_or_else(|e| fail(e));
        if let Err(e) = export_csv(&reports, path) {
            fail(format!("failed to write CSV: {e}"));
        }
        info!(rows = reports.len(), path = %path.display(), "sweep exported");
        eprintln!("Sweep written to {}", path.display());
    }

    if cli.serve {
        run_server(service, config, cli.port);
    }
}
