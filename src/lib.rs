//! Grid impact of a thermostat load-shed across a fleet of cooling units.

/// REST API server (enabled with the `api` feature).
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
/// Baseline vs load-shed comparison, classification, and sweeps.
pub mod impact;
/// Export of impact reports.
pub mod io;
pub mod logging;
/// Fitted scaler and regression model loaded from JSON assets.
pub mod model;
pub mod predict;
pub mod report;
/// Interactive terminal dashboard (enabled with the `tui` feature).
#[cfg(feature = "tui")]
pub mod tui;
