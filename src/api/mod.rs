//! REST API over the grid impact calculator.
//!
//! Provides three GET endpoints:
//! - `/impact`: baseline vs load-shed report for one outdoor temperature
//! - `/sweep`: reports across a range of outdoor temperatures
//! - `/config`: active setpoints, dead-band, and input limits

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::config::DashboardConfig;
use crate::impact::GridImpactCalculator;
use crate::predict::PredictionService;

pub use handlers::ApiError;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the assets are loaded and wrapped in `Arc`; no
/// locks are needed since nothing is mutated afterwards.
pub struct AppState {
    /// Loaded scaler and model.
    pub service: PredictionService,
    /// Setpoints, dead-band, and input limits.
    pub config: DashboardConfig,
}

impl AppState {
    /// Calculator bound to this state's service and settings.
    pub fn calculator(&self) -> GridImpactCalculator<'_> {
        GridImpactCalculator::new(
            &self.service,
            self.config.setpoints,
            self.config.classification.dead_band_mw,
        )
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/impact", get(handlers::get_impact))
        .route("/sweep", get(handlers::get_sweep))
        .route("/config", get(handlers::get_config))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
