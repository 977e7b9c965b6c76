//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

use super::AppState;
use super::types::{
    ConfigResponse, ErrorResponse, ImpactQuery, ImpactResponse, SweepQuery, SweepRecord,
};
use crate::error::{ImpactError, InputError};
use crate::model::Regressor;

/// Handler failure, mapped to an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<ImpactError> for ApiError {
    fn from(e: ImpactError) -> Self {
        match e {
            ImpactError::Input(inner) => inner.into(),
            ImpactError::DivisionByZero => Self::Unprocessable(e.to_string()),
            ImpactError::Inference(_) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Impact report for one outdoor temperature and fleet size.
///
/// `GET /impact?outdoor_temperature=35&unit_count=1000` → 200 + `ImpactResponse`
/// Malformed or out-of-range input → 400, zero baseline → 422, inference failure → 500.
pub async fn get_impact(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ImpactQuery>, QueryRejection>,
) -> Result<Json<ImpactResponse>, ApiError> {
    let Query(query) = query?;
    let limits = &state.config.inputs;
    let outdoor = limits.check_outdoor(query.outdoor_temperature.unwrap_or(limits.outdoor_default_c))?;
    let units = limits.check_unit_count(query.unit_count.unwrap_or(limits.unit_count_default))?;

    let report = state.calculator().compute(outdoor, units)?;
    Ok(Json(ImpactResponse::from(&report)))
}

/// Impact reports across a range of outdoor temperatures.
///
/// `GET /sweep` → whole configured range at the configured step
/// `GET /sweep?from=30&to=40&step=1&unit_count=500` → 11 rows
/// `GET /sweep?from=40&to=30` → 400 + `ErrorResponse`
pub async fn get_sweep(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SweepQuery>, QueryRejection>,
) -> Result<Json<Vec<SweepRecord>>, ApiError> {
    let Query(query) = query?;
    let limits = &state.config.inputs;
    let from = limits.check_outdoor(query.from.unwrap_or(limits.outdoor_min_c))?;
    let to = limits.check_outdoor(query.to.unwrap_or(limits.outdoor_max_c))?;
    let step = query.step.unwrap_or(limits.outdoor_step_c);
    let units = limits.check_unit_count(query.unit_count.unwrap_or(limits.unit_count_default))?;

    let reports = state.calculator().sweep(from, to, step, units)?;
    Ok(Json(reports.iter().map(SweepRecord::from).collect()))
}

/// Active setpoints, dead-band, and input limits.
///
/// `GET /config` → 200 + `ConfigResponse`
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let calculator = state.calculator();
    Json(ConfigResponse {
        setpoints: calculator.setpoints(),
        dead_band_mw: calculator.dead_band_mw(),
        inputs: state.config.inputs,
        model_kind: state.service.model().kind(),
        feature_names: state.service.scaler().feature_names.clone(),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::DashboardConfig;
    use crate::model::{LinearModel, RegressionModel, StandardScaler};
    use crate::predict::PredictionService;

    /// Identity scaler; per-unit watts = intercept + 10 * outdoor - 67.5 * indoor.
    fn make_test_state(intercept: f64) -> Arc<AppState> {
        let model = RegressionModel::Linear(LinearModel::new(
            vec![10.0, -67.5, 0.0],
            intercept,
        ));
        let service = PredictionService::new(StandardScaler::identity(3), model);
        Arc::new(AppState {
            service,
            config: DashboardConfig::default(),
        })
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn impact_returns_200_with_defaults() {
        let app = router(make_test_state(3000.0));
        let (status, json) = get_json(app, "/impact").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outdoor_temperature"], 35.0);
        assert_eq!(json["unit_count"], 1000);
        assert_eq!(json["status"], "REDUCED");
        assert!(json["impact_mw"].as_f64().unwrap() < 0.0);
    }

    #[tokio::test]
    async fn impact_out_of_range_returns_400() {
        let app = router(make_test_state(3000.0));
        let (status, json) = get_json(app, "/impact?outdoor_temperature=50").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn impact_zero_units_returns_400() {
        let app = router(make_test_state(3000.0));
        let (status, _) = get_json(app, "/impact?unit_count=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_query_returns_json_400() {
        for uri in [
            "/impact?unit_count=abc",
            "/impact?unit_count=-5",
            "/impact?unit_count=99999999999",
            "/sweep?step=x",
        ] {
            let app = router(make_test_state(3000.0));
            let (status, json) = get_json(app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(json["error"].is_string(), "{uri}: {json}");
        }
    }

    #[tokio::test]
    async fn zero_baseline_returns_422() {
        // intercept chosen so the baseline prediction at 35 °C is exactly zero
        let intercept = -(10.0 * 35.0 - 67.5 * 22.22);
        let app = router(make_test_state(intercept));
        let (status, json) = get_json(app, "/impact").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("zero"));
    }

    #[tokio::test]
    async fn sweep_range_query() {
        let app = router(make_test_state(3000.0));
        let (status, json) = get_json(app, "/sweep?from=30&to=40&step=1&unit_count=500").await;
        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0]["outdoor_c"], 30.0);
        assert_eq!(rows[10]["outdoor_c"], 40.0);
    }

    #[tokio::test]
    async fn sweep_invalid_range_returns_400() {
        let app = router(make_test_state(3000.0));
        let (status, json) = get_json(app, "/sweep?from=40&to=30").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn config_reports_setpoints() {
        let app = router(make_test_state(3000.0));
        let (status, json) = get_json(app, "/config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["setpoints"]["baseline_c"], 22.22);
        assert_eq!(json["setpoints"]["load_shed_c"], 24.44);
        assert_eq!(json["dead_band_mw"], 0.005);
        assert_eq!(json["model_kind"], "linear");
    }
}
