//! Liveness and database readiness at `/health` (root level, outside
//! `/api/v1`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use proboard_core::reputation::ReputationStrategy;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database ping fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Active reputation refresh mode, so operators can tell which one a
    /// node runs.
    pub reputation_strategy: &'static str,
}

/// GET /health
///
/// 200 when the database answers, 503 otherwise so load balancers drain
/// the node.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = match proboard_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    let reputation_strategy = match state.config.reputation_strategy {
        ReputationStrategy::FullRecompute => "full",
        ReputationStrategy::Incremental => "incremental",
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            reputation_strategy,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
