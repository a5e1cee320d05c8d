use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body served at `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the database probe fails.
    pub status: &'static str,
    /// Version of this crate at build time.
    pub version: &'static str,
    /// Upload backend selected at startup ("local" or "s3").
    pub storage: &'static str,
    /// Result of the database probe.
    pub db_healthy: bool,
}

/// GET /health -- liveness plus a database round-trip.
///
/// Always answers 200; `status` carries the verdict.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = atelier_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage.name(),
        db_healthy,
    })
}

/// Health routes are merged at the application root, not nested under
/// `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
