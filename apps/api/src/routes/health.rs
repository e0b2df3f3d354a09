//! Service banner and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub const BANNER: &str = "Dsr_Kitchens API is running";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(banner))
        .route("/health", get(health))
}

/// GET /api
async fn banner() -> &'static str {
    BANNER
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub migrations_applied: Option<usize>,
}

/// GET /health - 200 when the database answers, 503 otherwise.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.health_check().await;
    let migrations_applied = match state.db.migration_status().await {
        Ok((_, applied)) => Some(applied),
        Err(err) => {
            tracing::warn!(%err, "Could not read migration status");
            None
        }
    };

    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            database,
            migrations_applied,
        }),
    )
}
