//! Report passcode gate.
//!
//! When `DSR_REPORT_PASSCODE` is set, every report route requires the
//! `x-report-passcode` header to match it. Unset, the routes are open.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the report passcode.
pub const PASSCODE_HEADER: &str = "x-report-passcode";

pub async fn require_report_passcode(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.report_passcode.as_deref() else {
        return Ok(next.run(req).await);
    };

    // CORS preflight carries no custom headers
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let supplied = req
        .headers()
        .get(PASSCODE_HEADER)
        .and_then(|value| value.to_str().ok());

    match supplied {
        Some(code) if code == expected => Ok(next.run(req).await),
        Some(_) => {
            tracing::warn!(uri = %req.uri(), "Wrong report passcode");
            Err(ApiError::unauthorized("Wrong report passcode"))
        }
        None => Err(ApiError::unauthorized("Report passcode required")),
    }
}
