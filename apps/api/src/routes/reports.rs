//! # Report Handlers
//!
//! Same-day and historical reports, as JSON and as CSV downloads.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  load_records(SalesSource)                                              │
//! │     ├── fetch fails ──► 503 FETCH_FAILED (not retried)                  │
//! │     └── ingest ───────► records + rejected rows                         │
//! │              │                                                          │
//! │              ├── today_report(records, ref, now)                        │
//! │              └── daily_reports(records, ref)                            │
//! │                         │                                               │
//! │                         ▼                                               │
//! │           JSON { report(s), skipped, rejected }  or  text/csv           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::header;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use dsr_core::report::{daily_report_for, daily_reports, today_report, DailyReport};
use dsr_core::{ingest, DateKey, Ingested, Rejection, SalesSource};

use crate::error::{ApiError, ApiResult};
use crate::gate::require_report_passcode;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/reports/today", get(today))
        .route("/api/reports/today/csv", get(today_csv))
        .route("/api/reports/daily", get(daily))
        .route("/api/reports/daily/{date}", get(daily_for))
        .route("/api/reports/daily/{date}/csv", get(daily_for_csv))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_report_passcode,
        ))
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// One report plus what was left out of it.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report: DailyReport,
    pub skipped: usize,
    pub rejected: Vec<Rejection>,
}

/// Every day's report, newest first.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportsResponse {
    pub reports: Vec<DailyReport>,
    pub skipped: usize,
    pub rejected: Vec<Rejection>,
}

// =============================================================================
// Loading
// =============================================================================

/// Fetches every stored sale and drops the malformed ones.
///
/// A fetch failure is returned as-is; nothing is retried here.
pub async fn load_records<S: SalesSource>(source: &S) -> ApiResult<Ingested> {
    let rows = source.fetch_all_sales().await?;
    let ingested = ingest(rows);

    if ingested.skipped() > 0 {
        warn!(
            skipped = ingested.skipped(),
            first = %ingested.rejected[0].reason,
            "Skipped malformed sale records"
        );
    }
    debug!(records = ingested.records.len(), "Sales loaded");

    Ok(ingested)
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/reports/today
async fn today(State(state): State<AppState>) -> ApiResult<Json<ReportResponse>> {
    let ingested = load_records(&state.db.sales()).await?;
    let report = today_report(&ingested.records, state.time_reference(), Utc::now())?;

    Ok(Json(ReportResponse {
        report,
        skipped: ingested.skipped(),
        rejected: ingested.rejected,
    }))
}

/// GET /api/reports/today/csv
async fn today_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let ingested = load_records(&state.db.sales()).await?;
    let report = today_report(&ingested.records, state.time_reference(), Utc::now())?;

    csv_download(&report)
}

/// GET /api/reports/daily
async fn daily(State(state): State<AppState>) -> ApiResult<Json<DailyReportsResponse>> {
    let ingested = load_records(&state.db.sales()).await?;
    let reports = daily_reports(&ingested.records, state.time_reference())?;

    Ok(Json(DailyReportsResponse {
        reports,
        skipped: ingested.skipped(),
        rejected: ingested.rejected,
    }))
}

/// GET /api/reports/daily/{date}
async fn daily_for(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<ReportResponse>> {
    let (report, ingested) = report_for_date(&state, &date).await?;

    Ok(Json(ReportResponse {
        report,
        skipped: ingested.skipped(),
        rejected: ingested.rejected,
    }))
}

/// GET /api/reports/daily/{date}/csv
async fn daily_for_csv(State(state): State<AppState>, Path(date): Path<String>) -> ApiResult<Response> {
    let (report, _) = report_for_date(&state, &date).await?;
    csv_download(&report)
}

async fn report_for_date(state: &AppState, date: &str) -> ApiResult<(DailyReport, Ingested)> {
    let key: DateKey = date.parse()?;
    let ingested = load_records(&state.db.sales()).await?;

    let report = daily_report_for(&ingested.records, state.time_reference(), key)?
        .ok_or_else(|| ApiError::not_found("Sales for date", date))?;

    Ok((report, ingested))
}

fn csv_download(report: &DailyReport) -> ApiResult<Response> {
    let body = report.to_csv()?;
    let disposition = format!("attachment; filename=\"{}\"", report.csv_filename());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
