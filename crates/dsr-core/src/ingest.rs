//! # Ingestion
//!
//! Turns stored rows into validated [`SaleRecord`]s before any report runs.
//!
//! ## Malformed Record Policy: Reject and Skip
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RawSaleRecord                                                          │
//! │       │                                                                 │
//! │       ├── item name missing/blank ───► Rejection { id, Required }       │
//! │       ├── quantity missing ──────────► Rejection { id, Required }       │
//! │       ├── unit price missing ────────► Rejection { id, Required }       │
//! │       ├── total missing ─────────────► Rejection { id, Required }       │
//! │       ├── timestamp missing ─────────► Rejection { id, Required }       │
//! │       ├── timestamp unparsable ──────► Rejection { id, InvalidFormat }  │
//! │       │                                                                 │
//! │       └── otherwise ─────────────────► SaleRecord                       │
//! │                                                                         │
//! │  A missing timestamp is never replaced with "now": that would file an  │
//! │  old sale under today's report.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Zero or negative quantities and totals are NOT rejected here. They are
//! structurally valid and reports sum them as recorded.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{RawSaleRecord, SaleRecord};

/// Fallback for timestamps written by SQLite's own `datetime('now')`.
const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// =============================================================================
// Outcome Types
// =============================================================================

/// A stored row that could not be used, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub record_id: String,
    pub reason: String,
}

/// Result of ingesting a batch of raw rows.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Valid records, in input order.
    pub records: Vec<SaleRecord>,
    /// Skipped rows, in input order.
    pub rejected: Vec<Rejection>,
}

impl Ingested {
    /// Number of rows skipped.
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

// =============================================================================
// Ingestion
// =============================================================================

/// Validates every row, keeping the good ones and counting the rest.
///
/// Never fails as a whole: an empty or fully-malformed input yields an
/// empty record list.
pub fn ingest<I>(rows: I) -> Ingested
where
    I: IntoIterator<Item = RawSaleRecord>,
{
    let mut out = Ingested::default();

    for row in rows {
        let record_id = row.id.clone();
        match parse_record(row) {
            Ok(record) => out.records.push(record),
            Err(reason) => out.rejected.push(Rejection {
                record_id,
                reason: reason.to_string(),
            }),
        }
    }

    out
}

/// Converts one raw row into a SaleRecord.
pub fn parse_record(row: RawSaleRecord) -> Result<SaleRecord, ValidationError> {
    let item_name = row
        .item_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ValidationError::required("itemName"))?;
    let quantity = row
        .quantity
        .ok_or_else(|| ValidationError::required("quantity"))?;
    let unit_price_paise = row
        .unit_price_paise
        .ok_or_else(|| ValidationError::required("unitPrice"))?;
    let total_paise = row
        .total_paise
        .ok_or_else(|| ValidationError::required("total"))?;
    let sold_at = row
        .sold_at
        .as_deref()
        .ok_or_else(|| ValidationError::required("soldAt"))
        .and_then(parse_timestamp)?;

    Ok(SaleRecord {
        id: row.id,
        item_name,
        quantity,
        unit_price_paise,
        total_paise,
        sold_at,
    })
}

// =============================================================================
// Timestamp Text
// =============================================================================

/// Canonical storage form: RFC 3339, millisecond precision, `Z` suffix.
///
/// Fixed width in UTC, so text order equals time order.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses RFC 3339 (any offset), or SQLite's `YYYY-MM-DD HH:MM:SS` as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, SQLITE_DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ValidationError::invalid_format("soldAt", format!("unparsable timestamp '{raw}'")))
}

// =============================================================================
// Unit Tests
// =============================================================================
