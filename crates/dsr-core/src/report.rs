//! # Report Modes
//!
//! Compositions of the grouper, aggregator and exporter.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  today_report(records, ref, now)                                        │
//! │      today = ref.date_key(now)          ◄── computed once               │
//! │      records where ref.date_key(sold_at) == today ──► aggregate         │
//! │                                                                         │
//! │  daily_reports(records, ref)                                            │
//! │      group_by_date(records, ref) ──► aggregate each bucket              │
//! │      newest date first                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller supplies `now`; this module never reads the clock.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::aggregate::{aggregate, ItemSummary};
use crate::date_key::{DateKey, TimeReference};
use crate::error::CoreResult;
use crate::export::{export_filename, to_delimited_text};
use crate::grouping::group_by_date;
use crate::money::Money;
use crate::types::SaleRecord;

// =============================================================================
// Daily Report
// =============================================================================

/// Aggregated sales for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    #[ts(as = "String")]
    pub date: DateKey,
    pub items: Vec<ItemSummary>,
    pub total_revenue_paise: i64,
    pub record_count: usize,
}

impl DailyReport {
    /// Aggregates the given records under `date`.
    pub fn from_records<'a, I>(date: DateKey, records: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a SaleRecord>,
    {
        let mut record_count = 0;
        let result = aggregate(records.into_iter().inspect(|_| record_count += 1))?;

        Ok(DailyReport {
            date,
            total_revenue_paise: result.total_revenue().paise(),
            items: result.into_items(),
            record_count,
        })
    }

    pub fn total_revenue(&self) -> Money {
        Money::from_paise(self.total_revenue_paise)
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// The per-item table as CSV text.
    pub fn to_csv(&self) -> CoreResult<String> {
        to_delimited_text(&self.items)
    }

    /// `sales_<date>.csv`
    pub fn csv_filename(&self) -> String {
        export_filename(&self.date)
    }
}

// =============================================================================
// Compositions
// =============================================================================

/// Today's report: only records whose date key matches that of `now`.
///
/// Returns an empty report (not an error) when nothing sold today.
pub fn today_report(
    records: &[SaleRecord],
    reference: &TimeReference,
    now: DateTime<Utc>,
) -> CoreResult<DailyReport> {
    let today = reference.date_key(&now);
    DailyReport::from_records(
        today,
        records
            .iter()
            .filter(|record| reference.date_key(&record.sold_at) == today),
    )
}

/// One report per date that has sales, newest date first.
pub fn daily_reports(records: &[SaleRecord], reference: &TimeReference) -> CoreResult<Vec<DailyReport>> {
    group_by_date(records, reference)
        .newest_first()
        .map(|(date, bucket)| DailyReport::from_records(*date, bucket.iter().copied()))
        .collect()
}

/// The report for a single date, or `None` if no sales fell on it.
pub fn daily_report_for(
    records: &[SaleRecord],
    reference: &TimeReference,
    date: DateKey,
) -> CoreResult<Option<DailyReport>> {
    let report = DailyReport::from_records(
        date,
        records
            .iter()
            .filter(|record| reference.date_key(&record.sold_at) == date),
    )?;

    Ok((!report.is_empty()).then_some(report))
}

/// The `limit` most recent records, newest first.
///
/// Records with equal timestamps keep their input order.
pub fn recent(records: &[SaleRecord], limit: usize) -> Vec<&SaleRecord> {
    let mut sorted: Vec<&SaleRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.sold_at.cmp(&a.sold_at));
    sorted.truncate(limit);
    sorted
}

// =============================================================================
// Unit Tests
// =============================================================================
