//! # dsr-core: Sales Reporting Engine
//!
//! Pure functions that turn a raw, unordered collection of sale records into
//! revenue reports. Nothing in this crate touches a database, the network, the
//! file system, or the system clock.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Reporting Pipeline                               │
//! │                                                                         │
//! │  SalesSource::fetch_all_sales()  (implemented by dsr-db)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ingest ──► rejects malformed rows, counts them                         │
//! │       │                                                                 │
//! │       ├──────────────── today ─────────────┐                            │
//! │       ▼                                    ▼                            │
//! │  grouping::group_by_date          filter by today's DateKey             │
//! │       │  (one bucket per day)              │                            │
//! │       ▼                                    ▼                            │
//! │  aggregate::aggregate  ◄──── same aggregator for both modes             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  export::to_delimited_text  ──► "Item Name,Quantity,Revenue (₹)\n..."   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (paise, no floats)
//! - [`types`] - Domain types (Item, SaleRecord, RawSaleRecord)
//! - [`date_key`] - Calendar-date keys and the single time reference
//! - [`validation`] - Business rule validation
//! - [`ingest`] - Raw rows to validated records (reject-and-skip)
//! - [`import`] - Legacy sale documents to raw rows
//! - [`grouping`] - Partition records by date
//! - [`aggregate`] - Per-item quantity/revenue rollup
//! - [`export`] - Delimited text rendering
//! - [`report`] - Same-day, historical and recent-log compositions
//! - [`source`] - The collaborator trait that supplies sale rows
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use dsr_core::aggregate::aggregate;
//! use dsr_core::export::to_delimited_text;
//! use dsr_core::types::SaleRecord;
//!
//! let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//! let sales = vec![
//!     SaleRecord::new("Tea", 2, 1000, 2000, at),
//!     SaleRecord::new("Coffee", 1, 1500, 1500, at),
//! ];
//!
//! let result = aggregate(&sales).unwrap();
//! assert_eq!(result.total_revenue().paise(), 3500);
//!
//! let csv = to_delimited_text(result.items()).unwrap();
//! assert_eq!(csv, "Item Name,Quantity,Revenue (₹)\nTea,2,20\nCoffee,1,15\n");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod date_key;
pub mod error;
pub mod export;
pub mod grouping;
pub mod import;
pub mod ingest;
pub mod money;
pub mod report;
pub mod source;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{aggregate, AggregationResult, ItemSummary};
pub use date_key::{DateKey, TimeReference};
pub use error::{CoreError, CoreResult, FetchFailure, ValidationError};
pub use grouping::{group_by_date, DateBuckets};
pub use ingest::{ingest, Ingested, Rejection};
pub use money::Money;
pub use source::SalesSource;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted for a single sale line.
///
/// ## Business Reason
/// Catches typos at the counter (1000 instead of 10). Applies at entry only;
/// stored records are aggregated as-is.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price accepted at entry, in paise (₹1,00,000).
pub const MAX_UNIT_PRICE_PAISE: i64 = 1_00_00_000;

/// Maximum line total accepted at entry, in paise.
///
/// The largest total a checkout can compute: top price at top quantity.
pub const MAX_LINE_TOTAL_PAISE: i64 = MAX_UNIT_PRICE_PAISE * MAX_ITEM_QUANTITY;

/// Maximum length of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Default number of rows in the recent transactions log.
pub const DEFAULT_RECENT_LIMIT: usize = 10;
