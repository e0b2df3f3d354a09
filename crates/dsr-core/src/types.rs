//! # Domain Types
//!
//! Core domain types used throughout the ledger.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │      Item       │   │  RawSaleRecord   │   │   SaleRecord     │     │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────  │     │
//! │  │  id (UUID)      │   │  as stored, any  │──►│  validated,      │     │
//! │  │  name           │   │  field may be    │   │  every field     │     │
//! │  │  price_paise    │   │  missing         │   │  present         │     │
//! │  └─────────────────┘   └──────────────────┘   └──────────────────┘     │
//! │                              ingest::ingest ──┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Free-text Item Names
//! A sale stores the item *name* as text, not a reference to [`Item`].
//! Renaming or deleting a catalogue item never rewrites sales history, and
//! reports match names by exact text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A menu item offered at the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name; copied verbatim onto each sale.
    pub name: String,

    /// Current price in paise.
    pub price_paise: i64,

    /// When the item was added to the catalogue.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

/// Payload for creating or updating an item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub price_paise: i64,
}

// =============================================================================
// Sale Record
// =============================================================================

/// One completed transaction line.
///
/// ## Authoritative Total
/// `total_paise` is the revenue figure. It is usually
/// `quantity × unit_price_paise`, but nothing guarantees that, and reports
/// must never recompute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    /// Free-text item name, matched by exact text equality.
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub total_paise: i64,
    /// When the sale happened.
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Builds a record with a fresh id.
    pub fn new(
        item_name: impl Into<String>,
        quantity: i64,
        unit_price_paise: i64,
        total_paise: i64,
        sold_at: DateTime<Utc>,
    ) -> Self {
        SaleRecord {
            id: Uuid::new_v4().to_string(),
            item_name: item_name.into(),
            quantity,
            unit_price_paise,
            total_paise,
            sold_at,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the recorded total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Raw Sale Record
// =============================================================================

/// A sale row exactly as the store holds it, before validation.
///
/// Rows written by this service are always complete, but the table also
/// carries rows imported from the legacy document store, where any field
/// could be missing or hold the wrong type. Those arrive here as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RawSaleRecord {
    pub id: String,
    pub item_name: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price_paise: Option<i64>,
    pub total_paise: Option<i64>,
    /// RFC 3339 timestamp text.
    pub sold_at: Option<String>,
}

impl From<&SaleRecord> for RawSaleRecord {
    fn from(record: &SaleRecord) -> Self {
        RawSaleRecord {
            id: record.id.clone(),
            item_name: Some(record.item_name.clone()),
            quantity: Some(record.quantity),
            unit_price_paise: Some(record.unit_price_paise),
            total_paise: Some(record.total_paise),
            sold_at: Some(crate::ingest::format_timestamp(&record.sold_at)),
        }
    }
}

// =============================================================================
// Sale Entry
// =============================================================================

/// Payload for recording a single sale.
///
/// `sold_at` defaults to the time the record is created.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub total_paise: i64,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub sold_at: Option<DateTime<Utc>>,
}

/// One line of a counter checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
}

impl CheckoutLine {
    /// Turns the line into a sale, computing its total at entry time.
    ///
    /// Fails if `unit price × quantity` does not fit in an `i64`.
    pub fn into_sale(self, sold_at: DateTime<Utc>) -> Result<NewSale, ValidationError> {
        let total = Money::from_paise(self.unit_price_paise)
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "total".to_string(),
                min: 0,
                max: i64::MAX,
            })?;

        Ok(NewSale {
            item_name: self.item_name,
            quantity: self.quantity,
            unit_price_paise: self.unit_price_paise,
            total_paise: total.paise(),
            sold_at: Some(sold_at),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
