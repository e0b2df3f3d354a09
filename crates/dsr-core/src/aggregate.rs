//! # Item Aggregation
//!
//! Rolls sale records up into per-item quantity and revenue totals.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each record (one pass):                                            │
//! │      entry = per_item[record.item_name]  (created on first sight)       │
//! │      entry.quantity += record.quantity                                  │
//! │      entry.revenue  += record.total      ◄── stored total, never        │
//! │      grand_total    += record.total          quantity × unit price      │
//! │                                                                         │
//! │  every += is checked: leaving i64 gives CoreError::Overflow             │
//! │                                                                         │
//! │  O(n) time, O(k) extra space for k distinct item names                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item names are matched by exact text: "Tea", "tea" and "Tea " are three
//! different items. Existing exports were produced that way.

use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::SaleRecord;

/// Totals for one item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub item_name: String,
    pub quantity: i64,
    pub revenue_paise: i64,
}

impl ItemSummary {
    /// Returns the revenue as Money.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_paise(self.revenue_paise)
    }
}

/// Per-item rollup plus grand total.
///
/// Items are kept in order of first appearance in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    items: Vec<ItemSummary>,
    total_revenue_paise: i64,
}

impl AggregationResult {
    /// Per-item totals in first-seen order.
    pub fn items(&self) -> &[ItemSummary] {
        &self.items
    }

    /// Looks up one item by exact name.
    pub fn get(&self, item_name: &str) -> Option<&ItemSummary> {
        self.items.iter().find(|item| item.item_name == item_name)
    }

    /// Sum of every input record's `total`.
    pub fn total_revenue(&self) -> Money {
        Money::from_paise(self.total_revenue_paise)
    }

    /// Sum of every input record's `quantity`.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<ItemSummary> {
        self.items
    }
}

/// Aggregates records into per-item totals and a grand total.
///
/// Empty input gives an empty result with zero revenue. Values are summed
/// as recorded; zero and negative quantities or totals are not filtered.
///
/// # Errors
/// [`CoreError::Overflow`] if any sum leaves the `i64` range.
pub fn aggregate<'a, I>(records: I) -> CoreResult<AggregationResult>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut items: Vec<ItemSummary> = Vec::new();
    let mut total = Money::zero();

    for record in records {
        let slot = *index.entry(record.item_name.as_str()).or_insert_with(|| {
            items.push(ItemSummary {
                item_name: record.item_name.clone(),
                quantity: 0,
                revenue_paise: 0,
            });
            items.len() - 1
        });

        let overflow = || CoreError::Overflow {
            item_name: record.item_name.clone(),
        };

        let entry = &mut items[slot];
        entry.quantity = entry
            .quantity
            .checked_add(record.quantity)
            .ok_or_else(overflow)?;
        entry.revenue_paise = entry
            .revenue_paise
            .checked_add(record.total_paise)
            .ok_or_else(overflow)?;
        total = total.checked_add(record.total()).ok_or_else(overflow)?;
    }

    Ok(AggregationResult {
        items,
        total_revenue_paise: total.paise(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sale(name: &str, quantity: i64, unit: i64, total: i64) -> SaleRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        SaleRecord::new(name, quantity, unit, total, at)
    }

    #[test]
    fn test_worked_example() {
        let sales = vec![sale("Tea", 2, 1000, 2000), sale("Coffee", 1, 1500, 1500)];
        let result = aggregate(&sales).unwrap();

        assert_eq!(
            result.items(),
            &[
                ItemSummary {
                    item_name: "Tea".to_string(),
                    quantity: 2,
                    revenue_paise: 2000
                },
                ItemSummary {
                    item_name: "Coffee".to_string(),
                    quantity: 1,
                    revenue_paise: 1500
                },
            ]
        );
        assert_eq!(result.total_revenue().paise(), 3500);
    }

    #[test]
    fn test_total_is_authoritative() {
        // 3 × ₹10 but recorded as ₹25.
        let sales = vec![sale("Tea", 3, 1000, 2500)];
        let result = aggregate(&sales).unwrap();
        assert_eq!(result.total_revenue().paise(), 2500);
        assert_eq!(result.get("Tea").unwrap().revenue_paise, 2500);
    }

    #[test]
    fn test_repeated_item_accumulates() {
        let sales = vec![
            sale("Tea", 2, 1000, 2000),
            sale("Samosa", 1, 1500, 1500),
            sale("Tea", 1, 1000, 1000),
        ];
        let result = aggregate(&sales).unwrap();
        assert_eq!(result.items().len(), 2);
        assert_eq!(result.items()[0].item_name, "Tea");
        assert_eq!(result.get("Tea").unwrap().quantity, 3);
        assert_eq!(result.get("Tea").unwrap().revenue().paise(), 3000);
    }

    #[test]
    fn test_names_are_case_and_whitespace_sensitive() {
        let sales = vec![
            sale("Tea", 1, 1000, 1000),
            sale("tea", 1, 1000, 1000),
            sale("Tea ", 1, 1000, 1000),
        ];
        let result = aggregate(&sales).unwrap();
        assert_eq!(result.items().len(), 3);
    }

    #[test]
    fn test_conservation() {
        let sales = vec![
            sale("Tea", 2, 1000, 2000),
            sale("Coffee", 5, 1500, 7000),
            sale("Tea", -1, 1000, -1000),
            sale("Vada", 0, 2000, 0),
            sale("Coffee", 1, 1500, 1499),
        ];
        let result = aggregate(&sales).unwrap();

        let quantity_in: i64 = sales.iter().map(|s| s.quantity).sum();
        let revenue_in: i64 = sales.iter().map(|s| s.total_paise).sum();
        let revenue_out: i64 = result.items().iter().map(|i| i.revenue_paise).sum();

        assert_eq!(result.total_quantity(), quantity_in);
        assert_eq!(revenue_out, revenue_in);
        assert_eq!(result.total_revenue().paise(), revenue_in);
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<SaleRecord> = Vec::new();
        let result = aggregate(&none).unwrap();
        assert!(result.is_empty());
        assert!(result.total_revenue().is_zero());
        assert_eq!(result, AggregationResult::default());
    }

    #[test]
    fn test_deterministic() {
        let sales = vec![sale("Tea", 2, 1000, 2000), sale("Coffee", 1, 1500, 1500)];
        assert_eq!(aggregate(&sales).unwrap(), aggregate(&sales).unwrap());
    }

    #[test]
    fn test_accepts_borrowed_buckets() {
        let sales = vec![sale("Tea", 2, 1000, 2000), sale("Coffee", 1, 1500, 1500)];
        let bucket: Vec<&SaleRecord> = sales.iter().collect();
        let result = aggregate(bucket.iter().copied()).unwrap();
        assert_eq!(result.total_revenue().paise(), 3500);
    }

    #[test]
    fn test_revenue_overflow_is_an_error() {
        let half = i64::MAX / 2 + 1;
        let sales = vec![sale("Thali", 1, half, half), sale("Thali", 1, half, half)];

        let err = aggregate(&sales).unwrap_err();
        assert!(matches!(err, CoreError::Overflow { ref item_name } if item_name == "Thali"));
    }

    #[test]
    fn test_grand_total_overflow_across_items() {
        let half = i64::MAX / 2 + 1;
        let sales = vec![sale("Thali", 1, half, half), sale("Biryani", 1, half, half)];

        assert!(matches!(
            aggregate(&sales),
            Err(CoreError::Overflow { ref item_name }) if item_name == "Biryani"
        ));
    }

    #[test]
    fn test_quantity_overflow_is_an_error() {
        let sales = vec![sale("Tea", i64::MAX, 0, 0), sale("Tea", 1, 0, 0)];
        assert!(aggregate(&sales).is_err());
    }

    #[test]
    fn test_largest_entries_sum_without_overflow() {
        let max = crate::MAX_LINE_TOTAL_PAISE;
        let sales: Vec<SaleRecord> = (0..1000).map(|_| sale("Thali", 999, max / 999, max)).collect();

        let result = aggregate(&sales).unwrap();
        assert_eq!(result.total_revenue().paise(), max * 1000);
        assert_eq!(result.get("Thali").unwrap().quantity, 999_000);
    }
}
