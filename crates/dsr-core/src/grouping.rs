//! # Date Grouping
//!
//! Partitions sale records into one bucket per calendar day.
//!
//! ```text
//!   [Tea 01-01, Coffee 01-01, Tea 01-02]
//!                 │
//!                 ▼   group_by_date(.., TimeReference)
//!   2024-01-01 ─► [Tea, Coffee]      (input order kept)
//!   2024-01-02 ─► [Tea]
//! ```
//!
//! Every input record lands in exactly one bucket. Buckets borrow the
//! records; nothing is cloned or mutated.

use std::collections::BTreeMap;

use crate::date_key::{DateKey, TimeReference};
use crate::types::SaleRecord;

/// Sale records partitioned by [`DateKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBuckets<'a> {
    buckets: BTreeMap<DateKey, Vec<&'a SaleRecord>>,
}

impl<'a> DateBuckets<'a> {
    /// Records for one date, in input order.
    pub fn get(&self, key: &DateKey) -> Option<&[&'a SaleRecord]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of records across all buckets.
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Buckets in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[&'a SaleRecord])> {
        self.buckets.iter().map(|(key, records)| (key, records.as_slice()))
    }

    /// Buckets with the most recent date first, the order reports are shown in.
    pub fn newest_first(&self) -> impl Iterator<Item = (&DateKey, &[&'a SaleRecord])> {
        self.buckets
            .iter()
            .rev()
            .map(|(key, records)| (key, records.as_slice()))
    }
}

/// Groups records by the date of their timestamp in `reference`.
///
/// Stable: within a bucket records keep their input order. Deterministic:
/// the same input always yields the same buckets.
pub fn group_by_date<'a, I>(records: I, reference: &TimeReference) -> DateBuckets<'a>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut buckets: BTreeMap<DateKey, Vec<&'a SaleRecord>> = BTreeMap::new();

    for record in records {
        buckets
            .entry(reference.date_key(&record.sold_at))
            .or_default()
            .push(record);
    }

    DateBuckets { buckets }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn sale(name: &str, day: u32, hour: u32) -> SaleRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap();
        SaleRecord::new(name, 1, 1000, 1000, at)
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_worked_example() {
        let sales = vec![sale("Tea", 1, 9), sale("Coffee", 1, 10), sale("Tea", 2, 9)];
        let buckets = group_by_date(&sales, &TimeReference::utc());

        assert_eq!(buckets.len(), 2);
        let first = buckets.get(&key("2024-01-01")).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].item_name, "Tea");
        assert_eq!(first[1].item_name, "Coffee");
        assert_eq!(buckets.get(&key("2024-01-02")).unwrap().len(), 1);
    }

    #[test]
    fn test_partition_no_loss_no_duplication() {
        let sales: Vec<SaleRecord> = (0..50)
            .map(|i| sale(if i % 3 == 0 { "Tea" } else { "Vada" }, 1 + (i % 7), i % 24))
            .collect();
        let buckets = group_by_date(&sales, &TimeReference::utc());

        assert_eq!(buckets.record_count(), sales.len());
        let seen: HashSet<&str> = buckets
            .iter()
            .flat_map(|(_, records)| records.iter().map(|r| r.id.as_str()))
            .collect();
        assert_eq!(seen.len(), sales.len());
    }

    #[test]
    fn test_bucket_keeps_input_order() {
        let sales = vec![sale("C", 1, 23), sale("A", 1, 1), sale("B", 1, 12)];
        let buckets = group_by_date(&sales, &TimeReference::utc());
        let names: Vec<&str> = buckets
            .get(&key("2024-01-01"))
            .unwrap()
            .iter()
            .map(|r| r.item_name.as_str())
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn test_newest_first() {
        let sales = vec![sale("Tea", 2, 9), sale("Tea", 5, 9), sale("Tea", 1, 9)];
        let buckets = group_by_date(&sales, &TimeReference::utc());
        let keys: Vec<String> = buckets.newest_first().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["2024-01-05", "2024-01-02", "2024-01-01"]);
    }

    #[test]
    fn test_reference_shifts_bucket() {
        let sales = vec![sale("Tea", 1, 20)];
        let ist = TimeReference::from_offset_minutes(330).unwrap();
        let buckets = group_by_date(&sales, &ist);
        assert!(buckets.get(&key("2024-01-02")).is_some());
        assert!(buckets.get(&key("2024-01-01")).is_none());
    }

    #[test]
    fn test_deterministic() {
        let sales = vec![sale("Tea", 3, 9), sale("Coffee", 1, 9), sale("Tea", 3, 10)];
        let reference = TimeReference::utc();
        assert_eq!(group_by_date(&sales, &reference), group_by_date(&sales, &reference));
    }

    #[test]
    fn test_empty() {
        let none: Vec<SaleRecord> = Vec::new();
        let buckets = group_by_date(&none, &TimeReference::utc());
        assert!(buckets.is_empty());
        assert_eq!(buckets.record_count(), 0);
    }
}
