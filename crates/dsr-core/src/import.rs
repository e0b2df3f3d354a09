//! # Legacy Import
//!
//! Converts sale documents exported from the old document store into
//! [`RawSaleRecord`]s, ready to be stored as-is and filtered by
//! [`ingest`](crate::ingest::ingest) at report time.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  legacy document                        RawSaleRecord                   │
//! │  ───────────────────────────────────    ─────────────────────────────   │
//! │  _id     "…" | {"$oid": "…"}        ──► id (new UUID if absent)         │
//! │  itemName  string                   ──► item_name                       │
//! │  quantity  whole number             ──► quantity                        │
//! │  price     rupees (may be fractional) ► unit_price_paise                │
//! │  total     rupees (may be fractional) ► total_paise                     │
//! │  date    "…" | {"$date": …} | millis ──► sold_at text                   │
//! │                                                                         │
//! │  Anything missing or of the wrong type becomes None, never an error.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input is either one JSON array or one document per line.

use chrono::DateTime;
use serde_json::Value;
use uuid::Uuid;

use crate::ingest::format_timestamp;
use crate::types::RawSaleRecord;

/// Parses an export file into raw rows.
///
/// Only malformed JSON is an error; malformed documents still produce rows.
pub fn legacy_rows(text: &str) -> Result<Vec<RawSaleRecord>, serde_json::Error> {
    let trimmed = text.trim_start();

    if trimmed.starts_with('[') {
        let docs: Vec<Value> = serde_json::from_str(trimmed)?;
        return Ok(docs.iter().map(legacy_row).collect());
    }

    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<Value>(line).map(|doc| legacy_row(&doc)))
        .collect()
}

/// Converts one legacy sale document.
pub fn legacy_row(doc: &Value) -> RawSaleRecord {
    let id = match doc.get("_id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Object(oid)) => oid.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    };

    RawSaleRecord {
        id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        item_name: doc.get("itemName").and_then(Value::as_str).map(str::to_string),
        quantity: doc.get("quantity").and_then(whole_number),
        unit_price_paise: doc.get("price").and_then(rupees_to_paise),
        total_paise: doc.get("total").and_then(rupees_to_paise),
        sold_at: doc.get("date").and_then(timestamp_text),
    }
}

fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }

    let n = value.as_f64()?;
    (n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

fn rupees_to_paise(value: &Value) -> Option<i64> {
    let paise = (value.as_f64()? * 100.0).round();
    (paise.is_finite() && paise.abs() < i64::MAX as f64).then_some(paise as i64)
}

fn timestamp_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(millis) => millis_text(millis.as_i64()?),
        Value::Object(wrapped) => match wrapped.get("$date")? {
            Value::Object(long) => {
                let millis = long.get("$numberLong")?.as_str()?.parse().ok()?;
                millis_text(millis)
            }
            inner => timestamp_text(inner),
        },
        _ => None,
    }
}

fn millis_text(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|at| format_timestamp(&at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use serde_json::json;

    #[test]
    fn test_mongo_export_line() {
        let doc = json!({
            "_id": {"$oid": "65a1f0c2e4b0a1b2c3d4e5f6"},
            "itemName": "Masala Chai",
            "quantity": 2,
            "price": 15,
            "total": 30,
            "date": {"$date": "2024-01-12T09:30:00.000Z"}
        });

        let row = legacy_row(&doc);
        assert_eq!(row.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(row.item_name.as_deref(), Some("Masala Chai"));
        assert_eq!(row.quantity, Some(2));
        assert_eq!(row.unit_price_paise, Some(1500));
        assert_eq!(row.total_paise, Some(3000));
        assert_eq!(row.sold_at.as_deref(), Some("2024-01-12T09:30:00.000Z"));
    }

    #[test]
    fn test_fractional_rupees_and_epoch_dates() {
        let row = legacy_row(&json!({
            "_id": "a1",
            "itemName": "Vada",
            "quantity": 3.0,
            "price": 12.5,
            "total": 37.5,
            "date": {"$date": {"$numberLong": "1704099600000"}}
        }));
        assert_eq!(row.quantity, Some(3));
        assert_eq!(row.unit_price_paise, Some(1250));
        assert_eq!(row.total_paise, Some(3750));
        assert_eq!(row.sold_at.as_deref(), Some("2024-01-01T09:00:00.000Z"));

        let plain = legacy_row(&json!({"date": 1704099600000_i64}));
        assert_eq!(plain.sold_at.as_deref(), Some("2024-01-01T09:00:00.000Z"));
    }

    #[test]
    fn test_wrong_types_become_missing() {
        let row = legacy_row(&json!({
            "itemName": 42,
            "quantity": "two",
            "price": null,
            "total": 1.5e300,
            "date": true
        }));

        assert!(Uuid::parse_str(&row.id).is_ok());
        assert_eq!(row.item_name, None);
        assert_eq!(row.quantity, None);
        assert_eq!(row.unit_price_paise, None);
        assert_eq!(row.total_paise, None);
        assert_eq!(row.sold_at, None);
    }

    #[test]
    fn test_array_and_line_formats() {
        let array = r#"[{"_id":"a","itemName":"Tea"},{"_id":"b","itemName":"Coffee"}]"#;
        let lines = "{\"_id\":\"a\",\"itemName\":\"Tea\"}\n\n{\"_id\":\"b\",\"itemName\":\"Coffee\"}\n";

        let from_array = legacy_rows(array).unwrap();
        assert_eq!(from_array, legacy_rows(lines).unwrap());
        assert_eq!(from_array.len(), 2);
        assert_eq!(from_array[1].item_name.as_deref(), Some("Coffee"));

        assert!(legacy_rows("{not json").is_err());
        assert!(legacy_rows("").unwrap().is_empty());
    }

    #[test]
    fn test_imported_rows_go_through_ingest() {
        let rows = legacy_rows(
            r#"[
                {"_id":"ok","itemName":"Tea","quantity":2,"price":10,"total":20,"date":"2024-01-01T09:00:00Z"},
                {"_id":"undated","itemName":"Tea","quantity":1,"price":10,"total":10}
            ]"#,
        )
        .unwrap();

        let ingested = ingest(rows);
        assert_eq!(ingested.records.len(), 1);
        assert_eq!(ingested.records[0].total_paise, 2000);
        assert_eq!(ingested.rejected[0].record_id, "undated");
    }
}
