//! # Validation Module
//!
//! Input validation for the entry side of the ledger.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Entry (POST /api/items, /api/sales)                                   │
//! │  └── THIS MODULE: name, quantity, price rules                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Storage (SQLite)                                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Reporting (ingest)                                                    │
//! │  └── Only structural checks: fields present, timestamp parses.         │
//! │      Business rules are NOT re-applied; a stored negative total is     │
//! │      summed as-is.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CheckoutLine, NewItem, NewSale};
use crate::{MAX_ITEM_NAME_LEN, MAX_ITEM_QUANTITY, MAX_LINE_TOTAL_PAISE, MAX_UNIT_PRICE_PAISE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - At most 200 characters
///
/// The name is NOT trimmed or normalised: "Tea" and "Tea " stay distinct
/// items in reports, matching every earlier export.
///
/// ```rust
/// use dsr_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Masala Chai").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("itemName"));
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "itemName".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity at entry.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paise. Zero is allowed (complimentary items).
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed [`MAX_UNIT_PRICE_PAISE`]
///
/// ```rust
/// use dsr_core::validation::validate_price_paise;
///
/// assert!(validate_price_paise("price", 0).is_ok());
/// assert!(validate_price_paise("price", -100).is_err());
/// assert!(validate_price_paise("price", i64::MAX).is_err());
/// ```
pub fn validate_price_paise(field: &str, paise: i64) -> ValidationResult<()> {
    validate_amount(field, paise, MAX_UNIT_PRICE_PAISE)
}

/// Validates a recorded line total in paise.
///
/// Bounded by [`MAX_LINE_TOTAL_PAISE`] so that a day of entries can be
/// summed without leaving the `i64` range.
pub fn validate_total_paise(paise: i64) -> ValidationResult<()> {
    validate_amount("total", paise, MAX_LINE_TOTAL_PAISE)
}

fn validate_amount(field: &str, paise: i64, max: i64) -> ValidationResult<()> {
    if !(0..=max).contains(&paise) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max,
        });
    }

    Ok(())
}

/// Validates a UUID string (path ids).
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    uuid::Uuid::parse_str(id)
        .map_err(|_| ValidationError::invalid_format("id", "must be a valid UUID"))?;

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a catalogue item payload.
pub fn validate_new_item(item: &NewItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_price_paise("price", item.price_paise)
}

/// Validates a single sale payload.
///
/// The total is not checked against `quantity × unit price`: callers may
/// record discounts or rounding, and the stored total is what reports sum.
pub fn validate_new_sale(sale: &NewSale) -> ValidationResult<()> {
    validate_item_name(&sale.item_name)?;
    validate_quantity(sale.quantity)?;
    validate_price_paise("unitPrice", sale.unit_price_paise)?;
    validate_total_paise(sale.total_paise)
}

/// Validates a checkout: at least one line, every line valid.
pub fn validate_checkout(lines: &[CheckoutLine]) -> CoreResult<()> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    for line in lines {
        validate_item_name(&line.item_name)?;
        validate_quantity(line.quantity)?;
        validate_price_paise("unitPrice", line.unit_price_paise)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(name: &str, quantity: i64, unit: i64, total: i64) -> NewSale {
        NewSale {
            item_name: name.to_string(),
            quantity,
            unit_price_paise: unit,
            total_paise: total,
            sold_at: None,
        }
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Vada Pav").is_ok());
        assert!(validate_item_name(" Tea ").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("\t").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
        assert!(validate_item_name(&"é".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_new_item() {
        let ok = NewItem {
            name: "Idli".to_string(),
            price_paise: 4000,
        };
        assert!(validate_new_item(&ok).is_ok());

        let free = NewItem {
            name: "Water".to_string(),
            price_paise: 0,
        };
        assert!(validate_new_item(&free).is_ok());

        let negative = NewItem {
            name: "Idli".to_string(),
            price_paise: -1,
        };
        assert!(validate_new_item(&negative).is_err());
    }

    #[test]
    fn test_amount_upper_bounds() {
        assert!(validate_price_paise("price", MAX_UNIT_PRICE_PAISE).is_ok());
        assert!(matches!(
            validate_price_paise("price", MAX_UNIT_PRICE_PAISE + 1),
            Err(ValidationError::OutOfRange { max: MAX_UNIT_PRICE_PAISE, .. })
        ));
        assert!(validate_total_paise(MAX_LINE_TOTAL_PAISE).is_ok());
        assert!(validate_total_paise(MAX_LINE_TOTAL_PAISE + 1).is_err());
        assert!(validate_total_paise(i64::MAX).is_err());
    }

    #[test]
    fn test_sale_with_huge_total_is_rejected() {
        let err = validate_new_sale(&sale("Tea", 1, 1000, i64::MAX / 2 + 1)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "total"));

        assert!(validate_new_sale(&sale("Tea", 1, i64::MAX, 1000)).is_err());
    }

    #[test]
    fn test_sale_total_not_cross_checked() {
        // 3 × ₹10 recorded as ₹25 (discount) is accepted.
        assert!(validate_new_sale(&sale("Tea", 3, 1000, 2500)).is_ok());
        assert!(validate_new_sale(&sale("Tea", 0, 1000, 0)).is_err());
        assert!(validate_new_sale(&sale("", 1, 1000, 1000)).is_err());
        assert!(validate_new_sale(&sale("Tea", 1, 1000, -1)).is_err());
    }

    #[test]
    fn test_validate_checkout() {
        assert!(matches!(validate_checkout(&[]), Err(CoreError::EmptyCart)));

        let lines = vec![CheckoutLine {
            item_name: "Tea".to_string(),
            quantity: 2,
            unit_price_paise: 1000,
        }];
        assert!(validate_checkout(&lines).is_ok());

        let bad = vec![CheckoutLine {
            item_name: "Tea".to_string(),
            quantity: 0,
            unit_price_paise: 1000,
        }];
        assert!(matches!(
            validate_checkout(&bad),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let pricey = vec![CheckoutLine {
            item_name: "Tea".to_string(),
            quantity: MAX_ITEM_QUANTITY,
            unit_price_paise: i64::MAX / 10,
        }];
        assert!(matches!(
            validate_checkout(&pricey),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }
}
