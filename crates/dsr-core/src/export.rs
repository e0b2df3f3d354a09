//! # Delimited Text Export
//!
//! Renders per-item totals as spreadsheet-ready text.
//!
//! ## Output Shape
//! ```text
//! Item Name,Quantity,Revenue (₹)\n     ◄── header, always present
//! Tea,2,20\n                          ◄── one row per item, aggregation order
//! Coffee,1,15\n                       ◄── trailing terminator after last row
//! ```
//!
//! ## Escaping
//! Fields are quoted only when they contain the delimiter, a double quote or
//! a line break (RFC 4180). Quotes inside a quoted field are doubled. A plain
//! item name renders byte-for-byte as older exports did; a name such as
//! `Tea, masala` now becomes `"Tea, masala"` instead of splitting the row.
//!
//! The grand total is not part of the export.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::aggregate::ItemSummary;
use crate::date_key::DateKey;
use crate::error::{CoreError, CoreResult};

/// Column headers, in order.
pub const HEADER: [&str; 3] = ["Item Name", "Quantity", "Revenue (₹)"];

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Single-byte field delimiter.
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions { delimiter: b',' }
    }
}

/// Renders items as comma-delimited text with a header row.
///
/// ```rust
/// use dsr_core::aggregate::ItemSummary;
/// use dsr_core::export::to_delimited_text;
///
/// let items = vec![ItemSummary {
///     item_name: "Tea".to_string(),
///     quantity: 2,
///     revenue_paise: 2000,
/// }];
/// assert_eq!(
///     to_delimited_text(&items).unwrap(),
///     "Item Name,Quantity,Revenue (₹)\nTea,2,20\n"
/// );
/// ```
pub fn to_delimited_text(items: &[ItemSummary]) -> CoreResult<String> {
    to_delimited_text_with(items, ExportOptions::default())
}

/// Renders items with explicit options.
pub fn to_delimited_text_with(items: &[ItemSummary], options: ExportOptions) -> CoreResult<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(HEADER).map_err(export_error)?;

    for item in items {
        let quantity = item.quantity.to_string();
        let revenue = item.revenue().to_plain_string();
        writer
            .write_record([item.item_name.as_str(), quantity.as_str(), revenue.as_str()])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Export(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| CoreError::Export(e.to_string()))
}

/// Download filename for one day's export: `sales_<YYYY-MM-DD>.csv`.
pub fn export_filename(date: &DateKey) -> String {
    format!("sales_{date}.csv")
}

fn export_error(err: csv::Error) -> CoreError {
    CoreError::Export(err.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
