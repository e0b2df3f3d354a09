//! The collaborator that supplies stored sale rows.
//!
//! Implemented by the database crate; tests implement it with fixed data or
//! a forced failure.

use std::future::Future;

use crate::error::FetchFailure;
use crate::types::RawSaleRecord;

/// Anything that can produce the full set of stored sales.
///
/// Rows come back unvalidated; run them through [`crate::ingest::ingest`]
/// before reporting.
pub trait SalesSource: Send + Sync {
    /// Fetches every stored sale row. No ordering is guaranteed.
    fn fetch_all_sales(&self) -> impl Future<Output = Result<Vec<RawSaleRecord>, FetchFailure>> + Send;
}

impl SalesSource for Vec<RawSaleRecord> {
    async fn fetch_all_sales(&self) -> Result<Vec<RawSaleRecord>, FetchFailure> {
        Ok(self.clone())
    }
}
