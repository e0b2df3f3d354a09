//! # Sale Repository
//!
//! Writes to the sales log, and the read path every report starts from.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_raw_all()                                                        │
//! │      SELECT every row, with each column type-checked in SQL:            │
//! │        quantity stored as 'abc'  ──► NULL                               │
//! │        sold_at stored as 42      ──► NULL                               │
//! │      ──► Vec<RawSaleRecord>  (never fails on bad data, only on I/O)     │
//! │                                                                         │
//! │  dsr_core::ingest() then rejects the NULLs and counts them.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows written through [`SaleRepository::insert`] are always complete;
//! the checks exist for rows imported from the legacy store.

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use dsr_core::ingest::format_timestamp;
use dsr_core::{FetchFailure, NewSale, RawSaleRecord, SaleRecord, SalesSource};

/// Repository for sales log operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records one sale. A missing `sold_at` defaults to now.
    ///
    /// The total is stored exactly as given.
    pub async fn insert(&self, sale: &NewSale) -> DbResult<SaleRecord> {
        let record = to_record(sale, Utc::now());

        debug!(id = %record.id, item = %record.item_name, total = record.total_paise, "Inserting sale");

        insert_record(&self.pool, &record).await?;

        Ok(record)
    }

    /// Records several sales atomically: either every line is stored or none.
    pub async fn insert_many(&self, sales: &[NewSale]) -> DbResult<Vec<SaleRecord>> {
        let now = Utc::now();
        let records: Vec<SaleRecord> = sales.iter().map(|sale| to_record(sale, now)).collect();

        let mut tx: Transaction<'_, Sqlite> = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for record in &records {
            insert_record(&mut *tx, record).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(lines = records.len(), "Checkout recorded");

        Ok(records)
    }

    /// Stores a row as-is, including missing fields.
    ///
    /// Used by the seed binary's `--import` mode for legacy sale documents
    /// (see `dsr_core::import`).
    pub async fn insert_raw(&self, row: &RawSaleRecord) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sales (
                id, item_name, quantity, unit_price_paise, total_paise,
                sold_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&row.id)
        .bind(&row.item_name)
        .bind(row.quantity)
        .bind(row.unit_price_paise)
        .bind(row.total_paise)
        .bind(&row.sold_at)
        .bind(format_timestamp(&Utc::now()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Every stored row, unvalidated.
    ///
    /// Columns holding a value of the wrong SQLite type come back as `None`.
    pub async fn fetch_raw_all(&self) -> DbResult<Vec<RawSaleRecord>> {
        let rows: Vec<RawSaleRecord> = sqlx::query_as(
            r#"
            SELECT
                id,
                CASE WHEN typeof(item_name) = 'text' THEN item_name END AS item_name,
                CASE WHEN typeof(quantity) = 'integer' THEN quantity END AS quantity,
                CASE WHEN typeof(unit_price_paise) = 'integer' THEN unit_price_paise END AS unit_price_paise,
                CASE WHEN typeof(total_paise) = 'integer' THEN total_paise END AS total_paise,
                CASE WHEN typeof(sold_at) = 'text' THEN sold_at END AS sold_at
            FROM sales
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Fetched sales rows");

        Ok(rows)
    }

    /// Counts stored rows, malformed ones included.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl SalesSource for SaleRepository {
    async fn fetch_all_sales(&self) -> Result<Vec<RawSaleRecord>, FetchFailure> {
        Ok(self.fetch_raw_all().await?)
    }
}

/// Fills in the id and timestamp for a new sale.
///
/// Sub-millisecond precision is dropped so the returned record matches what
/// is stored.
fn to_record(sale: &NewSale, now: DateTime<Utc>) -> SaleRecord {
    SaleRecord::new(
        sale.item_name.clone(),
        sale.quantity,
        sale.unit_price_paise,
        sale.total_paise,
        sale.sold_at.unwrap_or(now).trunc_subsecs(3),
    )
}

async fn insert_record<'e, E>(executor: E, record: &SaleRecord) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO sales (
            id, item_name, quantity, unit_price_paise, total_paise,
            sold_at, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&record.id)
    .bind(&record.item_name)
    .bind(record.quantity)
    .bind(record.unit_price_paise)
    .bind(record.total_paise)
    .bind(format_timestamp(&record.sold_at))
    .bind(format_timestamp(&Utc::now()))
    .execute(executor)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
