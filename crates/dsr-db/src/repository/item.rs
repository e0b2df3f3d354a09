//! # Item Repository
//!
//! Database operations for the menu catalogue.
//!
//! Items only feed the counter screen's menu. Sales copy the item name at
//! entry time, so editing or deleting an item here never touches history.

use chrono::{SubsecRound, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dsr_core::ingest::format_timestamp;
use dsr_core::{Item, NewItem};

/// Repository for catalogue database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
///
/// let menu = repo.list().await?;
/// let chai = repo.insert(&NewItem { name: "Chai".into(), price_paise: 1500 }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists every item, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let items: Vec<Item> = sqlx::query_as(
            r#"
            SELECT id, name, price_paise, created_at
            FROM items
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let item: Option<Item> = sqlx::query_as(
            r#"
            SELECT id, name, price_paise, created_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item with a generated ID.
    pub async fn insert(&self, new_item: &NewItem) -> DbResult<Item> {
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: new_item.name.clone(),
            price_paise: new_item.price_paise,
            created_at: Utc::now().trunc_subsecs(3),
        };

        debug!(id = %item.id, name = %item.name, "Inserting item");

        sqlx::query(
            r#"
            INSERT INTO items (id, name, price_paise, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_paise)
        .bind(format_timestamp(&item.created_at))
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Replaces an item's name and price.
    pub async fn update(&self, id: &str, changes: &NewItem) -> DbResult<Item> {
        debug!(id = %id, name = %changes.name, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                price_paise = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.price_paise)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Deletes an item.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts catalogue items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
