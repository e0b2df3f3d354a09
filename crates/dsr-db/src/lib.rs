//! # dsr-db: Database Layer for the DSR sales ledger
//!
//! SQLite storage for the menu catalogue and the sales log, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          DSR Data Flow                                  │
//! │                                                                         │
//! │  HTTP handler (GET /api/reports/today)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     dsr-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (item.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   sale.rs)    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │               │    │ SaleRepo ─────┼──► SalesSource    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dsr.db (SQLite file)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dsr_core::SalesSource;
//! use dsr_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./dsr.db")).await?;
//!
//! let menu = db.items().list().await?;
//! let rows = db.sales().fetch_all_sales().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::item::ItemRepository;
pub use repository::sale::SaleRepository;
