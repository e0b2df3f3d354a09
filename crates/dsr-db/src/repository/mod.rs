//! # Repository Module
//!
//! Database repository implementations for the sales ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │  db.items().list() / db.sales().insert(..)                      │
//! │       ▼                                                                 │
//! │  ItemRepository                   SaleRepository                        │
//! │  ├── list()                       ├── insert(sale, now)                 │
//! │  ├── get_by_id(id)                ├── insert_many(sales, now)           │
//! │  ├── insert(item)                 ├── insert_raw(row)                   │
//! │  ├── update(id, item)             ├── fetch_raw_all()                   │
//! │  └── delete(id)                   └── impl SalesSource                  │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Menu catalogue CRUD
//! - [`sale::SaleRepository`] - Sales log writes and the report read path

pub mod item;
pub mod sale;
