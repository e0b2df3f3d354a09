//! # DSR Kitchens API
//!
//! HTTP service for the counter and the reports pages.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Service Startup                                 │
//! │                                                                         │
//! │  1. Read .env (if present) and init tracing                             │
//! │     └── RUST_LOG or "info,dsr=debug,sqlx=warn"                          │
//! │                                                                         │
//! │  2. ApiConfig::load()                                                   │
//! │     └── port, database path, passcode, UTC offset                       │
//! │                                                                         │
//! │  3. Database::new(DbConfig)                                             │
//! │     ├── Create SQLite file if missing (WAL mode)                        │
//! │     └── Run pending migrations                                          │
//! │                                                                         │
//! │  4. build_app(AppState)                                                 │
//! │     └── routes + CORS + request tracing                                 │
//! │                                                                         │
//! │  5. Serve until Ctrl+C / SIGTERM, then close the pool                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_app;
pub use state::AppState;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - everything at debug
/// - `RUST_LOG=dsr=trace` - trace for dsr crates only
/// - Default: INFO, with debug for dsr crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dsr=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
