//! Shared application state.
//!
//! Built once in `main` and cloned into every handler by axum. The database
//! handle inside is the single pool for the whole process.

use std::sync::Arc;

use dsr_core::TimeReference;
use dsr_db::Database;

use crate::config::ApiConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }

    /// The configured date-truncation reference.
    pub fn time_reference(&self) -> &TimeReference {
        &self.config.time_reference
    }
}
