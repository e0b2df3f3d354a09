//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first by `main`.
//!
//! | Variable                  | Default    |
//! |---------------------------|------------|
//! | `DSR_PORT`                | `5000`     |
//! | `DSR_DB_PATH`             | `./dsr.db` |
//! | `DSR_DB_MAX_CONNECTIONS`  | `5`        |
//! | `DSR_REPORT_PASSCODE`     | unset      |
//! | `DSR_UTC_OFFSET_MINUTES`  | `0`        |
//! | `DSR_RECENT_LIMIT`        | `10`       |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dsr_core::{TimeReference, DEFAULT_RECENT_LIMIT};

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Shared passcode for the report routes. `None` leaves them open.
    pub report_passcode: Option<String>,

    /// The one offset used to turn timestamps into calendar dates, for the
    /// today filter and the day-wise history alike.
    pub time_reference: TimeReference,

    /// Default row count for the recent transactions log
    pub recent_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 5000,
            database_path: PathBuf::from("./dsr.db"),
            db_max_connections: 5,
            report_passcode: None,
            time_reference: TimeReference::utc(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let utc_offset_minutes: i32 = parse_or(&lookup, "DSR_UTC_OFFSET_MINUTES", 0)?;
        let time_reference = TimeReference::from_offset_minutes(utc_offset_minutes)
            .map_err(|_| ConfigError::InvalidValue("DSR_UTC_OFFSET_MINUTES".to_string()))?;

        let config = ApiConfig {
            port: parse_or(&lookup, "DSR_PORT", defaults.port)?,

            database_path: lookup("DSR_DB_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(&lookup, "DSR_DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            // An empty passcode would lock nothing; treat it as unset.
            report_passcode: lookup("DSR_REPORT_PASSCODE").filter(|code| !code.is_empty()),

            time_reference,

            recent_limit: parse_or(&lookup, "DSR_RECENT_LIMIT", defaults.recent_limit)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DSR_DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
