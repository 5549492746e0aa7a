//! Runtime configuration.
//!
//! Resolved once at startup from the process environment (a `.env` file is
//! honoured in development) and then passed into `CoreState`. Request
//! handling never reads environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinic Intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_DB_PATH: &str = "INTAKE_DB_PATH";
pub const ENV_ADDR: &str = "INTAKE_ADDR";
pub const ENV_LOG: &str = "INTAKE_LOG";

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_FILTER: &str = "info,clinic_intake=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Get the application data directory (~/ClinicIntake/).
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ClinicIntake")
}

pub fn default_db_path() -> PathBuf {
    app_data_dir().join("intake.db")
}

/// Configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl IntakeConfig {
    /// Read configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = get(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let addr = get(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: ENV_ADDR,
            reason: format!("'{addr}': {e}"),
        })?;

        let log_filter = get(ENV_LOG)
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_filter,
        })
    }

    /// Configuration for tests: database under `dir`, ephemeral local port.
    pub fn for_dir(dir: &std::path::Path) -> Self {
        Self {
            db_path: dir.join("intake.db"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
