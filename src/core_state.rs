//! Shared application state handed to every request.
//!
//! Holds the startup configuration. Each request opens its own
//! connection, so a unit of work never outlives the request that
//! created it.

use rusqlite::Connection;

use crate::config::IntakeConfig;
use crate::db::{self, DatabaseError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub struct CoreState {
    config: IntakeConfig,
}

impl CoreState {
    /// Prepare the database (create + migrate) and build the state.
    pub fn initialize(config: IntakeConfig) -> Result<Self, CoreError> {
        db::open_database(&config.db_path)?;
        tracing::info!(path = %config.db_path.display(), "Database ready");
        Ok(Self { config })
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Open a database connection for one request.
    pub fn open_db(&self) -> Result<Connection, CoreError> {
        db::open_connection(&self.config.db_path).map_err(CoreError::Database)
    }

    /// Whether the database can currently be opened and queried.
    pub fn database_available(&self) -> bool {
        self.open_db()
            .and_then(|conn| db::count_tables(&conn).map_err(CoreError::Database))
            .is_ok()
    }
}
