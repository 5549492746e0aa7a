use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::enums::LookupTable;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("No {table} entry named '{value}'")]
    UnknownReference { table: LookupTable, value: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid JSON in {context}: {reason}")]
    InvalidJson { context: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(DatabaseError),
}

impl IntakeError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        IntakeError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the submitted payload itself.
    pub fn is_bad_payload(&self) -> bool {
        matches!(
            self,
            IntakeError::MissingField(_)
                | IntakeError::InvalidField { .. }
                | IntakeError::InvalidJson { .. }
        )
    }
}

impl From<DatabaseError> for IntakeError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UnknownReference { table, value } => {
                IntakeError::UnknownReference { table, value }
            }
            other => IntakeError::Storage(other),
        }
    }
}
