//! Error types for the Contactos server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::{ContactId, ValidationErrors};
use crate::models::ContactInput;
use thiserror::Error;

/// Errors raised by a contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record has the requested id
    #[error("Contact {0} not found")]
    NotFound(ContactId),

    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file decoded but its contents are inconsistent
    #[error("Contact data is corrupt: {0}")]
    Corrupt(String),

    /// The id counter has reached its maximum
    #[error("No contact ids left to assign")]
    IdsExhausted,
}

impl StoreError {
    /// Whether this error means the store itself is unusable for the call.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, StoreError::NotFound(_))
    }
}

/// Errors returned by the contact service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The candidate record was rejected; the original input is handed back for correction
    #[error("Validation failed: {errors}")]
    Validation {
        errors: ValidationErrors,
        input: ContactInput,
    },

    /// The referenced contact does not exist
    #[error("Contact {0} not found")]
    NotFound(ContactId),

    /// The store could not serve the request
    #[error("Storage unavailable: {0}")]
    Storage(#[source] StoreError),

    /// CSV rendering failed
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Storage(other),
        }
    }
}

/// Errors that can occur while rendering CSV.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The CSV writer rejected a record
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output buffer failed
    #[error("CSV export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Convenience type alias for Results with ExportError
pub type ExportResult<T> = Result<T, ExportError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
