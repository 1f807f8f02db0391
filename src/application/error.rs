//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add load/session context.
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("failed to fetch {collection}: {status}")]
    Load { collection: String, status: String },

    #[error("failed to parse {collection}: {message}")]
    Parse { collection: String, message: String },

    #[error("guide is not ready (state: {state})")]
    NotReady { state: &'static str },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
