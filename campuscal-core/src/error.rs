//! Error types for campuscal.

use thiserror::Error;

use crate::event::EventStatus;

/// Errors that can occur in campuscal operations.
#[derive(Error, Debug)]
pub enum CampusCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote request failed ({status}): {body}")]
    Network { status: u16, body: String },

    #[error("Remote unreachable: {0}")]
    Remote(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Event {id} is already {status}")]
    StateConflict { id: i64, status: EventStatus },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    NotFound(i64),

    #[error("Export failed ({status}): {body}")]
    Export { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for campuscal operations.
pub type CampusCalResult<T> = Result<T, CampusCalError>;
