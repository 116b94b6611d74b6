//! Error Types
//!
//! Every failure the app can show to the user maps into [`AppError`].
//! Nothing is retried; the message is surfaced once, inline or as a toast.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// A single form validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Form field the issue belongs to (e.g. `vat_rate`, `tariffs[1].rate`)
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Malformed category payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("category '{id}' is nested deeper than {max_depth} levels")]
    TooDeep { id: String, max_depth: usize },

    #[error("category '{id}' appears inside its own ancestry ({path})")]
    Cycle { id: String, path: String },
}

/// Application-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Request never produced a response (offline, CORS, DNS...)
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("server returned {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedShape(String),

    /// Request succeeded but there was nothing to show
    #[error("{0}")]
    Empty(String),

    #[error("invalid input")]
    Validation(Vec<ValidationIssue>),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AppError {
    /// Human-readable text for inline errors and notifications
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            AppError::Http { status, body } if body.trim().is_empty() => {
                format!("Server error ({})", status)
            }
            AppError::Http { status, body } => format!("Server error ({}): {}", status, body.trim()),
            AppError::UnexpectedShape(detail) => {
                format!("The server sent an unexpected response ({})", detail)
            }
            AppError::Empty(msg) => msg.clone(),
            AppError::Validation(issues) => issues
                .iter()
                .map(|i| i.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            AppError::Catalog(e) => format!("The category data is malformed: {}", e),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::UnexpectedShape(e.to_string())
    }
}
