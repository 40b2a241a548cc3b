//! Error types for the to-do API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers routinely branch on
//! "the item does not exist". Every other unexpected status lands in `Http`
//! with the raw status and body.

use thiserror::Error;

/// Errors returned by `ToDoItemsClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
