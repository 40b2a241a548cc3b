//! Storage error types.
//!
//! # Design
//! A missing key is not an error: repositories report it as `Ok(None)` or
//! `Ok(false)` so the controller can branch on it. `RepoError` covers storage
//! faults plus the stores' own validation guard, and the controller turns
//! every variant into an opaque internal failure.

use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failures raised by a repository call.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The entity failed validation before it reached storage.
    #[error("invalid to-do item: {0}")]
    Validation(String),

    /// The storage driver reported a failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A persisted row could not be decoded.
    #[error("invalid persisted data: {0}")]
    InvalidData(String),

    /// The blocking worker running a storage call panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
