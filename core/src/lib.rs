//! Domain core of the to-do list service.
//!
//! # Overview
//! Holds the to-do item model, the storage contract, and the controller that
//! turns repository results into transport-neutral [`Outcome`]s.
//!
//! # Design
//! - `ToDoItemRepository` is the only seam to storage; the in-memory and
//!   SQLite implementations own their state outright.
//! - `ItemController` checks existence before every write and contains all
//!   unanticipated failures, so callers only ever see an `Outcome`.
//! - Request/response DTOs are separate from the stored entity; the server
//!   crate maps outcomes onto HTTP statuses.

pub mod controller;
pub mod error;
pub mod repository;
pub mod types;

pub use controller::{ItemController, Outcome};
pub use error::{RepoError, RepoResult};
pub use repository::{InMemoryRepository, SqliteRepository, ToDoItemRepository};
pub use types::{
    ItemId, NewToDoItem, ToDoItem, ToDoItemCreateRequest, ToDoItemGetResponse, ToDoItemUpdateRequest,
};
