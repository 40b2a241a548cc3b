//! Storage abstraction for to-do items.
//!
//! # Responsibility
//! - Define the CRUD contract the controller depends on.
//! - Own all shared store state; nothing above this layer holds any.
//!
//! # Invariants
//! - A missing id is reported as `Ok(None)` / `Ok(false)`, never as `Err`.
//! - Ids are assigned by the store and never reused.
//! - Each call is atomic: no partial write is observable.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::RepoResult;
use crate::types::{ItemId, NewToDoItem, ToDoItem};

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;

/// Durable storage for to-do items keyed by store-assigned id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToDoItemRepository: Send + Sync {
    /// Persist `item` and return it with its assigned id.
    async fn create(&self, item: NewToDoItem) -> RepoResult<ToDoItem>;

    /// All stored items, ordered by ascending id.
    async fn read_all(&self) -> RepoResult<Vec<ToDoItem>>;

    async fn read_by_id(&self, id: ItemId) -> RepoResult<Option<ToDoItem>>;

    /// Replace the stored item with the same id.
    ///
    /// Returns `false` if no such item exists; the item is not re-created.
    async fn update(&self, item: ToDoItem) -> RepoResult<bool>;

    /// Remove the item. Returns `false` if it was already absent.
    async fn delete(&self, id: ItemId) -> RepoResult<bool>;
}
