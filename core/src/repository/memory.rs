//! In-process repository backed by a `BTreeMap`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ToDoItemRepository;
use crate::error::{RepoError, RepoResult};
use crate::types::{validate_name, ItemId, NewToDoItem, ToDoItem};

#[derive(Debug)]
struct Store {
    items: BTreeMap<ItemId, ToDoItem>,
    next_id: ItemId,
}

/// Volatile store used when no database is configured.
///
/// Ids start at 1 and only ever grow, so a deleted id is never handed out
/// again for the lifetime of the instance.
#[derive(Debug)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToDoItemRepository for InMemoryRepository {
    async fn create(&self, item: NewToDoItem) -> RepoResult<ToDoItem> {
        validate_name(&item.name).map_err(RepoError::Validation)?;
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;
        let item = item.with_id(id);
        store.items.insert(id, item.clone());
        Ok(item)
    }

    async fn read_all(&self) -> RepoResult<Vec<ToDoItem>> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn read_by_id(&self, id: ItemId) -> RepoResult<Option<ToDoItem>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn update(&self, item: ToDoItem) -> RepoResult<bool> {
        validate_name(&item.name).map_err(RepoError::Validation)?;
        let mut store = self.store.write().await;
        match store.items.get_mut(&item.id) {
            Some(slot) => {
                *slot = item;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ItemId) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.items.remove(&id).is_some())
    }
}
