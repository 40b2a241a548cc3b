//! Domain entity and wire DTOs for to-do items.
//!
//! # Design
//! `ToDoItem` is the stored shape. The request and response DTOs are kept
//! separate so the JSON surface can narrow or rename fields without touching
//! storage. Conversions between the two are plain `From` impls with no
//! decision logic; the controller decides *when* to convert.

use serde::{Deserialize, Serialize};

/// Store-assigned identity of a to-do item.
pub type ItemId = i64;

/// A persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub category: Option<String>,
}

/// A to-do item that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToDoItem {
    pub name: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub category: Option<String>,
}

impl NewToDoItem {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: ItemId) -> ToDoItem {
        ToDoItem {
            id,
            name: self.name,
            description: self.description,
            is_completed: self.is_completed,
            category: self.category,
        }
    }
}

/// Reject names that are empty once surrounding whitespace is removed.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    Ok(())
}

/// Request payload for creating a new item. The id is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItemCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub category: Option<String>,
}

impl ToDoItemCreateRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }
}

impl From<ToDoItemCreateRequest> for NewToDoItem {
    fn from(request: ToDoItemCreateRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            is_completed: request.is_completed,
            category: request.category,
        }
    }
}

/// Request payload for replacing the fields of an existing item.
///
/// Every field is overwritten; an omitted `description` or `category` clears
/// the stored value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItemUpdateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub category: Option<String>,
}

impl ToDoItemUpdateRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }

    /// Overwrite the request's fields onto `existing`, keeping its id.
    pub fn apply_to(self, existing: ToDoItem) -> ToDoItem {
        ToDoItem {
            id: existing.id,
            name: self.name,
            description: self.description,
            is_completed: self.is_completed,
            category: self.category,
        }
    }
}

/// Wire representation of an item returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItemGetResponse {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

impl From<ToDoItem> for ToDoItemGetResponse {
    fn from(item: ToDoItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            is_completed: item.is_completed,
        }
    }
}
