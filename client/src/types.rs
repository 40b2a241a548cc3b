//! Wire DTOs for the to-do item API.
//!
//! # Design
//! These mirror the server's JSON schema but are defined independently so
//! the client has no dependency on the server or on storage types. The
//! end-to-end test catches any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A single item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

/// Request payload for creating a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateToDoItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Request payload for updating an existing item. All fields are replaced;
/// omitted optional fields are cleared on the server.
pub type UpdateToDoItem = CreateToDoItem;
