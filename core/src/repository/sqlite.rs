//! SQLite-backed repository.
//!
//! # Responsibility
//! - Persist items in the `todo_items` table.
//! - Keep SQL details and the blocking driver off the async executor.
//!
//! # Invariants
//! - Write paths validate the item before touching SQL.
//! - Read paths reject rows that would not pass validation.
//! - `AUTOINCREMENT` guarantees ids are never reused, even across restarts.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

use super::ToDoItemRepository;
use crate::error::{RepoError, RepoResult};
use crate::types::{validate_name, ItemId, NewToDoItem, ToDoItem};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS todo_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    is_completed INTEGER NOT NULL DEFAULT 0,
    category TEXT
);";

const ITEM_SELECT_SQL: &str = "SELECT id, name, description, is_completed, category FROM todo_items";

/// Repository owning a single SQLite connection.
///
/// Calls are serialized through the connection mutex and executed on tokio's
/// blocking pool.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRepository {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> RepoResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking pool.
    ///
    /// A panic inside `op` surfaces as `RepoError::Task` for that call only.
    /// Every statement is atomic, so later calls reclaim the poisoned lock.
    pub(crate) async fn run<T, F>(&self, op: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(|poisoned| {
                warn!("reclaiming sqlite connection after a panicked storage call");
                poisoned.into_inner()
            });
            op(&guard)
        })
        .await?
    }
}

#[async_trait]
impl ToDoItemRepository for SqliteRepository {
    async fn create(&self, item: NewToDoItem) -> RepoResult<ToDoItem> {
        validate_name(&item.name).map_err(RepoError::Validation)?;
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO todo_items (name, description, is_completed, category)
                 VALUES (?1, ?2, ?3, ?4);",
                params![item.name, item.description, item.is_completed, item.category],
            )?;
            Ok(item.with_id(conn.last_insert_rowid()))
        })
        .await
    }

    async fn read_all(&self) -> RepoResult<Vec<ToDoItem>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} ORDER BY id ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(parse_item_row(row)?);
            }
            Ok(items)
        })
        .await
    }

    async fn read_by_id(&self, id: ItemId) -> RepoResult<Option<ToDoItem>> {
        self.run(move |conn| {
            let row = conn
                .query_row(
                    &format!("{ITEM_SELECT_SQL} WHERE id = ?1;"),
                    [id],
                    |row| Ok(parse_item_row(row)),
                )
                .optional()?;
            row.transpose()
        })
        .await
    }

    async fn update(&self, item: ToDoItem) -> RepoResult<bool> {
        validate_name(&item.name).map_err(RepoError::Validation)?;
        self.run(move |conn| {
            let changed = conn.execute(
                "UPDATE todo_items
                 SET name = ?1, description = ?2, is_completed = ?3, category = ?4
                 WHERE id = ?5;",
                params![item.name, item.description, item.is_completed, item.category, item.id],
            )?;
            Ok(changed > 0)
        })
        .await
    }

    async fn delete(&self, id: ItemId) -> RepoResult<bool> {
        self.run(move |conn| {
            let changed = conn.execute("DELETE FROM todo_items WHERE id = ?1;", [id])?;
            Ok(changed > 0)
        })
        .await
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ToDoItem> {
    let id: ItemId = row.get("id")?;
    let name: String = row.get("name")?;
    validate_name(&name)
        .map_err(|reason| RepoError::InvalidData(format!("todo_items.name for id {id}: {reason}")))?;

    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_completed value `{other}` in todo_items.is_completed"
            )));
        }
    };

    Ok(ToDoItem {
        id,
        name,
        description: row.get("description")?,
        is_completed,
        category: row.get("category")?,
    })
}
