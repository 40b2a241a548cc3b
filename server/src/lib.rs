//! HTTP binding for the to-do list service.
//!
//! # Design
//! The router owns nothing but an [`ItemController`]; storage is chosen by
//! the caller and handed in through the controller, so tests and the binary
//! wire the same routes to different stores.

pub mod config;
pub mod routes;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use todolist_core::{InMemoryRepository, ItemController, SqliteRepository, ToDoItemRepository};
use tracing::info;

pub use config::{ConfigError, ServerConfig, StorageBackend};
pub use routes::{router, HttpOutcome, ITEMS_PATH};

/// Open the configured store and build a controller over it.
pub fn controller_for(storage: &StorageBackend) -> anyhow::Result<ItemController> {
    let repository: Arc<dyn ToDoItemRepository> = match storage {
        StorageBackend::Memory => {
            info!("using in-memory storage");
            Arc::new(InMemoryRepository::new())
        }
        StorageBackend::Sqlite(path) => {
            let repo = SqliteRepository::open(path)
                .with_context(|| format!("failed to open database {}", path.display()))?;
            info!(path = %path.display(), "using sqlite storage");
            Arc::new(repo)
        }
    };
    Ok(ItemController::new(repository))
}

/// Serve the API on `listener` until Ctrl-C is received.
pub async fn run(listener: TcpListener, controller: ItemController) -> Result<(), std::io::Error> {
    axum::serve(listener, router(controller))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
