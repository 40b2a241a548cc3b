//! Command-line and environment configuration for the server binary.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen host `{host}`: {source}")]
    InvalidAddress {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Where to-do items are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite(PathBuf),
}

/// HTTP API for managing to-do items.
#[derive(Debug, Clone, Parser)]
#[command(name = "todolist-server", version, about)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "TODOLIST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file. Items are kept in memory when unset.
    #[arg(long, env = "TODOLIST_DATABASE")]
    pub database: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidAddress {
                host: self.host.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn storage(&self) -> StorageBackend {
        match &self.database {
            Some(path) => StorageBackend::Sqlite(path.clone()),
            None => StorageBackend::Memory,
        }
    }
}
