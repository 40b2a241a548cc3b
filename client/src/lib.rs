//! Synchronous client core for the to-do list API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller performs the HTTP round-trip, which keeps
//! this crate deterministic and free of any runtime.
//!
//! # Design
//! - `ToDoItemsClient` holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*` so the I/O boundary
//!   is explicit.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ToDoItemsClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateToDoItem, ToDoItem, UpdateToDoItem};
