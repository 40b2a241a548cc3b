//! Stateless request builder and response parser for the to-do item API.
//!
//! # Design
//! `ToDoItemsClient` carries only the base URL. Every operation has a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming the `HttpResponse`; the caller runs the round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateToDoItem, ToDoItem, UpdateToDoItem};

const ITEMS_PATH: &str = "api/ToDoItems";

#[derive(Debug, Clone)]
pub struct ToDoItemsClient {
    base_url: String,
}

impl ToDoItemsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{ITEMS_PATH}", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{ITEMS_PATH}/{id}", self.base_url)
    }

    pub fn build_read_items(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, self.collection_url())
    }

    pub fn build_read_item(&self, id: i64) -> HttpRequest {
        bodiless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_item(&self, input: &CreateToDoItem) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_item(&self, id: i64, input: &UpdateToDoItem) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, self.item_url(id), input)
    }

    pub fn build_delete_item(&self, id: i64) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_read_items(&self, response: HttpResponse) -> Result<Vec<ToDoItem>, ApiError> {
        expect_json(response, 200)
    }

    pub fn parse_read_item(&self, response: HttpResponse) -> Result<ToDoItem, ApiError> {
        expect_json(response, 200)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<ToDoItem, ApiError> {
        expect_json(response, 201)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

fn bodiless(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: serde::Serialize>(
    method: HttpMethod,
    url: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn expect_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}

/// Map unexpected statuses to `ApiError`, singling out 404.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
