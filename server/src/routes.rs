//! HTTP routes for the to-do item API.
//!
//! Handlers are thin: they extract the request, call the controller, and map
//! the resulting [`Outcome`] onto a status code. Malformed paths and bodies
//! are rejected by axum's extractors before the controller is reached.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use todolist_core::{ItemController, ItemId, Outcome, ToDoItemCreateRequest, ToDoItemUpdateRequest};
use tower_http::trace::TraceLayer;

pub const ITEMS_PATH: &str = "/api/ToDoItems";

pub const GREETING: &str = "Ahoj, kouc Ondra!";

/// Response adapter mapping a controller [`Outcome`] onto HTTP.
#[derive(Debug)]
pub struct HttpOutcome<T>(pub Outcome<T>);

impl<T: Serialize> IntoResponse for HttpOutcome<T> {
    fn into_response(self) -> Response {
        match self.0 {
            Outcome::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            Outcome::Created(body) => (StatusCode::CREATED, Json(body)).into_response(),
            Outcome::NoContent => StatusCode::NO_CONTENT.into_response(),
            Outcome::NotFound => StatusCode::NOT_FOUND.into_response(),
            Outcome::Invalid(reason) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": reason }))).into_response()
            }
            Outcome::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

pub fn router(controller: ItemController) -> Router {
    Router::new()
        .route(ITEMS_PATH, get(list_items).post(create_item))
        .route(
            &format!("{ITEMS_PATH}/{{id}}"),
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/nazdarSvete", get(greet))
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}

async fn list_items(State(controller): State<ItemController>) -> Response {
    HttpOutcome(controller.read_all().await).into_response()
}

async fn get_item(State(controller): State<ItemController>, Path(id): Path<ItemId>) -> Response {
    HttpOutcome(controller.read_by_id(id).await).into_response()
}

async fn create_item(
    State(controller): State<ItemController>,
    Json(input): Json<ToDoItemCreateRequest>,
) -> Response {
    match controller.create(input).await {
        Outcome::Created(item) => {
            let location = format!("{ITEMS_PATH}/{}", item.id);
            (StatusCode::CREATED, [(header::LOCATION, location)], Json(item)).into_response()
        }
        other => HttpOutcome(other).into_response(),
    }
}

async fn update_item(
    State(controller): State<ItemController>,
    Path(id): Path<ItemId>,
    Json(input): Json<ToDoItemUpdateRequest>,
) -> Response {
    HttpOutcome(controller.update_by_id(id, input).await).into_response()
}

async fn delete_item(State(controller): State<ItemController>, Path(id): Path<ItemId>) -> Response {
    HttpOutcome(controller.delete_by_id(id).await).into_response()
}

async fn greet() -> &'static str {
    GREETING
}
