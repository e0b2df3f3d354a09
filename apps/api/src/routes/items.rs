//! Menu catalogue handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tracing::info;

use dsr_core::validation::{validate_new_item, validate_uuid};
use dsr_core::{Item, NewItem};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list).post(create))
        .route("/api/items/{id}", put(update).delete(remove))
}

/// GET /api/items
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.db.items().list().await?))
}

/// POST /api/items
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    validate_new_item(&payload)?;

    let item = state.db.items().insert(&payload).await?;
    info!(id = %item.id, name = %item.name, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewItem>,
) -> ApiResult<Json<Item>> {
    validate_uuid(&id)?;
    validate_new_item(&payload)?;

    Ok(Json(state.db.items().update(&id, &payload).await?))
}

/// DELETE /api/items/{id}
async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    validate_uuid(&id)?;

    state.db.items().delete(&id).await?;
    info!(id = %id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}
