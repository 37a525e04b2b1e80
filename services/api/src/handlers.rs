//! Axum Handlers for the REST API
//!
//! Read-only endpoints describing the shop, so a client can draw the shelf
//! and the hint chips before opening a game session.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use magic_shop_core::catalog::{SHOP_ITEMS, find_item};

use crate::models::{CatalogItem, ErrorResponse, HintsResponse};

pub enum ApiError {
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
        }
    }
}

/// List every item on the shop shelf.
#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Shop items", body = [CatalogItem])
    )
)]
pub async fn list_catalog() -> Json<Vec<CatalogItem>> {
    Json(SHOP_ITEMS.iter().map(CatalogItem::from).collect())
}

/// Get a single shop item by its identifier.
#[utoipa::path(
    get,
    path = "/catalog/{id}",
    responses(
        (status = 200, description = "Shop item", body = CatalogItem),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Item identifier, e.g. `milk`")
    )
)]
pub async fn get_item(Path(id): Path<String>) -> Result<Json<CatalogItem>, ApiError> {
    let item = find_item(&SHOP_ITEMS, &id)
        .ok_or_else(|| ApiError::NotFound(format!("Item with id '{}' not found", id)))?;
    Ok(Json(CatalogItem::from(item)))
}

/// The phrase shortcuts and mission phrases of the game.
#[utoipa::path(
    get,
    path = "/hints",
    responses(
        (status = 200, description = "Hint phrases", body = HintsResponse)
    )
)]
pub async fn get_hints() -> Json<HintsResponse> {
    Json(HintsResponse::default())
}
