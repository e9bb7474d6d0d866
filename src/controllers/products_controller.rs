use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{models::NewListing, services::catalog_service, AppState};

// GET /api/products
pub async fn get_products(State(state): State<AppState>) -> Response {
    match catalog_service::list_listings(&state).await {
        Ok(listings) => (StatusCode::OK, Json(listings)).into_response(),
        Err(e) => {
            tracing::error!("listing query failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to load products" })),
            )
                .into_response()
        }
    }
}

// POST /api/products
pub async fn post_products(
    State(state): State<AppState>,
    Json(new): Json<NewListing>,
) -> Response {
    match catalog_service::create_listing(&state, &new).await {
        Ok(id) => (StatusCode::OK, Json(json!({ "id": id, "success": true }))).into_response(),
        Err(e) => {
            tracing::error!("listing insert failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create product" })),
            )
                .into_response()
        }
    }
}
