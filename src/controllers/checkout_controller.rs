use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{models::PaymentCallback, services::checkout_service, AppState};

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub amount: f64,
}

// POST /api/create-order
pub async fn post_create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Response {
    match checkout_service::create_payment_order(&state, req.amount).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => {
            tracing::error!("gateway order creation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create order" })),
            )
                .into_response()
        }
    }
}

// POST /api/verify-payment
pub async fn post_verify_payment(
    State(state): State<AppState>,
    Json(callback): Json<PaymentCallback>,
) -> Response {
    if let Err(e) = checkout_service::record_paid_order(&state, &callback).await {
        tracing::error!("order insert failed: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e })),
        )
            .into_response();
    }

    if state.mailer.is_configured() {
        // The order row is already committed; a notification failure is
        // reported to the caller but never rolls it back.
        if let Err(e) = checkout_service::send_order_emails(&state, &callback).await {
            tracing::error!("order notification failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e })),
            )
                .into_response();
        }
    }

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
