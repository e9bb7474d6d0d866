use axum::{routing::post, Router};

use crate::{controllers::checkout_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/create-order", post(checkout_controller::post_create_order))
        .route("/api/verify-payment", post(checkout_controller::post_verify_payment))
}
