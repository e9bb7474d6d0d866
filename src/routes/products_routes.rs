use axum::{routing::get, Router};

use crate::{controllers::products_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/api/products",
        get(products_controller::get_products).post(products_controller::post_products),
    )
}
