use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{controllers::home_controller, AppState};

pub mod ai_routes;
pub mod checkout_routes;
pub mod home_routes;
pub mod products_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = products_routes::add_routes(router);
    let router = checkout_routes::add_routes(router);
    let router = ai_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
