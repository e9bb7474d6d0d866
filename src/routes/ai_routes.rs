use axum::{routing::post, Router};

use crate::{controllers::ai_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/ai/chat", post(ai_controller::post_chat))
        .route("/api/ai/quick-summary", post(ai_controller::post_quick_summary))
        .route("/api/ai/maps-search", post(ai_controller::post_maps_search))
        .route("/api/ai/generate-image", post(ai_controller::post_generate_image))
        .route("/api/ai/generate-video", post(ai_controller::post_generate_video))
}
