use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::GpsPoint,
    services::gemini::ChatTurn,
    AppState,
};

fn ai_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

// POST /api/ai/chat
pub async fn post_chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    match state.gemini.chat(&req.message, &req.history).await {
        Ok(text) => (StatusCode::OK, Json(json!({ "response": text }))).into_response(),
        Err(e) => {
            tracing::error!("ai chat failed: {e}");
            ai_error("Failed to generate response")
        }
    }
}

#[derive(Deserialize)]
pub struct SummaryRequest {
    #[serde(default, rename = "productTitle")]
    pub product_title: String,
    #[serde(default, rename = "productDescription")]
    pub product_description: String,
}

// POST /api/ai/quick-summary
pub async fn post_quick_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Response {
    match state
        .gemini
        .quick_summary(&req.product_title, &req.product_description)
        .await
    {
        Ok(text) => (StatusCode::OK, Json(json!({ "summary": text }))).into_response(),
        Err(e) => {
            tracing::error!("ai summary failed: {e}");
            ai_error("Failed to generate summary")
        }
    }
}

#[derive(Deserialize)]
pub struct MapsSearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: Option<GpsPoint>,
}

// POST /api/ai/maps-search
pub async fn post_maps_search(
    State(state): State<AppState>,
    Json(req): Json<MapsSearchRequest>,
) -> Response {
    match state.gemini.maps_search(&req.query, req.location).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "text": answer.text,
                "groundingChunks": answer.grounding_chunks,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("ai maps search failed: {e}");
            ai_error("Failed to search maps")
        }
    }
}

#[derive(Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: String,
    // "1K", "2K" or "4K"
    #[serde(default)]
    pub size: Option<String>,
}

// POST /api/ai/generate-image
pub async fn post_generate_image(
    State(state): State<AppState>,
    Json(req): Json<GenerateImageRequest>,
) -> Response {
    let size = req.size.as_deref().unwrap_or("1K");

    match state.gemini.generate_image(&req.prompt, size).await {
        Ok(image_url) => (StatusCode::OK, Json(json!({ "imageUrl": image_url }))).into_response(),
        Err(e) => {
            tracing::error!("ai image generation failed: {e}");
            ai_error("Failed to generate image")
        }
    }
}

#[derive(Deserialize)]
pub struct GenerateVideoRequest {
    #[serde(default, rename = "imageBase64")]
    pub image_base64: String,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, rename = "aspectRatio")]
    pub aspect_ratio: Option<String>,
}

// POST /api/ai/generate-video
pub async fn post_generate_video(
    State(state): State<AppState>,
    Json(req): Json<GenerateVideoRequest>,
) -> Response {
    // The uploader hands over a data URL; the API wants bare base64.
    let re = Regex::new(r"^data:image/\w+;base64,").unwrap();
    let clean_base64 = re.replace(&req.image_base64, "").into_owned();

    let prompt = req.prompt.as_deref().unwrap_or("Cinematic camera movement");
    let aspect_ratio = req.aspect_ratio.as_deref().unwrap_or("16:9");

    match state
        .gemini
        .generate_video(prompt, &clean_base64, aspect_ratio)
        .await
    {
        Ok(video) => (StatusCode::OK, Json(json!({ "videoBase64": video }))).into_response(),
        Err(e) => {
            tracing::error!("ai video generation failed: {e}");
            ai_error("Failed to generate video")
        }
    }
}
