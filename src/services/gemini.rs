use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::GpsPoint;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const CHAT_MODEL: &str = "gemini-3.1-pro-preview";
const SUMMARY_MODEL: &str = "gemini-2.5-flash-lite-latest";
const MAPS_MODEL: &str = "gemini-2.5-flash";
const IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

const CHAT_SYSTEM_INSTRUCTION: &str = "You are TechAssistant, a helpful AI support agent for TechMarket, an electronics e-commerce store. Answer questions about tech products, specs, and general advice. Be concise and professional.";

// Video operations are long-running; the handler polls until this ceiling.
const VIDEO_POLL_INTERVAL: Duration = Duration::from_secs(10);
const VIDEO_POLL_ATTEMPTS: u32 = 30;

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
}

/// One prior exchange in the support-chat history, in the wire shape the
/// Gemini API expects (`role` is "user" or "model").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub parts: Vec<ChatPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPart {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct MapsAnswer {
    pub text: String,
    pub grounding_chunks: Value,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn generate_content(&self, model: &str, body: Value) -> Result<Value, String> {
        if !self.has_key() {
            return Err("GEMINI_API_KEY is missing in .env".to_string());
        }

        let url = format!("{BASE_URL}/models/{model}:generateContent");
        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(format!("Gemini {model} failed: {status} {text}"));
        }

        res.json::<Value>().await.map_err(|e| e.to_string())
    }

    /// Support-chat completion over the client-supplied history.
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, String> {
        let mut contents = match serde_json::to_value(history).map_err(|e| e.to_string())? {
            Value::Array(turns) => turns,
            _ => Vec::new(),
        };
        contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));

        let body = json!({
            "contents": contents,
            "systemInstruction": { "parts": [{ "text": CHAT_SYSTEM_INSTRUCTION }] },
        });

        let res = self.generate_content(CHAT_MODEL, body).await?;
        first_candidate_text(&res).ok_or_else(|| "model response carried no text".to_string())
    }

    /// One-line marketing summary for a product card.
    pub async fn quick_summary(&self, title: &str, description: &str) -> Result<String, String> {
        let prompt = format!(
            "Provide a 1-sentence punchy sales summary for this product: {title}. Description: {description}. Focus on the main benefit."
        );
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        let res = self.generate_content(SUMMARY_MODEL, body).await?;
        first_candidate_text(&res).ok_or_else(|| "model response carried no text".to_string())
    }

    /// Location-grounded search via the Google Maps tool. The answer text
    /// comes with the grounding chunks so the UI can render citations.
    pub async fn maps_search(
        &self,
        query: &str,
        location: Option<GpsPoint>,
    ) -> Result<MapsAnswer, String> {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": query }] }],
            "tools": [{ "googleMaps": {} }],
        });
        if let Some(loc) = location {
            body["toolConfig"] = json!({
                "retrievalConfig": {
                    "latLng": { "latitude": loc.latitude, "longitude": loc.longitude }
                }
            });
        }

        let res = self.generate_content(MAPS_MODEL, body).await?;
        let text = first_candidate_text(&res).unwrap_or_default();
        let grounding_chunks = res
            .pointer("/candidates/0/groundingMetadata/groundingChunks")
            .cloned()
            .unwrap_or_else(|| json!([]));

        Ok(MapsAnswer {
            text,
            grounding_chunks,
        })
    }

    /// Still-image generation. Returns a `data:image/png;base64,` URL.
    pub async fn generate_image(&self, prompt: &str, size: &str) -> Result<String, String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "imageConfig": { "imageSize": size, "aspectRatio": "1:1" }
            },
        });

        let res = self.generate_content(IMAGE_MODEL, body).await?;
        if let Some(parts) = res.pointer("/candidates/0/content/parts").and_then(Value::as_array) {
            for part in parts {
                if let Some(data) = part.pointer("/inlineData/data").and_then(Value::as_str) {
                    return Ok(format!("data:image/png;base64,{data}"));
                }
            }
        }

        Err("model response carried no image".to_string())
    }

    /// Image-to-video generation. Starts a long-running operation, polls it
    /// to completion, then fetches the produced clip and returns it as a
    /// `data:video/mp4;base64,` URL.
    pub async fn generate_video(
        &self,
        prompt: &str,
        image_base64: &str,
        aspect_ratio: &str,
    ) -> Result<String, String> {
        if !self.has_key() {
            return Err("GEMINI_API_KEY is missing in .env".to_string());
        }

        let url = format!("{BASE_URL}/models/{VIDEO_MODEL}:predictLongRunning");
        let body = json!({
            "instances": [{
                "prompt": prompt,
                "image": { "bytesBase64Encoded": image_base64, "mimeType": "image/png" },
            }],
            "parameters": {
                "sampleCount": 1,
                "resolution": "720p",
                "aspectRatio": aspect_ratio,
            },
        });

        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(format!("Veo generation failed: {status} {text}"));
        }

        let mut operation = res.json::<Value>().await.map_err(|e| e.to_string())?;
        let name = operation["name"]
            .as_str()
            .ok_or_else(|| "operation response carried no name".to_string())?
            .to_string();

        let mut attempts = 0;
        while !operation["done"].as_bool().unwrap_or(false) && attempts < VIDEO_POLL_ATTEMPTS {
            tokio::time::sleep(VIDEO_POLL_INTERVAL).await;
            operation = self.poll_operation(&name).await?;
            attempts += 1;
        }

        let uri = operation
            .pointer("/response/generateVideoResponse/generatedSamples/0/video/uri")
            .or_else(|| operation.pointer("/response/generatedVideos/0/video/uri"))
            .and_then(Value::as_str)
            .ok_or_else(|| "video generation timed out or failed".to_string())?;

        // The clip URI requires the API key, so proxy the bytes instead of
        // handing the URI to the browser.
        let video = self
            .http
            .get(uri)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !video.status().is_success() {
            return Err(format!("video download failed: {}", video.status()));
        }

        let bytes = video.bytes().await.map_err(|e| e.to_string())?;
        Ok(format!("data:video/mp4;base64,{}", BASE64.encode(&bytes)))
    }

    async fn poll_operation(&self, name: &str) -> Result<Value, String> {
        let url = format!("{BASE_URL}/{name}");
        let res = self
            .http
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(format!("operation poll failed: {status} {text}"));
        }

        res.json::<Value>().await.map_err(|e| e.to_string())
    }
}

fn first_candidate_text(res: &Value) -> Option<String> {
    let parts = res.pointer("/candidates/0/content/parts")?.as_array()?;
    parts
        .iter()
        .find_map(|part| part.get("text").and_then(Value::as_str))
        .map(str::to_string)
}
