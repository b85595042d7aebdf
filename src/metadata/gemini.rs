//! Gemini-backed album title generation.
//!
//! One request per reveal cycle: the filled photos go up as inline JPEG/PNG
//! parts together with a record-producer prompt, and the model is
//! constrained to answer with a JSON object holding exactly `title` and
//! `subtitle`. Single attempt, no retries; the caller folds any error into
//! `AlbumInfo::fallback`.

use serde_json::{json, Value};

use super::{AlbumInfo, InlineImage, MetadataError, MetadataResult};

/// Default model; override with the GEMINI_MODEL environment variable
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Request a title/subtitle pair for the uploaded photos.
///
/// `photos` must be non-empty and already ordered by slot; anything past
/// the twelfth entry is ignored.
pub async fn request_title(
    photos: Vec<InlineImage>,
    user_name: String,
) -> MetadataResult<AlbumInfo> {
    let api_key = std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .map_err(|_| MetadataError::MissingApiKey)?;
    let model =
        std::env::var("GEMINI_MODEL").unwrap_or_else(|_| String::from(DEFAULT_MODEL));

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        model, api_key
    );

    let mut parts: Vec<Value> = photos
        .iter()
        .take(12)
        .map(|photo| {
            json!({
                "inlineData": {
                    "mimeType": photo.mime,
                    "data": photo.data,
                }
            })
        })
        .collect();
    parts.push(json!({ "text": build_prompt(&user_name) }));

    let body = json!({
        "contents": [{ "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "subtitle": { "type": "STRING" }
                },
                "required": ["title", "subtitle"]
            }
        }
    });

    let client = reqwest::Client::new();
    let response = client.post(&url).json(&body).send().await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(MetadataError::Api(error_text));
    }

    let response_json: Value = response.json().await?;
    parse_response(&response_json)
}

/// The instruction sent alongside the photos
fn build_prompt(user_name: &str) -> String {
    format!(
        "You are a vintage record producer. Study these photos, one for each \
         month of a year of memories.\n\
         1. From the overall emotional tone (nostalgia, warmth, solitude, \
         growth...), write an album title that belongs on a vinyl sleeve.\n\
         2. Title: 2-4 striking words, uppercase, nothing generic.\n\
         3. Subtitle: one poetic line, like a lyric from an old song.\n\
         4. The curator's name is: {}.\n\
         Answer as JSON with exactly the fields title and subtitle.",
        user_name
    )
}

/// Pull the album info out of a generateContent response.
///
/// The constrained output arrives as a JSON string inside
/// candidates[0].content.parts[0].text.
fn parse_response(response: &Value) -> MetadataResult<AlbumInfo> {
    let text = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            MetadataError::MalformedResponse(String::from("no text part in candidates"))
        })?;

    serde_json::from_str(text)
        .map_err(|e| MetadataError::MalformedResponse(format!("bad album JSON: {}", e)))
}
