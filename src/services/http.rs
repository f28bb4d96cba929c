use async_trait::async_trait;
use base64::Engine as _;

use crate::{
    assets::media::InlineMedia,
    foundation::error::{SlideReelError, SlideReelResult},
    services::NarrationSynthesizer,
};

#[derive(serde::Serialize)]
struct NarrationRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct NarrationResponse {
    /// Base64 payload, or a complete `data:` URL.
    audio: String,
    #[serde(default)]
    mime_type: Option<String>,
}

/// Narration over HTTP.
///
/// POSTs `{"text", "voice"}` to the endpoint. Accepts either a JSON body
/// `{"audio": <base64>, "mimeType": ...}` or raw `audio/*` bytes.
#[derive(Clone, Debug)]
pub struct HttpNarrationClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpNarrationClient {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key,
        }
    }
}

fn decode_response(body: NarrationResponse) -> SlideReelResult<InlineMedia> {
    if crate::assets::media::is_inline(&body.audio) {
        return InlineMedia::parse_data_url(&body.audio)
            .map_err(|e| SlideReelError::synthesis(format!("bad audio data URL: {e}")));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(body.audio.trim().as_bytes())
        .map_err(|e| SlideReelError::synthesis(format!("bad audio payload: {e}")))?;
    Ok(InlineMedia::new(
        body.mime_type.unwrap_or_else(|| "audio/mpeg".to_string()),
        bytes,
    ))
}

#[async_trait]
impl NarrationSynthesizer for HttpNarrationClient {
    async fn synthesize_narration(&self, text: &str, voice: &str) -> SlideReelResult<InlineMedia> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&NarrationRequest { text, voice });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| SlideReelError::synthesis(format!("narration request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SlideReelError::synthesis(format!(
                "narration service returned {status}: {}",
                error_text.trim()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if content_type.starts_with("audio/") {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| SlideReelError::synthesis(format!("narration body: {e}")))?;
            let mime = content_type.split(';').next().unwrap_or("audio/mpeg").trim();
            return Ok(InlineMedia::new(mime, bytes.to_vec()));
        }

        let body: NarrationResponse = response
            .json()
            .await
            .map_err(|e| SlideReelError::synthesis(format!("narration response: {e}")))?;
        decode_response(body)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/http.rs"]
mod tests;
