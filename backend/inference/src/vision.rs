//! Vision LLM client.
//!
//! Submits a canonical PNG plus the fixed analysis instruction and returns
//! whatever free-form text the model produced. Classification of that text
//! happens downstream in the heuristics pipeline, not here.

use base64::{engine::general_purpose::STANDARD, Engine};
use snapsolve_core::SnapError;
use tracing::info;

/// The fixed instruction sent with every image.
pub const ANALYSIS_PROMPT: &str = "Look at this image and respond with exactly one of the \
following, as plain text with no markdown:\n\
- if it shows a program or code, the program's output;\n\
- if it shows a math problem, the final answer;\n\
- if it asks to convert currency, the request as '<amount> <FROM> to <TO>';\n\
- if it shows a physics equation, the equation followed by a one-line explanation;\n\
- if it shows a mathematical or scientific symbol, the symbol's name;\n\
- otherwise, a short description of the image.";

/// Supported vision backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionBackend {
    Gemini,
    OpenAi,
}

impl VisionBackend {
    fn label(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }
}

/// Client for a remote multimodal inference service.
pub struct InferenceClient {
    http: reqwest::Client,
    backend: VisionBackend,
    api_key: String,
    model: String,
}

impl InferenceClient {
    pub fn new(backend: VisionBackend, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Analyze a PNG image; `Ok(None)` means the model returned no text.
    ///
    /// There is no retry: a gateway failure is surfaced immediately.
    pub async fn analyze(&self, png_bytes: &[u8]) -> Result<Option<String>, SnapError> {
        info!(
            backend = self.backend.label(),
            model = %self.model,
            bytes = png_bytes.len(),
            "submitting image for analysis"
        );
        let b64 = STANDARD.encode(png_bytes);
        let text = match self.backend {
            VisionBackend::Gemini => self.analyze_via_gemini(&b64).await?,
            VisionBackend::OpenAi => self.analyze_via_openai(&b64).await?,
        };
        let text = text.trim().to_string();
        Ok(if text.is_empty() { None } else { Some(text) })
    }

    async fn analyze_via_gemini(&self, b64: &str) -> Result<String, SnapError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": ANALYSIS_PROMPT },
                { "inlineData": { "mimeType": "image/png", "data": b64 } }
            ]}]
        });
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;
        if !resp.status().is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(self.provider_error(detail));
        }
        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;
        Ok(json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }

    async fn analyze_via_openai(&self, b64: &str) -> Result<String, SnapError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": ANALYSIS_PROMPT },
                    { "type": "image_url",
                      "image_url": { "url": format!("data:image/png;base64,{b64}") } }
                ]
            }],
            "max_tokens": 512
        });
        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;
        if !resp.status().is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(self.provider_error(detail));
        }
        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;
        Ok(json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }

    fn provider_error(&self, message: String) -> SnapError {
        SnapError::Inference {
            provider: self.backend.label().to_string(),
            message,
        }
    }
}
