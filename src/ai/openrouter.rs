//! OpenAI-compatible chat-completions backend (OpenRouter by default)
//!
//! Text messages go to the text model, receipt photos to the vision model as a
//! base64 `data:` URL. Both requests run at temperature 0.1 and ask for a JSON
//! object response.

use super::{CreditBalance, ExpenseExtractor, ReferenceDates, prompts};
use crate::{config::AppConfig, errors::ExtractionError};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const TEMPERATURE: f32 = 0.1;
const VISION_MAX_TOKENS: u32 = 2048;

/// Chat-completions client for the extraction models
#[derive(Debug, Clone)]
pub struct OpenRouterBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    text_model: String,
    vision_model: String,
}

impl OpenRouterBackend {
    /// Creates a backend for the given API root (e.g. `https://openrouter.ai/api/v1`).
    #[must_use]
    pub fn new(base_url: &str, api_key: &str, text_model: &str, vision_model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            text_model: text_model.to_string(),
            vision_model: vision_model.to_string(),
        }
    }

    /// Creates a backend from the loaded application config.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.api_key,
            &config.text_model,
            &config.vision_model,
        )
    }

    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, ExtractionError> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, model = %request.model, "Chat completion failed: {}", body);
            return Err(ExtractionError::Transport(format!(
                "model API error {status}"
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ExtractionError::EmptyResponse)?;

        debug!(model = %request.model, "Model response: {}", content);
        Ok(content)
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    const fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: ChatContent,
}

/// Message content (text or multimodal)
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// `GET /credits` response
#[derive(Debug, Deserialize)]
struct CreditsResponse {
    data: CreditsData,
}

#[derive(Debug, Deserialize)]
struct CreditsData {
    total_credits: f64,
    total_usage: f64,
}

#[async_trait]
impl ExpenseExtractor for OpenRouterBackend {
    async fn extract_from_text(
        &self,
        message: &str,
        dates: ReferenceDates,
    ) -> Result<String, ExtractionError> {
        let request = ChatCompletionRequest {
            model: self.text_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ChatContent::Text(prompts::text_system_prompt()),
                },
                ChatMessage {
                    role: "user",
                    content: ChatContent::Text(prompts::text_user_prompt(message, dates)),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: None,
            response_format: ResponseFormat::json_object(),
        };

        self.chat_completion(&request).await
    }

    async fn extract_from_image(
        &self,
        image: &[u8],
        mime_type: &str,
        caption: Option<&str>,
        dates: ReferenceDates,
    ) -> Result<String, ExtractionError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);

        let request = ChatCompletionRequest {
            model: self.vision_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ChatContent::Text(prompts::receipt_system_prompt()),
                },
                ChatMessage {
                    role: "user",
                    content: ChatContent::Parts(vec![
                        ContentPart::Text {
                            text: prompts::receipt_user_prompt(caption, dates),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: format!("data:{mime_type};base64,{encoded}"),
                            },
                        },
                    ]),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: Some(VISION_MAX_TOKENS),
            response_format: ResponseFormat::json_object(),
        };

        self.chat_completion(&request).await
    }

    async fn credit_balance(&self) -> Option<CreditBalance> {
        let response = self
            .http_client
            .get(format!("{}/credits", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| warn!("Credit lookup failed: {}", e))
            .ok()?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Credit lookup rejected");
            return None;
        }

        let credits: CreditsResponse = response
            .json()
            .await
            .map_err(|e| warn!("Credit response unreadable: {}", e))
            .ok()?;

        Some(CreditBalance {
            total: credits.data.total_credits,
            used: credits.data.total_usage,
            remaining: credits.data.total_credits - credits.data.total_usage,
        })
    }
}
