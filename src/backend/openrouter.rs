use crate::backend::CompletionBackend;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const REFERER: &str = "https://github.com/copymill/copymill";
const APP_TITLE: &str = "copymill";

/// Deadline for one completion call. Anything sitting above this client
/// (request timeouts at the gateway) must be given more room than this, or
/// slow generations get cut off before the fallback path can answer.
pub(crate) const COMPLETION_TIMEOUT_SECS: u64 = 120;

/// OpenRouter chat-completions backend. One prompt in, one completion out;
/// everything structured (JSON contracts, retries on bad payloads) lives in
/// the pipeline, not here.
pub struct OpenRouterBackend {
    client: reqwest::Client,
    model: String,
    temperature: f64,
    /// Pre-built `Bearer ...` header value, absent when no key was supplied.
    cached_auth_header: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenRouterBackend {
    pub fn new(api_key: Option<&str>, model: &str, temperature: f64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(COMPLETION_TIMEOUT_SECS))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            model: model.to_string(),
            temperature,
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(|key| format!("Bearer {key}")),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let auth = self
            .cached_auth_header
            .as_deref()
            .ok_or_else(|| anyhow!("OpenRouter API key is not configured"))?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", auth)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await
            .context("OpenRouter request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "OpenRouter returned {status}: {}",
                body.chars().take(200).collect::<String>()
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("OpenRouter response was not valid JSON")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| anyhow!("OpenRouter response contained no completion"))
    }
}
