use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde_json::{Value, json};

use business::domain::recommendation::errors::LlmError;
use business::domain::recommendation::prompt::Prompt;
use business::domain::recommendation::services::LanguageModel;

use crate::client::OpenAIClient;

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Generation settings sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// `LanguageModel` backed by a chat completions endpoint.
pub struct ChatCompletionModel {
    client: OpenAIClient,
    settings: ChatModelSettings,
}

impl ChatCompletionModel {
    pub fn new(client: OpenAIClient, settings: ChatModelSettings) -> Self {
        Self { client, settings }
    }

    fn request_body(&self, prompt: &Prompt) -> Value {
        json!({
            "model": self.settings.model,
            "messages": [
                {"role": "system", "content": prompt.system_message},
                {"role": "user", "content": prompt.user_message},
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        })
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let response = self
            .client
            .client
            .post(self.client.chat_completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.client.auth_header())
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Transient
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(
                response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok()),
            );
            return Err(classify_status(status, retry_after));
        }

        let data: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::Unavailable
            }
        })?;

        extract_content(&data)
    }
}

/// 429 and 5xx are worth another attempt; any other failure status means the
/// request itself is wrong (bad key, unknown model) and will not get better.
fn classify_status(status: StatusCode, retry_after: Option<Duration>) -> LlmError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        LlmError::RateLimited { retry_after }
    } else if status.is_server_error() {
        LlmError::Transient
    } else {
        LlmError::Unavailable
    }
}

/// Only the delta-seconds form of `Retry-After` is understood.
fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value?.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn extract_content(data: &Value) -> Result<String, LlmError> {
    data["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or(LlmError::Unavailable)
}
