use std::time::Duration;

use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Shared HTTP client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAIClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: String,
}

impl OpenAIClient {
    /// `timeout` bounds each HTTP request on top of the caller's own deadline.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the authorization header value.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Returns the chat completions endpoint URL.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
