use std::sync::Arc;
use std::time::Duration;

use business::domain::recommendation::services::{LanguageModel, RetryPolicy};
use llm::chat_model::{
    ChatCompletionModel, ChatModelSettings, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use llm::client::{DEFAULT_BASE_URL, OpenAIClient};
use llm::disabled::DisabledLanguageModel;

use super::{env_lookup, non_blank, parse_or};

/// Configuration for the hosted language model.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// `None` disables the model; every request is then ranked by the fallback.
    pub api_key: Option<String>,
    pub base_url: String,
    pub settings: ChatModelSettings,
    pub retry_policy: RetryPolicy,
}

impl LlmConfig {
    /// Environment variables:
    /// - LLM_API_KEY or GROQ_API_KEY
    /// - LLM_BASE_URL, LLM_MODEL, LLM_TEMPERATURE, LLM_MAX_TOKENS
    /// - LLM_TIMEOUT_SECS, LLM_MAX_ATTEMPTS, LLM_INITIAL_BACKOFF_MS, LLM_MAX_BACKOFF_MS
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RetryPolicy::default();

        Self {
            api_key: non_blank(lookup, "LLM_API_KEY")
                .or_else(|| non_blank(lookup, "GROQ_API_KEY")),
            base_url: non_blank(lookup, "LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            settings: ChatModelSettings {
                model: non_blank(lookup, "LLM_MODEL")
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature: parse_or(lookup, "LLM_TEMPERATURE", DEFAULT_TEMPERATURE),
                max_tokens: parse_or(lookup, "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            },
            retry_policy: RetryPolicy {
                max_attempts: parse_or(lookup, "LLM_MAX_ATTEMPTS", defaults.max_attempts).max(1),
                initial_backoff: Duration::from_millis(parse_or(
                    lookup,
                    "LLM_INITIAL_BACKOFF_MS",
                    defaults.initial_backoff.as_millis() as u64,
                )),
                max_backoff: Duration::from_millis(parse_or(
                    lookup,
                    "LLM_MAX_BACKOFF_MS",
                    defaults.max_backoff.as_millis() as u64,
                )),
                call_timeout: Duration::from_secs(parse_or(
                    lookup,
                    "LLM_TIMEOUT_SECS",
                    defaults.call_timeout.as_secs(),
                )),
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn build_model(&self) -> Arc<dyn LanguageModel> {
        match &self.api_key {
            Some(api_key) => Arc::new(ChatCompletionModel::new(
                OpenAIClient::new(
                    api_key.clone(),
                    self.base_url.clone(),
                    self.retry_policy.call_timeout,
                ),
                self.settings.clone(),
            )),
            None => Arc::new(DisabledLanguageModel),
        }
    }
}
