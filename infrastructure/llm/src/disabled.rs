use async_trait::async_trait;

use business::domain::recommendation::errors::LlmError;
use business::domain::recommendation::prompt::Prompt;
use business::domain::recommendation::services::LanguageModel;

/// Stand-in used when no API key is configured. Every call reports the model
/// as unavailable, so every request is answered by the fallback ranking.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLanguageModel;

#[async_trait]
impl LanguageModel for DisabledLanguageModel {
    async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
        Err(LlmError::Unavailable)
    }
}
