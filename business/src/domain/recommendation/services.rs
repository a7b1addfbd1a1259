use std::time::Duration;

use async_trait::async_trait;

use super::errors::LlmError;
use super::prompt::Prompt;

/// Service port for the hosted language model.
///
/// Implementations send one request and classify the outcome; retrying and
/// the per-call deadline are handled by the caller.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}

/// Bounded retry with exponential backoff around one model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Hard limit for a single attempt.
    pub call_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
            call_timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before attempt `attempt` (1-based, so the first retry is 2).
    /// A server-provided hint wins when it asks for a longer wait.
    pub fn backoff_for(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        let exponent = attempt.saturating_sub(2).min(16);
        let computed = self
            .initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff);
        match hint {
            Some(hint) if hint > computed => hint.min(self.max_backoff),
            _ => computed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(1000),
            call_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn should_double_backoff_per_retry() {
        let policy = policy();

        assert_eq!(policy.backoff_for(2, None), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(3, None), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(4, None), Duration::from_millis(400));
    }

    #[test]
    fn should_cap_backoff() {
        let policy = policy();

        assert_eq!(policy.backoff_for(10, None), Duration::from_millis(1000));
    }

    #[test]
    fn should_honour_longer_retry_after_hint_within_cap() {
        let policy = policy();

        assert_eq!(
            policy.backoff_for(2, Some(Duration::from_millis(700))),
            Duration::from_millis(700)
        );
        assert_eq!(
            policy.backoff_for(2, Some(Duration::from_secs(60))),
            Duration::from_millis(1000)
        );
        assert_eq!(
            policy.backoff_for(3, Some(Duration::from_millis(10))),
            Duration::from_millis(200)
        );
    }
}
