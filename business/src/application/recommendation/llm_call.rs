use crate::domain::logger::Logger;
use crate::domain::recommendation::errors::LlmError;
use crate::domain::recommendation::prompt::Prompt;
use crate::domain::recommendation::services::{LanguageModel, RetryPolicy};

/// Calls the model with a hard per-attempt timeout, retrying rate limits and
/// transient failures with exponential backoff.
///
/// A transient failure that outlives every attempt is reported as
/// `Unavailable`. Timeouts and other failures are returned as they are.
pub async fn call_with_retry(
    model: &dyn LanguageModel,
    prompt: &Prompt,
    policy: &RetryPolicy,
    logger: &dyn Logger,
) -> Result<String, LlmError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let outcome = match tokio::time::timeout(policy.call_timeout, model.complete(prompt)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(LlmError::Timeout),
        };

        match outcome {
            Ok(text) => return Ok(text),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let hint = match &err {
                    LlmError::RateLimited { retry_after } => *retry_after,
                    _ => None,
                };
                attempt += 1;
                let delay = policy.backoff_for(attempt, hint);
                logger.warn(&format!(
                    "Model call failed ({}), retrying in {:?} (attempt {}/{})",
                    err, delay, attempt, max_attempts
                ));
                tokio::time::sleep(delay).await;
            }
            Err(LlmError::Transient) => return Err(LlmError::Unavailable),
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    mock! {
        pub Model {}

        #[async_trait]
        impl LanguageModel for Model {
            async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> MockLog {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        logger
    }

    fn prompt() -> Prompt {
        Prompt {
            system_message: "system".to_string(),
            user_message: "user".to_string(),
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            call_timeout: Duration::from_millis(200),
        }
    }

    /// Fails with `error` for the first `failures` calls, then succeeds.
    fn flaky_model(failures: usize, error: LlmError) -> (MockModel, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut model = MockModel::new();
        model.expect_complete().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) < failures {
                Err(error.clone())
            } else {
                Ok("[]".to_string())
            }
        });
        (model, calls)
    }

    struct SlowModel;

    #[async_trait]
    impl LanguageModel for SlowModel {
        async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn should_return_text_on_first_success() {
        let (model, calls) = flaky_model(0, LlmError::Transient);

        let result = call_with_retry(&model, &prompt(), &fast_policy(3), &mock_logger()).await;

        assert_eq!(result.unwrap(), "[]");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_retry_rate_limited_calls() {
        let (model, calls) = flaky_model(2, LlmError::RateLimited { retry_after: None });

        let result = call_with_retry(&model, &prompt(), &fast_policy(3), &mock_logger()).await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn should_report_unavailable_when_transient_failures_persist() {
        let (model, calls) = flaky_model(10, LlmError::Transient);

        let result = call_with_retry(&model, &prompt(), &fast_policy(3), &mock_logger()).await;

        assert_eq!(result.unwrap_err(), LlmError::Unavailable);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn should_not_retry_unavailable() {
        let (model, calls) = flaky_model(10, LlmError::Unavailable);

        let result = call_with_retry(&model, &prompt(), &fast_policy(3), &mock_logger()).await;

        assert_eq!(result.unwrap_err(), LlmError::Unavailable);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_surface_rate_limit_after_last_attempt() {
        let (model, calls) = flaky_model(10, LlmError::RateLimited { retry_after: None });

        let result = call_with_retry(&model, &prompt(), &fast_policy(2), &mock_logger()).await;

        assert!(matches!(result.unwrap_err(), LlmError::RateLimited { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn should_time_out_slow_calls_without_retrying() {
        let policy = RetryPolicy {
            call_timeout: Duration::from_millis(20),
            ..fast_policy(3)
        };

        let result = call_with_retry(&SlowModel, &prompt(), &policy, &mock_logger()).await;

        assert_eq!(result.unwrap_err(), LlmError::Timeout);
    }
}
