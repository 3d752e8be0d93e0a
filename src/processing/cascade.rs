//! Ordered model fallback cascade.
//!
//! Models are attempted left-to-right and the cascade stops at the first
//! success. Exhaustion is a value naming the attempt count and the last
//! observed error, so "everything failed" stays a first-class terminal
//! state instead of an escaping error.

use std::future::Future;
use tracing::{debug, info, warn};

use crate::processing::providers::{ChatOutcome, LlmError};

/// Run `attempt` against each model in order until one succeeds.
pub async fn run<F, Fut>(models: &[String], mut attempt: F) -> Result<ChatOutcome, LlmError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<String, LlmError>>,
{
    if models.is_empty() {
        return Err(LlmError::NoModels);
    }

    let mut last_error = String::new();

    for (index, model) in models.iter().enumerate() {
        debug!(
            "Attempting model {}/{}: {}",
            index + 1,
            models.len(),
            model
        );

        match attempt(model.clone()).await {
            Ok(text) => {
                info!(
                    "Processing succeeded with model {} (attempt {}/{})",
                    model,
                    index + 1,
                    models.len()
                );
                return Ok(ChatOutcome {
                    text,
                    model: model.clone(),
                    prior_failures: index,
                });
            }
            Err(e) => {
                match &e {
                    LlmError::RateLimited(_) => {
                        warn!("Model {} rate limited, moving on: {}", model, e)
                    }
                    LlmError::Auth(_) => warn!("Model {} authentication failure: {}", model, e),
                    LlmError::NotFound(_) => {
                        warn!("Model {} not found, likely a bad model id: {}", model, e)
                    }
                    LlmError::Timeout(_) => warn!("Model {} timed out: {}", model, e),
                    _ => warn!("Model {} failed: {}", model, e),
                }
                last_error = format!("model {model}: {e}");

                if index < models.len() - 1 {
                    info!("Trying next fallback model");
                }
            }
        }
    }

    Err(LlmError::Exhausted {
        attempts: models.len(),
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn models(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_first_model_success_stops_cascade() {
        let calls = AtomicUsize::new(0);
        let outcome = run(&models(&["a", "b"]), |_m| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok("done".to_string()) }
        })
        .await
        .unwrap();

        assert_eq!(outcome.text, "done");
        assert_eq!(outcome.model, "a");
        assert_eq!(outcome.prior_failures, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_after_failures_reports_prior_count() {
        let outcome = run(&models(&["a", "b", "c"]), |m| async move {
            if m == "c" {
                Ok("cleaned text".to_string())
            } else {
                Err(LlmError::Transport(format!("{m} is down")))
            }
        })
        .await
        .unwrap();

        assert_eq!(outcome.text, "cleaned text");
        assert_eq!(outcome.model, "c");
        assert_eq!(outcome.prior_failures, 2);
    }

    #[tokio::test]
    async fn test_exhaustion_names_count_and_last_error() {
        let err = run(&models(&["a", "b", "c"]), |m| async move {
            Err::<String, _>(LlmError::Transport(format!("{m} is down")))
        })
        .await
        .unwrap_err();

        match &err {
            LlmError::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(*attempts, 3);
                assert!(last_error.contains("c is down"));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert!(err.to_string().contains("All 3 models failed"));
    }

    #[tokio::test]
    async fn test_empty_model_list() {
        let err = run(&[], |_m| async { Ok(String::new()) }).await.unwrap_err();
        assert!(matches!(err, LlmError::NoModels));
    }
}
