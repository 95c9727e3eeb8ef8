//! Classifier: runs the per-request pipeline of
//! build prompt → inference call → parse → normalize → record.

use tracing::info;

use crate::errors::AppError;
use crate::extraction::normalizer::{into_record, normalize, parse_model_output};
use crate::extraction::prompts::build_prompt;
use crate::llm_client::InferenceBackend;
use crate::models::resume::ResumeRecord;

/// Classifies `resume_text` into a `ResumeRecord`.
///
/// Blank text fails with a validation error before the backend is contacted.
/// Backend failures are returned immediately; nothing is retried.
pub async fn classify_resume(
    backend: &dyn InferenceBackend,
    resume_text: &str,
    model: Option<&str>,
    default_model: &str,
) -> Result<ResumeRecord, AppError> {
    let request = build_prompt(resume_text, model, default_model)?;

    info!(
        "Classifying resume: model={}, resume_chars={}, prompt_chars={}",
        request.model,
        resume_text.len(),
        request.prompt.len()
    );

    let raw = backend.generate(&request).await?;
    let parsed = parse_model_output(&raw)?;

    into_record(normalize(parsed))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{InferenceRequest, LlmError};

    /// Replies with a canned text (or status) and records what it was asked.
    struct FakeBackend {
        reply: Result<String, u16>,
        calls: AtomicUsize,
        last_request: Mutex<Option<InferenceRequest>>,
    }

    impl FakeBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl InferenceBackend for FakeBackend {
        async fn generate(&self, request: &InferenceRequest) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_blank_text_never_reaches_backend() {
        let backend = FakeBackend::replying("{}");
        let result = classify_resume(&backend, "   ", None, "llama3.2:1b").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reply_is_normalized_into_record() {
        let backend = FakeBackend::replying(r#"{"name":"Jane Doe","skills":"Python"}"#);
        let record = classify_resume(&backend, "Jane Doe, Python", None, "llama3.2:1b")
            .await
            .unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert!(record.skills.is_empty());
        assert_eq!(record.email, "");
        assert!(record.experience.is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_receives_built_prompt_and_model() {
        let backend = FakeBackend::replying("{}");
        classify_resume(&backend, "Jane Doe resume", Some("mistral:7b"), "llama3.2:1b")
            .await
            .unwrap();
        let request = backend.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "mistral:7b");
        assert!(request.prompt.contains("Jane Doe resume"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_upstream_error() {
        let backend = FakeBackend::failing(503);
        let err = classify_resume(&backend, "resume", None, "m")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(LlmError::Api { status: 503, .. })));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_malformed() {
        let backend = FakeBackend::replying("Sure! Here is the JSON you asked for");
        let err = classify_resume(&backend, "resume", None, "m")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedModelOutput));
        assert!(!err.to_string().contains("Sure!"));
    }
}
