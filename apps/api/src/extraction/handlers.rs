//! Axum route handler for resume extraction.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::classifier::classify_resume;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Kept loosely typed so a non-string model cannot sink an otherwise valid
    /// request; anything but a string falls back to the default model.
    #[serde(default)]
    pub model: Option<Value>,
}

impl GenerateRequest {
    pub fn model(&self) -> Option<&str> {
        self.model.as_ref().and_then(Value::as_str)
    }
}

/// POST /generate
///
/// Classifies raw resume text into the canonical resume record.
/// A body with no readable `resume_text` (invalid JSON, not an object, or a
/// non-string `resume_text`) counts as missing `resume_text`.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<ResumeRecord>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable request body: {}", rejection.body_text());
            GenerateRequest::default()
        }
    };

    let record = classify_resume(
        state.inference.as_ref(),
        request.resume_text.as_deref().unwrap_or_default(),
        request.model(),
        &state.config.default_model,
    )
    .await?;

    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> GenerateRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_string_model_is_used() {
        let request = parse(json!({ "resume_text": "Jane", "model": "mistral:7b" }));
        assert_eq!(request.model(), Some("mistral:7b"));
    }

    #[test]
    fn test_non_string_model_is_ignored() {
        for model in [json!(5), json!(null), json!(["mistral"]), json!({ "name": "x" })] {
            let request = parse(json!({ "resume_text": "Jane", "model": model }));
            assert_eq!(request.resume_text.as_deref(), Some("Jane"));
            assert_eq!(request.model(), None);
        }
    }

    #[test]
    fn test_non_string_resume_text_is_unreadable() {
        assert!(serde_json::from_value::<GenerateRequest>(json!({ "resume_text": 5 })).is_err());
    }
}
