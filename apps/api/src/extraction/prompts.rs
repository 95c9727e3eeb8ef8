//! Prompt builder for resume classification.

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::InferenceRequest;

/// Classification rules and schema skeleton. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Classify the following resume text into a structured JSON object.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "string",
  "address": "string",
  "phone": "string",
  "email": "string",
  "summary": "string",
  "skills": ["string"],
  "certifications": ["string"],
  "education": [
    {
      "degree": "string",
      "institution": "string",
      "start_date": "Mon YYYY",
      "end_date": "Mon YYYY",
      "location": "string"
    }
  ],
  "experience": [
    {
      "role": "string",
      "company": "string",
      "start_date": "Mon YYYY",
      "end_date": "Mon YYYY",
      "location": "string",
      "responsibilities": ["string"]
    }
  ],
  "languages": ["string"],
  "social_media": ["string"],
  "undefined": [
    {
      "section": "string",
      "body": ["string"]
    }
  ]
}

RULES:
1. Copy values from the resume text. Do NOT invent, infer, or embellish details.
2. Every date must be a three-letter English month and a four-digit year, e.g. "Jan 2020".
   If a date is unknown, ongoing, or has no month, use an empty string.
3. If a text field is not present in the resume, use an empty string.
   If a list field is not present, use an empty list.
4. List fields must always be JSON arrays, even when they hold a single item.
5. Put any section that fits none of the fields above into "undefined",
   using its heading as "section" and its lines as "body".
6. Return ONLY the JSON object. Nothing else, no code fences.

RESUME TEXT:
{resume_text}"#;

/// Renders the full classification prompt for `resume_text`.
///
/// Pure: the same text and model always produce the same request. A blank
/// `model` falls back to `default_model`. The resume text is interpolated
/// verbatim.
pub fn build_prompt(
    resume_text: &str,
    model: Option<&str>,
    default_model: &str,
) -> Result<InferenceRequest, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text is required".to_string()));
    }

    let model = model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(default_model);

    let body = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);

    Ok(InferenceRequest {
        model: model.to_string(),
        prompt: format!("{JSON_ONLY_INSTRUCTION}\n\n{body}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\njane@example.com\n\nEXPERIENCE\nEngineer at Acme, Jan 2020 - Present";

    fn instruction_block() -> &'static str {
        RESUME_PARSE_PROMPT_TEMPLATE
            .split("{resume_text}")
            .next()
            .unwrap()
    }

    #[test]
    fn test_prompt_contains_resume_text_verbatim() {
        let req = build_prompt(RESUME, None, "llama3.2:1b").unwrap();
        assert!(req.prompt.contains(RESUME));
    }

    #[test]
    fn test_prompt_contains_full_instruction_block() {
        let req = build_prompt(RESUME, None, "llama3.2:1b").unwrap();
        assert!(req.prompt.starts_with(JSON_ONLY_INSTRUCTION));
        assert!(req.prompt.contains(instruction_block()));
    }

    #[test]
    fn test_prompt_ends_with_resume_text() {
        let req = build_prompt(RESUME, None, "llama3.2:1b").unwrap();
        assert!(req.prompt.ends_with(RESUME));
    }

    #[test]
    fn test_resume_text_is_not_escaped() {
        let text = "Skills: C++, \"Rust\", {braces} & <tags>";
        let req = build_prompt(text, None, "m").unwrap();
        assert!(req.prompt.contains(text));
    }

    #[test]
    fn test_placeholder_like_text_is_kept_verbatim() {
        let text = "My template skills: {resume_text}";
        let req = build_prompt(text, None, "m").unwrap();
        assert!(req.prompt.ends_with(text));
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_prompt(RESUME, Some("mistral"), "llama3.2:1b").unwrap();
        let b = build_prompt(RESUME, Some("mistral"), "llama3.2:1b").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_model_defaults_when_absent_or_blank() {
        assert_eq!(build_prompt(RESUME, None, "llama3.2:1b").unwrap().model, "llama3.2:1b");
        assert_eq!(
            build_prompt(RESUME, Some("  "), "llama3.2:1b").unwrap().model,
            "llama3.2:1b"
        );
    }

    #[test]
    fn test_explicit_model_is_used() {
        let req = build_prompt(RESUME, Some("mistral:7b"), "llama3.2:1b").unwrap();
        assert_eq!(req.model, "mistral:7b");
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(
            build_prompt("", None, "m"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            build_prompt(" \n\t ", None, "m"),
            Err(AppError::Validation(_))
        ));
    }
}
