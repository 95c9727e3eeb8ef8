//! Response Normalizer: repairs an untrusted model reply into the resume schema.
//!
//! The model's output is treated as hostile input: every field may be absent,
//! mistyped, or malformed. Each field kind has exactly one repair rule and
//! nothing is ever rejected once the reply parses as a JSON object:
//!
//! | kind       | repair                                                              |
//! |------------|---------------------------------------------------------------------|
//! | `Text`     | absent / non-string → `""`                                          |
//! | `Date`     | absent / non-string / not `Mon YYYY` → `""`                         |
//! | `TextList` | absent / non-array → `[]`; non-string items dropped                 |
//! | `Entries`  | absent / non-array → `[]`; non-object items dropped; fields repaired |
//!
//! Scalars are never wrapped into singleton lists. Keys outside the schema are
//! left untouched. The pass is idempotent.

use chrono::Month;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Date,
    TextList,
    Entries(&'static [Field]),
}

type Field = (&'static str, FieldKind);

const EDUCATION_SCHEMA: &[Field] = &[
    ("degree", FieldKind::Text),
    ("institution", FieldKind::Text),
    ("start_date", FieldKind::Date),
    ("end_date", FieldKind::Date),
    ("location", FieldKind::Text),
];

const EXPERIENCE_SCHEMA: &[Field] = &[
    ("role", FieldKind::Text),
    ("company", FieldKind::Text),
    ("start_date", FieldKind::Date),
    ("end_date", FieldKind::Date),
    ("location", FieldKind::Text),
    ("responsibilities", FieldKind::TextList),
];

const UNDEFINED_SCHEMA: &[Field] = &[("section", FieldKind::Text), ("body", FieldKind::TextList)];

const RESUME_SCHEMA: &[Field] = &[
    ("name", FieldKind::Text),
    ("address", FieldKind::Text),
    ("phone", FieldKind::Text),
    ("email", FieldKind::Text),
    ("summary", FieldKind::Text),
    ("skills", FieldKind::TextList),
    ("certifications", FieldKind::TextList),
    ("education", FieldKind::Entries(EDUCATION_SCHEMA)),
    ("experience", FieldKind::Entries(EXPERIENCE_SCHEMA)),
    ("languages", FieldKind::TextList),
    ("social_media", FieldKind::TextList),
    ("undefined", FieldKind::Entries(UNDEFINED_SCHEMA)),
];

/// Parses the model's raw output. Anything that is not a JSON object is a
/// schema violation; the raw text is logged here and never returned.
pub fn parse_model_output(raw: &str) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            warn!(
                "Model output is JSON but not an object ({}): {raw}",
                json_type_name(&other)
            );
            Err(AppError::MalformedModelOutput)
        }
        Err(e) => {
            warn!("Model output is not valid JSON ({e}): {raw}");
            Err(AppError::MalformedModelOutput)
        }
    }
}

/// Repairs a parsed reply so every schema field is present and correctly typed.
pub fn normalize(record: Map<String, Value>) -> Map<String, Value> {
    repair_object(record, RESUME_SCHEMA)
}

/// Materializes a normalized reply into the canonical record, dropping keys
/// outside the schema.
pub fn into_record(normalized: Map<String, Value>) -> Result<ResumeRecord, AppError> {
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Normalized record is malformed: {e}")))
}

/// `Mon YYYY`: an English three-letter month abbreviation (any case), one
/// space, four ASCII digits.
pub fn is_valid_date(value: &str) -> bool {
    let Some((month, year)) = value.split_once(' ') else {
        return false;
    };
    month.len() == 3
        && month.chars().all(|c| c.is_ascii_alphabetic())
        && month.parse::<Month>().is_ok()
        && year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
}

fn repair_object(mut object: Map<String, Value>, schema: &[Field]) -> Map<String, Value> {
    for (key, kind) in schema {
        let current = object.remove(*key);
        object.insert((*key).to_string(), repair(*kind, current));
    }
    object
}

fn repair(kind: FieldKind, value: Option<Value>) -> Value {
    match (kind, value) {
        (FieldKind::Text, Some(Value::String(s))) => Value::String(s),
        (FieldKind::Date, Some(Value::String(s))) if is_valid_date(&s) => Value::String(s),
        (FieldKind::Text | FieldKind::Date, _) => Value::String(String::new()),

        (FieldKind::TextList, Some(Value::Array(items))) => {
            Value::Array(items.into_iter().filter(Value::is_string).collect())
        }
        (FieldKind::Entries(schema), Some(Value::Array(items))) => Value::Array(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(entry) => Some(Value::Object(repair_object(entry, schema))),
                    _ => None,
                })
                .collect(),
        ),
        (FieldKind::TextList | FieldKind::Entries(_), _) => Value::Array(Vec::new()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
