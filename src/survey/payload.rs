//! Generation payload schema
//!
//! The generation endpoint returns loosely shaped JSON. Everything passes
//! through [`SurveyPayload::from_value`] before it reaches the survey state,
//! so unknown question types and malformed fields are handled in one place
//! and always the same way.

use super::model::QuestionKind;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("survey payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("survey payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sanitized survey draft as exchanged with the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<PayloadQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl SurveyPayload {
    /// Parse and sanitize a raw response body
    pub fn from_json_str(body: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Validate an arbitrary JSON value against the payload schema.
    ///
    /// Only a non-object root is rejected. Inside the object, fields of the
    /// wrong shape fall back to their defaults and question entries with an
    /// unknown or missing type are dropped.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let mut root = match value {
            Value::Object(map) => map,
            other => return Err(PayloadError::NotAnObject(json_kind(&other))),
        };

        let title = take_string(root.remove("title"));
        let description = take_string(root.remove("description"));

        let questions = match root.remove("questions") {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .filter_map(|(position, entry)| sanitize_question(position, entry))
                .collect(),
            Some(other) => {
                debug!("Ignoring non-array questions field ({})", json_kind(&other));
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(Self {
            title,
            description,
            questions,
        })
    }
}

fn sanitize_question(position: usize, entry: Value) -> Option<PayloadQuestion> {
    let Value::Object(mut fields) = entry else {
        debug!("Dropping question #{}: not an object", position);
        return None;
    };

    let kind = match fields.get("type").and_then(Value::as_str) {
        Some(name) => match name.parse::<QuestionKind>() {
            Ok(kind) => kind,
            Err(_) => {
                debug!("Dropping question #{}: unknown type '{}'", position, name);
                return None;
            }
        },
        None => {
            debug!("Dropping question #{}: missing type", position);
            return None;
        }
    };

    let title = take_string(fields.remove("title")).unwrap_or_default();

    let options = match (kind.is_choice(), fields.remove("options")) {
        (true, Some(Value::Array(raw))) => raw.into_iter().filter_map(option_text).collect(),
        _ => Vec::new(),
    };

    Some(PayloadQuestion {
        kind,
        title,
        options,
    })
}

fn option_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn take_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
