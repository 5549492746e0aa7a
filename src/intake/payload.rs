//! Inbound webhook payload.
//!
//! The form service posts url-encoded fields; `rawRequest` holds the
//! answers as a JSON object keyed by question id. Answers are strings,
//! numbers, or nested objects (a name split into first/last, a date split
//! into month/day/year, ...).

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::IntakeError;
use super::fields;

/// Outer form body of a webhook call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(rename = "formID", alias = "formId", default)]
    pub form_id: Option<String>,
    #[serde(rename = "submissionID", alias = "submissionId", default)]
    pub submission_id: Option<String>,
    #[serde(rename = "formTitle", default)]
    pub form_title: Option<String>,
    #[serde(rename = "rawRequest", default)]
    pub raw_request: Option<String>,
}

impl FormSubmission {
    /// Vendor submission id, if one was sent.
    pub fn submission_key(&self) -> Option<&str> {
        self.submission_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Record one named form field. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "formID" | "formId" => self.form_id = Some(value),
            "submissionID" | "submissionId" => self.submission_id = Some(value),
            "formTitle" => self.form_title = Some(value),
            fields::RAW_REQUEST => self.raw_request = Some(value),
            _ => {}
        }
    }

    /// Decode `rawRequest`. Missing or blank is a payload error.
    pub fn raw(&self) -> Result<RawRequest, IntakeError> {
        let raw = self
            .raw_request
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| IntakeError::MissingField(fields::RAW_REQUEST.into()))?;
        RawRequest::parse(raw)
    }
}

/// Decoded `rawRequest` answers.
#[derive(Debug, Clone)]
pub struct RawRequest {
    answers: Map<String, Value>,
}

impl RawRequest {
    pub fn parse(raw: &str) -> Result<Self, IntakeError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| IntakeError::InvalidJson {
            context: fields::RAW_REQUEST.into(),
            reason: e.to_string(),
        })?;
        match value {
            Value::Object(answers) => Ok(Self { answers }),
            other => Err(IntakeError::InvalidJson {
                context: fields::RAW_REQUEST.into(),
                reason: format!("expected an object, got {}", json_kind(&other)),
            }),
        }
    }

    pub fn from_value(answers: Map<String, Value>) -> Self {
        Self { answers }
    }

    /// Answer to a single-value question, trimmed. Blank is `None`.
    pub fn text(&self, key: &str) -> Result<Option<String>, IntakeError> {
        match self.answers.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => scalar_text(value)
                .map(non_blank)
                .ok_or_else(|| IntakeError::invalid(key, format!("expected text, got {}", json_kind(value)))),
        }
    }

    pub fn required_text(&self, key: &str) -> Result<String, IntakeError> {
        self.text(key)?
            .ok_or_else(|| IntakeError::MissingField(key.to_string()))
    }

    /// Nested answer. Absent, `null`, `""` and `{}` are all `None`.
    pub fn section(&self, key: &str) -> Result<Option<Section<'_>>, IntakeError> {
        match self.answers.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Section { key: key.to_string(), map })),
            Some(other) => Err(IntakeError::invalid(
                key,
                format!("expected an object, got {}", json_kind(other)),
            )),
        }
    }

    pub fn required_section(&self, key: &str) -> Result<Section<'_>, IntakeError> {
        self.section(key)?
            .ok_or_else(|| IntakeError::MissingField(key.to_string()))
    }
}

/// One nested answer object, remembering its question id for errors.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    key: String,
    map: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    /// Dotted path used in error messages, e.g. `q18_patientName.first`.
    pub fn path(&self, part: &str) -> String {
        format!("{}.{}", self.key, part)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Trimmed text of `part`; absent or blank is `None`.
    pub fn text(&self, part: &str) -> Result<Option<String>, IntakeError> {
        match self.map.get(part) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => scalar_text(value).map(non_blank).ok_or_else(|| {
                IntakeError::invalid(&self.path(part), format!("expected text, got {}", json_kind(value)))
            }),
        }
    }

    pub fn required_text(&self, part: &str) -> Result<String, IntakeError> {
        self.text(part)?
            .ok_or_else(|| IntakeError::MissingField(self.path(part)))
    }

    /// Like [`Section::text`] but blank becomes `""` (the key must exist).
    pub fn text_or_empty(&self, part: &str) -> Result<String, IntakeError> {
        if !self.map.contains_key(part) {
            return Err(IntakeError::MissingField(self.path(part)));
        }
        Ok(self.text(part)?.unwrap_or_default())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
