//! Permissive structural validation of CMS payloads.
//!
//! [`validate`] walks a JSON payload against a [`SchemaDescriptor`] and
//! collects field-level [`Diagnostic`]s. It never fails and never mutates the
//! payload: the caller decides what to do with the result, and the render
//! path always proceeds with whatever data is present.
//!
//! Rules:
//!
//! - Fields not named in the descriptor are ignored.
//! - A missing or `null` optional field is fine.
//! - A missing, `null` or blank required field is [`DiagnosticKind::RequiredMissing`].
//! - A present field of the wrong kind is [`DiagnosticKind::TypeMismatch`].
//! - A tag outside its allowed set is [`DiagnosticKind::UnknownValue`].
//! - A string over its length limit is [`DiagnosticKind::TooLong`].
//!
//! Nested objects and arrays are walked recursively; diagnostics carry a
//! dotted path such as `droneSection.videos[2].title`.

use crate::locale::LocalizedText;
use crate::schema::{FieldKind, FieldSpec, SchemaDescriptor};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiagnosticKind {
    RequiredMissing,
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    UnknownValue {
        found: String,
        allowed: &'static [&'static str],
    },
    TooLong {
        max: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::RequiredMissing => write!(f, "{}: required field missing", self.path),
            DiagnosticKind::TypeMismatch { expected, found } => {
                write!(f, "{}: expected {expected}, found {found}", self.path)
            }
            DiagnosticKind::UnknownValue { found, allowed } => write!(
                f,
                "{}: '{found}' is not one of {}",
                self.path,
                allowed.join(", ")
            ),
            DiagnosticKind::TooLong { max, len } => {
                write!(f, "{}: {len} characters exceeds limit of {max}", self.path)
            }
        }
    }
}

/// Outcome of validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub schema: &'static str,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics for required fields that are missing.
    pub fn required_violations(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::RequiredMissing)
    }

    /// Type mismatches and constraint violations on present fields.
    pub fn mismatches(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind != DiagnosticKind::RequiredMissing)
    }

    /// Log every diagnostic as a warning, tagged with `context`.
    pub fn log(&self, context: &str) {
        for d in &self.diagnostics {
            log::warn!("[{context}] {} validation warning: {d}", self.schema);
        }
    }
}

/// Validate `payload` against `shape`.
pub fn validate(payload: &Value, shape: &SchemaDescriptor) -> ValidationResult {
    let mut diagnostics = Vec::new();
    match payload {
        Value::Object(_) => check_fields(payload, &shape.fields, "", &mut diagnostics),
        other => diagnostics.push(Diagnostic {
            path: "$".to_string(),
            kind: DiagnosticKind::TypeMismatch {
                expected: "object",
                found: json_type(other),
            },
        }),
    }
    ValidationResult {
        schema: shape.name,
        diagnostics,
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn check_fields(object: &Value, fields: &[FieldSpec], prefix: &str, out: &mut Vec<Diagnostic>) {
    for field in fields {
        let path = join(prefix, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    out.push(Diagnostic {
                        path,
                        kind: DiagnosticKind::RequiredMissing,
                    });
                }
            }
            Some(value) => {
                if field.required && is_blank(value) {
                    out.push(Diagnostic {
                        path,
                        kind: DiagnosticKind::RequiredMissing,
                    });
                    continue;
                }
                check_value(value, &field.kind, &path, out);
                if let (Some(max), Some(s)) = (field.max_len, value.as_str()) {
                    let len = s.chars().count();
                    if len > max {
                        out.push(Diagnostic {
                            path,
                            kind: DiagnosticKind::TooLong { max, len },
                        });
                    }
                }
            }
        }
    }
}

fn check_value(value: &Value, kind: &FieldKind, path: &str, out: &mut Vec<Diagnostic>) {
    let matches = match kind {
        FieldKind::Any => true,
        FieldKind::String => value.is_string(),
        FieldKind::Url => value
            .as_str()
            .is_some_and(|s| url::Url::parse(s.trim()).is_ok()),
        FieldKind::LocalizedText => LocalizedText::from_json(value).is_some(),
        FieldKind::Image => value.is_string() || value.get("asset").is_some(),
        FieldKind::OneOf { values } => match value.as_str() {
            Some(tag) => {
                if !values.contains(&tag) {
                    out.push(Diagnostic {
                        path: path.to_string(),
                        kind: DiagnosticKind::UnknownValue {
                            found: tag.to_string(),
                            allowed: values,
                        },
                    });
                }
                true
            }
            None => false,
        },
        FieldKind::Array { of } => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_null() {
                        check_value(item, of, &format!("{path}[{i}]"), out);
                    }
                }
                true
            }
            None => false,
        },
        FieldKind::Object { fields } => {
            if value.is_object() {
                check_fields(value, fields, path, out);
                true
            } else {
                false
            }
        }
    };
    if !matches {
        out.push(Diagnostic {
            path: path.to_string(),
            kind: DiagnosticKind::TypeMismatch {
                expected: kind.label(),
                found: json_type(value),
            },
        });
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Object(_) => LocalizedText::from_json(value).is_some_and(|t| t.is_blank())
            && value.get("asset").is_none()
            && value.get("current").is_none(),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
