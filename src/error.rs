#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `DecodeError` enum used across the crate, together
//! with the dotted field-path type every error is qualified by.
//!
//! Decoding fails fast: the first error found during one decode pass is
//! returned. Every error is a normal, recoverable value; nothing in this
//! crate panics on malformed input.

use derive_more::Display;
use serde_json::Value;
use std::fmt;

/// A dotted path to a field inside a document, e.g. `info.version` or
/// `channels.lighting.messages.dimLight.payload.properties.percentage`.
///
/// Sequence elements are addressed by their zero-based index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extends the path with a mapping key or field name.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Extends the path with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        f.write_str(&self.segments.join("."))
    }
}

/// The error taxonomy for document decoding.
///
/// Every variant carries the rendered dotted path of the offending field so
/// that failures in deeply nested schemas stay diagnosable. The crate does
/// not format user-facing diagnostics beyond the `Display` impl; callers own
/// presentation.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum DecodeError {
    /// A mandatory field is absent at the given path.
    #[display("missing required field '{path}'")]
    MissingRequiredField {
        /// Dotted path of the absent field.
        path: String,
    },

    /// A scalar field is present but does not match its required pattern.
    #[display("value at '{path}' does not match expected pattern '{pattern}'")]
    FormatViolation {
        /// Dotted path of the offending field.
        path: String,
        /// The pattern the value was required to match.
        pattern: String,
    },

    /// A field's raw value is not of a kind the field can accept.
    #[display("expected {expected} at '{path}', found {actual}")]
    ShapeMismatch {
        /// Dotted path of the offending field.
        path: String,
        /// Description of the accepted kind(s).
        expected: String,
        /// Kind of the value actually found.
        actual: String,
    },

    /// Both the canonical and the alias spelling of a field were supplied
    /// with differing values.
    #[display("field '{path}' supplied as both '{canonical}' and '{alias}' with different values")]
    Conflict {
        /// Dotted path of the conflicting field.
        path: String,
        /// Canonical field name.
        canonical: String,
        /// Alias (wire) field name.
        alias: String,
    },

    /// Recursive schema nesting exceeded the configured safety bound.
    #[display("schema nesting at '{path}' exceeds the configured depth limit of {limit}")]
    DepthExceeded {
        /// Dotted path where the bound was crossed.
        path: String,
        /// The configured limit.
        limit: usize,
    },

    /// The input text could not be parsed into a value tree at all.
    ///
    /// Only produced by the text-based convenience constructors; the value
    /// decoders never touch text.
    #[display("syntax error: {_0}")]
    Syntax(String),
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    pub(crate) fn missing(path: &Path) -> Self {
        Self::MissingRequiredField {
            path: path.to_string(),
        }
    }

    pub(crate) fn format(path: &Path, pattern: impl Into<String>) -> Self {
        Self::FormatViolation {
            path: path.to_string(),
            pattern: pattern.into(),
        }
    }

    pub(crate) fn shape(path: &Path, expected: impl Into<String>, actual: &Value) -> Self {
        Self::ShapeMismatch {
            path: path.to_string(),
            expected: expected.into(),
            actual: kind_of(actual).to_string(),
        }
    }

    pub(crate) fn conflict(path: &Path, canonical: &str, alias: &str) -> Self {
        Self::Conflict {
            path: path.to_string(),
            canonical: canonical.to_string(),
            alias: alias.to_string(),
        }
    }

    pub(crate) fn depth(path: &Path, limit: usize) -> Self {
        Self::DepthExceeded {
            path: path.to_string(),
            limit,
        }
    }
}

/// Helper type alias for Result using DecodeError.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Names the JSON kind of a raw value for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_display() {
        let path = Path::root().child("info").child("version");
        assert_eq!(path.to_string(), "info.version");
        assert_eq!(Path::root().to_string(), "$");
        assert_eq!(Path::root().child("allOf").index(2).to_string(), "allOf.2");
    }

    #[test]
    fn test_shape_mismatch_display() {
        let path = Path::root().child("properties").child("user");
        let err = DecodeError::shape(&path, "mapping", &json!([1, 2]));
        assert_eq!(
            err.to_string(),
            "expected mapping at 'properties.user', found sequence"
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = DecodeError::missing(&Path::root().child("info").child("version"));
        assert_eq!(err.to_string(), "missing required field 'info.version'");
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "info.version".into()
            }
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(kind_of(&Value::Null), "null");
        assert_eq!(kind_of(&json!(true)), "boolean");
        assert_eq!(kind_of(&json!(1.5)), "number");
        assert_eq!(kind_of(&json!("s")), "string");
        assert_eq!(kind_of(&json!([])), "sequence");
        assert_eq!(kind_of(&json!({})), "mapping");
    }
}
