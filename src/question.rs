//! The validated question handed to a chain.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// A question whose text is guaranteed to be a present string.
///
/// Any string is accepted, including the empty one. Serializes as a bare
/// JSON string, and deserializing runs the same checks as
/// [`ValidatedQuestion::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "String")]
pub struct ValidatedQuestion {
    text: String,
}

impl ValidatedQuestion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Validate an arbitrary, possibly absent, JSON value.
    ///
    /// `None` and `null` are both treated as missing.
    pub fn validate(input: Option<&Value>) -> Result<Self, ValidationError> {
        match input {
            None | Some(Value::Null) => Err(ValidationError::Missing),
            Some(Value::String(s)) => Ok(Self::new(s.as_str())),
            Some(other) => Err(ValidationError::NotString {
                found: kind_of(other),
            }),
        }
    }

    /// Parse a JSON document and validate it, e.g. `"\"What is Rust?\""`.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::validate(Some(&value))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for ValidatedQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for ValidatedQuestion {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for ValidatedQuestion {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<ValidatedQuestion> for String {
    fn from(question: ValidatedQuestion) -> Self {
        question.text
    }
}

impl TryFrom<Value> for ValidatedQuestion {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self { text }),
            other => Self::validate(Some(&other)),
        }
    }
}

impl TryFrom<Option<Value>> for ValidatedQuestion {
    type Error = ValidationError;

    fn try_from(value: Option<Value>) -> Result<Self, Self::Error> {
        match value {
            Some(value) => Self::try_from(value),
            None => Err(ValidationError::Missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_keeps_text_exactly() {
        for s in ["", " ", "  padded  ", "line\nbreak", "日本語", "\u{0}"] {
            assert_eq!(ValidatedQuestion::new(s).text(), s);
        }
    }

    #[test]
    fn validate_string() {
        let q = ValidatedQuestion::validate(Some(&json!("What is Rust?"))).unwrap();
        assert_eq!(q.text(), "What is Rust?");
    }

    #[test]
    fn validate_absent_is_missing() {
        assert_eq!(
            ValidatedQuestion::validate(None),
            Err(ValidationError::Missing)
        );
    }

    #[test]
    fn validate_null_is_missing() {
        assert_eq!(
            ValidatedQuestion::validate(Some(&Value::Null)),
            Err(ValidationError::Missing)
        );
    }

    #[test]
    fn validate_rejects_non_strings() {
        let cases = [
            (json!(42), "number"),
            (json!(1.5), "number"),
            (json!(true), "boolean"),
            (json!(["a"]), "array"),
            (json!({"text": "a"}), "object"),
        ];
        for (value, found) in cases {
            assert_eq!(
                ValidatedQuestion::validate(Some(&value)),
                Err(ValidationError::NotString { found })
            );
        }
    }

    #[test]
    fn from_json_valid() {
        let q = ValidatedQuestion::from_json(r#""hello""#).unwrap();
        assert_eq!(q.text(), "hello");
    }

    #[test]
    fn from_json_malformed() {
        assert!(matches!(
            ValidatedQuestion::from_json("not json"),
            Err(ValidationError::Malformed(_))
        ));
    }

    #[test]
    fn try_from_option() {
        assert_eq!(
            ValidatedQuestion::try_from(None::<Value>),
            Err(ValidationError::Missing)
        );
        let q = ValidatedQuestion::try_from(Some(json!("x"))).unwrap();
        assert_eq!(q.into_text(), "x");
    }

    #[test]
    fn display_is_the_text() {
        assert_eq!(ValidatedQuestion::new("why?").to_string(), "why?");
    }

    #[test]
    fn serializes_as_bare_string() {
        let q = ValidatedQuestion::new("why?");
        assert_eq!(serde_json::to_string(&q).unwrap(), r#""why?""#);
    }

    #[test]
    fn deserialize_validates() {
        let q: ValidatedQuestion = serde_json::from_str(r#""why?""#).unwrap();
        assert_eq!(q.text(), "why?");

        let err = serde_json::from_str::<ValidatedQuestion>("7").unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }
}
