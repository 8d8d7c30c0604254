use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

/// The first field of a payload that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    field: &'static str,
    message: Cow<'static, str>,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Rejects strings that are empty once surrounding whitespace is trimmed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

/// Accepts only JSON strings that are [`not_blank`].
pub fn non_blank_string(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(value) => not_blank(value),
        _ => Err(ValidationError::new("not_a_string")),
    }
}

pub fn boolean(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Bool(_) => Ok(()),
        _ => Err(ValidationError::new("not_a_boolean")),
    }
}

/// Deserializes a field that is present in the payload, `null` included.
///
/// Paired with `#[serde(default)]`, an absent field stays `None` while an
/// explicit `null` becomes `Some(Value::Null)`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A payload field: its name and the message reported when it is missing or invalid.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    pub name: &'static str,
    pub message: &'static str,
}

impl Field {
    pub const fn new(name: &'static str, message: &'static str) -> Self {
        Self { name, message }
    }

    pub fn error(&self) -> FieldError {
        FieldError::new(self.name, self.message)
    }

    /// Unwraps a field value that create requires.
    pub fn required<T>(&self, value: Option<T>) -> Result<T, FieldError> {
        value.ok_or_else(|| self.error())
    }

    /// Fails if `errors` holds any rule violation for this field.
    pub fn check(&self, errors: Option<&ValidationErrors>) -> Result<(), FieldError> {
        let failed = errors.is_some_and(|errors| errors.field_errors().contains_key(self.name));

        match failed {
            true => Err(self.error()),
            false => Ok(()),
        }
    }

    /// Takes the trimmed text out of a string value.
    pub fn text(&self, value: Value) -> Result<String, FieldError> {
        match value {
            Value::String(value) => Ok(trimmed(value)),
            _ => Err(self.error()),
        }
    }

    pub fn flag(&self, value: Value) -> Result<bool, FieldError> {
        value.as_bool().ok_or_else(|| self.error())
    }
}

/// Trims a stored text value.
pub(crate) fn trimmed(value: String) -> String {
    value.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_blank_rejects_whitespace_only() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   \t\n").is_err());
        assert!(not_blank(" Dune ").is_ok());
    }

    #[test]
    fn json_rules_check_the_value_type() {
        assert!(non_blank_string(&Value::from(" Dune ")).is_ok());
        assert!(non_blank_string(&Value::from("  ")).is_err());
        assert!(non_blank_string(&Value::Null).is_err());
        assert!(non_blank_string(&Value::from(3)).is_err());

        assert!(boolean(&Value::Bool(false)).is_ok());
        assert!(boolean(&Value::from("yes")).is_err());
        assert!(boolean(&Value::Null).is_err());
    }

    #[test]
    fn field_conversions_reject_other_types() {
        let field = Field::new("title", "title must be a non-empty string");

        assert_eq!(field.text(Value::from(" Dune ")).unwrap(), "Dune");
        assert_eq!(field.text(Value::from(1)).unwrap_err().field(), "title");
        assert!(field.flag(Value::Bool(true)).unwrap());
        assert!(field.flag(Value::Null).is_err());
    }

    #[test]
    fn required_field_reports_its_name() {
        let field = Field::new("title", "title must be a non-empty string");

        let err = field.required::<String>(None).unwrap_err();

        assert_eq!(err.field(), "title");
        assert_eq!(err.message(), "title must be a non-empty string");
        assert_eq!(field.required(Some(1)).unwrap(), 1);
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace() {
        assert_eq!(trimmed("  Deep Work ".to_string()), "Deep Work");
        assert_eq!(trimmed("Deep Work".to_string()), "Deep Work");
    }
}
