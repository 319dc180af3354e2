//! Input validation errors.

use thiserror::Error;

/// Why a raw value could not become a [`ValidatedQuestion`](crate::question::ValidatedQuestion).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question is missing")]
    Missing,

    #[error("question must be a string, got {found}")]
    NotString { found: &'static str },

    #[error("question is not valid JSON: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_display() {
        assert_eq!(ValidationError::Missing.to_string(), "question is missing");
    }

    #[test]
    fn not_string_names_the_kind() {
        let err = ValidationError::NotString { found: "number" };
        assert_eq!(err.to_string(), "question must be a string, got number");
    }

    #[test]
    fn works_through_anyhow() {
        let err: anyhow::Error = ValidationError::Missing.into();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::Missing)
        );
    }
}
