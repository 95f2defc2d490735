//! Error types and result types for query fetching and result validation.
//!
//! The schema compiler itself never fails: every node combination has a defined (possibly empty)
//! serialization. Errors only appear one layer up, in the client façade, when a query cannot be
//! sent or when its response does not match the expected schema.
//! Use [`GroqResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

use crate::decode::ValidationIssue;

/// Represents all possible errors that can occur when fetching and decoding a GROQ query.
#[derive(Error, Debug)]
pub enum GroqError {
    /// Serialization/deserialization error when converting between JSON and Rust values.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The injected fetch capability failed to produce a response.
    #[error("Fetch error: {0}")]
    Fetch(String),
    /// The root schema produced an empty serialization, so there is nothing to send.
    #[error(
        "The provided schema does not have a GROQ string. Check that you have used an appropriate schema."
    )]
    MissingQuery,
    /// A validation mode name other than `ERROR`, `WARN` or `SILENT`.
    #[error("Unknown validation mode: {0}")]
    InvalidValidationMode(String),
    /// The response did not conform to the resolved schema.
    ///
    /// Carries every `{path, message}` entry reported by the decoder.
    #[error("GROQ response did not match expected schema.")]
    Validation(Vec<ValidationIssue>),
}

impl GroqError {
    /// Returns the validation issues carried by this error, if any.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            GroqError::Validation(issues) => issues,
            _ => &[],
        }
    }
}

/// A specialized `Result` type for fetch and decode operations.
pub type GroqResult<T> = Result<T, GroqError>;

impl From<SerdeJsonError> for GroqError {
    fn from(err: SerdeJsonError) -> Self {
        GroqError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_exposes_issues() {
        let err = GroqError::Validation(vec![ValidationIssue::new("/0/title", "Expected string")]);

        assert_eq!(err.to_string(), "GROQ response did not match expected schema.");
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].path, "/0/title");
    }

    #[test]
    fn other_errors_carry_no_issues() {
        assert!(GroqError::MissingQuery.issues().is_empty());
        assert!(GroqError::Fetch("timeout".to_string()).issues().is_empty());
    }

    #[test]
    fn invalid_validation_mode_names_the_input() {
        let err = GroqError::InvalidValidationMode("loud".to_string());

        assert_eq!(err.to_string(), "Unknown validation mode: loud");
        assert!(err.issues().is_empty());
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let err: GroqError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();

        assert!(matches!(err, GroqError::Serialization(_)));
    }
}
