//! Error types.

use thiserror::Error;

/// Errors reported by the validation engine.
///
/// None of these ever stop a submit pass: the orchestrator logs configuration
/// problems and carries on. They are returned from the stand-alone entry points
/// where the caller asked for something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// A string identifier did not resolve to an element.
    #[error("no element with id '{0}'")]
    ElementNotFound(String),

    /// The group contains no named input.
    #[error("element is not a field group")]
    NotAFieldGroup,

    /// A rule name that was never registered.
    #[error("validator '{0}' not found")]
    ValidatorNotFound(String),

    /// A registered rule has no message template.
    #[error("no message template for validator '{0}'")]
    TemplateNotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for ValidateError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
