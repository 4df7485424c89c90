use thiserror::Error;

/// Errors raised by record parsing and scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("unknown field '{0}'")]
    UnknownField(String),
}

impl ScoreError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
