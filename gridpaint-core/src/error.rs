use thiserror::Error;

/// Errors originating from the grid-editing engine.
///
/// Every failing operation leaves the grid it was aimed at untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("could not parse grid literal: {reason}")]
    ParseFailure { reason: String },

    #[error("invalid palette: {reason}")]
    InvalidPalette { reason: String },

    #[error("could not serialize grid: {reason}")]
    Serialization { reason: String },
}

impl CoreError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            reason: reason.into(),
        }
    }
}
