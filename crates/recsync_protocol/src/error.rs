//! Error types for remote payload handling.

use thiserror::Error;

/// Result type for protocol parsing.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors produced while interpreting remote payloads.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The response body was not valid JSON.
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// The response body did not have the shape the contract promises.
    #[error("unexpected response shape: expected {expected}, got {got}")]
    UnexpectedShape {
        /// What the response contract expected.
        expected: &'static str,
        /// Short description of what was received.
        got: String,
    },
}

impl ProtocolError {
    /// Creates an `UnexpectedShape` error.
    pub fn unexpected_shape(expected: &'static str, got: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            expected,
            got: got.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProtocolError::unexpected_shape("a JSON array", "object");
        assert_eq!(
            err.to_string(),
            "unexpected response shape: expected a JSON array, got object"
        );

        let err = ProtocolError::InvalidJson("eof".into());
        assert!(err.to_string().contains("eof"));
    }
}
