//! Error types for tree-sitter backed checking.

use ssjs_core::EngineError;
use thiserror::Error;

/// Errors from parsing or checking script text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser.
    #[error("failed to initialise script parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// The parser did not produce a tree.
    #[error("failed to parse script: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// Internal error indicating a bug or system failure.
    #[error("internal error: {message}")]
    InternalError {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<SyntaxError> for EngineError {
    fn from(error: SyntaxError) -> Self {
        match error {
            SyntaxError::ParserInitError { .. } => Self::unavailable(error.to_string()),
            SyntaxError::ParseError { .. } | SyntaxError::InternalError { .. } => {
                Self::failed(error.to_string())
            }
        }
    }
}
