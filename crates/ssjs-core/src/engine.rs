//! The contract between the pipeline and an external dialect engine.

use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// An engine that checks masked code for dialect violations.
///
/// The engine receives the masked document, in which every non-code character
/// is blanked and every line keeps its position, so reported lines and columns
/// are already document coordinates.
pub trait DialectEngine: Send + Sync {
    /// Checks the masked document and returns the engine's findings.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the engine cannot run. The caller
    /// treats failure as "no findings" rather than aborting the analysis.
    fn check(&self, masked: &str) -> Result<Vec<Diagnostic>, EngineError>;
}

/// Errors reported by a dialect engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The engine could not be initialised.
    #[error("dialect engine unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },

    /// The engine started but failed while checking.
    #[error("dialect engine failed: {message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Creates a failure error.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// An engine that never reports anything.
///
/// Used when no engine is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEngine;

impl DialectEngine for DisabledEngine {
    fn check(&self, _masked: &str) -> Result<Vec<Diagnostic>, EngineError> {
        Ok(Vec::new())
    }
}
