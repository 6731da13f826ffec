use crate::category::CategoryError;
use crate::emitter::{Backend, EmitError};
use crate::logging::codes;
use crate::logging::Code;
use crate::table::TableError;

/// Generation errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    #[error("Error table failed to load: {0}")]
    Table(#[from] TableError),

    #[error("Class mapping failed: {0}")]
    Category(#[from] CategoryError),

    #[error("Artifact emission failed: {0}")]
    Emit(EmitError),

    #[error("{backend} artifact {path} is out of date ({reason})")]
    Stale {
        backend: Backend,
        path: String,
        reason: &'static str,
    },

    #[error("Internal generator error: {message}")]
    Internal { message: String },
}

impl From<EmitError> for GeneratorError {
    fn from(error: EmitError) -> Self {
        match error {
            EmitError::Category(inner) => GeneratorError::Category(inner),
            other => GeneratorError::Emit(other),
        }
    }
}

impl GeneratorError {
    /// Get the diagnostic code for this error
    pub fn error_code(&self) -> Code {
        match self {
            GeneratorError::Table(e) => e.error_code(),
            GeneratorError::Category(e) => e.error_code(),
            GeneratorError::Emit(e) => e.error_code(),
            GeneratorError::Stale { .. } => codes::emit::ARTIFACT_STALE,
            GeneratorError::Internal { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}
