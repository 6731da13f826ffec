use crate::category::CategoryError;
use crate::logging::codes;
use crate::logging::Code;

/// Artifact rendering and writing errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error("Unknown backend {name:?} (expected one of: go, python)")]
    UnknownBackend { name: String },

    #[error("Output directory does not exist: {path}")]
    OutputDirectoryMissing { path: String },

    #[error("Failed to write artifact {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("Failed to replace artifact {path}: {message}")]
    PersistFailed { path: String, message: String },

    #[error("Failed to read existing artifact {path}: {message}")]
    ReadExistingFailed { path: String, message: String },
}

impl EmitError {
    /// Get the diagnostic code for this error
    pub fn error_code(&self) -> Code {
        match self {
            EmitError::Category(inner) => inner.error_code(),
            EmitError::UnknownBackend { .. } => codes::system::INVALID_ARGUMENTS,
            EmitError::OutputDirectoryMissing { .. } => codes::emit::OUTPUT_DIRECTORY_MISSING,
            EmitError::WriteFailed { .. } => codes::emit::WRITE_FAILED,
            EmitError::PersistFailed { .. } => codes::emit::PERSIST_FAILED,
            EmitError::ReadExistingFailed { .. } => codes::emit::READ_EXISTING_FAILED,
        }
    }
}
