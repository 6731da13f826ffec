use crate::logging::codes;
use crate::logging::Code;

/// Error-table loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum TableError {
    #[error("Error table not found: {path}")]
    NotFound { path: String },

    #[error("Error table path is not a file: {path}")]
    NotAFile { path: String },

    #[error("Error table is empty: {path}")]
    Empty { path: String },

    #[error("Error table too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in error table: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading error table: {message}")]
    Io { message: String },

    #[error("Malformed JSON at line {line}, column {column}: {message}")]
    MalformedJson {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Error table must be a JSON object keyed by error code, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Invalid error code key {key:?}: expected a base-10 integer")]
    InvalidCode { key: String },

    #[error("Invalid entry for error code {code}: {message}")]
    InvalidEntry { code: i64, message: String },

    #[error("Too many entries in error table: {count} (max: {max})")]
    TooManyEntries { count: usize, max: usize },
}

impl TableError {
    /// Get the diagnostic code for this error
    pub fn error_code(&self) -> Code {
        match self {
            TableError::NotFound { .. } => codes::table::TABLE_NOT_FOUND,
            TableError::NotAFile { .. } => codes::table::NOT_A_FILE,
            TableError::Empty { .. } => codes::table::EMPTY_TABLE,
            TableError::TooLarge { .. } => codes::table::TABLE_TOO_LARGE,
            TableError::PermissionDenied { .. } => codes::table::PERMISSION_DENIED,
            TableError::InvalidEncoding { .. } => codes::table::INVALID_ENCODING,
            TableError::Io { .. } => codes::table::IO_ERROR,
            TableError::MalformedJson { .. } => codes::table::MALFORMED_JSON,
            TableError::NotAnObject { .. } => codes::table::NOT_AN_OBJECT,
            TableError::InvalidCode { .. } => codes::table::INVALID_ERROR_CODE,
            TableError::InvalidEntry { .. } => codes::table::INVALID_ENTRY,
            TableError::TooManyEntries { .. } => codes::table::TOO_MANY_ENTRIES,
        }
    }

    pub(crate) fn from_json(error: &serde_json::Error) -> Self {
        TableError::MalformedJson {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }
}
