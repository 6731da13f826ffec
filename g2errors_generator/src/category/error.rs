use crate::logging::codes;
use crate::logging::Code;

/// Class-to-category mapping errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("Unmapped error class {class:?}{}", at_code(.code))]
    UnmappedClass { code: Option<i64>, class: String },
}

fn at_code(code: &Option<i64>) -> String {
    match code {
        Some(code) => format!(" for error code {}", code),
        None => String::new(),
    }
}

impl CategoryError {
    /// Get the diagnostic code for this error
    pub fn error_code(&self) -> Code {
        match self {
            CategoryError::UnmappedClass { .. } => codes::mapping::UNMAPPED_CLASS,
        }
    }

    pub(crate) fn with_code(self, code: i64) -> Self {
        match self {
            CategoryError::UnmappedClass { class, .. } => CategoryError::UnmappedClass {
                code: Some(code),
                class,
            },
        }
    }
}
