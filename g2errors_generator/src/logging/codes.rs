//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for every code the generator logs, together with its
//! behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const INVALID_ARGUMENTS: Code = Code::new("ERR003");
}

/// Error-table loading codes
pub mod table {
    use super::Code;

    pub const TABLE_NOT_FOUND: Code = Code::new("E005");
    pub const NOT_A_FILE: Code = Code::new("E006");
    pub const TABLE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_TABLE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const MALFORMED_JSON: Code = Code::new("E020");
    pub const NOT_AN_OBJECT: Code = Code::new("E021");
    pub const INVALID_ERROR_CODE: Code = Code::new("E022");
    pub const INVALID_ENTRY: Code = Code::new("E023");
    pub const TOO_MANY_ENTRIES: Code = Code::new("E024");
}

/// Class-to-category mapping codes
pub mod mapping {
    use super::Code;

    pub const UNMAPPED_CLASS: Code = Code::new("E040");
}

/// Artifact emission codes
pub mod emit {
    use super::Code;

    pub const OUTPUT_DIRECTORY_MISSING: Code = Code::new("E060");
    pub const WRITE_FAILED: Code = Code::new("E061");
    pub const PERSIST_FAILED: Code = Code::new("E062");
    pub const ARTIFACT_STALE: Code = Code::new("E063");
    pub const READ_EXISTING_FAILED: Code = Code::new("E064");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TABLE_LOADED: Code = Code::new("I006");
    pub const ARTIFACT_RENDERED: Code = Code::new("I060");
    pub const ARTIFACT_WRITTEN: Code = Code::new("I061");
    pub const ARTIFACT_UP_TO_DATE: Code = Code::new("I062");
    pub const GENERATION_COMPLETE: Code = Code::new("I080");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal generator error",
                "File a bug report with the failing input table",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Generator initialization failure",
                "Check build configuration and runtime preferences",
            ),
            ErrorMetadata::new(
                "ERR003",
                "System",
                Severity::High,
                false,
                true,
                "Invalid command-line arguments",
                "Run with --help for usage",
            ),
            // Table loading errors
            ErrorMetadata::new(
                "E005",
                "Table",
                Severity::High,
                false,
                true,
                "Error table file not found",
                "Run the generator from the repository root or check the configured input path",
            ),
            ErrorMetadata::new(
                "E006",
                "Table",
                Severity::High,
                false,
                true,
                "Error table path is not a regular file",
                "Point the configured input path at the JSON table",
            ),
            ErrorMetadata::new(
                "E007",
                "Table",
                Severity::High,
                false,
                true,
                "Error table exceeds the configured size limit",
                "Check the input file or raise max_table_file_size in the build profile",
            ),
            ErrorMetadata::new(
                "E008",
                "Table",
                Severity::High,
                false,
                true,
                "Error table file is empty",
                "Restore the JSON table contents",
            ),
            ErrorMetadata::new(
                "E009",
                "Table",
                Severity::High,
                false,
                true,
                "Permission denied reading error table",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E010",
                "Table",
                Severity::High,
                false,
                true,
                "Error table is not valid UTF-8",
                "Re-save the table as UTF-8",
            ),
            ErrorMetadata::new(
                "E011",
                "Table",
                Severity::High,
                false,
                true,
                "I/O error reading error table",
                "Check the filesystem and retry",
            ),
            ErrorMetadata::new(
                "E020",
                "Table",
                Severity::High,
                false,
                true,
                "Error table is not valid JSON",
                "Fix the JSON syntax at the reported line and column",
            ),
            ErrorMetadata::new(
                "E021",
                "Table",
                Severity::High,
                false,
                true,
                "Error table top-level value is not an object",
                "The table must be an object keyed by error code",
            ),
            ErrorMetadata::new(
                "E022",
                "Table",
                Severity::High,
                false,
                true,
                "Error table key is not an integer error code",
                "Use base-10 integer strings as keys",
            ),
            ErrorMetadata::new(
                "E023",
                "Table",
                Severity::High,
                false,
                true,
                "Error table entry has an invalid shape",
                "Entries must be objects whose class, name and comment are strings",
            ),
            ErrorMetadata::new(
                "E024",
                "Table",
                Severity::High,
                false,
                true,
                "Error table has too many entries",
                "Check the input file or raise max_entries in the build profile",
            ),
            // Mapping errors
            ErrorMetadata::new(
                "E040",
                "Mapping",
                Severity::High,
                false,
                true,
                "Error class has no category mapping",
                "Use one of the known G2 error classes or extend the category table",
            ),
            // Emission errors
            ErrorMetadata::new(
                "E060",
                "Emit",
                Severity::High,
                false,
                false,
                "Output directory does not exist",
                "Create the output directory before generating",
            ),
            ErrorMetadata::new(
                "E061",
                "Emit",
                Severity::High,
                false,
                false,
                "Failed to write generated artifact",
                "Check disk space and permissions on the output directory",
            ),
            ErrorMetadata::new(
                "E062",
                "Emit",
                Severity::High,
                false,
                false,
                "Failed to replace the previous artifact",
                "Check permissions on the output file",
            ),
            ErrorMetadata::new(
                "E063",
                "Emit",
                Severity::Medium,
                true,
                false,
                "Generated artifact is out of date",
                "Re-run the generator without --check and commit the result",
            ),
            ErrorMetadata::new(
                "E064",
                "Emit",
                Severity::Medium,
                true,
                false,
                "Failed to read the existing artifact for comparison",
                "Generate the artifact first",
            ),
            // Success codes
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed",
                "Continue to table loading",
            ),
            ErrorMetadata::new(
                "I006",
                "Table",
                Severity::Low,
                true,
                false,
                "Error table loaded",
                "Continue to artifact rendering",
            ),
            ErrorMetadata::new(
                "I060",
                "Emit",
                Severity::Low,
                true,
                false,
                "Artifact rendered",
                "Continue to artifact write",
            ),
            ErrorMetadata::new(
                "I061",
                "Emit",
                Severity::Low,
                true,
                false,
                "Artifact written",
                "No action required",
            ),
            ErrorMetadata::new(
                "I062",
                "Emit",
                Severity::Low,
                true,
                false,
                "Artifact is up to date",
                "No action required",
            ),
            ErrorMetadata::new(
                "I080",
                "Pipeline",
                Severity::Low,
                true,
                false,
                "Generation completed",
                "No action required",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Every code the generator can emit, in declaration order
pub fn all_codes() -> Vec<Code> {
    vec![
        system::INTERNAL_ERROR,
        system::INITIALIZATION_FAILURE,
        system::INVALID_ARGUMENTS,
        table::TABLE_NOT_FOUND,
        table::NOT_A_FILE,
        table::TABLE_TOO_LARGE,
        table::EMPTY_TABLE,
        table::PERMISSION_DENIED,
        table::INVALID_ENCODING,
        table::IO_ERROR,
        table::MALFORMED_JSON,
        table::NOT_AN_OBJECT,
        table::INVALID_ERROR_CODE,
        table::INVALID_ENTRY,
        table::TOO_MANY_ENTRIES,
        mapping::UNMAPPED_CLASS,
        emit::OUTPUT_DIRECTORY_MISSING,
        emit::WRITE_FAILED,
        emit::PERSIST_FAILED,
        emit::ARTIFACT_STALE,
        emit::READ_EXISTING_FAILED,
        success::SYSTEM_INITIALIZATION_COMPLETED,
        success::TABLE_LOADED,
        success::ARTIFACT_RENDERED,
        success::ARTIFACT_WRITTEN,
        success::ARTIFACT_UP_TO_DATE,
        success::GENERATION_COMPLETE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_metadata() {
        for code in all_codes() {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_registry_codes_match_keys() {
        for (key, metadata) in get_error_registry() {
            assert_eq!(*key, metadata.code);
        }
    }

    #[test]
    fn test_table_errors_halt() {
        assert!(requires_halt(table::MALFORMED_JSON.as_str()));
        assert!(requires_halt(mapping::UNMAPPED_CLASS.as_str()));
        assert_eq!(get_category(table::TABLE_NOT_FOUND.as_str()), "Table");
    }

    #[test]
    fn test_emit_errors_do_not_halt_other_backends() {
        assert!(!requires_halt(emit::WRITE_FAILED.as_str()));
        assert!(!requires_halt(emit::PERSIST_FAILED.as_str()));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_action("X999"), "No specific action available");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
    }
}
