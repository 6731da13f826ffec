//! Artifact emitters
//!
//! Each backend is a pure function from the loaded table to the text of one
//! generated source file. Writing is separate so rendering stays testable.

mod error;
mod go;
mod python;
mod writer;

pub use error::EmitError;
pub use writer::{check_artifact, strip_timestamp, write_artifact, ArtifactStatus};

use crate::category::{classify_entry, TagList};
use crate::config::compile_time::paths;
use crate::table::{ErrorEntry, ErrorTable};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::str::FromStr;

/// Name the banner credits as the generator
pub const GENERATOR_NAME: &str = "g2errors_generator";

/// Label of the optional banner line carrying the generation time
pub const TIMESTAMP_LABEL: &str = "Generated date:";

/// Target language of a generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Go,
    Python,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Go, Backend::Python];

    pub fn name(self) -> &'static str {
        match self {
            Backend::Go => "go",
            Backend::Python => "python",
        }
    }

    /// Output path relative to the repository root
    pub fn output_file(self) -> &'static str {
        match self {
            Backend::Go => paths::GO_OUTPUT_FILE,
            Backend::Python => paths::PYTHON_OUTPUT_FILE,
        }
    }

    /// Render the complete artifact for `table`.
    ///
    /// Fails without producing any text if a class cannot be mapped.
    pub fn render(self, table: &ErrorTable, options: &RenderOptions) -> Result<String, EmitError> {
        let rows = classify_rows(table)?;
        let banner = Banner::new(self, options);
        Ok(match self {
            Backend::Go => go::render(&banner, &rows),
            Backend::Python => python::render(&banner, &rows),
        })
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = EmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "go" | "golang" => Ok(Backend::Go),
            "python" | "py" => Ok(Backend::Python),
            _ => Err(EmitError::UnknownBackend {
                name: s.to_string(),
            }),
        }
    }
}

/// Per-run rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit the `Generated date:` banner line
    pub include_timestamp: bool,
    pub generated_at: DateTime<Utc>,
}

impl RenderOptions {
    pub fn new(include_timestamp: bool) -> Self {
        Self {
            include_timestamp,
            generated_at: Utc::now(),
        }
    }

    /// Options producing byte-identical output for identical input
    pub fn reproducible() -> Self {
        Self::new(false)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Banner lines shared by every backend, without comment markers
pub(crate) struct Banner {
    lines: Vec<String>,
}

impl Banner {
    fn new(backend: Backend, options: &RenderOptions) -> Self {
        let mut lines = vec![
            "DO NOT EDIT.  This code is generated.".to_string(),
            format!("Generated by: {} ({} backend)", GENERATOR_NAME, backend),
        ];
        if options.include_timestamp {
            lines.push(format!(
                "{} {}",
                TIMESTAMP_LABEL,
                options
                    .generated_at
                    .to_rfc3339_opts(SecondsFormat::Micros, false)
            ));
        }
        Self { lines }
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// One emittable entry with its resolved tags
pub(crate) struct Row<'a> {
    pub entry: &'a ErrorEntry,
    pub tags: TagList,
}

fn classify_rows(table: &ErrorTable) -> Result<Vec<Row<'_>>, EmitError> {
    let mut rows = Vec::with_capacity(table.len());
    for entry in table.entries() {
        if let Some(tags) = classify_entry(entry)? {
            rows.push(Row { entry, tags });
        }
    }
    Ok(rows)
}
