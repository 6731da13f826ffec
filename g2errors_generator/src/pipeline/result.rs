use crate::emitter::Backend;
use crate::logging::codes;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one backend run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub backend: Backend,
    pub path: PathBuf,
    /// Lines written to the code-to-type map
    pub emitted: usize,
    /// Entries skipped for having no class
    pub skipped: usize,
    pub bytes: usize,
    pub duration: Duration,
    /// Content differs from the previous artifact, ignoring the timestamp
    pub changed: bool,
    /// Verified only; nothing was written
    pub check_only: bool,
}

impl GenerationResult {
    pub fn log_success(&self) {
        let (code, message) = if self.check_only {
            (codes::success::ARTIFACT_UP_TO_DATE, "Artifact is up to date")
        } else {
            (codes::success::ARTIFACT_WRITTEN, "Artifact written")
        };

        crate::log_success!(code, message,
            "backend" => self.backend,
            "path" => self.path.display(),
            "emitted" => self.emitted,
            "skipped" => self.skipped,
            "bytes" => self.bytes,
            "changed" => self.changed,
            "duration_ms" => format!("{:.2}", self.duration.as_secs_f64() * 1000.0)
        );
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let state = match (self.check_only, self.changed) {
            (true, _) => "up to date",
            (false, true) => "updated",
            (false, false) => "unchanged",
        };
        format!(
            "{:<6} {} ({} entries, {} skipped, {} bytes) {}",
            self.backend.name(),
            self.path.display(),
            self.emitted,
            self.skipped,
            self.bytes,
            state
        )
    }
}
