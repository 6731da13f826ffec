mod error;
mod result;
mod validation;

pub use error::GeneratorError;
pub use result::GenerationResult;
pub use validation::validate_pipeline;

use crate::config::compile_time::paths;
use crate::emitter::{check_artifact, write_artifact, ArtifactStatus, Backend, RenderOptions};
use crate::logging::{self, codes};
use crate::table::{load_table, ErrorTable};
use crate::{log_error, log_info, log_success};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// Per-backend outcome of [`generate_all`]
pub type BackendOutcome = (Backend, Result<GenerationResult, GeneratorError>);

/// What to generate and where
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Directory the input and output paths are resolved against
    pub root: PathBuf,
    pub input_file: PathBuf,
    pub include_timestamp: bool,
    /// Compare with the artifacts on disk instead of writing
    pub check: bool,
}

impl GenerationRequest {
    /// Request using the compiled-in paths relative to `root`, with the
    /// timestamp banner line enabled
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            input_file: PathBuf::from(paths::INPUT_FILE),
            include_timestamp: true,
            check: false,
        }
    }

    pub fn with_timestamp(mut self, include_timestamp: bool) -> Self {
        self.include_timestamp = include_timestamp;
        self
    }

    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn input_path(&self) -> PathBuf {
        self.root.join(&self.input_file)
    }

    pub fn output_path(&self, backend: Backend) -> PathBuf {
        self.root.join(backend.output_file())
    }
}

/// Generate one backend's artifact: load, render, then write or check
pub fn generate(
    backend: Backend,
    request: &GenerationRequest,
) -> Result<GenerationResult, GeneratorError> {
    let table = load_table(&request.input_path())?;
    let options = RenderOptions::new(request.include_timestamp);
    run_backend(backend, &table, request, &options)
}

/// Generate every backend in `backends` from a single table load.
///
/// The table is shared read-only and each backend runs on its own scoped
/// thread, so one backend failing leaves the others' artifacts unaffected.
/// Only a table load failure aborts the whole run.
pub fn generate_all(
    request: &GenerationRequest,
    backends: &[Backend],
) -> Result<Vec<BackendOutcome>, GeneratorError> {
    let start_time = Instant::now();

    log_info!("Starting generation",
        "input" => request.input_path().display(),
        "backends" => backends.len(),
        "check" => request.check
    );

    let table = load_table(&request.input_path())?;
    let options = RenderOptions::new(request.include_timestamp);

    let outcomes: Vec<BackendOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = backends
            .iter()
            .map(|&backend| {
                let table = &table;
                let options = &options;
                let handle = scope.spawn(move || run_backend(backend, table, request, options));
                (backend, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(backend, handle)| {
                let outcome = handle
                    .join()
                    .unwrap_or_else(|_| Err(GeneratorError::internal("backend worker panicked")));
                (backend, outcome)
            })
            .collect()
    });

    let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
    if failed == 0 {
        log_success!(codes::success::GENERATION_COMPLETE, "Generation complete",
            "backends" => outcomes.len(),
            "duration_ms" => format!("{:.2}", start_time.elapsed().as_secs_f64() * 1000.0)
        );
    } else {
        log_info!("Generation finished with failures",
            "backends" => outcomes.len(),
            "failed" => failed
        );
    }

    Ok(outcomes)
}

fn run_backend(
    backend: Backend,
    table: &ErrorTable,
    request: &GenerationRequest,
    options: &RenderOptions,
) -> Result<GenerationResult, GeneratorError> {
    logging::with_target_context(backend.name(), || {
        let path = request.output_path(backend);
        produce(backend, table, request, options, &path).inspect_err(|error| {
            log_error!(error.error_code(), "Artifact generation failed",
                "path" => path.display(),
                "error" => error
            );
        })
    })
}

fn produce(
    backend: Backend,
    table: &ErrorTable,
    request: &GenerationRequest,
    options: &RenderOptions,
    path: &Path,
) -> Result<GenerationResult, GeneratorError> {
    let start_time = Instant::now();

    let contents = backend.render(table, options)?;
    log_success!(codes::success::ARTIFACT_RENDERED, "Artifact rendered",
        "bytes" => contents.len()
    );

    let status = check_artifact(path, &contents);
    let changed = if request.check {
        match status? {
            ArtifactStatus::UpToDate => false,
            ArtifactStatus::Stale => return Err(stale(backend, path, "content differs")),
            ArtifactStatus::Missing => return Err(stale(backend, path, "missing")),
        }
    } else {
        // an unreadable previous artifact is simply replaced
        let changed = !matches!(status, Ok(ArtifactStatus::UpToDate));
        write_artifact(path, &contents)?;
        changed
    };

    let result = GenerationResult {
        backend,
        path: path.to_path_buf(),
        emitted: table.emittable().count(),
        skipped: table.skipped().count(),
        bytes: contents.len(),
        duration: start_time.elapsed(),
        changed,
        check_only: request.check,
    };
    result.log_success();

    Ok(result)
}

fn stale(backend: Backend, path: &Path, reason: &'static str) -> GeneratorError {
    GeneratorError::Stale {
        backend,
        path: path.display().to_string(),
        reason,
    }
}
