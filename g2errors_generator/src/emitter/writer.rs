//! Atomic artifact replacement and up-to-date checks

use super::error::EmitError;
use super::TIMESTAMP_LABEL;
use crate::log_debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Outcome of comparing a rendered artifact with the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Replace `path` with `contents` atomically.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`. On any failure the destination is untouched and
/// the temporary file is removed.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), EmitError> {
    let path_str = path.display().to_string();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !parent.is_dir() {
        return Err(EmitError::OutputDirectoryMissing {
            path: parent.display().to_string(),
        });
    }

    let write_failed = |e: std::io::Error| EmitError::WriteFailed {
        path: path_str.clone(),
        message: e.to_string(),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_failed)?;
    log_debug!("Writing artifact via temporary file",
        "path" => path_str,
        "temp" => temp.path().display()
    );

    temp.write_all(contents.as_bytes()).map_err(write_failed)?;
    temp.flush().map_err(write_failed)?;
    apply_permissions(&temp, path).map_err(write_failed)?;
    temp.as_file().sync_all().map_err(write_failed)?;

    temp.persist(path).map_err(|e| EmitError::PersistFailed {
        path: path_str.clone(),
        message: e.error.to_string(),
    })?;

    Ok(())
}

// temp files are created owner-only; keep the old mode or use a normal one
fn apply_permissions(temp: &NamedTempFile, destination: &Path) -> std::io::Result<()> {
    if let Ok(metadata) = fs::metadata(destination) {
        return temp.as_file().set_permissions(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    Ok(())
}

/// Compare `contents` with the artifact at `path`, ignoring the timestamp line
pub fn check_artifact(path: &Path, contents: &str) -> Result<ArtifactStatus, EmitError> {
    match fs::read_to_string(path) {
        Ok(existing) => {
            if strip_timestamp(&existing) == strip_timestamp(contents) {
                Ok(ArtifactStatus::UpToDate)
            } else {
                Ok(ArtifactStatus::Stale)
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ArtifactStatus::Missing),
        // not text we could have generated
        Err(e) if e.kind() == ErrorKind::InvalidData => Ok(ArtifactStatus::Stale),
        Err(e) => Err(EmitError::ReadExistingFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

/// Artifact text with the generation timestamp line removed
pub fn strip_timestamp(text: &str) -> String {
    text.lines()
        .filter(|line| !is_timestamp_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_timestamp_line(line: &str) -> bool {
    line.trim_start_matches("//")
        .trim_start()
        .starts_with(TIMESTAMP_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.go");

        write_artifact(&path, "first\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");

        write_artifact(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");

        // only the artifact remains, no stray temporaries
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("go").join("main.go");

        let result = write_artifact(&path, "package g2error\n");
        assert_matches!(result, Err(EmitError::OutputDirectoryMissing { .. }));
        assert!(!dir.path().join("go").exists());
    }

    #[test]
    fn test_failed_persist_leaves_destination_alone() {
        let dir = tempdir().unwrap();
        // a non-empty directory cannot be replaced by a file
        let path = dir.path().join("g2errors.py");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "previous").unwrap();

        let result = write_artifact(&path, "EXCEPTION_MAP = {}\n");
        assert_matches!(result, Err(EmitError::PersistFailed { .. }));
        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "previous");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_artifact_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("main.go");
        write_artifact(&path, "x\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_check_ignores_timestamp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.go");
        fs::write(
            &path,
            "// DO NOT EDIT.\n// Generated date: 2024-01-01T00:00:00.000000+00:00\nbody\n",
        )
        .unwrap();

        let rendered = "// DO NOT EDIT.\n// Generated date: 2026-10-15T09:30:00.000000+00:00\nbody\n";
        assert_eq!(check_artifact(&path, rendered).unwrap(), ArtifactStatus::UpToDate);

        let no_timestamp = "// DO NOT EDIT.\nbody\n";
        assert_eq!(check_artifact(&path, no_timestamp).unwrap(), ArtifactStatus::UpToDate);

        let changed = "// DO NOT EDIT.\nother body\n";
        assert_eq!(check_artifact(&path, changed).unwrap(), ArtifactStatus::Stale);
    }

    #[test]
    fn test_check_missing_and_python_banner() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g2errors.py");
        assert_eq!(check_artifact(&path, "x").unwrap(), ArtifactStatus::Missing);

        fs::write(&path, "\"\"\"\nGenerated date: 2024-01-01\n\"\"\"\n").unwrap();
        assert_eq!(
            check_artifact(&path, "\"\"\"\n\"\"\"\n").unwrap(),
            ArtifactStatus::UpToDate
        );
    }
}
