//! The build under test.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use walkdir::WalkDir;

use super::shell::{CommandLine, CommandRunner, OutputSink};
use crate::errors::HarnessError;

/// Marker the build tool prints when a target fails even though it exits 0.
pub const BUILD_FAILED_MARKER: &str = "BUILD FAILED";

pub trait BuildSystem {
    /// Build `target`; returns the build's exit status (`0` = success).
    fn build(&self, mode: &str, arch: &str, target: &str) -> Result<i32, HarnessError>;
}

/// `./tools/build.py` in the checkout root.
pub struct ToolsBuild {
    root: PathBuf,
    shell: Rc<dyn CommandRunner>,
}

impl ToolsBuild {
    pub fn new(root: impl Into<PathBuf>, shell: Rc<dyn CommandRunner>) -> Self {
        Self {
            root: root.into(),
            shell,
        }
    }
}

impl BuildSystem for ToolsBuild {
    #[tracing::instrument(skip(self))]
    fn build(&self, mode: &str, arch: &str, target: &str) -> Result<i32, HarnessError> {
        let command = CommandLine::new("./tools/build.py")
            .args(["-m", mode])
            .arg(format!("--arch={arch}"))
            .arg(target)
            .current_dir(&self.root);
        let output = self.shell.run(&command, &OutputSink::Capture)?;
        if output.success() && output.stdout.contains(BUILD_FAILED_MARKER) {
            return Ok(1);
        }
        Ok(output.status)
    }
}

/// Recursively delete `dir`, making read-only entries writable first.
///
/// A missing directory is not an error.
pub fn remove_dir_tolerant(dir: &Path) -> Result<(), HarnessError> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        let Ok(metadata) = fs::symlink_metadata(path) else {
            continue;
        };
        let mut permissions = metadata.permissions();
        if permissions.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            permissions.set_readonly(false);
            if let Err(err) = fs::set_permissions(path, permissions) {
                tracing::debug!(path = %path.display(), error = %err, "could not make entry writable");
            }
        }
    }
    fs::remove_dir_all(dir).map_err(|e| HarnessError::io(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_is_ok() {
        let scratch = tempfile::tempdir().unwrap();
        assert!(remove_dir_tolerant(&scratch.path().join("out")).is_ok());
    }

    #[test]
    fn test_removes_read_only_tree() {
        let scratch = tempfile::tempdir().unwrap();
        let build = scratch.path().join("out").join("ReleaseIA32");
        let nested = build.join("dart-sdk").join("bin");
        fs::create_dir_all(&nested).unwrap();
        let file = nested.join("dart");
        fs::write(&file, b"binary").unwrap();

        for path in [&file, &nested] {
            let mut perms = fs::metadata(path).unwrap().permissions();
            perms.set_readonly(true);
            fs::set_permissions(path, perms).unwrap();
        }

        remove_dir_tolerant(&build).unwrap();
        assert!(!build.exists());
        assert!(scratch.path().join("out").exists());
    }
}
