//! Version control.
//!
//! The checkout is a Subversion working copy managed by `gclient`. Git mirrors created with `git svn` are supported
//! for revision lookup only.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use perfwatch_trace::Revision;

use super::shell::{CommandLine, CommandRunner, OutputSink};
use crate::errors::HarnessError;

pub trait VersionControl {
    /// Whether any path in the checkout is out of date with respect to upstream.
    fn status_has_remote_changes(&self) -> Result<bool, HarnessError>;

    /// Update the checkout and its dependencies to the latest upstream revision.
    fn sync_to_latest(&self) -> Result<(), HarnessError>;

    /// Revision of the checkout, if it can be determined.
    fn current_revision(&self) -> Option<Revision>;

    /// Discard local modifications to `path`.
    fn revert(&self, path: &Path) -> Result<(), HarnessError>;
}

pub struct SubversionClient {
    root: PathBuf,
    shell: Rc<dyn CommandRunner>,
}

impl SubversionClient {
    pub fn new(root: impl Into<PathBuf>, shell: Rc<dyn CommandRunner>) -> Self {
        Self {
            root: root.into(),
            shell,
        }
    }

    fn command(&self, program: &str) -> CommandLine {
        CommandLine::new(program).current_dir(&self.root)
    }

    fn revision_from(&self, command: CommandLine) -> Option<Revision> {
        match self.shell.run(&command, &OutputSink::Capture) {
            Ok(output) => output.stdout.lines().find_map(Revision::from_marker_line),
            Err(err) => {
                tracing::debug!(%command, error = %err, "revision lookup failed");
                None
            }
        }
    }
}

/// Whether `svn st -u` output lists any out-of-date entry.
///
/// Out-of-date entries carry a `*` in the ninth status column; scanning the whole line also catches the column
/// shifting between svn versions.
pub fn status_has_out_of_date(status_output: &str) -> bool {
    status_output.lines().any(|line| line.contains('*'))
}

impl VersionControl for SubversionClient {
    fn status_has_remote_changes(&self) -> Result<bool, HarnessError> {
        // `p` accepts a changed server certificate permanently instead of blocking on the prompt.
        let command = self.command("svn").args(["st", "-u"]).stdin("p");
        let output = self.shell.run(&command, &OutputSink::Capture)?;
        if !output.success() {
            return Err(HarnessError::VersionControl(format!(
                "`{command}` exited with status {}",
                output.status
            )));
        }
        Ok(status_has_out_of_date(&output.stdout))
    }

    fn sync_to_latest(&self) -> Result<(), HarnessError> {
        let command = self.command("gclient").arg("sync");
        let output = self.shell.run(&command, &OutputSink::Capture)?;
        if !output.success() {
            tracing::warn!(status = output.status, "gclient sync reported failure; building what is there");
        }
        Ok(())
    }

    fn current_revision(&self) -> Option<Revision> {
        self.revision_from(self.command("svn").arg("info"))
            .or_else(|| self.revision_from(self.command("git").args(["svn", "info"])))
    }

    fn revert(&self, path: &Path) -> Result<(), HarnessError> {
        let command = self.command("svn").arg("revert").arg(path);
        let output = self.shell.run(&command, &OutputSink::Capture)?;
        if !output.success() {
            return Err(HarnessError::VersionControl(format!(
                "`{command}` exited with status {}",
                output.status
            )));
        }
        Ok(())
    }
}
