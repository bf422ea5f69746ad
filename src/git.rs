use crate::error::{Result, SecretsError};
use crate::runner::CommandRunner;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const IGNORE_FILE: &str = ".gitignore";

/// Outcome of one ignore-list update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreDecision {
    /// The path was appended to the ignore file.
    Appended,
    /// The path is committed in plaintext; the ignore file was left alone.
    AlreadyTracked,
    /// An existing rule already covers the path.
    AlreadyIgnored,
}

/// Queries against the project's git repository, all via the `git` binary.
pub struct GitClient<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> GitClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Raw URL of the `origin` remote.
    pub fn remote_url(&self, project_root: &Path) -> Result<Option<String>> {
        let root = project_root.to_string_lossy();
        let output = self.runner.run(
            "git",
            &["-C", &root, "config", "--get", "remote.origin.url"],
        )?;
        if !output.success {
            return Ok(None);
        }
        let url = output.stdout.trim().to_string();
        Ok(if url.is_empty() { None } else { Some(url) })
    }

    fn is_tracked(&self, project_root: &Path, relative: &str) -> Result<bool> {
        let root = project_root.to_string_lossy();
        let output = self.runner.run(
            "git",
            &["-C", &root, "ls-files", "--error-unmatch", relative],
        )?;
        Ok(output.success)
    }

    fn is_ignored(&self, project_root: &Path, relative: &str) -> Result<bool> {
        let root = project_root.to_string_lossy();
        let output = self
            .runner
            .run("git", &["-C", &root, "check-ignore", relative])?;
        Ok(output.success && output.stdout.trim() == relative)
    }

    /// Make sure `file` can never be committed in plaintext.
    ///
    /// The project-relative path is used as the key for the tracked check,
    /// the ignore check, and the appended entry. Tracked status is checked
    /// first: a committed file may also match a stale ignore rule, and the
    /// caller has to hear about the committed plaintext, not a no-op.
    pub fn ensure_ignored(&self, project_root: &Path, file: &Path) -> Result<IgnoreDecision> {
        let relative = file
            .strip_prefix(project_root)
            .map_err(|_| SecretsError::OutsideProject(file.to_path_buf()))?
            .to_string_lossy()
            .into_owned();

        if self.is_tracked(project_root, &relative)? {
            tracing::debug!(file = %relative, "not appending to {IGNORE_FILE}: already tracked");
            return Ok(IgnoreDecision::AlreadyTracked);
        }
        if self.is_ignored(project_root, &relative)? {
            tracing::debug!(file = %relative, "not appending to {IGNORE_FILE}: already ignored");
            return Ok(IgnoreDecision::AlreadyIgnored);
        }

        append_line(&project_root.join(IGNORE_FILE), &relative)?;
        Ok(IgnoreDecision::Appended)
    }
}

fn append_line(file: &Path, line: &str) -> Result<()> {
    let mut f = OpenOptions::new().append(true).create(true).open(file)?;
    writeln!(f, "{line}")?;
    Ok(())
}
