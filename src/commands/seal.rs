use crate::classify;
use crate::config::Config;
use crate::error::Result;
use crate::git::{GitClient, IgnoreDecision};
use crate::kms::KmsClient;
use crate::runner::CommandRunner;
use std::path::{Path, PathBuf};

/// Encrypt plaintext secret files and shield each one from the git index.
///
/// `files` restricts the batch to explicit paths; when empty, every
/// plaintext secret file under the project root is sealed. A file already
/// committed in plaintext is warned about and the batch continues.
pub fn seal(
    config: &Config,
    runner: &dyn CommandRunner,
    project_root: &Path,
    key: &str,
    files: Vec<PathBuf>,
) -> Result<()> {
    let files = if files.is_empty() {
        classify::find_unencrypted_files(project_root)
    } else {
        files
    };

    let kms = KmsClient::new(runner, config);
    let git = GitClient::new(runner);

    for path in &files {
        kms.encrypt(key, path)?;
        match git.ensure_ignored(project_root, path)? {
            IgnoreDecision::AlreadyTracked => {
                tracing::warn!(
                    "{} is tracked in plaintext; remove it from the index and seal again",
                    path.display()
                );
            }
            IgnoreDecision::Appended | IgnoreDecision::AlreadyIgnored => {}
        }
        println!("{} encrypted", path.display());
    }

    Ok(())
}
