use crate::classify;
use crate::config::Config;
use crate::error::Result;
use crate::kms::KmsClient;
use crate::runner::CommandRunner;
use std::path::{Path, PathBuf};

/// Decrypt sealed files.
///
/// `files` restricts the batch to explicit paths; when empty, sealed secret
/// files under the project root are opened, or every `.enc` file with
/// `open_all`.
pub fn open(
    config: &Config,
    runner: &dyn CommandRunner,
    project_root: &Path,
    key: &str,
    files: Vec<PathBuf>,
    open_all: bool,
) -> Result<()> {
    let files = if files.is_empty() {
        classify::find_encrypted_files(project_root, open_all)
    } else {
        files
    };

    let kms = KmsClient::new(runner, config);

    for path in &files {
        kms.decrypt(key, path)?;
        println!("{} decrypted", path.display());
    }

    Ok(())
}
