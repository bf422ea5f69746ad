//! Gateway to the external key-management CLI.
//!
//! All cryptography is delegated to `gcloud kms`; this module only builds
//! command lines, classifies failures, and provisions missing keys. Sealed
//! artifacts live next to their plaintext under the same name plus `.enc`.

use crate::config::Config;
use crate::error::{Result, SecretsError};
use crate::runner::{CommandOutput, CommandRunner};
use std::path::{Path, PathBuf};

/// Suffix marking a sealed artifact.
pub const ENC_SUFFIX: &str = ".enc";

pub struct KmsClient<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a Config,
}

impl<'a> KmsClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a Config) -> Self {
        Self { runner, config }
    }

    /// Seal `plaintext` under `key`, writing `<plaintext>.enc` beside it.
    pub fn encrypt(&self, key: &str, plaintext: &Path) -> Result<()> {
        let ciphertext = ciphertext_path(plaintext);
        self.call("encrypt", key, plaintext, &ciphertext)
    }

    /// Open `ciphertext` under `key`, writing the suffix-stripped plaintext
    /// beside it. Rejects paths without the `.enc` suffix before any
    /// external call.
    pub fn decrypt(&self, key: &str, ciphertext: &Path) -> Result<()> {
        let plaintext = plaintext_path(ciphertext)?;
        self.call("decrypt", key, &plaintext, ciphertext)
    }

    fn call(&self, operation: &str, key: &str, plaintext: &Path, ciphertext: &Path) -> Result<()> {
        if self.config.dry_run {
            return Ok(());
        }

        let first = self.invoke(operation, key, plaintext, ciphertext)?;
        if first.success {
            return Ok(());
        }
        if !is_key_not_found(&first.stderr) {
            return Err(SecretsError::Kms {
                stderr: first.stderr,
            });
        }

        // Provision the key and retry exactly once; a second failure is
        // surfaced with the service's own diagnostic.
        self.create_key(key)?;
        let retry = self.invoke(operation, key, plaintext, ciphertext)?;
        if retry.success {
            Ok(())
        } else {
            Err(SecretsError::Kms {
                stderr: retry.stderr,
            })
        }
    }

    fn invoke(
        &self,
        operation: &str,
        key: &str,
        plaintext: &Path,
        ciphertext: &Path,
    ) -> Result<CommandOutput> {
        let plaintext = plaintext.to_string_lossy();
        let ciphertext = ciphertext.to_string_lossy();
        self.runner.run(
            "gcloud",
            &[
                "kms",
                operation,
                "--location",
                &self.config.location,
                "--keyring",
                &self.config.keyring,
                "--key",
                key,
                "--plaintext-file",
                &plaintext,
                "--ciphertext-file",
                &ciphertext,
            ],
        )
    }

    /// Create `key` on the keyring with the fixed 100-day rotation policy.
    pub fn create_key(&self, key: &str) -> Result<()> {
        tracing::info!(key, "creating key for the project");
        if self.config.dry_run {
            return Ok(());
        }

        let output = self.runner.run(
            "gcloud",
            &[
                "kms",
                "keys",
                "create",
                key,
                "--purpose",
                "encryption",
                "--rotation-period",
                "100d",
                "--next-rotation-time",
                "+p100d",
                "--location",
                &self.config.location,
                "--keyring",
                &self.config.keyring,
            ],
        )?;
        if output.success {
            Ok(())
        } else {
            Err(SecretsError::Kms {
                stderr: output.stderr,
            })
        }
    }
}

/// Whether a failed service call means the key does not exist yet.
///
/// The service reports this only as free text on stderr. The recognized
/// marker set is deliberately narrow ("NOT_FOUND: "); anything unrecognized
/// is treated as fatal by the caller.
fn is_key_not_found(stderr: &str) -> bool {
    stderr.contains("NOT_FOUND: ")
}

fn ciphertext_path(plaintext: &Path) -> PathBuf {
    let mut path = plaintext.as_os_str().to_os_string();
    path.push(ENC_SUFFIX);
    PathBuf::from(path)
}

fn plaintext_path(ciphertext: &Path) -> Result<PathBuf> {
    if ciphertext.extension().is_some_and(|ext| ext == "enc") {
        Ok(ciphertext.with_extension(""))
    } else {
        Err(SecretsError::NotCiphertext(ciphertext.to_path_buf()))
    }
}
