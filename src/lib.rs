//! # kms-secrets
//!
//! Seal and open project secret files with a cloud KMS, keeping plaintext
//! out of git.
//!
//! Secret files are identified purely by naming convention: plaintext
//! candidates end with `secret.yaml`/`secret.yml`, sealed artifacts carry an
//! additional `.enc` suffix and live next to their plaintext. Encryption and
//! decryption are delegated to the external `gcloud kms` CLI; tracked/ignored
//! state and remote metadata come from the external `git` binary. The tool
//! itself implements no cryptography.
//!
//! ## Usage
//!
//! ```bash
//! # Encrypt every secret file in the enclosing project and make sure the
//! # plaintext can never be committed
//! secrets seal
//!
//! # Decrypt the sealed secret files again
//! secrets open
//!
//! # Decrypt every .enc file, not just the secret.* convention
//! secrets open --open-all
//!
//! # Preview without touching the KMS
//! secrets seal --dry-run --verbose
//! ```
//!
//! Both subcommands also accept explicit file paths. `--root` overrides
//! project-root autodetection and `--key` overrides key-name derivation.
//!
//! ## How a project maps to a key
//!
//! Every project encrypts under one KMS key on a shared keyring. The key
//! name is the project part of the `origin` remote when that remote belongs
//! to the expected organization, and the project directory's basename
//! otherwise. Missing keys are provisioned on first use with a fixed
//! 100-day rotation policy.
//!
//! ## The plaintext-never-tracked invariant
//!
//! Sealing a file appends its project-relative path to the root `.gitignore`
//! unless git already ignores it. A file that is already *tracked* in
//! plaintext is a conflict the tool refuses to paper over: it warns and
//! leaves the ignore list alone.
//!
//! ## Module Overview
//!
//! - [`classify`] - find secret files by naming convention, pruning
//!   dependency and data directories
//! - [`project`] - project-root discovery and key-name derivation
//! - [`git`] - ignore-list management and remote queries via the git binary
//! - [`kms`] - command gateway to `gcloud kms`, with create-and-retry
//! - [`runner`] - injectable subprocess boundary
//! - [`config`] - immutable per-invocation configuration
//! - [`error`] - error types and unified error handling

pub mod classify;
pub mod config;
pub mod error;
pub mod git;
pub mod kms;
pub mod project;
pub mod runner;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SecretsError};
pub use git::{GitClient, IgnoreDecision};
pub use kms::KmsClient;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
