use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not in a project. Run inside a git repository or pass --root")]
    NotInProject,

    #[error("no origin remote configured")]
    NoRemote,

    #[error("remote '{url}' does not look like a {host} repository")]
    RemoteNotRecognized { url: String, host: String },

    #[error("remote belongs to '{actual}', expected organization '{expected}'")]
    OrganizationMismatch { expected: String, actual: String },

    #[error("not a .enc file: {}", .0.display())]
    NotCiphertext(PathBuf),

    #[error("{} is outside the project root", .0.display())]
    OutsideProject(PathBuf),

    #[error("failed to run '{program}': {source}")]
    CommandSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("kms command failed: {stderr}")]
    Kms { stderr: String },
}

pub type Result<T> = std::result::Result<T, SecretsError>;
