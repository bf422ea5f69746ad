use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// Create a new temporary git repository with user config set.
pub fn create_git_repo() -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");

    StdCommand::new("git")
        .args(["init"])
        .current_dir(temp.path())
        .output()
        .expect("failed to init git repo");

    StdCommand::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(temp.path())
        .output()
        .expect("failed to set git user.email");

    StdCommand::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(temp.path())
        .output()
        .expect("failed to set git user.name");

    temp
}

/// Convenience helper for spawning the secrets binary via assert_cmd.
pub fn secrets_cmd() -> Command {
    cargo_bin_cmd!("secrets")
}

/// Write `content` to `relative` under `root`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("failed to create dirs");
    fs::write(path, content).expect("failed to write file");
}

/// Contents of the repository's .gitignore, empty if absent.
#[allow(dead_code)]
pub fn gitignore(root: &Path) -> String {
    fs::read_to_string(root.join(".gitignore")).unwrap_or_default()
}
