//! Project-root discovery and per-project key naming.
//!
//! The key name feeds straight into the KMS key path, so it has to be stable
//! for everyone who clones the project. The remote URL is the only metadata
//! all clones share; the directory basename is the fallback when a project
//! has no usable remote.

use crate::config::Config;
use crate::error::{Result, SecretsError};
use crate::git::GitClient;
use regex::Regex;
use std::path::{self, Path, PathBuf};

/// Walk upward from `start` to the nearest directory containing `.git`.
///
/// Stops at the filesystem root; parent-of-root is a fixed point, so the
/// loop terminates after O(depth) directory stats.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut dir = path::absolute(start)?;
    loop {
        if is_project_root(&dir) {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(SecretsError::NotInProject);
        }
    }
}

fn is_project_root(dir: &Path) -> bool {
    dir.join(".git").is_dir()
}

/// (organization, project) parsed out of a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
    pub organization: String,
    pub project: String,
}

impl RemoteIdentity {
    /// Extract the identity from a `host:org/project(.git)` shaped substring.
    ///
    /// Matches both scp-style (`git@host:org/project.git`) and https
    /// (`https://host/org/project`) remotes, case-insensitively.
    pub fn parse(url: &str, host: &str) -> Result<Self> {
        let pattern = format!(
            r"(?i){}[:/]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?\s*$",
            regex::escape(host)
        );
        let re = Regex::new(&pattern).expect("remote pattern is well-formed");
        let captures = re
            .captures(url)
            .ok_or_else(|| SecretsError::RemoteNotRecognized {
                url: url.to_string(),
                host: host.to_string(),
            })?;
        Ok(Self {
            organization: captures[1].to_string(),
            project: captures[2].to_string(),
        })
    }

    /// The project name, provided the remote belongs to `organization`.
    pub fn project_for(&self, organization: &str) -> Result<&str> {
        if !self.organization.eq_ignore_ascii_case(organization) {
            return Err(SecretsError::OrganizationMismatch {
                expected: organization.to_string(),
                actual: self.organization.clone(),
            });
        }
        Ok(&self.project)
    }
}

/// Name of the KMS key for this project.
///
/// Derivation from the remote can fail in several benign ways (no remote,
/// foreign host, foreign organization, git itself unavailable); all of them
/// fall back to the project directory's basename. The operation as a whole
/// never fails.
pub fn resolve_key_name(git: &GitClient, config: &Config, project_root: &Path) -> String {
    match derive_key_name(git, config, project_root) {
        Ok(name) => name,
        Err(err) => {
            tracing::debug!(%err, "falling back to project basename for key name");
            project_basename(project_root)
        }
    }
}

fn derive_key_name(git: &GitClient, config: &Config, project_root: &Path) -> Result<String> {
    let url = git
        .remote_url(project_root)?
        .ok_or(SecretsError::NoRemote)?;
    let identity = RemoteIdentity::parse(&url, &config.repo_host)?;
    Ok(identity.project_for(&config.organization)?.to_string())
}

fn project_basename(project_root: &Path) -> String {
    project_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::FakeRunner;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_nearest_ancestor_with_git_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("a/.git")).unwrap();
        fs::create_dir_all(root.join("a/b/c")).unwrap();

        let found = find_project_root(&root.join("a/b/c")).unwrap();
        assert_eq!(found, root.join("a"));
    }

    #[test]
    fn search_is_inclusive_of_the_starting_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("a/.git")).unwrap();

        let found = find_project_root(&root.join("a")).unwrap();
        assert_eq!(found, root.join("a"));
    }

    #[test]
    fn a_git_file_is_not_a_project_marker() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/.git"), "gitdir: elsewhere").unwrap();

        assert!(find_project_root(&root.join("a")).is_err());
    }

    #[test]
    fn search_terminates_at_filesystem_root() {
        let temp = TempDir::new().unwrap();
        let err = find_project_root(temp.path()).unwrap_err();
        assert!(matches!(err, SecretsError::NotInProject));
    }

    #[test]
    fn parses_scp_style_remote() {
        let identity =
            RemoteIdentity::parse("git@github.com:fairwind-io/billing.git", "github.com").unwrap();
        assert_eq!(identity.organization, "fairwind-io");
        assert_eq!(identity.project, "billing");
    }

    #[test]
    fn parses_https_remote_without_git_suffix() {
        let identity =
            RemoteIdentity::parse("https://github.com/fairwind-io/billing", "github.com").unwrap();
        assert_eq!(identity.project, "billing");
    }

    #[test]
    fn parsing_is_case_insensitive() {
        let identity =
            RemoteIdentity::parse("git@GitHub.COM:Fairwind-IO/Billing.git", "github.com").unwrap();
        assert_eq!(identity.organization, "Fairwind-IO");
        assert_eq!(identity.project_for("fairwind-io").unwrap(), "Billing");
    }

    #[test]
    fn foreign_host_is_not_recognized() {
        let err = RemoteIdentity::parse("git@gitlab.com:fairwind-io/billing.git", "github.com")
            .unwrap_err();
        assert!(matches!(err, SecretsError::RemoteNotRecognized { .. }));
    }

    #[test]
    fn foreign_organization_is_a_mismatch() {
        let identity =
            RemoteIdentity::parse("git@github.com:someone-else/billing.git", "github.com").unwrap();
        let err = identity.project_for("fairwind-io").unwrap_err();
        assert!(matches!(
            err,
            SecretsError::OrganizationMismatch { expected, actual }
                if expected == "fairwind-io" && actual == "someone-else"
        ));
    }

    #[test]
    fn key_name_comes_from_matching_remote() {
        let runner = FakeRunner::new().respond(true, "git@github.com:fairwind-io/billing.git\n", "");
        let git = GitClient::new(&runner);
        let config = Config::default();

        let name = resolve_key_name(&git, &config, Path::new("/work/checkout"));
        assert_eq!(name, "billing");
    }

    #[test]
    fn key_name_falls_back_to_basename_on_unrecognized_remote() {
        let runner = FakeRunner::new().respond(true, "git@gitlab.com:other/thing.git\n", "");
        let git = GitClient::new(&runner);
        let config = Config::default();

        let name = resolve_key_name(&git, &config, Path::new("/work/checkout"));
        assert_eq!(name, "checkout");
    }

    #[test]
    fn key_name_falls_back_to_basename_without_a_remote() {
        let runner = FakeRunner::new().respond(false, "", "");
        let git = GitClient::new(&runner);
        let config = Config::default();

        let name = resolve_key_name(&git, &config, Path::new("/work/checkout"));
        assert_eq!(name, "checkout");
    }
}
