//! Immutable per-invocation configuration.
//!
//! Built once in `main` from the parsed flags and the compile-time defaults
//! below, then passed by reference into every component. Nothing in here is
//! mutated after startup.

/// Host expected in project remote URLs.
pub const EXPECTED_REPO_HOST: &str = "github.com";

/// Organization expected to own project remotes. Remotes owned by anyone
/// else never contribute a key name.
pub const EXPECTED_ORGANIZATION: &str = "fairwind-io";

/// KMS keyring holding one key per project.
pub const KEY_RING: &str = "fairwind-project-secrets";

/// KMS location of the keyring.
pub const LOCATION: &str = "global";

#[derive(Debug, Clone)]
pub struct Config {
    /// Skip every call to the key-management service.
    pub dry_run: bool,
    pub repo_host: String,
    pub organization: String,
    pub keyring: String,
    pub location: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            repo_host: EXPECTED_REPO_HOST.into(),
            organization: EXPECTED_ORGANIZATION.into(),
            keyring: KEY_RING.into(),
            location: LOCATION.into(),
        }
    }
}

impl Config {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }
}
