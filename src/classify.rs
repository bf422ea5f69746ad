//! Secret-file classification.
//!
//! Secret files are found by filename convention, never by content:
//! plaintext candidates end with `secret.yaml`/`secret.yml`, sealed ones
//! carry an additional `.enc`. Pruned directories are skipped wholesale.

use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into, at any depth.
const PRUNED_DIRS: &[&str] = &[".git", "node_modules", "mongo-data"];

/// Plaintext secret files under `root`, ready to be sealed.
pub fn find_unencrypted_files(root: &Path) -> Vec<PathBuf> {
    find_files(root, &suffix_pattern(r"secret\.(yaml|yml)$"))
}

/// Sealed files under `root`. `open_all` widens the match from the
/// `secret.*` convention to every `.enc` file in the project.
pub fn find_encrypted_files(root: &Path, open_all: bool) -> Vec<PathBuf> {
    let pattern = if open_all {
        suffix_pattern(r"\.enc$")
    } else {
        suffix_pattern(r"secret\.(yaml|yml)\.enc$")
    };
    find_files(root, &pattern)
}

fn suffix_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("suffix pattern is well-formed")
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| PRUNED_DIRS.contains(&name))
}

fn find_files(root: &Path, pattern: &Regex) -> Vec<PathBuf> {
    let mut matches = Vec::new();

    let walk = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry));
    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            // Unreadable subtrees are skipped; the partial result still stands.
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if pattern.is_match(&path.to_string_lossy()) {
            matches.push(path);
        }
    }

    matches
}
