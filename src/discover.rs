//! Repository discovery.
//! A repository is an immediate child directory of the source root that
//! contains a `.git` directory.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::REPO_MARKER;

/// Sorted names of the repositories directly under `source`, optionally
/// narrowed to `only` (discovery order is kept).
///
/// An unreadable source yields an empty list; entries that cannot be
/// inspected are skipped.
pub fn find_repos(source: &Path, only: Option<&[String]>) -> Vec<String> {
    let rd = match fs::read_dir(source) {
        Ok(r) => r,
        Err(e) => {
            debug!(path = %source.display(), error = %e, "cannot list source directory");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = rd
        .flatten()
        .filter_map(|ent| match ent.file_name().into_string() {
            Ok(name) => Some(name),
            Err(raw) => {
                debug!(name = ?raw, "skipping non UTF-8 directory name");
                None
            }
        })
        .filter(|name| {
            let dir = source.join(name);
            dir.is_dir() && dir.join(REPO_MARKER).is_dir()
        })
        .collect();
    names.sort();

    if let Some(allow) = only {
        for wanted in allow {
            if !names.iter().any(|n| n == wanted) {
                warn!(repo = %wanted, "requested repository not found in source");
            }
        }
        names.retain(|n| allow.iter().any(|a| a == n));
    }

    names
}
