//! Pre-run path validation.
//! Verifies the source directory, the destination kind, that the destination
//! is not inside the source, and creates the destination when needed.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::types::Config;
use crate::errors::GitMigError;

impl Config {
    /// Validate source/destination and make both paths absolute.
    /// Nothing is created here; see [`prepare_destination`].
    pub fn validate(&mut self) -> Result<(), GitMigError> {
        let (source, dest) = validate_paths(&self.source_dir, &self.dest_dir)?;
        self.source_dir = source;
        self.dest_dir = dest;
        info!(
            source = %self.source_dir.display(),
            dest = %self.dest_dir.display(),
            "paths validated"
        );
        Ok(())
    }
}

/// Check the source/destination pair and return their absolute forms.
pub fn validate_paths(source: &Path, dest: &Path) -> Result<(PathBuf, PathBuf), GitMigError> {
    if !source.is_dir() {
        error!("source is not a directory: {}", source.display());
        return Err(GitMigError::SourceNotDirectory(source.to_path_buf()));
    }
    if dest.exists() && !dest.is_dir() {
        error!("destination exists but isn't a directory: {}", dest.display());
        return Err(GitMigError::DestinationNotDirectory(dest.to_path_buf()));
    }

    let source_abs = absolute(source);
    let dest_abs = absolute(dest);

    let source_real = resolve_for_compare(&source_abs);
    let dest_real = resolve_for_compare(&dest_abs);
    debug!(source = %source_real.display(), dest = %dest_real.display(), "comparing resolved paths");
    // Component-wise: "/src2" is not inside "/src".
    if dest_real.starts_with(&source_real) {
        return Err(GitMigError::DestinationInsideSource {
            dest: dest_abs,
            source_dir: source_abs,
        });
    }

    Ok((source_abs, dest_abs))
}

/// Create the destination (and parents) unless this is a dry run.
pub fn prepare_destination(dest: &Path, dry_run: bool) -> Result<(), GitMigError> {
    if dry_run {
        debug!(path = %dest.display(), "dry-run: destination left untouched");
        return Ok(());
    }
    if dest.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dest).map_err(|e| GitMigError::CreateDestination {
        path: dest.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!("Created destination directory: {}", dest.display());
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Canonicalize the deepest existing ancestor and re-append the missing tail,
/// so a destination that does not exist yet still compares against real paths.
fn resolve_for_compare(abs: &Path) -> PathBuf {
    let mut existing = abs;
    let mut tail: Vec<&OsStr> = Vec::new();
    loop {
        if let Ok(real) = dunce::canonicalize(existing) {
            let mut out = real;
            for part in tail.iter().rev() {
                out.push(part);
            }
            return out;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = parent;
            }
            _ => return abs.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tail_is_reattached() {
        let td = tempfile::tempdir().unwrap();
        let want = dunce::canonicalize(td.path()).unwrap().join("a").join("b");
        assert_eq!(resolve_for_compare(&td.path().join("a").join("b")), want);
    }

    #[test]
    fn sibling_with_shared_prefix_is_allowed() {
        let td = tempfile::tempdir().unwrap();
        let src = td.path().join("src");
        fs::create_dir_all(&src).unwrap();
        let dest = td.path().join("src2");
        assert!(validate_paths(&src, &dest).is_ok());
    }
}
