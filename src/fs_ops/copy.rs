//! Copy mode: mirror each candidate under `<dest>/<repo>/`.
//! Per-file failures are logged and counted; they never stop the repository.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

use super::metadata::preserve_metadata;
use super::ExistingPolicy;
use crate::errors::GitMigError;
use crate::output::{Console, Tone};
use crate::scan::CandidateFile;
use crate::shutdown;
use crate::stats::RunStats;

enum CopyOutcome {
    Copied(u64),
    SkippedExisting,
}

/// Copy `files` from `src_repo` to `dst_repo`. Returns the bytes copied.
///
/// Only an interrupt ends the loop early; the files copied so far stay.
pub fn copy_repo(
    src_repo: &Path,
    dst_repo: &Path,
    files: &[CandidateFile],
    policy: ExistingPolicy,
    stats: &mut RunStats,
    console: &Console,
) -> Result<u64, GitMigError> {
    let mut bytes_copied = 0u64;

    for file in files {
        shutdown::check()?;
        let src = src_repo.join(&file.rel_path);
        let dst = dst_repo.join(&file.rel_path);

        match copy_one(&src, &dst, file, policy, stats, console) {
            Ok(CopyOutcome::Copied(n)) => {
                bytes_copied += n;
                stats.files_transferred += 1;
                console.detail(format!("      {}", file.rel_path.display()));
            }
            Ok(CopyOutcome::SkippedExisting) => {
                stats.skipped_existing += 1;
                console.detail(format!(
                    "      {} {}",
                    console.paint("Skipped (exists):", Tone::Grey),
                    file.rel_path.display()
                ));
            }
            Err(e) => {
                stats.failed += 1;
                error!(path = %file.rel_path.display(), error = %format!("{e:#}"), "Could not copy file");
            }
        }
    }

    debug!(dest = %dst_repo.display(), bytes = bytes_copied, "repository copied");
    Ok(bytes_copied)
}

fn copy_one(
    src: &Path,
    dst: &Path,
    file: &CandidateFile,
    policy: ExistingPolicy,
    stats: &mut RunStats,
    console: &Console,
) -> Result<CopyOutcome> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory '{}'", parent.display()))?;
    }

    if dst.exists() {
        if policy.skip_existing {
            return Ok(CopyOutcome::SkippedExisting);
        }
        stats.overwritten += 1;
        if !policy.force {
            console.line(format!(
                "      {} {}",
                console.paint("Overwriting:", Tone::Yellow),
                file.rel_path.display()
            ));
        }
    }

    let n = fs::copy(src, dst)
        .with_context(|| format!("copy '{}' -> '{}'", src.display(), dst.display()))?;
    let meta = fs::metadata(src).with_context(|| format!("stat '{}'", src.display()))?;
    preserve_metadata(dst, &meta);
    Ok(CopyOutcome::Copied(n))
}
