//! Archive mode: one deflate zip per repository at `<dest>/<repo>.zip`.
//!
//! Every entry is stored as `<repo>/<relative path>`, so extracting the
//! archive recreates the repository folder. Relative paths are validated
//! before they become entry names; an unsafe one is skipped on its own.

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, error};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::ExistingPolicy;
use crate::errors::GitMigError;
use crate::output::{Console, Tone};
use crate::scan::CandidateFile;
use crate::shutdown;
use crate::stats::RunStats;

/// True if `rel` can be used as an entry name without escaping the archive
/// root: no `..` segment, no leading separator, no drive prefix.
pub fn is_safe_archive_path(rel: &str) -> bool {
    if rel.is_empty() || rel.starts_with('/') || rel.starts_with('\\') {
        return false;
    }
    let b = rel.as_bytes();
    if b.len() >= 2 && b[1] == b':' && b[0].is_ascii_alphabetic() {
        return false;
    }
    !rel.split(['/', '\\']).any(|seg| seg == "..")
}

/// Write `<dest_root>/<repo_name>.zip`. Returns the archive size in bytes.
///
/// Any failure to create, write or finalize the archive is logged, the partial
/// archive is removed, and 0 is returned so the run can move on. Entries only
/// count as transferred once the archive is finalized.
pub fn archive_repo(
    src_repo: &Path,
    dest_root: &Path,
    repo_name: &str,
    files: &[CandidateFile],
    policy: ExistingPolicy,
    stats: &mut RunStats,
    console: &Console,
) -> Result<u64, GitMigError> {
    let zip_path = dest_root.join(format!("{repo_name}.zip"));

    if zip_path.exists() {
        if policy.skip_existing {
            stats.skipped_existing += 1;
            console.detail(format!(
                "      {} {}.zip",
                console.paint("Skipped (exists):", Tone::Grey),
                repo_name
            ));
            return Ok(0);
        }
        stats.overwritten += 1;
        if !policy.force {
            console.line(format!(
                "      {} {}.zip",
                console.paint("Overwriting:", Tone::Yellow),
                repo_name
            ));
        }
    }

    match write_archive(&zip_path, src_repo, repo_name, files, stats, console) {
        Ok(entries) => {
            stats.files_transferred += entries;
            let size = fs::metadata(&zip_path).map(|m| m.len()).unwrap_or(0);
            debug!(archive = %zip_path.display(), entries, bytes = size, "archive written");
            Ok(size)
        }
        Err(e) => {
            if let Some(GitMigError::Interrupted) = e.downcast_ref::<GitMigError>() {
                return Err(GitMigError::Interrupted);
            }
            error!(repo = repo_name, error = %format!("{e:#}"), "Could not create zip");
            let _ = fs::remove_file(&zip_path);
            Ok(0)
        }
    }
}

fn write_archive(
    zip_path: &Path,
    src_repo: &Path,
    repo_name: &str,
    files: &[CandidateFile],
    stats: &mut RunStats,
    console: &Console,
) -> Result<u64> {
    let mut zip = ZipWriter::new(File::create(zip_path)?);
    let mut entries = 0u64;

    for file in files {
        shutdown::check()?;

        let raw = file.rel_path.to_string_lossy();
        if !is_safe_archive_path(&raw) {
            error!(path = %raw, "Skipping unsafe path");
            continue;
        }

        let mut src = match File::open(src_repo.join(&file.rel_path)) {
            Ok(f) => f,
            Err(e) => {
                stats.failed += 1;
                error!(path = %raw, error = %e, "Could not read file for archive");
                continue;
            }
        };

        let options = entry_options(src.metadata().ok().as_ref(), file.size);
        zip.start_file(format!("{repo_name}/{}", file.slash_path()), options)?;
        io::copy(&mut src, &mut zip)?;
        entries += 1;
        console.detail(format!("      {}", file.rel_path.display()));
    }

    zip.finish()?;
    Ok(entries)
}

fn entry_options(meta: Option<&fs::Metadata>, size: u64) -> SimpleFileOptions {
    let mut options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(size >= u64::from(u32::MAX));
    if let Some(meta) = meta {
        if let Some(stamp) = meta.modified().ok().and_then(zip_timestamp) {
            options = options.last_modified_time(stamp);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(meta.permissions().mode() & 0o777);
        }
    }
    options
}

/// Local-time DOS timestamp; None outside the 1980..=2107 range zip can store.
fn zip_timestamp(t: SystemTime) -> Option<zip::DateTime> {
    let local: DateTime<Local> = t.into();
    let year = u16::try_from(local.year()).ok()?;
    zip::DateTime::from_date_and_time(
        year,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .ok()
}
