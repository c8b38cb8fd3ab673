//! Tree scan and filtering.
//! Walks one repository top-down, prunes excluded directories (counting what
//! they hold), and classifies every file against the rule set.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::output::Console;
use crate::rules::RuleSet;
use crate::stats::RunStats;

/// A file approved for transfer, relative to its repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub rel_path: PathBuf,
    pub size: u64,
}

impl CandidateFile {
    /// Relative path with `/` separators, as stored in archives and reports.
    pub fn slash_path(&self) -> String {
        to_slash(&self.rel_path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<CandidateFile>,
    /// Excluded directory name -> files beneath it (same names merge)
    pub skipped_dirs: BTreeMap<String, u64>,
}

impl ScanResult {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn skipped_total(&self) -> u64 {
        self.skipped_dirs.values().sum()
    }

    /// Largest skipped directories by file count, ties by name.
    pub fn top_skipped(&self, n: usize) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .skipped_dirs
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows.truncate(n);
        rows
    }
}

/// Scan `repo_root` and return the files to transfer plus the skip tally.
///
/// Side effects on `stats`: symlink and oversize counters, the preserved-file
/// list, and the extension table. Extension statistics include files that the
/// rules exclude, because they describe what was scanned.
pub fn scan_repo(
    repo_root: &Path,
    repo_name: &str,
    rules: &RuleSet,
    max_size: Option<u64>,
    stats: &mut RunStats,
    console: &Console,
) -> ScanResult {
    let mut result = ScanResult::default();
    let mut walker = WalkDir::new(repo_root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(e) => e,
            Err(e) => {
                warn!(repo = repo_name, error = %e, "cannot read part of the tree; continuing");
                console.detail(format!("  Warning: {e}"));
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy();
        let ft = entry.file_type();

        if ft.is_dir() {
            if rules.is_excluded_dir(&name) {
                let count = count_files(entry.path());
                *result.skipped_dirs.entry(name.into_owned()).or_insert(0) += count;
                walker.skip_current_dir();
            }
            continue;
        }

        let Ok(rel_path) = entry.path().strip_prefix(repo_root).map(Path::to_path_buf) else {
            continue;
        };

        if ft.is_symlink() {
            if points_to_dir(entry.path()) {
                debug!(path = %rel_path.display(), "not following directory symlink");
                continue;
            }
            stats.symlinks_skipped += 1;
            console.detail(format!("      Skipping symlink: {}", rel_path.display()));
            continue;
        }

        if !ft.is_file() {
            debug!(path = %rel_path.display(), "skipping special file");
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or_else(|e| {
            debug!(path = %rel_path.display(), error = %e, "stat failed; treating size as 0");
            0
        });

        if let Some(limit) = max_size
            && size > limit
        {
            stats.oversized_skipped += 1;
            console.detail(format!(
                "      Skipping large file ({:.1} MB): {}",
                size as f64 / (1024.0 * 1024.0),
                rel_path.display()
            ));
            continue;
        }

        let candidate = CandidateFile { rel_path, size };
        if rules.is_preserved(&name) {
            stats
                .preserved
                .push(format!("{repo_name}/{}", candidate.slash_path()));
            result.files.push(candidate);
        } else if !rules.is_excluded_file(&name) {
            result.files.push(candidate);
        } else {
            trace!(path = %candidate.rel_path.display(), "excluded by file pattern");
        }

        stats.record_extension(&name, size);
    }

    result
}

/// Files (anything but directories and directory symlinks) beneath `dir`.
fn count_files(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| {
            let ft = e.file_type();
            !ft.is_dir() && !(ft.is_symlink() && points_to_dir(e.path()))
        })
        .count() as u64
}

fn points_to_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
