//! Run-wide counters.
//! One `RunStats` is owned by the engine and mutated by the scan and transfer
//! steps; the report reads it once at the end.

use std::collections::HashMap;

/// Key used for files without an extension.
pub const NO_EXTENSION: &str = "(no ext)";

/// Count and cumulative size for one extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionStat {
    pub count: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Repositories processed (after the allow-list)
    pub repos: usize,
    /// Files copied, archived, or (in a dry run) that would be
    pub files_transferred: u64,
    /// Files inside excluded directories
    pub files_skipped: u64,
    /// Bytes copied, archive bytes written, or scanned bytes in a dry run
    pub bytes: u64,
    pub symlinks_skipped: u64,
    /// Files over --max-size
    pub oversized_skipped: u64,
    pub overwritten: u64,
    /// Files left alone because of --skip-existing
    pub skipped_existing: u64,
    /// Per-file copy or archive failures
    pub failed: u64,
    /// `<repo>/<relative path>` of every preserved file
    pub preserved: Vec<String>,
    pub extensions: HashMap<String, ExtensionStat>,
}

impl RunStats {
    pub fn record_extension(&mut self, file_name: &str, size: u64) {
        let entry = self
            .extensions
            .entry(extension_key(file_name))
            .or_default();
        entry.count += 1;
        entry.bytes += size;
    }

    /// Extensions by descending count, ties by name; capped unless `limit` is None.
    pub fn top_extensions(&self, limit: Option<usize>) -> Vec<(&str, ExtensionStat)> {
        let mut rows: Vec<(&str, ExtensionStat)> = self
            .extensions
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        rows.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        if let Some(n) = limit {
            rows.truncate(n);
        }
        rows
    }
}

/// Lowercased extension including the dot, or [`NO_EXTENSION`].
///
/// Leading dots belong to the name: `.env` has no extension, `.env.local`
/// has `.local`, and `archive.tar.GZ` has `.gz`.
pub fn extension_key(file_name: &str) -> String {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(i) => file_name[stem_start + i..].to_lowercase(),
        None => NO_EXTENSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_keys() {
        assert_eq!(extension_key("main.py"), ".py");
        assert_eq!(extension_key("README.MD"), ".md");
        assert_eq!(extension_key("archive.tar.gz"), ".gz");
        assert_eq!(extension_key("Makefile"), NO_EXTENSION);
        assert_eq!(extension_key(".env"), NO_EXTENSION);
        assert_eq!(extension_key("..hidden"), NO_EXTENSION);
        assert_eq!(extension_key(".env.local"), ".local");
        assert_eq!(extension_key("trailing."), ".");
    }

    #[test]
    fn top_extensions_sorted_and_capped() {
        let mut s = RunStats::default();
        for name in ["a.rs", "b.rs", "c.rs", "d.md", "e.md", "f.txt", "g.json"] {
            s.record_extension(name, 10);
        }
        let top = s.top_extensions(Some(3));
        let keys: Vec<&str> = top.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![".rs", ".md", ".json"]);
        assert_eq!(top[0].1, ExtensionStat { count: 3, bytes: 30 });
        assert_eq!(s.top_extensions(None).len(), 4);
    }
}
