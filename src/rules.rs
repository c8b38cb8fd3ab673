//! Exclusion and preservation rules.
//!
//! Patterns are shell-style globs (`*`, `?`, `[...]`) matched case-sensitively
//! against a single file or directory *name*, never a path. They are compiled
//! once per run into [`GlobSet`]s; the engine only ever reads them.
//!
//! Precedence for files is fixed: a preservation match always includes the
//! file, whatever the exclusion patterns say.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::config::{Config, RuleConfig, REPO_MARKER};

/// Compiled pattern lists for one run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    exclude_dirs: Vec<String>,
    exclude_files: Vec<String>,
    preserve: Vec<String>,
    dir_set: GlobSet,
    file_set: GlobSet,
    preserve_set: GlobSet,
}

impl RuleSet {
    /// Merge `base` with user additions and compile.
    ///
    /// `extra` entries ending in `/` are directory patterns; everything else is
    /// a file pattern. With `include_git` the `.git` directory rule is dropped.
    pub fn new(base: &RuleConfig, extra: &[String], include_git: bool) -> Self {
        let mut exclude_dirs = base.exclude_dirs.clone();
        let mut exclude_files = base.exclude_files.clone();

        for raw in extra {
            let pattern = raw.trim();
            if pattern.is_empty() {
                continue;
            }
            if pattern.ends_with('/') {
                let dir = pattern.trim_end_matches('/');
                if !dir.is_empty() {
                    exclude_dirs.push(dir.to_string());
                }
            } else {
                exclude_files.push(pattern.to_string());
            }
        }

        if include_git {
            exclude_dirs.retain(|d| d != REPO_MARKER);
        }

        Self {
            dir_set: compile(&exclude_dirs),
            file_set: compile(&exclude_files),
            preserve_set: compile(&base.preserve),
            exclude_dirs,
            exclude_files,
            preserve: base.preserve.clone(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.rules, &cfg.extra_excludes, cfg.include_git)
    }

    /// Directory names are matched by glob, then by exact name.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.dir_set.is_match(name) || self.exclude_dirs.iter().any(|p| p == name)
    }

    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.file_set.is_match(name)
    }

    pub fn is_preserved(&self, name: &str) -> bool {
        self.preserve_set.is_match(name)
    }

    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    pub fn exclude_files(&self) -> &[String] {
        &self.exclude_files
    }

    pub fn preserve(&self) -> &[String] {
        &self.preserve
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(&RuleConfig::default(), &[], false)
    }
}

/// Build a glob the way a shell would read it: no backslash escapes.
/// A pattern that is not a valid glob (e.g. an unclosed `[`) matches literally.
fn glob_for(pattern: &str) -> Option<Glob> {
    match GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(false)
        .build()
    {
        Ok(g) => Some(g),
        Err(e) => {
            warn!(pattern, error = %e, "invalid glob; matching it literally");
            Glob::new(&globset::escape(pattern)).ok()
        }
    }
}

fn compile(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for glob in patterns.iter().filter_map(|p| glob_for(p)) {
        builder.add(glob);
    }
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "failed to compile pattern set; falling back to exact names");
        GlobSet::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_exclude_caches() {
        let rules = RuleSet::default();
        for d in ["node_modules", ".git", "venv", ".venv", "__pycache__", "target"] {
            assert!(rules.is_excluded_dir(d), "{d} should be excluded");
        }
        assert!(!rules.is_excluded_dir("src"));
        assert!(!rules.is_excluded_dir("docs"));
    }

    #[test]
    fn dir_globs_match_whole_names() {
        let rules = RuleSet::default();
        assert!(rules.is_excluded_dir("mypkg.egg-info"));
        assert!(!rules.is_excluded_dir("egg-info-notes"));
        // case-sensitive
        assert!(!rules.is_excluded_dir("Node_Modules"));
    }

    #[test]
    fn file_patterns() {
        let rules = RuleSet::default();
        assert!(rules.is_excluded_file("debug.log"));
        assert!(rules.is_excluded_file("module.pyc"));
        assert!(!rules.is_excluded_file("main.py"));
        assert!(!rules.is_excluded_file("index.js"));
        assert!(!rules.is_excluded_file("README.md"));
    }

    #[test]
    fn env_files_are_preserved() {
        let rules = RuleSet::default();
        assert!(rules.is_preserved(".env"));
        assert!(rules.is_preserved(".env.local"));
        assert!(rules.is_preserved(".env.production"));
        assert!(!rules.is_preserved("main.py"));
        assert!(!rules.is_preserved("package.json"));
    }

    #[test]
    fn extra_excludes_split_on_trailing_slash() {
        let extra = vec!["*.txt".to_string(), " temp/ ".to_string(), "".to_string()];
        let rules = RuleSet::new(&RuleConfig::default(), &extra, false);
        assert!(rules.is_excluded_file("notes.txt"));
        assert!(rules.is_excluded_dir("temp"));
        assert!(!rules.is_excluded_file("temp"));
    }

    #[test]
    fn include_git_drops_marker_rule_only() {
        let rules = RuleSet::new(&RuleConfig::default(), &[], true);
        assert!(!rules.is_excluded_dir(".git"));
        assert!(rules.is_excluded_dir(".svn"));
    }

    #[test]
    fn rule_order_does_not_matter() {
        let base = RuleConfig::default();
        let mut reversed = base.clone();
        reversed.exclude_dirs.reverse();
        reversed.exclude_files.reverse();
        let a = RuleSet::new(&base, &[], false);
        let b = RuleSet::new(&reversed, &[], false);
        for name in ["node_modules", "x.egg-info", "src", "build", "lib"] {
            assert_eq!(a.is_excluded_dir(name), b.is_excluded_dir(name), "{name}");
        }
        for name in ["a.log", "b.rs", "c.so"] {
            assert_eq!(a.is_excluded_file(name), b.is_excluded_file(name), "{name}");
        }
    }

    #[test]
    fn shell_wildcards_and_classes() {
        let base = RuleConfig {
            exclude_dirs: vec!["cache-?".into(), "[ab]uild".into()],
            exclude_files: vec!["[!a]*.dat".into()],
            preserve: vec![],
        };
        let rules = RuleSet::new(&base, &[], false);
        assert!(rules.is_excluded_dir("cache-1"));
        assert!(!rules.is_excluded_dir("cache-12"));
        assert!(rules.is_excluded_dir("build"));
        assert!(!rules.is_excluded_dir("guild"));
        assert!(rules.is_excluded_file("x.dat"));
        assert!(!rules.is_excluded_file("a.dat"));
    }

    #[test]
    fn broken_glob_matches_literally() {
        let base = RuleConfig {
            exclude_dirs: vec!["[oops".into()],
            exclude_files: vec![],
            preserve: vec![],
        };
        let rules = RuleSet::new(&base, &[], false);
        assert!(rules.is_excluded_dir("[oops"));
        assert!(!rules.is_excluded_dir("o"));
    }
}
