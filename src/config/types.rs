//! Core configuration types.
//! - Config holds one run's settings; it is built once and handed to the engine.
//! - RuleConfig holds the raw glob pattern lists before compilation.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{DEFAULT_EXCLUDE_DIRS, DEFAULT_EXCLUDE_FILES, DEFAULT_PRESERVE};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Informational events
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// How candidates leave the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// Mirror each file under `<dest>/<repo>/`.
    #[default]
    Copy,
    /// One `<dest>/<repo>.zip` per repository.
    Archive,
}

/// Glob pattern lists, as written by the user or taken from the built-ins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub preserve: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        Self {
            exclude_dirs: owned(DEFAULT_EXCLUDE_DIRS),
            exclude_files: owned(DEFAULT_EXCLUDE_FILES),
            preserve: owned(DEFAULT_PRESERVE),
        }
    }
}

/// Runtime configuration for one migration run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Folder whose immediate children are scanned for repositories
    pub source_dir: PathBuf,
    /// Where copies or archives land
    pub dest_dir: PathBuf,
    /// Copy files or write one zip per repository
    pub mode: TransferMode,
    /// Scan and report only; never write to the destination
    pub dry_run: bool,
    /// Print the file-type table at the end
    pub show_stats: bool,
    /// Do not cap the file-type table
    pub stats_all: bool,
    /// Base exclusion and preservation patterns
    pub rules: RuleConfig,
    /// Extra patterns from --exclude; a trailing `/` marks a directory pattern
    pub extra_excludes: Vec<String>,
    /// Copy `.git` too
    pub include_git: bool,
    /// Print every file handled
    pub verbose: bool,
    /// Errors only
    pub quiet: bool,
    /// Skip files strictly larger than this many bytes
    pub max_size: Option<u64>,
    /// Restrict the run to these repository names
    pub only_repos: Option<Vec<String>>,
    /// Overwrite without announcing it
    pub force: bool,
    /// Leave existing destination files untouched
    pub skip_existing: bool,
    /// Diagnostic log verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Construct a Config with explicit source/destination; other fields use defaults.
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Default::default()
        }
    }
}
