//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - One positional path is the destination (source = current directory);
//!   two are SOURCE DESTINATION.
//! - --exclude and --only take comma-separated lists and may be repeated.
//! - --log-level wins over --debug, which wins over --verbose/--quiet.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel, TransferMode};
use crate::config::parse_size;
use crate::errors::GitMigError;

const EXAMPLES: &str = "\
Examples:
  gitmig ./backup                       copy every repo in the current directory
  gitmig ~/Projects /mnt/backup         copy from a specific source
  gitmig ./backup --dry-run             preview only
  gitmig ./backup --zip                 one .zip per repository
  gitmig ./backup --exclude '*.txt,temp/'
  gitmig ./backup --only api,web --max-size 10M";

/// Copy a folder of git repositories without their dependency caches and build output.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, after_help = EXAMPLES)]
pub struct Args {
    /// DEST, or SOURCE DEST.
    #[arg(
        value_name = "PATHS",
        num_args = 1..=2,
        required_unless_present_any = ["print_config", "init_config"],
        value_hint = ValueHint::DirPath
    )]
    pub paths: Vec<PathBuf>,

    /// Preview mode: show what would be copied without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Compress each repository into <DEST>/<repo>.zip.
    #[arg(long)]
    pub zip: bool,

    /// Show a file type breakdown at the end.
    #[arg(long)]
    pub stats: bool,

    /// Show every extension in the breakdown, not just the top 15 (implies --stats).
    #[arg(long)]
    pub stats_all: bool,

    /// Extra patterns to exclude, comma-separated; a trailing '/' marks a directory.
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Copy the .git folder too.
    #[arg(long)]
    pub include_git: bool,

    /// Show every file handled.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip files larger than this (e.g. 500K, 10M, 1G); 0 disables the limit.
    #[arg(long, value_name = "SIZE")]
    pub max_size: Option<String>,

    /// Only migrate these repositories (comma-separated).
    #[arg(long, value_name = "REPOS", value_delimiter = ',')]
    pub only: Vec<String>,

    /// Overwrite existing files without a warning.
    #[arg(long)]
    pub force: bool,

    /// Leave files that already exist at the destination untouched (resume).
    #[arg(long)]
    pub skip_existing: bool,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Diagnostic log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json: bool,

    /// Rules file to use instead of $GITMIG_CONFIG or the default location.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the rules file location gitmig will use, then exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a rules file holding the built-in patterns, then exit.
    #[arg(long, conflicts_with = "print_config")]
    pub init_config: bool,
}

impl Args {
    /// (source, destination). A lone path is the destination and the source
    /// is the current directory.
    pub fn resolved_paths(&self) -> Option<(PathBuf, PathBuf)> {
        match self.paths.as_slice() {
            [dest] => Some((PathBuf::from("."), dest.clone())),
            [source, dest] => Some((source.clone(), dest.clone())),
            _ => None,
        }
    }

    /// Effective log level derived from flags, or None to keep the config value.
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if let Some(level) = &self.log_level {
            return Some(level.clone());
        }
        if self.debug {
            return Some(LogLevel::Debug);
        }
        if self.verbose {
            return Some(LogLevel::Info);
        }
        if self.quiet {
            return Some(LogLevel::Quiet);
        }
        None
    }

    /// Non-empty, trimmed --only names, or None when the flag was not used.
    pub fn only_repos(&self) -> Option<Vec<String>> {
        let names: Vec<String> = self
            .only
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() { None } else { Some(names) }
    }

    /// Apply CLI values to a Config that already holds file/default settings.
    pub fn apply_overrides(&self, cfg: &mut Config) -> Result<(), GitMigError> {
        if let Some((source, dest)) = self.resolved_paths() {
            cfg.source_dir = source;
            cfg.dest_dir = dest;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if let Some(raw) = &self.max_size {
            // 0 means no ceiling
            cfg.max_size = Some(parse_size(raw)?).filter(|&n| n > 0);
        }
        if self.zip {
            cfg.mode = TransferMode::Archive;
        }
        cfg.dry_run |= self.dry_run;
        cfg.show_stats |= self.stats || self.stats_all;
        cfg.stats_all |= self.stats_all;
        cfg.include_git |= self.include_git;
        cfg.verbose |= self.verbose;
        cfg.quiet |= self.quiet;
        cfg.force |= self.force;
        cfg.skip_existing |= self.skip_existing;
        cfg.extra_excludes.extend(
            self.exclude
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        );
        if let Some(names) = self.only_repos() {
            cfg.only_repos = Some(names);
        }
        Ok(())
    }
}

pub fn parse() -> Args {
    Args::parse()
}
