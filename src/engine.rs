//! Migration engine.
//! Discover → (scan → transfer)* → report. Repositories are handled one at a
//! time and independently: a failed transfer only costs that repository.

use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{prepare_destination, Config, TransferMode};
use crate::discover::find_repos;
use crate::errors::GitMigError;
use crate::fs_ops::{archive_repo, copy_repo, ExistingPolicy};
use crate::output::{Console, Tone};
use crate::report;
use crate::rules::RuleSet;
use crate::scan::{scan_repo, ScanResult};
use crate::shutdown;
use crate::stats::RunStats;

/// Owns the run: immutable configuration and rules, mutable statistics.
#[derive(Debug)]
pub struct Engine {
    config: Config,
    rules: RuleSet,
    stats: RunStats,
    console: Console,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        let console = Console::new(config.quiet, config.verbose);
        Self {
            rules: RuleSet::from_config(&config),
            config,
            stats: RunStats::default(),
            console,
        }
    }

    /// Replace the console (tests use a capturing one).
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn find_repos(&self) -> Vec<String> {
        find_repos(&self.config.source_dir, self.config.only_repos.as_deref())
    }

    fn repo_path(&self, name: &str) -> PathBuf {
        self.config.source_dir.join(name)
    }

    pub fn scan_repo(&mut self, name: &str) -> ScanResult {
        let root = self.repo_path(name);
        scan_repo(
            &root,
            name,
            &self.rules,
            self.config.max_size,
            &mut self.stats,
            &self.console,
        )
    }

    /// Copy or archive one scanned repository. Returns the bytes it contributes.
    pub fn transfer_repo(&mut self, name: &str, scan: &ScanResult) -> Result<u64, GitMigError> {
        let src_repo = self.repo_path(name);
        let policy = ExistingPolicy {
            skip_existing: self.config.skip_existing,
            force: self.config.force,
        };
        match self.config.mode {
            TransferMode::Copy => copy_repo(
                &src_repo,
                &self.config.dest_dir.join(name),
                &scan.files,
                policy,
                &mut self.stats,
                &self.console,
            ),
            TransferMode::Archive => archive_repo(
                &src_repo,
                &self.config.dest_dir,
                name,
                &scan.files,
                policy,
                &mut self.stats,
                &self.console,
            ),
        }
    }

    /// Run the whole migration and print the report.
    ///
    /// Only an interrupt or an uncreatable destination ends the run with an
    /// error; everything else is logged and counted.
    pub fn run(&mut self) -> Result<&RunStats, GitMigError> {
        let started = Instant::now();
        self.console.line("");

        prepare_destination(&self.config.dest_dir, self.config.dry_run)?;

        let repos = self.find_repos();
        if repos.is_empty() {
            let msg = format!(
                "No git repositories found in {}",
                self.config.source_dir.display()
            );
            self.console.line(self.console.paint(&msg, Tone::Yellow));
            return Ok(&self.stats);
        }

        self.console.line(format!(
            "Detected {} repositories in {}",
            self.console.paint(&repos.len().to_string(), Tone::Cyan),
            self.config.source_dir.display()
        ));
        self.console.line("");
        info!(count = repos.len(), dry_run = self.config.dry_run, "starting migration");

        for (idx, name) in repos.iter().enumerate() {
            shutdown::check()?;
            report::repo_header(&self.console, idx + 1, repos.len(), name);

            let scan = self.scan_repo(name);
            report::repo_plan(&self.console, self.config.mode, &scan);

            if self.config.dry_run {
                self.stats.bytes += scan.total_bytes();
                self.stats.files_transferred += scan.files.len() as u64;
            } else {
                let bytes = self.transfer_repo(name, &scan)?;
                self.stats.bytes += bytes;
            }
            self.stats.files_skipped += scan.skipped_total();
            self.stats.repos += 1;
            debug!(repo = %name, candidates = scan.files.len(), skipped = scan.skipped_total(), "repository done");
            self.console.line("");
        }

        report::print_summary(&self.console, &self.config, &self.stats, started.elapsed());
        Ok(&self.stats)
    }
}
