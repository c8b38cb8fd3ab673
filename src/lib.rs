//! Core library for `gitmig`.
//!
//! Copies or archives every git repository found directly under a source
//! folder, leaving out dependency caches and build output while always
//! keeping `.env` files. The pipeline is:
//!
//! - [`discover`]: find repositories (folders holding a `.git` directory)
//! - [`scan`]: walk one repository and filter it through the [`rules`]
//! - [`fs_ops`]: copy the survivors or stream them into a zip
//! - [`report`]: print per-repository lines and the run summary
//!
//! [`engine::Engine`] drives the pipeline; [`config`] builds its input.

pub mod cli;
pub mod config;
pub mod discover;
pub mod engine;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod report;
pub mod rules;
pub mod scan;
pub mod shutdown;
pub mod stats;

pub use config::{Config, LogLevel, RuleConfig, TransferMode};
pub use engine::Engine;
pub use errors::GitMigError;
pub use rules::RuleSet;
pub use scan::{CandidateFile, ScanResult};
pub use stats::RunStats;
