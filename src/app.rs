//! Application orchestrator.
//! Loads the rules file, applies CLI overrides, initializes logging, installs
//! the interrupt handler, validates paths and runs the engine.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use gitmig::cli::Args;
use gitmig::config::paths::ConfigLocation;
use gitmig::config::{create_template_config, load_rules_file, resolve_config_path};
use gitmig::output as out;
use gitmig::{shutdown, Config, Engine, GitMigError};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let location = resolve_config_path(args.config.as_deref());

    // Handle --print-config / --init-config before logging init
    if args.print_config {
        print_config_location(location.as_ref());
        return Ok(());
    }
    if args.init_config {
        let loc = location.context("Could not determine a config path; pass --config PATH")?;
        create_template_config(&loc.path)?;
        out::print_success(&format!(
            "A template gitmig config was written to: {}",
            loc.path.display()
        ));
        out::print_info("Edit the pattern lists to taste. Lists you delete fall back to the built-in rules.");
        return Ok(());
    }

    // File settings first, CLI wins.
    let mut cfg = Config::default();
    if let Some(loc) = location.as_ref()
        && let Some(file) = load_rules_file(loc)?
    {
        file.apply(&mut cfg);
    }
    args.apply_overrides(&mut cfg)?;

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard is dropped on the second interrupt so buffered file logs still land
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            if shutdown::request() {
                if let Ok(mut g) = guard_slot.lock() {
                    let _ = g.take();
                }
                std::process::exit(130);
            }
            out::print_warn("Received interrupt; stopping after the current file (press Ctrl-C again to abort now)...");
        })
        .context("failed to install signal handler")?;
    }

    debug!("Starting gitmig: {:?}", args);

    let result = (|| -> Result<()> {
        cfg.validate().inspect_err(log_failure)?;
        let mut engine = Engine::new(cfg);
        let stats = engine.run().inspect_err(log_failure)?;
        info!(
            repos = stats.repos,
            files = stats.files_transferred,
            skipped = stats.files_skipped,
            failed = stats.failed,
            "Migration finished"
        );
        Ok(())
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location(location: Option<&ConfigLocation>) {
    let Some(loc) = location else {
        out::print_error("Could not determine a default config path.");
        return;
    };
    if loc.explicit {
        out::print_info(&format!("Using rules file (explicit):\n  {}\n", loc.path.display()));
    } else {
        out::print_info(&format!("Default gitmig config path:\n  {}\n", loc.path.display()));
    }
    if loc.path.exists() {
        out::print_info("A config file exists at that location.");
    } else if loc.explicit {
        out::print_warn("That file does not exist; a run would fail until it is created.");
    } else {
        out::print_info("No config file exists there yet; built-in rules apply. Use --init-config to write one.");
    }
}

fn log_failure(e: &GitMigError) {
    let code = e.code();
    match e {
        GitMigError::SourceNotDirectory(path) => {
            error!(code, kind = "source_not_directory", path = %path.display(), "Validation failed")
        }
        GitMigError::DestinationNotDirectory(path) => {
            error!(code, kind = "destination_not_directory", path = %path.display(), "Validation failed")
        }
        GitMigError::DestinationInsideSource { dest, source_dir } => {
            error!(code, kind = "destination_inside_source", dest = %dest.display(), source = %source_dir.display(), "Validation failed")
        }
        GitMigError::CreateDestination { path, reason } => {
            error!(code, kind = "create_destination", path = %path.display(), %reason, "Migration failed")
        }
        GitMigError::Interrupted => {
            error!(code, kind = "interrupted", "Migration aborted by user")
        }
        _ => error!(code, kind = "migration_error", error = ?e, "Migration failed"),
    }
}
