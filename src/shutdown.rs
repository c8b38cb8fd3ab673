//! Process-wide interrupt coordination.
//! The ctrlc handler flips a flag; the engine polls it between repositories
//! and between files so an interrupted run stops at a clean boundary.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::GitMigError;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown. Returns true if one was already pending.
#[inline]
pub fn request() -> bool {
    SHUTDOWN.swap(true, Ordering::Relaxed)
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Fail with [`GitMigError::Interrupted`] once a shutdown is pending.
#[inline]
pub fn check() -> Result<(), GitMigError> {
    if is_requested() {
        Err(GitMigError::Interrupted)
    } else {
        Ok(())
    }
}
