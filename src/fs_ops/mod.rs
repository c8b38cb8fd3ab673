//! Transfer operations: plain copy or zip archive.

mod archive;
mod copy;
mod metadata;

pub use archive::{archive_repo, is_safe_archive_path};
pub use copy::copy_repo;
pub use metadata::preserve_metadata;

/// What to do when the destination file (or archive) already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExistingPolicy {
    /// Leave it alone and count it as skipped.
    pub skip_existing: bool,
    /// Overwrite without announcing it. Never changes whether the overwrite happens.
    pub force: bool,
}
