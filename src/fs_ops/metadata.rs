//! Metadata preservation.
//! - Copies timestamps (atime, mtime) and, on Unix, permission bits from source to dest.
//! - Best-effort: failures are logged and ignored; the file content is already in place.

use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Apply `src_meta`'s times and mode to `dest`.
/// Callers pass already-fetched metadata to avoid re-statting the source.
pub fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    match set_file_times(dest, atime, mtime) {
        Ok(()) => trace!(path = %dest.display(), "set atime/mtime on destination"),
        Err(e) => {
            warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination")
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let src_mode = src_meta.permissions().mode() & 0o777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(src_mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", src_mode), error = %e, "failed to set permissions on destination");
        }
    }

    #[cfg(windows)]
    {
        if let Ok(meta) = fs::metadata(dest) {
            let mut perms = meta.permissions();
            perms.set_readonly(src_meta.permissions().readonly());
            let _ = fs::set_permissions(dest, perms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mtime_is_carried_over() {
        let td = tempfile::tempdir().unwrap();
        let src = td.path().join("a.txt");
        let dst = td.path().join("b.txt");
        fs::write(&src, "a").unwrap();
        fs::write(&dst, "a").unwrap();
        let old = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&src, old).unwrap();

        preserve_metadata(&dst, &fs::metadata(&src).unwrap());
        let got = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(got, old);
    }
}
