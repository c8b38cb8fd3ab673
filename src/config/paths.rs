//! Default path helpers and symlink checks.
//! Determines where the rules file lives and detects symlinked ancestors for
//! log file safety.

use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Where the rules file is expected, and whether the user named it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    /// True for --config or GITMIG_CONFIG; such a file must exist.
    pub explicit: bool,
}

/// OS-appropriate default rules file path.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("gitmig");
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("gitmig")
                .join("config.xml")
        })
    }
}

/// Pick the rules file: `--config`, then `GITMIG_CONFIG`, then the OS default.
pub fn resolve_config_path(cli: Option<&Path>) -> Option<ConfigLocation> {
    if let Some(p) = cli {
        return Some(ConfigLocation {
            path: p.to_path_buf(),
            explicit: true,
        });
    }
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(ConfigLocation {
            path: PathBuf::from(p),
            explicit: true,
        });
    }
    default_config_path().map(|path| ConfigLocation {
        path,
        explicit: false,
    })
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
