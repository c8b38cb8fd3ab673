//! XML rules file support.
//! - Loads pattern lists and logging settings from config.xml (quick_xml + serde).
//! - Writes a template holding the built-in rules on request (--init-config).
//!
//! Notes:
//! - A list present in the file replaces the corresponding built-in list.
//! - Unknown XML fields are rejected so typos do not silently change what gets copied.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use quick_xml::escape::escape;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{path_has_symlink_ancestor, ConfigLocation};
use super::types::{Config, LogLevel, RuleConfig};
use super::{DEFAULT_EXCLUDE_DIRS, DEFAULT_EXCLUDE_FILES, DEFAULT_PRESERVE};
use crate::errors::GitMigError;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "exclude_dirs")]
    exclude_dirs: Option<XmlPatterns>,
    #[serde(rename = "exclude_files")]
    exclude_files: Option<XmlPatterns>,
    #[serde(rename = "preserve")]
    preserve: Option<XmlPatterns>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlPatterns {
    #[serde(rename = "pattern", default)]
    patterns: Vec<String>,
}

impl XmlPatterns {
    fn cleaned(self) -> Vec<String> {
        self.patterns
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Settings read from a rules file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesFile {
    pub path: PathBuf,
    pub rules: RuleConfig,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

impl RulesFile {
    /// Copy file settings into `cfg`. CLI overrides are applied afterwards by the caller.
    pub fn apply(&self, cfg: &mut Config) {
        cfg.rules = self.rules.clone();
        if let Some(level) = &self.log_level {
            cfg.log_level = level.clone();
        }
        if self.log_file.is_some() {
            cfg.log_file = self.log_file.clone();
        }
    }
}

/// Load the rules file at `location`.
///
/// Returns Ok(None) when the default location has no file. A missing file the
/// user named explicitly, an unreadable file, or a malformed one is an error.
pub fn load_rules_file(location: &ConfigLocation) -> Result<Option<RulesFile>, GitMigError> {
    let path = &location.path;
    if !path.exists() {
        if location.explicit {
            return Err(GitMigError::ConfigNotFound(path.clone()));
        }
        debug!(path = %path.display(), "no rules file; using built-in rules");
        return Ok(None);
    }

    let invalid = |reason: String| GitMigError::ConfigInvalid {
        path: path.clone(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let parsed: XmlConfig = from_xml_str(&content).map_err(|e| invalid(e.to_string()))?;

    let defaults = RuleConfig::default();
    let rules = RuleConfig {
        exclude_dirs: parsed
            .exclude_dirs
            .map(XmlPatterns::cleaned)
            .unwrap_or(defaults.exclude_dirs),
        exclude_files: parsed
            .exclude_files
            .map(XmlPatterns::cleaned)
            .unwrap_or(defaults.exclude_files),
        preserve: parsed
            .preserve
            .map(XmlPatterns::cleaned)
            .unwrap_or(defaults.preserve),
    };

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.parse::<LogLevel>().map_err(invalid)?),
    };
    let log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() { None } else { Some(PathBuf::from(trimmed)) }
    });

    debug!(path = %path.display(), "loaded rules file");
    Ok(Some(RulesFile {
        path: path.clone(),
        rules,
        log_level,
        log_file,
    }))
}

fn pattern_block(tag: &str, patterns: &[&str]) -> String {
    let mut out = format!("  <{tag}>\n");
    for p in patterns {
        out.push_str(&format!("    <pattern>{}</pattern>\n", escape(*p)));
    }
    out.push_str(&format!("  </{tag}>\n"));
    out
}

/// Write a template rules file holding the built-in lists. Never overwrites.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let mut content = String::from(
        "<!--\n  gitmig rules\n\n  exclude_dirs   -> directory names never copied (glob, matched against the name)\n  exclude_files  -> file names never copied (glob)\n  preserve       -> file names always copied, even when excluded\n  log_level      -> quiet | normal | info | debug\n  log_file       -> optional path to a log file\n\n  A list present here replaces the built-in list. CLI flags override this file.\n-->\n<config>\n",
    );
    content.push_str(&pattern_block("exclude_dirs", DEFAULT_EXCLUDE_DIRS));
    content.push_str(&pattern_block("exclude_files", DEFAULT_EXCLUDE_FILES));
    content.push_str(&pattern_block("preserve", DEFAULT_PRESERVE));
    content.push_str("  <log_level>normal</log_level>\n</config>\n");

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("create config file '{}'", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("write config file '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(path: &Path) -> ConfigLocation {
        ConfigLocation {
            path: path.to_path_buf(),
            explicit: true,
        }
    }

    #[test]
    fn template_round_trips_to_builtin_rules() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("gitmig").join("config.xml");
        create_template_config(&path).unwrap();

        let loaded = load_rules_file(&explicit(&path)).unwrap().unwrap();
        assert_eq!(loaded.rules, RuleConfig::default());
        assert_eq!(loaded.log_level, Some(LogLevel::Normal));
        assert_eq!(loaded.log_file, None);
    }

    #[test]
    fn template_refuses_to_overwrite() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config/>").unwrap();
        assert!(create_template_config(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<config/>");
    }

    #[test]
    fn missing_default_file_is_not_an_error() {
        let td = tempfile::tempdir().unwrap();
        let loc = ConfigLocation {
            path: td.path().join("absent.xml"),
            explicit: false,
        };
        assert!(load_rules_file(&loc).unwrap().is_none());
    }

    #[test]
    fn missing_explicit_file_is_fatal() {
        let td = tempfile::tempdir().unwrap();
        let err = load_rules_file(&explicit(&td.path().join("absent.xml"))).unwrap_err();
        assert!(matches!(err, GitMigError::ConfigNotFound(_)));
    }
}
