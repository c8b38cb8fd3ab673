//! Config module.
//! Provides configuration types, built-in rule lists, the optional XML rules
//! file, size parsing and pre-run path validation.

pub mod paths;
pub mod size;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{path_has_symlink_ancestor, resolve_config_path};
pub use size::parse_size;
pub use types::{Config, LogLevel, RuleConfig, TransferMode};
pub use validate::{prepare_destination, validate_paths};
pub use xml::{create_template_config, load_rules_file, RulesFile};

/// Environment variable naming an explicit rules file.
pub const CONFIG_ENV: &str = "GITMIG_CONFIG";

/// Marker directory that identifies a repository.
pub const REPO_MARKER: &str = ".git";

/// Directories that are never copied unless the user overrides the list.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDEs
    ".idea",
    ".vscode",
    // Python
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    "venv",
    ".venv",
    "env",
    ".env", // the directory, not the file
    ".tox",
    ".nox",
    "*.egg-info",
    // Node / web
    "node_modules",
    "bower_components",
    ".next",
    ".nuxt",
    ".output",
    ".cache",
    // Build artifacts
    "dist",
    "build",
    "target",
    "bin",
    "obj",
    "out",
    ".parcel-cache",
    // Misc
    ".DS_Store",
    "Thumbs.db",
    ".turbo",
];

/// File name patterns that are never copied.
pub const DEFAULT_EXCLUDE_FILES: &[&str] = &[
    "*.log", "*.tmp", "*.temp", "*.bak", "*.swp", "*.pyc", "*.pyo", "*.class", "*.dll", "*.exe",
    "*.o", "*.so", "*.dylib",
];

/// File name patterns that are always copied, whatever the exclusions say.
pub const DEFAULT_PRESERVE: &[&str] = &[".env", ".env.*"];
