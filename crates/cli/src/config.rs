// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles covdiff.toml parsing with version validation and unknown key
//! warnings. Every setting is a default; command-line flags win.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::discovery;
use crate::error::{Error, Result};
use crate::filter::Granularity;

/// Explicit invocation context, constructed once at process start.
///
/// Core logic never looks up the current directory itself; the project root
/// and loaded config are threaded through every call instead.
#[derive(Debug)]
pub struct Context {
    /// Project root; relative input and output paths resolve against it.
    pub root: PathBuf,
    /// Loaded configuration, or defaults when no covdiff.toml exists.
    pub config: Config,
}

impl Context {
    /// Resolve the context from the working directory and an optional
    /// explicit config path.
    pub fn resolve(explicit_config: Option<&Path>) -> Result<Self> {
        let root = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        let config = match explicit_config {
            Some(path) => load_with_warnings(path)?,
            None => match discovery::find_config(&root) {
                Some(path) => load_with_warnings(&path)?,
                None => Config::default(),
            },
        };
        Ok(Self { root, config })
    }

    /// Resolve a possibly-relative path against the project root.
    pub fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    diff: Option<toml::Value>,

    #[serde(default)]
    filter: Option<toml::Value>,

    #[serde(default)]
    coverage: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Diff defaults.
    #[serde(default)]
    pub diff: DiffConfig,

    /// Filter defaults.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Coverage file defaults.
    #[serde(default)]
    pub coverage: CoverageConfig,
}

/// Defaults for the revision comparison.
#[derive(Debug, Deserialize)]
pub struct DiffConfig {
    /// Reference to diff from (default: "main").
    #[serde(default = "DiffConfig::default_from")]
    pub from: String,

    /// Reference to diff to (default: "HEAD").
    #[serde(default = "DiffConfig::default_to")]
    pub to: String,

    /// Include staged, pending, and untracked changes (default: true).
    #[serde(default = "DiffConfig::default_include_working_tree")]
    pub include_working_tree: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            from: Self::default_from(),
            to: Self::default_to(),
            include_working_tree: Self::default_include_working_tree(),
        }
    }
}

impl DiffConfig {
    fn default_from() -> String {
        "main".to_string()
    }

    fn default_to() -> String {
        "HEAD".to_string()
    }

    fn default_include_working_tree() -> bool {
        true
    }
}

/// Defaults for test selection.
#[derive(Debug, Default, Deserialize)]
pub struct FilterConfig {
    /// Selection granularity (default: line).
    #[serde(default)]
    pub granularity: Granularity,
}

/// Defaults for coverage file inputs.
#[derive(Debug, Default, Deserialize)]
pub struct CoverageConfig {
    /// Coverage files to load, relative to the project root.
    ///
    /// Empty means discover by convention.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Load config from a file, printing warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_with_warnings(&contents, path)
}

fn parse_with_warnings(contents: &str, path: &Path) -> Result<Config> {
    // Check version first for a targeted message.
    let version_check: VersionOnly =
        toml::from_str(contents).map_err(|e| config_error(e, path))?;
    match version_check.version {
        None => {
            return Err(Error::Config {
                message: "missing required key: version".to_string(),
                path: Some(path.to_path_buf()),
            });
        }
        Some(1) => {}
        Some(v) => {
            return Err(Error::Config {
                message: format!("unsupported config version {v} (expected 1)"),
                path: Some(path.to_path_buf()),
            });
        }
    }

    // Warn on top-level keys this version does not understand.
    let flexible: FlexibleConfig = toml::from_str(contents).map_err(|e| config_error(e, path))?;
    let _ = (flexible.version, &flexible.diff, &flexible.filter, &flexible.coverage);
    for key in flexible.unknown.keys() {
        eprintln!("warning: unknown config key `{key}` in {}", path.display());
    }

    toml::from_str(contents).map_err(|e| config_error(e, path))
}

fn config_error(e: toml::de::Error, path: &Path) -> Error {
    Error::Config {
        message: e.message().to_string(),
        path: Some(path.to_path_buf()),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
