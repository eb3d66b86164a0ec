//! Optional user configuration loaded from `planline.toml`.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User configuration. Every field is optional; missing values fall back
/// to the document defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Budget figure for a fresh plan
    pub budget: Option<f64>,
    /// Fiscal-year label (Buddhist Era); default is computed from the clock
    pub fiscal_year: Option<i32>,
    /// Directory exports are written into (default: current directory)
    pub export_dir: Option<PathBuf>,
}

/// Locate the default config file, if the platform gives us a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "planline").map(|dirs| dirs.config_dir().join("planline.toml"))
}

/// Load config from `path`, or from the default location when `path` is
/// `None`.
///
/// A missing file yields defaults. A malformed or unreadable file also
/// yields defaults, with a warning for the caller to print; config problems
/// never stop the application from starting.
pub fn load_config(path: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();

    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return (Config::default(), warnings),
        },
    };

    if !path.exists() {
        return (Config::default(), warnings);
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warnings.push(format!("could not read config {}: {}", path.display(), e));
            return (Config::default(), warnings);
        }
    };

    match toml::from_str(&content) {
        Ok(config) => (config, warnings),
        Err(e) => {
            warnings.push(format!(
                "ignoring malformed config {}: {}",
                path.display(),
                e
            ));
            (Config::default(), warnings)
        }
    }
}
