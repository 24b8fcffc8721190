//! File-based config discovery
//!
//! Finds and loads a [`LoaderConfig`] from a project directory. Sources are
//! layered with figment, later sources winning:
//!
//! 1. [`LoaderConfig::default`]
//! 2. `scss-loader.toml`, or the `scssLoader` field of `package.json`
//! 3. `SCSS_LOADER_*` environment variables (e.g. `SCSS_LOADER_DEV=true`)

use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::LoaderConfig;
use crate::error::{ConfigError, Result};
use crate::options::LoaderOptions;

pub const CONFIG_FILE: &str = "scss-loader.toml";
pub const PACKAGE_JSON_FIELD: &str = "scssLoader";
pub const ENV_PREFIX: &str = "SCSS_LOADER_";

/// Searches a root directory for loader configuration
///
/// # Example
///
/// ```no_run
/// use scss_loader::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let options = discovery.load_options().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `scss-loader.toml`
    /// 2. `package.json` with a non-null `scssLoader` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_JSON_FIELD).is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<LoaderConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        self.load_from(&path)
    }

    /// Load config and turn it into loader options rooted at this directory
    pub fn load_options(&self) -> Result<LoaderOptions> {
        self.load()?.into_options(&self.root)
    }

    /// Load config from a specific file path
    ///
    /// `package.json` files are read through their `scssLoader` field; any
    /// other file is read as TOML.
    pub fn load_from(&self, path: &Path) -> Result<LoaderConfig> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        debug!("[scss-loader] Loading config from {}", path.display());

        let mut figment = Figment::new().merge(Serialized::defaults(LoaderConfig::default()));

        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            figment = figment.merge(Serialized::defaults(self.package_json_field(path)?));
        } else {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: Some(e.to_string()),
            })
    }

    fn package_json_field(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;

        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid_value("package.json", format!("Invalid JSON: {}", e)))?;

        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(ConfigError::invalid_value(
                PACKAGE_JSON_FIELD,
                format!("Add a '{}' field to your package.json", PACKAGE_JSON_FIELD),
            )),
        }
    }
}

/// Discover config in the current directory and build loader options
pub fn discover() -> Result<LoaderOptions> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_options()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn find_prefers_toml_over_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "dev = true\n").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "scssLoader": { "dev": false } }"#,
        )
        .unwrap();

        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn find_skips_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());

        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "app", "scssLoader": null }"#,
        )
        .unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_from_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        let result = discovery.load_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
