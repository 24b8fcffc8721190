//! Declarative loader configuration
//!
//! [`LoaderConfig`] is the file form of [`LoaderOptions`]. The Tailwind config
//! path function is expressed as a template expanded with the captures of the
//! rule pattern (`$name`, `${1}`, see [`regex::Captures::expand`]).
//!
//! ```toml
//! dev = false
//! regex = 'apps/(?P<app>[^/]+)/.*\.scss$'
//! tailwind_config = "apps/$app/tailwind.config.js"
//! dirs = ["styles"]
//!
//! [css_loader]
//! importLoaders = 1
//!
//! [[postcss_plugins]]
//! name = "cssnano"
//! options = { preset = "default" }
//! ```

use indexmap::IndexMap;
use regex::Captures;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::dirs::resolve_dirs;
use crate::error::Result;
use crate::options::LoaderOptions;
use crate::pattern::Pattern;
use crate::postcss::PostcssPlugin;

fn default_regex() -> String {
    r"\.scss$".to_string()
}

fn default_tailwind_config() -> String {
    "tailwind.config.js".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Use `style-loader` instead of extracting CSS
    #[serde(default)]
    pub dev: bool,

    /// Static `postcss-import` search paths
    #[serde(default)]
    pub dirs: Vec<String>,

    /// Rule pattern (Rust regex syntax)
    #[serde(default = "default_regex")]
    pub regex: String,

    /// Tailwind config path template, expanded with the pattern's captures.
    /// Relative results are resolved against the config root.
    #[serde(default = "default_tailwind_config")]
    pub tailwind_config: String,

    /// Extra `css-loader` keys
    #[serde(default)]
    pub css_loader: IndexMap<String, Value>,

    #[serde(default)]
    pub postcss_plugins: Vec<PluginSpec>,

    /// Sub-directories appended to `dirs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_dirs: Option<ImportDirs>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            dev: false,
            dirs: Vec::new(),
            regex: default_regex(),
            tailwind_config: default_tailwind_config(),
            css_loader: IndexMap::new(),
            postcss_plugins: Vec::new(),
            import_dirs: None,
        }
    }
}

/// A PostCSS plugin declared in config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,
    #[serde(default)]
    pub options: Value,
}

impl From<PluginSpec> for PostcssPlugin {
    fn from(spec: PluginSpec) -> Self {
        PostcssPlugin::custom(spec.name, spec.options)
    }
}

/// Sub-directories of `base` (relative to the config root) to add as import paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDirs {
    pub base: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl LoaderConfig {
    /// Build loader options, resolving relative paths against `root`
    ///
    /// # Errors
    ///
    /// Fails on an invalid `regex` or `import_dirs.pattern`, or when
    /// `import_dirs.base` cannot be read.
    pub fn into_options(self, root: &Path) -> Result<LoaderOptions> {
        let regex = Pattern::new(&self.regex)?;

        let mut dirs = self.dirs;
        if let Some(import_dirs) = &self.import_dirs {
            let pattern = import_dirs.pattern.as_deref().map(Pattern::new).transpose()?;
            let found = resolve_dirs(root.join(&import_dirs.base), pattern.as_ref())?;
            dirs.extend(found.iter().map(|dir| dir.to_string_lossy().into_owned()));
        }

        let template = self.tailwind_config;
        let root = root.to_path_buf();
        let options = LoaderOptions::new(self.dev, dirs, regex, move |captures: &Captures<'_>| {
            expand_tailwind_config(&template, captures, &root)
        })
        .with_postcss_plugins(self.postcss_plugins.into_iter().map(PostcssPlugin::from));

        Ok(if self.css_loader.is_empty() {
            options
        } else {
            options.with_css_loader_configuration(self.css_loader)
        })
    }
}

fn expand_tailwind_config(template: &str, captures: &Captures<'_>, root: &Path) -> anyhow::Result<PathBuf> {
    let mut expanded = String::new();
    captures.expand(template, &mut expanded);
    if expanded.is_empty() {
        anyhow::bail!(
            "tailwind config template `{}` expanded to an empty path for `{}`",
            template,
            captures.get(0).map_or("", |m| m.as_str())
        );
    }

    let path = PathBuf::from(expanded);
    Ok(if path.is_relative() {
        root.join(path)
    } else {
        path
    })
}
