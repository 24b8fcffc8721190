//! Input options for [`crate::ScssLoader`].

use indexmap::IndexMap;
use regex::Captures;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::pattern::Pattern;
use crate::postcss::PostcssPlugin;

/// Derives the Tailwind config path from the match against a resource path.
///
/// Errors are returned as-is from [`crate::PostcssOptionsResolver::resolve`].
pub type TailwindConfigPathFn =
    Arc<dyn Fn(&Captures<'_>) -> anyhow::Result<PathBuf> + Send + Sync>;

/// Options for building an SCSS module rule
///
/// No validation happens here or in the loader. The caller owns the
/// correctness of `dirs` and of the Tailwind config path function.
#[derive(Clone)]
pub struct LoaderOptions {
    /// Inject styles with `style-loader` instead of extracting CSS files
    pub dev: bool,

    /// Search path for `postcss-import`
    pub dirs: Vec<String>,

    /// Files the rule applies to; re-applied per file for Tailwind lookup
    pub regex: Pattern,

    pub tailwind_config_path: TailwindConfigPathFn,

    /// Extra `css-loader` keys, shallow-merged over `{ loader: "css-loader" }`
    pub css_loader_configuration: Option<IndexMap<String, Value>>,

    /// Appended after Import, Tailwind and Autoprefixer
    pub postcss_plugins: Option<Vec<PostcssPlugin>>,
}

impl LoaderOptions {
    /// Create options with no CSS loader overrides and no extra plugins
    ///
    /// # Example
    ///
    /// ```
    /// use scss_loader::{LoaderOptions, Pattern};
    /// use std::path::PathBuf;
    ///
    /// let options = LoaderOptions::new(
    ///     true,
    ///     ["src/styles"],
    ///     Pattern::new(r"\.scss$").unwrap(),
    ///     |_| Ok(PathBuf::from("tailwind.config.js")),
    /// );
    /// assert!(options.dev);
    /// ```
    pub fn new<I, S, F>(dev: bool, dirs: I, regex: Pattern, tailwind_config_path: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Captures<'_>) -> anyhow::Result<PathBuf> + Send + Sync + 'static,
    {
        Self {
            dev,
            dirs: dirs.into_iter().map(Into::into).collect(),
            regex,
            tailwind_config_path: Arc::new(tailwind_config_path),
            css_loader_configuration: None,
            postcss_plugins: None,
        }
    }

    /// Replace the `css-loader` overrides
    pub fn with_css_loader_configuration(mut self, configuration: IndexMap<String, Value>) -> Self {
        self.css_loader_configuration = Some(configuration);
        self
    }

    /// Set one `css-loader` key
    pub fn with_css_loader_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.css_loader_configuration
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value);
        self
    }

    /// Append one PostCSS plugin after the built-in ones
    pub fn with_postcss_plugin(mut self, plugin: PostcssPlugin) -> Self {
        self.postcss_plugins.get_or_insert_with(Vec::new).push(plugin);
        self
    }

    pub fn with_postcss_plugins(mut self, plugins: impl IntoIterator<Item = PostcssPlugin>) -> Self {
        self.postcss_plugins
            .get_or_insert_with(Vec::new)
            .extend(plugins);
        self
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("dev", &self.dev)
            .field("dirs", &self.dirs)
            .field("regex", &self.regex)
            .field("css_loader_configuration", &self.css_loader_configuration)
            .field("postcss_plugins", &self.postcss_plugins)
            .finish_non_exhaustive()
    }
}
