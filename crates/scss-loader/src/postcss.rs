//! PostCSS plugin descriptors and the per-file options resolver
//!
//! The PostCSS step of an SCSS rule does not carry a fixed plugin list.
//! Instead it carries a [`PostcssOptionsResolver`] that the bundler calls once
//! per processed file:
//!
//! ```text
//! resourcePath → pattern.captures() ─ no match → {}
//!                       │
//!                       └─ match → tailwind_config_path(captures)
//!                                     ↓
//!                [postcss-import(dirs), tailwindcss(config), autoprefixer, ...extras]
//! ```
//!
//! The resolver only reads data captured when the rule was built, so it is
//! safe to evaluate from several threads at once.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::options::TailwindConfigPathFn;
use crate::pattern::Pattern;

/// A PostCSS plugin entry in the resolved plugin list
#[derive(Debug, Clone, PartialEq)]
pub enum PostcssPlugin {
    /// `postcss-import` with its search path
    Import { path: Vec<String> },
    /// `tailwindcss` pointed at a config file
    Tailwind { config: PathBuf },
    /// `autoprefixer` with no options
    Autoprefixer,
    /// Any other plugin, identified by package name
    Custom { name: String, options: Value },
}

impl PostcssPlugin {
    /// Create a caller-supplied plugin entry
    pub fn custom(name: impl Into<String>, options: Value) -> Self {
        Self::Custom {
            name: name.into(),
            options,
        }
    }

    /// Package name of the plugin
    pub fn name(&self) -> &str {
        match self {
            Self::Import { .. } => "postcss-import",
            Self::Tailwind { .. } => "tailwindcss",
            Self::Autoprefixer => "autoprefixer",
            Self::Custom { name, .. } => name.as_str(),
        }
    }

    /// Options passed to the plugin, if any
    pub fn options(&self) -> Option<Value> {
        match self {
            Self::Import { path } => Some(json!({ "path": path })),
            Self::Tailwind { config } => Some(json!({ "config": config.to_string_lossy() })),
            Self::Autoprefixer => None,
            Self::Custom { options, .. } if options.is_null() => None,
            Self::Custom { options, .. } => Some(options.clone()),
        }
    }
}

#[derive(Serialize)]
struct PluginDescriptor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Value>,
}

impl Serialize for PostcssPlugin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PluginDescriptor {
            name: self.name(),
            options: self.options(),
        }
        .serialize(serializer)
    }
}

/// The value returned for one file: `{}` or `{ plugins: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostcssOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PostcssPlugin>>,
}

impl PostcssOptions {
    /// True when no plugin configuration was produced
    pub fn is_empty(&self) -> bool {
        self.plugins.is_none()
    }

    pub fn plugins(&self) -> &[PostcssPlugin] {
        self.plugins.as_deref().unwrap_or_default()
    }
}

/// What the bundler knows about the file being transformed
#[derive(Debug, Clone, Copy)]
pub struct LoaderContext<'a> {
    /// Absolute path of the file currently being processed
    pub resource_path: &'a str,
}

impl<'a> LoaderContext<'a> {
    pub fn new(resource_path: &'a str) -> Self {
        Self { resource_path }
    }
}

/// Per-file PostCSS options callback
///
/// Built by [`crate::ScssLoader::rule`] from the loader's stored options.
#[derive(Clone)]
pub struct PostcssOptionsResolver {
    pattern: Pattern,
    dirs: Vec<String>,
    tailwind_config_path: TailwindConfigPathFn,
    extra_plugins: Vec<PostcssPlugin>,
}

impl PostcssOptionsResolver {
    pub(crate) fn new(
        pattern: Pattern,
        dirs: Vec<String>,
        tailwind_config_path: TailwindConfigPathFn,
        extra_plugins: Vec<PostcssPlugin>,
    ) -> Self {
        Self {
            pattern,
            dirs,
            tailwind_config_path,
            extra_plugins,
        }
    }

    /// Compute PostCSS options for one file
    ///
    /// # Returns
    ///
    /// - `Ok(options)` with no plugins - `resource_path` does not match the pattern
    /// - `Ok(options)` with plugins - Import, Tailwind, Autoprefixer, then extras
    /// - `Err(e)` - the error returned by the Tailwind config path function, unchanged
    pub fn resolve(&self, ctx: &LoaderContext<'_>) -> anyhow::Result<PostcssOptions> {
        let Some(captures) = self.pattern.captures(ctx.resource_path) else {
            trace!(
                "[scss-loader] {} does not match {}, skipping PostCSS plugins",
                ctx.resource_path,
                self.pattern
            );
            return Ok(PostcssOptions::default());
        };

        let config = (self.tailwind_config_path)(&captures)?;
        debug!(
            "[scss-loader] {} → tailwind config {}",
            ctx.resource_path,
            config.display()
        );

        let mut plugins = Vec::with_capacity(3 + self.extra_plugins.len());
        plugins.push(PostcssPlugin::Import {
            path: self.dirs.clone(),
        });
        plugins.push(PostcssPlugin::Tailwind { config });
        plugins.push(PostcssPlugin::Autoprefixer);
        plugins.extend(self.extra_plugins.iter().cloned());

        Ok(PostcssOptions {
            plugins: Some(plugins),
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl fmt::Debug for PostcssOptionsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostcssOptionsResolver")
            .field("pattern", &self.pattern)
            .field("dirs", &self.dirs)
            .field("extra_plugins", &self.extra_plugins)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PostcssOptionsResolver {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.dirs == other.dirs
            && self.extra_plugins == other.extra_plugins
            && Arc::ptr_eq(&self.tailwind_config_path, &other.tailwind_config_path)
    }
}

/// A callable has no data representation; rule dumps show a marker instead.
impl Serialize for PostcssOptionsResolver {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("per-file")
    }
}
