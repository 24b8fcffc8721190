//! SCSS module rule builder for webpack-compatible bundlers
//!
//! Builds a module rule that compiles `.scss` files through a fixed chain:
//!
//! ```text
//! style-loader / mini-css-extract → css-loader → postcss-loader → sass-loader
//!                                                      │
//!                               postcss-import(dirs), tailwindcss(config),
//!                               autoprefixer, ...extra plugins
//! ```
//!
//! The Tailwind config used for a file is chosen per file: the rule pattern is
//! re-applied to the resource path and its captures are passed to a caller
//! supplied function.
//!
//! ## Example Usage
//!
//! ```rust
//! use scss_loader::{scss_loader, LoaderContext, LoaderOptions, Pattern};
//! use std::path::PathBuf;
//!
//! let rule = scss_loader(LoaderOptions::new(
//!     true,
//!     ["src/styles"],
//!     Pattern::new(r"apps/(?P<app>[^/]+)/.*\.scss$").unwrap(),
//!     |caps| Ok(PathBuf::from(format!("apps/{}/tailwind.config.js", &caps["app"]))),
//! ));
//!
//! let options = rule
//!     .postcss_resolver()
//!     .unwrap()
//!     .resolve(&LoaderContext::new("/repo/apps/admin/main.scss"))
//!     .unwrap();
//! assert_eq!(options.plugins().len(), 3);
//! ```
//!
//! This crate emits `tracing` events and never installs a subscriber.

pub mod config;
pub mod dirs;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod options;
pub mod pattern;
pub mod postcss;
pub mod rule;

pub use config::{ImportDirs, LoaderConfig, PluginSpec};
pub use dirs::resolve_dirs;
pub use discovery::{discover, ConfigDiscovery};
pub use error::{ConfigError, Result};
pub use loader::{
    ScssLoader, CSS_LOADER, MINI_CSS_EXTRACT_LOADER, POSTCSS_LOADER, SASS_LOADER, STYLE_LOADER,
};
pub use options::{LoaderOptions, TailwindConfigPathFn};
pub use pattern::Pattern;
pub use postcss::{LoaderContext, PostcssOptions, PostcssOptionsResolver, PostcssPlugin};
pub use rule::{CssLoaderStep, ModuleRule, PostcssLoaderOptions, PostcssLoaderStep, RuleUse};

/// Build the SCSS rule in one call
pub fn scss_loader(options: LoaderOptions) -> ModuleRule {
    ScssLoader::new(options).rule()
}
