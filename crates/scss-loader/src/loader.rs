//! SCSS rule builder
//!
//! [`ScssLoader`] stores a copy of its [`LoaderOptions`] and turns them into a
//! [`ModuleRule`] with a fixed four-step chain:
//!
//! ```text
//! style-loader | mini-css-extract → css-loader → postcss-loader → sass-loader
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

use crate::options::{LoaderOptions, TailwindConfigPathFn};
use crate::pattern::Pattern;
use crate::postcss::{PostcssOptionsResolver, PostcssPlugin};
use crate::rule::{CssLoaderStep, ModuleRule, PostcssLoaderOptions, PostcssLoaderStep, RuleUse};

/// Injects `<style>` tags; used in development
pub const STYLE_LOADER: &str = "style-loader";

/// Loader shipped by mini-css-extract-plugin; writes CSS to separate files
pub const MINI_CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/dist/loader";

pub const CSS_LOADER: &str = "css-loader";
pub const POSTCSS_LOADER: &str = "postcss-loader";
pub const SASS_LOADER: &str = "sass-loader";

/// Builds the SCSS module rule from stored options
#[derive(Clone)]
pub struct ScssLoader {
    dev: bool,
    dirs: Vec<String>,
    regex: Pattern,
    tailwind_config_path: TailwindConfigPathFn,
    css_loader_configuration: IndexMap<String, Value>,
    postcss_plugins: Vec<PostcssPlugin>,
}

impl ScssLoader {
    /// # Example
    ///
    /// ```
    /// use scss_loader::{LoaderOptions, Pattern, ScssLoader};
    /// use std::path::PathBuf;
    ///
    /// let loader = ScssLoader::new(LoaderOptions::new(
    ///     false,
    ///     ["src/styles"],
    ///     Pattern::new(r"\.scss$").unwrap(),
    ///     |_| Ok(PathBuf::from("tailwind.config.js")),
    /// ));
    ///
    /// let rule = loader.rule();
    /// assert_eq!(
    ///     rule.loader_names(),
    ///     vec!["mini-css-extract-plugin/dist/loader", "css-loader", "postcss-loader", "sass-loader"]
    /// );
    /// ```
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            dev: options.dev,
            dirs: options.dirs,
            regex: options.regex,
            tailwind_config_path: options.tailwind_config_path,
            css_loader_configuration: options.css_loader_configuration.unwrap_or_default(),
            postcss_plugins: options.postcss_plugins.unwrap_or_default(),
        }
    }

    /// Produce the rule. Calling this repeatedly yields equal rules.
    pub fn rule(&self) -> ModuleRule {
        debug!(
            "[scss-loader] Building rule for {} (dev: {}, {} import dirs, {} extra plugins)",
            self.regex,
            self.dev,
            self.dirs.len(),
            self.postcss_plugins.len()
        );

        ModuleRule {
            test: self.regex.clone(),
            uses: vec![
                self.style_step(),
                self.css_step(),
                self.postcss_step(),
                RuleUse::Loader(Cow::Borrowed(SASS_LOADER)),
            ],
        }
    }

    fn style_step(&self) -> RuleUse {
        let loader = if self.dev {
            STYLE_LOADER
        } else {
            MINI_CSS_EXTRACT_LOADER
        };
        RuleUse::Loader(Cow::Borrowed(loader))
    }

    fn css_step(&self) -> RuleUse {
        let mut entries = IndexMap::with_capacity(1 + self.css_loader_configuration.len());
        entries.insert("loader".to_string(), Value::from(CSS_LOADER));
        // Overwrite merge: caller keys replace defaults, nested values are not merged
        entries.extend(
            self.css_loader_configuration
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        RuleUse::Css(CssLoaderStep { entries })
    }

    fn postcss_step(&self) -> RuleUse {
        RuleUse::Postcss(PostcssLoaderStep {
            loader: Cow::Borrowed(POSTCSS_LOADER),
            options: PostcssLoaderOptions {
                postcss_options: PostcssOptionsResolver::new(
                    self.regex.clone(),
                    self.dirs.clone(),
                    self.tailwind_config_path.clone(),
                    self.postcss_plugins.clone(),
                ),
            },
        })
    }
}

impl fmt::Debug for ScssLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScssLoader")
            .field("dev", &self.dev)
            .field("dirs", &self.dirs)
            .field("regex", &self.regex)
            .field("css_loader_configuration", &self.css_loader_configuration)
            .field("postcss_plugins", &self.postcss_plugins)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn loader(dev: bool) -> ScssLoader {
        ScssLoader::new(LoaderOptions::new(
            dev,
            ["src/styles"],
            Pattern::new(r"\.scss$").unwrap(),
            |_| Ok(PathBuf::from("tailwind.config.js")),
        ))
    }

    #[test]
    fn test_dev_uses_style_loader() {
        let rule = loader(true).rule();
        assert_eq!(rule.uses[0], RuleUse::Loader(Cow::Borrowed(STYLE_LOADER)));
    }

    #[test]
    fn test_prod_uses_extract_loader() {
        let rule = loader(false).rule();
        assert_eq!(rule.uses[0].loader_name(), Some(MINI_CSS_EXTRACT_LOADER));
    }

    #[test]
    fn test_chain_has_four_steps_ending_in_sass() {
        let rule = loader(true).rule();
        assert_eq!(rule.uses.len(), 4);
        assert_eq!(
            rule.loader_names(),
            vec![STYLE_LOADER, CSS_LOADER, POSTCSS_LOADER, SASS_LOADER]
        );
    }

    #[test]
    fn test_css_step_defaults_to_bare_loader() {
        let rule = loader(true).rule();
        let RuleUse::Css(css) = &rule.uses[1] else {
            panic!("expected css-loader step, got {:?}", rule.uses[1]);
        };
        assert_eq!(css.entries.len(), 1);
        assert_eq!(css.loader(), Some(CSS_LOADER));
    }

    #[test]
    fn test_css_override_replaces_nested_values_wholesale() {
        let options = LoaderOptions::new(
            true,
            Vec::<String>::new(),
            Pattern::new(r"\.scss$").unwrap(),
            |_| Ok(PathBuf::from("tailwind.config.js")),
        )
        .with_css_loader_option("options", json!({ "modules": true }));

        let rule = ScssLoader::new(options).rule();
        let RuleUse::Css(css) = &rule.uses[1] else {
            panic!("expected css-loader step");
        };
        assert_eq!(css.get("options"), Some(&json!({ "modules": true })));
        assert_eq!(css.loader(), Some(CSS_LOADER));
    }

    #[test]
    fn test_rule_serializes_to_webpack_shape() {
        let json = serde_json::to_value(loader(true).rule()).unwrap();
        assert_eq!(
            json,
            json!({
                "test": r"\.scss$",
                "use": [
                    "style-loader",
                    { "loader": "css-loader" },
                    { "loader": "postcss-loader", "options": { "postcssOptions": "per-file" } },
                    "sass-loader"
                ]
            })
        );
    }
}
