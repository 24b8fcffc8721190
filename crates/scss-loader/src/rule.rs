//! The module rule handed to the bundler.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

use crate::pattern::Pattern;
use crate::postcss::PostcssOptionsResolver;

/// A bundler module rule: a file pattern plus an ordered loader chain
///
/// Serializes to the webpack rule shape:
///
/// ```text
/// { "test": "...", "use": ["style-loader", { "loader": "css-loader", ... }, ...] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRule {
    pub test: Pattern,
    #[serde(rename = "use")]
    pub uses: Vec<RuleUse>,
}

impl ModuleRule {
    /// The per-file PostCSS callback, if the chain has a PostCSS step
    pub fn postcss_resolver(&self) -> Option<&PostcssOptionsResolver> {
        self.uses.iter().find_map(|step| match step {
            RuleUse::Postcss(postcss) => Some(&postcss.options.postcss_options),
            _ => None,
        })
    }

    /// Loader names in chain order
    pub fn loader_names(&self) -> Vec<&str> {
        self.uses.iter().filter_map(RuleUse::loader_name).collect()
    }
}

/// One step of a rule's `use` chain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleUse {
    /// A bare loader identifier
    Loader(Cow<'static, str>),
    Css(CssLoaderStep),
    Postcss(PostcssLoaderStep),
}

impl RuleUse {
    pub fn loader_name(&self) -> Option<&str> {
        match self {
            Self::Loader(name) => Some(name.as_ref()),
            Self::Css(css) => css.loader(),
            Self::Postcss(postcss) => Some(postcss.loader.as_ref()),
        }
    }
}

/// `{ loader: "css-loader", ...overrides }`
///
/// Keys live at the top level of the step, next to `loader`, exactly as
/// the caller supplied them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssLoaderStep {
    #[serde(flatten)]
    pub entries: IndexMap<String, Value>,
}

impl CssLoaderStep {
    pub fn loader(&self) -> Option<&str> {
        self.entries.get("loader").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostcssLoaderStep {
    pub loader: Cow<'static, str>,
    pub options: PostcssLoaderOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostcssLoaderOptions {
    #[serde(rename = "postcssOptions")]
    pub postcss_options: PostcssOptionsResolver,
}
