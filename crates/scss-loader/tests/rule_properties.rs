//! Behavior of the generated rule and its per-file PostCSS callback.

use indexmap::IndexMap;
use scss_loader::{
    scss_loader, LoaderContext, LoaderOptions, ModuleRule, Pattern, PostcssPlugin, RuleUse,
    ScssLoader, MINI_CSS_EXTRACT_LOADER, STYLE_LOADER,
};
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

fn scss_options(dev: bool) -> LoaderOptions {
    LoaderOptions::new(
        dev,
        ["styles", "node_modules"],
        Pattern::new(r"\.scss$").unwrap(),
        |_| Ok(PathBuf::from("/app/tailwind.config.js")),
    )
}

fn css_step(rule: &ModuleRule) -> &scss_loader::CssLoaderStep {
    match &rule.uses[1] {
        RuleUse::Css(css) => css,
        other => panic!("expected css-loader step, got {:?}", other),
    }
}

#[test]
fn rule_test_is_the_supplied_pattern() {
    let pattern = Pattern::new(r"components/.*\.scss$").unwrap();
    let rule = scss_loader(LoaderOptions::new(false, ["x"], pattern.clone(), |_| {
        Ok(PathBuf::from("t.js"))
    }));
    assert_eq!(rule.test, pattern);
    assert_eq!(rule.postcss_resolver().unwrap().pattern(), &pattern);
}

#[test]
fn style_step_follows_dev_flag() {
    assert_eq!(
        scss_loader(scss_options(true)).uses[0].loader_name(),
        Some(STYLE_LOADER)
    );
    assert_eq!(
        scss_loader(scss_options(false)).uses[0].loader_name(),
        Some(MINI_CSS_EXTRACT_LOADER)
    );
}

#[test]
fn css_overrides_win_and_other_keys_are_untouched() {
    let mut overrides = IndexMap::new();
    overrides.insert("importLoaders".to_string(), json!(2));
    overrides.insert("loader".to_string(), json!("custom-css-loader"));

    let rule = scss_loader(scss_options(true).with_css_loader_configuration(overrides));
    let css = css_step(&rule);

    assert_eq!(css.get("importLoaders"), Some(&json!(2)));
    assert_eq!(css.loader(), Some("custom-css-loader"));
    assert_eq!(css.entries.len(), 2);
    assert!(css.get("sourceMap").is_none());
}

#[test]
fn css_overrides_flatten_into_the_step() {
    let rule = scss_loader(scss_options(true).with_css_loader_option("sourceMap", json!(true)));
    let json = serde_json::to_value(&rule.uses[1]).unwrap();
    assert_eq!(json, json!({ "loader": "css-loader", "sourceMap": true }));
}

#[test]
fn rule_is_idempotent() {
    let loader = ScssLoader::new(
        scss_options(false)
            .with_css_loader_option("modules", json!(false))
            .with_postcss_plugin(PostcssPlugin::custom("cssnano", json!({}))),
    );
    assert_eq!(loader.rule(), loader.rule());
    assert_eq!(
        serde_json::to_value(loader.rule()).unwrap(),
        serde_json::to_value(loader.rule()).unwrap()
    );
}

#[test]
fn matching_path_gets_import_tailwind_autoprefixer() {
    let rule = scss_loader(scss_options(true));
    let options = rule
        .postcss_resolver()
        .unwrap()
        .resolve(&LoaderContext::new("/app/foo.scss"))
        .unwrap();

    let plugins = options.plugins();
    assert_eq!(plugins.len(), 3);
    assert_eq!(
        plugins[0],
        PostcssPlugin::Import {
            path: vec!["styles".to_string(), "node_modules".to_string()]
        }
    );
    assert_eq!(
        plugins[1],
        PostcssPlugin::Tailwind {
            config: PathBuf::from("/app/tailwind.config.js")
        }
    );
    assert_eq!(plugins[2], PostcssPlugin::Autoprefixer);
}

#[test]
fn non_matching_path_gets_empty_options() {
    let rule = scss_loader(scss_options(true));
    let options = rule
        .postcss_resolver()
        .unwrap()
        .resolve(&LoaderContext::new("/app/foo.css"))
        .unwrap();

    assert!(options.is_empty());
    assert_eq!(serde_json::to_value(&options).unwrap(), json!({}));
}

#[test]
fn extra_plugins_are_appended_in_order() {
    let plugin_x = PostcssPlugin::custom("postcss-x", json!({ "level": 1 }));
    let plugin_y = PostcssPlugin::custom("postcss-y", serde_json::Value::Null);
    let rule = scss_loader(
        scss_options(true).with_postcss_plugins([plugin_x.clone(), plugin_y.clone()]),
    );

    let options = rule
        .postcss_resolver()
        .unwrap()
        .resolve(&LoaderContext::new("/app/foo.scss"))
        .unwrap();

    let plugins = options.plugins();
    assert_eq!(plugins.len(), 5);
    assert_eq!(plugins[3], plugin_x);
    assert_eq!(plugins.last(), Some(&plugin_y));
}

#[derive(Debug)]
struct NotFound;

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not found")
    }
}

impl std::error::Error for NotFound {}

#[test]
fn tailwind_path_error_propagates_unchanged() {
    let rule = scss_loader(LoaderOptions::new(
        false,
        ["styles"],
        Pattern::new(r"\.scss$").unwrap(),
        |_| Err(NotFound.into()),
    ));

    let err = rule
        .postcss_resolver()
        .unwrap()
        .resolve(&LoaderContext::new("/app/foo.scss"))
        .unwrap_err();

    assert_eq!(err.to_string(), "not found");
    assert!(err.downcast_ref::<NotFound>().is_some());
}

#[test]
fn tailwind_path_is_not_called_for_non_matching_files() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let rule = scss_loader(LoaderOptions::new(
        false,
        ["styles"],
        Pattern::new(r"\.scss$").unwrap(),
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(PathBuf::from("t.js"))
        },
    ));
    let resolver = rule.postcss_resolver().unwrap();

    resolver.resolve(&LoaderContext::new("/app/a.css")).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    resolver.resolve(&LoaderContext::new("/app/a.scss")).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn captures_drive_tailwind_config_lookup() {
    let rule = scss_loader(LoaderOptions::new(
        true,
        ["shared"],
        Pattern::new(r"/packages/([^/]+)/.*\.scss$").unwrap(),
        |caps| Ok(PathBuf::from(format!("/packages/{}/tailwind.config.js", &caps[1]))),
    ));
    let resolver = rule.postcss_resolver().unwrap();

    let ui = resolver
        .resolve(&LoaderContext::new("/repo/packages/ui/button.scss"))
        .unwrap();
    let docs = resolver
        .resolve(&LoaderContext::new("/repo/packages/docs/page.scss"))
        .unwrap();

    assert_eq!(
        ui.plugins()[1],
        PostcssPlugin::Tailwind {
            config: PathBuf::from("/packages/ui/tailwind.config.js")
        }
    );
    assert_eq!(
        docs.plugins()[1],
        PostcssPlugin::Tailwind {
            config: PathBuf::from("/packages/docs/tailwind.config.js")
        }
    );
}

#[test]
fn resolver_can_run_on_many_threads() {
    let rule = scss_loader(scss_options(false));
    let resolver = rule.postcss_resolver().unwrap().clone();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let resolver = resolver.clone();
            thread::spawn(move || {
                let path = format!("/app/file-{}.scss", i);
                resolver
                    .resolve(&LoaderContext::new(&path))
                    .unwrap()
                    .plugins()
                    .len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}
