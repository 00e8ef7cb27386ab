//! Configuration loading and graceful degradation
//!
//! Tests that manipulate FOP_CONFIG are marked with #[serial] so they do not
//! race each other on the process environment.

use fop_common::config::{load_from_path, ConfigResolver, PortalConfig, CONFIG_ENV_VAR};
use fop_common::pipeline::{TotalScope, DEFAULT_MAX_ITEMS};
use fop_common::screens::{review_queue, Screen};
use fop_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let config = load_from_path(&missing).unwrap();
    assert_eq!(config, PortalConfig::default());
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "max_items = [not toml").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_file_values_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
max_items = 15

[logging]
level = "debug"

[bus]
slot_key = "tenant7.viewState"

[screens.schedules]
max_items = 5
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.bus.slot_key, "tenant7.viewState");
    assert_eq!(config.max_items_for(Screen::Schedules), 5);
    assert_eq!(config.max_items_for(Screen::Bulletins), 15);
}

#[test]
#[serial]
fn test_env_var_used_when_no_cli_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("from_env.toml");
    fs::write(&path, "max_items = 7").unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let config = ConfigResolver::new(None).load().unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.max_items, 7);
}

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join("env.toml");
    let cli_path = temp_dir.path().join("cli.toml");
    fs::write(&env_path, "max_items = 7").unwrap();
    fs::write(&cli_path, "max_items = 9").unwrap();

    env::set_var(CONFIG_ENV_VAR, &env_path);
    let resolver = ConfigResolver::new(Some(Path::new(&cli_path)));
    assert_eq!(resolver.config_path(), Some(cli_path.clone()));
    let config = resolver.load().unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.max_items, 9);
}

#[test]
fn test_tune_applies_overrides_to_preset() {
    let config = PortalConfig::from_toml_str(
        r#"
[screens.review-queue]
max_items = 2
total_scope = "partitioned"
"#,
    )
    .unwrap();

    let records: Vec<serde_json::Value> = (0..4)
        .map(|n| serde_json::json!({ "Title": format!("item {}", n), "ItemType": "Report" }))
        .collect();

    let preset = review_queue::pipeline(None);
    let tuned = config.tune(Screen::ReviewQueue, preset);
    let list = tuned.derive(&records, &Default::default());
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.showing, 4);

    let untuned = PortalConfig::default().tune(Screen::ReviewQueue, review_queue::pipeline(None));
    assert_eq!(untuned.derive(&records, &Default::default()).items.len(), 4);
    assert_eq!(config.total_scope_for(Screen::ReviewQueue), Some(TotalScope::Partitioned));
    assert_eq!(PortalConfig::default().max_items_for(Screen::ReviewQueue), DEFAULT_MAX_ITEMS);
}
