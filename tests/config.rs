//! Configuration system tests
//!
//! Tests for config paths, composer config, and the template catalog file.

use inlay::config::ComposerConfig;
use inlay::config_paths;
use inlay::runtime::TemplateCatalog;
use inlay::templates::YamlTemplateCatalog;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("inlay"));
}

#[test]
fn test_config_files_end_with_yaml() {
    let config = config_paths::config_file().unwrap();
    assert!(config.ends_with("config.yaml"));

    let templates = config_paths::templates_file().unwrap();
    assert!(templates.ends_with("templates.yaml"));
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    let dir = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&dir));
    assert!(logs.ends_with("logs"));
}

// ========================================================================
// ComposerConfig Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = ComposerConfig::default();
    assert_eq!(config.debounce_ms, 300);
    assert_eq!(config.cache_capacity, 50);
    assert_eq!(config.search_limit, 20);
    assert_eq!(config.separator, ' ');
    assert!(config.clear_on_send);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: ComposerConfig = serde_yaml::from_str("debounce_ms: 120\n").unwrap();
    assert_eq!(config.debounce_ms, 120);
    assert_eq!(config.search_limit, 20);
    assert!(config.clear_on_send);
}

#[test]
fn test_empty_config_is_default() {
    let config: ComposerConfig = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, ComposerConfig::default());
}

#[test]
fn test_config_serialization_roundtrip() {
    let config = ComposerConfig {
        debounce_ms: 150,
        cache_capacity: 10,
        search_limit: 5,
        separator: '\u{a0}',
        clear_on_send: false,
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    let back: ComposerConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_save_to_and_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = ComposerConfig {
        search_limit: 7,
        clear_on_send: false,
        ..ComposerConfig::default()
    };
    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert_eq!(ComposerConfig::load_from(&path), config);
}

#[test]
fn test_load_from_missing_or_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    assert_eq!(ComposerConfig::load_from(&path), ComposerConfig::default());

    std::fs::write(&path, "search_limit: lots\n").unwrap();
    assert_eq!(ComposerConfig::load_from(&path), ComposerConfig::default());
}

// ========================================================================
// Template Catalog Tests
// ========================================================================

#[test]
fn test_template_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.yaml");
    std::fs::write(
        &path,
        "templates:\n  - id: standup\n    title: Standup\n    body: \"Yesterday:\\nToday:\\n\"\n",
    )
    .unwrap();

    let catalog = YamlTemplateCatalog::from_file(&path).unwrap();
    let items = catalog.templates();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Standup");
    assert_eq!(items[0].body, "Yesterday:\nToday:\n");
    assert!(items[0].category.is_empty());
}

#[test]
fn test_template_catalog_rejects_bad_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.yaml");
    std::fs::write(&path, "templates: [unclosed").unwrap();
    assert!(YamlTemplateCatalog::from_file(&path).is_err());
}
