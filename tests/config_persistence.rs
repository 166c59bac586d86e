//! Config persistence through the user config directory
//!
//! Kept in its own test binary: it points `XDG_CONFIG_HOME` at a temp dir, which
//! would leak into path tests running in parallel.

#![cfg(not(target_os = "windows"))]

use clap::Parser;
use inlay::cli::{self, CliArgs};
use inlay::config::ComposerConfig;
use inlay::config_paths;

#[test]
fn test_load_save_via_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let path = config_paths::config_file().unwrap();
    assert_eq!(path, dir.path().join("inlay").join("config.yaml"));

    // Nothing saved yet
    let mut config = ComposerConfig::load();
    assert_eq!(config, ComposerConfig::default());

    config.set_debounce_ms(120).unwrap();
    assert!(path.exists());
    assert_eq!(ComposerConfig::load().debounce_ms, 120);

    // The CLI reads and updates the same file
    let out = cli::run(CliArgs::try_parse_from(["inlay", "config"]).unwrap()).unwrap();
    assert!(out.contains("debounce_ms: 120"), "{out}");

    let args = CliArgs::try_parse_from(["inlay", "config", "--debounce-ms", "80"]).unwrap();
    cli::run(args).unwrap();
    assert_eq!(ComposerConfig::load().debounce_ms, 80);

    // A corrupt file falls back to defaults
    std::fs::write(&path, "debounce_ms: [").unwrap();
    assert_eq!(ComposerConfig::load(), ComposerConfig::default());
}
