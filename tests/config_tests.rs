use linkwrap_lib::config::{ConfigError, DEFAULT_CONFIG_FILE, HighlightConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_config_file() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let config_path = temp_dir.path().join("linkwrap.toml");
    let config_content = r#"
min-url-length = 10
max-url-length = 1024
line-class = "xterm-row"
link-class = "xterm-link"
link-style = "color: red;"
open-in-new-tab = false
"#;
    fs::write(&config_path, config_content).expect("Failed to write test config file");

    let config = HighlightConfig::load(&config_path).expect("config should load");
    assert_eq!(config.min_url_length, 10);
    assert_eq!(config.max_url_length, 1024);
    assert_eq!(config.line_class, "xterm-row");
    assert_eq!(config.link_class, "xterm-link");
    assert_eq!(config.link_style, "color: red;");
    assert!(!config.open_in_new_tab);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let missing = temp_dir.path().join("nope.toml");
    match HighlightConfig::load(&missing) {
        Err(ConfigError::Io { .. }) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_load_invalid_toml_is_parse_error() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "max-url-length = \"not a number\"").expect("write failed");
    match HighlightConfig::load(&config_path) {
        Err(ConfigError::Parse { .. }) => {}
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn test_discover_uses_default_file_when_present() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), "max-url-length = 99").expect("write failed");

    let config = HighlightConfig::discover(temp_dir.path()).expect("discover should succeed");
    assert_eq!(config.max_url_length, 99);
    // Unspecified fields keep their defaults.
    assert_eq!(config.min_url_length, 7);
}

#[test]
fn test_discover_falls_back_to_defaults() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let config = HighlightConfig::discover(temp_dir.path()).expect("discover should succeed");
    assert_eq!(config, HighlightConfig::default());
}
