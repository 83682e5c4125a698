use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use log::{Metadata, Record};
use stamp::config::Config;
use stamp::error::StampError;
use stamp::resolver::{get_value_source, EnvSource, JsonSource, ValueSource, YamlSource};
use tempfile::TempDir;

static CAPTURED_WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.level() == log::Level::Warn {
            CAPTURED_WARNINGS
                .lock()
                .unwrap()
                .push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn env_table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_env_source_resolves_set_variables() {
    let source = EnvSource::new("FOO,BAR", env_table(&[("FOO", "hello"), ("BAR", "world")]));
    let map = source.resolve().unwrap();

    assert_eq!(map.get("FOO").map(String::as_str), Some("hello"));
    assert_eq!(map.get("BAR").map(String::as_str), Some("world"));
}

#[test]
fn test_env_source_unset_variable_is_empty_string() {
    let source = EnvSource::new("FOO,BAR", env_table(&[("FOO", "hello")]));
    let map = source.resolve().unwrap();

    assert_eq!(map.get("FOO").map(String::as_str), Some("hello"));
    assert_eq!(map.get("BAR").map(String::as_str), Some(""));
}

#[test]
fn test_env_source_names_are_not_trimmed() {
    let source = EnvSource::new("FOO, BAR", env_table(&[("FOO", "hello"), ("BAR", "world")]));
    let map = source.resolve().unwrap();

    // The literal name " BAR" is looked up, not "BAR".
    assert_eq!(map.get("FOO").map(String::as_str), Some("hello"));
    assert_eq!(map.get(" BAR").map(String::as_str), Some(""));
    assert!(!map.contains_key("BAR"));
}

#[test]
fn test_env_source_warns_on_empty_and_unset() {
    let _ = log::set_logger(&CAPTURE_LOGGER);
    log::set_max_level(log::LevelFilter::Warn);

    let source = EnvSource::new("EMPTY,UNSET,SET", env_table(&[("EMPTY", ""), ("SET", "x")]));
    let map = source.resolve().unwrap();

    assert_eq!(map.get("EMPTY").map(String::as_str), Some(""));
    assert_eq!(map.get("UNSET").map(String::as_str), Some(""));

    let warnings = CAPTURED_WARNINGS.lock().unwrap();
    assert!(warnings.iter().any(|w| w == "EMPTY is not set"));
    assert!(warnings.iter().any(|w| w == "UNSET is not set"));
    assert!(!warnings.iter().any(|w| w == "SET is not set"));
}

#[test]
fn test_env_source_skips_stray_commas() {
    let source = EnvSource::new("FOO,,BAR,", env_table(&[]));
    let map = source.resolve().unwrap();

    assert_eq!(map.len(), 2);
    assert!(map.contains_key("FOO"));
    assert!(map.contains_key("BAR"));
}

#[test]
fn test_yaml_source_extracts_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.yaml");
    fs::write(&path, "dev:\n  HOST: localhost\n  PORT: \"8080\"\nprod:\n  HOST: example.com\n").unwrap();

    let map = YamlSource::new(&path, "dev").resolve().unwrap();

    assert_eq!(map.get("HOST").map(String::as_str), Some("localhost"));
    assert_eq!(map.get("PORT").map(String::as_str), Some("8080"));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_yaml_source_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.yaml");

    match YamlSource::new(&path, "dev").resolve() {
        Err(StampError::IoError(_)) => (),
        other => panic!("Expected IoError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_yaml_source_malformed_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.yaml");
    fs::write(&path, "dev: [unclosed\n").unwrap();

    match YamlSource::new(&path, "dev").resolve() {
        Err(StampError::ParseError { .. }) => (),
        other => panic!("Expected ParseError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_yaml_source_missing_key() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.yaml");
    fs::write(&path, "dev:\n  HOST: localhost\n").unwrap();

    match YamlSource::new(&path, "prod").resolve() {
        Err(StampError::MissingKeyError { key, .. }) => assert_eq!(key, "prod"),
        other => panic!("Expected MissingKeyError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_yaml_source_non_string_value_is_shape_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.yaml");
    fs::write(&path, "dev:\n  HOST: localhost\n  PORT: 8080\n").unwrap();

    match YamlSource::new(&path, "dev").resolve() {
        Err(StampError::ShapeError { key, .. }) => assert_eq!(key, "dev"),
        other => panic!("Expected ShapeError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_yaml_source_non_mapping_section_is_shape_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.yaml");
    fs::write(&path, "dev: just a string\n").unwrap();

    match YamlSource::new(&path, "dev").resolve() {
        Err(StampError::ShapeError { .. }) => (),
        other => panic!("Expected ShapeError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_json_source_extracts_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.json");
    fs::write(&path, r#"{"dev":{"X":"1","Y":"2"},"prod":{"X":"3"}}"#).unwrap();

    let map = JsonSource::new(&path, "dev").resolve().unwrap();

    assert_eq!(map.get("X").map(String::as_str), Some("1"));
    assert_eq!(map.get("Y").map(String::as_str), Some("2"));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_json_source_non_string_value_is_shape_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.json");
    fs::write(&path, r#"{"dev":{"X":1}}"#).unwrap();

    match JsonSource::new(&path, "dev").resolve() {
        Err(StampError::ShapeError { .. }) => (),
        other => panic!("Expected ShapeError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_json_source_malformed_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.json");
    fs::write(&path, "{not json").unwrap();

    match JsonSource::new(&path, "dev").resolve() {
        Err(StampError::ParseError { .. }) => (),
        other => panic!("Expected ParseError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_get_value_source_unknown_mode() {
    match get_value_source(&Config::default()) {
        Err(StampError::ConfigError(msg)) => assert!(msg.contains("unknown mode")),
        other => panic!("Expected ConfigError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_get_value_source_requires_companion_key() {
    let config = Config {
        yaml_path: Some("values.yaml".to_string()),
        ..Config::default()
    };
    match get_value_source(&config) {
        Err(StampError::ConfigError(msg)) => assert!(msg.contains("SEV_YAML_KEY")),
        other => panic!("Expected ConfigError, got {:?}", other.map(|_| ())),
    }

    let config = Config {
        json_path: Some("values.json".to_string()),
        ..Config::default()
    };
    match get_value_source(&config) {
        Err(StampError::ConfigError(msg)) => assert!(msg.contains("SEV_JSON_KEY")),
        other => panic!("Expected ConfigError, got {:?}", other.map(|_| ())),
    }
}
