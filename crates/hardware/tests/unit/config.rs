//! Configuration defaults, JSON loading and validation.

use std::io::Write;

use pipesim_core::SimError;
use pipesim_core::config::Config;
use tempfile::NamedTempFile;

#[test]
fn defaults_match_documented_values() {
    let config = Config::default();
    assert_eq!(config.memory.load_address, 96);
    assert_eq!(config.general.max_cycles, 10_000);
    assert!(!config.general.trace_stages);
    assert!(config.pipeline.drain_on_halt);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let config = Config::from_json_str(r#"{ "pipeline": { "drain_on_halt": false } }"#).unwrap();
    assert!(!config.pipeline.drain_on_halt);
    assert_eq!(config.memory.load_address, 96);
}

#[test]
fn unaligned_load_address_is_rejected() {
    let err = Config::from_json_str(r#"{ "memory": { "load_address": 98 } }"#).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn zero_cycle_cap_is_rejected() {
    let err = Config::from_json_str(r#"{ "general": { "max_cycles": 0 } }"#).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = Config::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, SimError::Json(_)), "got {err:?}");
}

#[test]
fn config_file_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "general": { "max_cycles": 50, "trace_stages": true } }"#)
        .unwrap();
    file.flush().unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.general.max_cycles, 50);
    assert!(config.general.trace_stages);
}
