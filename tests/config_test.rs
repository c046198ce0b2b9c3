//! Configuration loading tests
//!
//! Verifies default creation, persisted values, and clamping of
//! out-of-range startup parameters.

use speakpad::config::Config;
use tempfile::tempdir;

#[test]
fn test_default_config_created_on_first_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speakpad.cfg");

    let config = Config::load_from(path.clone()).unwrap();

    assert!(path.exists());
    assert_eq!(config.rate(), 1.0);
    assert_eq!(config.pitch(), 1.0);
    assert_eq!(config.voice(), None);
}

#[test]
fn test_values_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speakpad.cfg");

    let mut config = Config::load_from(path.clone()).unwrap();
    config.set("speech", "rate", "1.50");
    config.set("speech", "pitch", "0.75");
    config.set("speech", "voice", "alpha");
    config.save().unwrap();

    let reloaded = Config::load_from(path).unwrap();
    assert_eq!(reloaded.rate(), 1.5);
    assert_eq!(reloaded.pitch(), 0.75);
    assert_eq!(reloaded.voice(), Some("alpha".to_string()));
}

#[test]
fn test_out_of_range_values_clamped_on_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speakpad.cfg");

    let mut config = Config::load_from(path.clone()).unwrap();
    config.set("speech", "rate", "9.0");
    config.set("speech", "pitch", "0.1");
    config.save().unwrap();

    let reloaded = Config::load_from(path).unwrap();
    assert_eq!(reloaded.rate(), 2.0);
    assert_eq!(reloaded.pitch(), 0.5);
}

#[test]
fn test_garbage_values_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speakpad.cfg");

    let mut config = Config::load_from(path.clone()).unwrap();
    config.set("speech", "rate", "fast");
    config.save().unwrap();

    let reloaded = Config::load_from(path).unwrap();
    assert_eq!(reloaded.rate(), 1.0);
}

#[test]
fn test_empty_voice_means_no_preference() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speakpad.cfg");

    let mut config = Config::load_from(path.clone()).unwrap();
    config.set("speech", "voice", "");
    config.save().unwrap();

    let reloaded = Config::load_from(path).unwrap();
    assert_eq!(reloaded.voice(), None);
}
