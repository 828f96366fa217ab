//! Configuration loading tests
//!
//! Tests that configuration loads correctly from a file and that defaults
//! apply when no file exists. The config is read-only by design.

use polysay::config::Config;
use std::io::Write;

#[test]
fn test_defaults_without_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.cfg");

    let config = Config::load_from(&path).expect("defaults should load");

    assert_eq!(config.rate(), 1.0);
    assert_eq!(config.pitch(), 1.0);
    assert_eq!(config.backend(), "auto");
    assert_eq!(config.confidence_threshold(), 0.5);
    assert_eq!(config.max_candidates(), 3);
}

#[test]
fn test_values_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("polysay.cfg");

    let mut file = std::fs::File::create(&path).expect("create config");
    writeln!(file, "[speech]").unwrap();
    writeln!(file, "rate=1.5").unwrap();
    writeln!(file, "pitch=0.75").unwrap();
    writeln!(file, "backend=espeak").unwrap();
    writeln!(file, "[identify]").unwrap();
    writeln!(file, "confidence_threshold=0.8").unwrap();
    writeln!(file, "max_candidates=5").unwrap();
    drop(file);

    let config = Config::load_from(&path).expect("config should load");

    assert_eq!(config.rate(), 1.5);
    assert_eq!(config.pitch(), 0.75);
    assert_eq!(config.backend(), "espeak");
    assert!((config.confidence_threshold() - 0.8).abs() < 1e-6);
    assert_eq!(config.max_candidates(), 5);
}

#[test]
fn test_malformed_values_fall_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("polysay.cfg");

    let mut file = std::fs::File::create(&path).expect("create config");
    writeln!(file, "[speech]").unwrap();
    writeln!(file, "rate=fast").unwrap();
    writeln!(file, "[identify]").unwrap();
    writeln!(file, "max_candidates=0").unwrap();
    drop(file);

    let config = Config::load_from(&path).expect("config should load");

    assert_eq!(config.rate(), 1.0);
    // A zero cap would make the fallback useless; it clamps to one
    assert_eq!(config.max_candidates(), 1);
}

#[test]
fn test_loading_never_creates_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.cfg");

    let config = Config::load_from(&path).expect("defaults should load");
    let _ = config.rate();

    assert!(!path.exists(), "config loading must not write to disk");
    assert_eq!(config.path(), &path);
}
