use std::fs;
use std::path::PathBuf;

use dalab_cli::util::{ensure_output_dir, resolve_config, validate_csv_file};

#[test]
fn resolve_config_without_file_uses_defaults() {
    let config = resolve_config(None, None).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.demographic.country_of_interest, "India");
}

#[test]
fn output_dir_flag_wins_over_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dalab.json");
    fs::write(
        &path,
        r#"{ "output_dir": "from-file", "medical": { "bmi_threshold": 30.0 } }"#,
    )
    .unwrap();

    let config = resolve_config(Some(&path), None).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("from-file"));
    assert_eq!(config.medical.bmi_threshold, 30.0);

    let flag = PathBuf::from("from-flag");
    let config = resolve_config(Some(&path), Some(&flag)).unwrap();
    assert_eq!(config.output_dir, flag);
    assert_eq!(config.medical.bmi_threshold, 30.0);
}

#[test]
fn unreadable_config_is_an_error() {
    let missing = PathBuf::from("/nonexistent/dalab.json");
    let err = resolve_config(Some(&missing), None).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn validate_csv_file_checks_extension_and_existence() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("DATA.CSV");
    fs::write(&csv, "a\n1\n").unwrap();
    assert!(validate_csv_file(&csv).is_ok());

    let tsv = dir.path().join("data.tsv");
    fs::write(&tsv, "a\n1\n").unwrap();
    assert!(validate_csv_file(&tsv).is_err());

    assert!(validate_csv_file(dir.path().join("absent.csv")).is_err());
}

#[test]
fn ensure_output_dir_creates_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    ensure_output_dir(&nested).unwrap();
    assert!(nested.is_dir());
    // idempotent
    ensure_output_dir(&nested).unwrap();
}
