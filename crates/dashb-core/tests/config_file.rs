//! Config file round-trips against a temporary directory.

use dashb_core::{AppError, Config, ConfigError, Locale, OverlapPolicy, Variant};

#[test]
fn test_load_creates_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashb").join("config.toml");

    let config = Config::load_from(&path).unwrap();

    assert!(path.exists(), "default config should be written");
    assert_eq!(config.dashboard.refresh_minutes, 15);
    assert_eq!(config.dashboard.variant, Variant::Full);
}

#[test]
fn test_save_then_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.dashboard.variant = Variant::Tv;
    config.dashboard.overlap_policy = OverlapPolicy::AllowOverlap;
    config.dashboard.locale = Locale::It;
    config.weather.city_query = "Bologna".to_string();
    config.news.max_items = Some(7);
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.dashboard.variant, Variant::Tv);
    assert_eq!(loaded.dashboard.overlap_policy, OverlapPolicy::AllowOverlap);
    assert_eq!(loaded.dashboard.locale, Locale::It);
    assert_eq!(loaded.weather.city_query, "Bologna");
    assert_eq!(loaded.news.max_items, Some(7));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[dashboard\nvariant = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("parse"), "unexpected error: {}", err);
}

#[test]
fn test_malformed_file_reports_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[dashboard\nvariant = ").unwrap();

    let err = Config::load_validated_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ParseError(_))
    ));
    assert_eq!(
        AppError::from(err).user_message(),
        "Configuration file is malformed. Check your settings."
    );
}

#[test]
fn test_invalid_settings_are_rejected_on_validated_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.dashboard.refresh_minutes = 0;
    config.save_to(&path).unwrap();

    let err = Config::load_validated_from(&path).unwrap_err();
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Invalid(summary)) => assert!(summary.contains("refresh_minutes")),
        other => panic!("expected ConfigError::Invalid, got {:?}", other),
    }
}

#[test]
fn test_valid_file_passes_validated_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let (config, validation) = Config::load_validated_from(&path).unwrap();
    assert!(validation.is_valid());
    assert_eq!(config.news.source_label, "ANSA");
}
