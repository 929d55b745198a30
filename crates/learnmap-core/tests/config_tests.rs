use std::fs;

use learnmap_core::config::{
    DEFAULT_DATA_DIR, DEFAULT_FALLBACK_PREREQUISITE, DEFAULT_HIT_RADIUS, DEFAULT_STAGE,
};
use learnmap_core::{Config, ConfigError, SurfaceSettings};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.curriculum.default_stage, DEFAULT_STAGE);
    assert_eq!(config.curriculum.fallback_prerequisite, DEFAULT_FALLBACK_PREREQUISITE);
    assert_eq!(config.surface.hit_radius, DEFAULT_HIT_RADIUS);
    assert_eq!(config.storage.data_dir, DEFAULT_DATA_DIR);
}

#[test]
fn test_default_config_string_round_trips() {
    let toml_str = Config::default_config_string();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed.surface.width, Config::default().surface.width);
    assert!(parsed.validate().is_ok());
}

#[test]
fn test_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("learnmap.toml");
    fs::write(
        &path,
        r#"
[curriculum]
fallback_prerequisite = "基础运算"

[surface]
hit_radius = 30.0
pulse_period_ms = 800
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.curriculum.fallback_prerequisite, "基础运算");
    assert_eq!(config.surface.hit_radius, 30.0);

    let settings = SurfaceSettings::from(&config.surface);
    assert_eq!(settings.pulse_period.as_millis(), 800);
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("learnmap.toml");
    fs::write(&path, "[surface]\nzoom_in_factor = 0.0\n").unwrap();

    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_from_file_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("learnmap.toml");
    fs::write(&path, "[surface\nwidth = ").unwrap();

    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_from_file_rejects_nan_and_flat_radius() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("learnmap.toml");

    fs::write(&path, "[surface]\nwidth = nan\n").unwrap();
    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::Invalid(_))
    ));

    fs::write(&path, "[surface]\nnode_radius_min = 20.0\nnode_radius_max = 20.0\n").unwrap();
    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::Invalid(_))
    ));
}
