use polarkit_core::AngleUnit;
use polarkit_settings::{PolarAxesConfig, SettingsError, TickLocation};
use tempfile::TempDir;

fn sample_config() -> PolarAxesConfig {
    let mut config = PolarAxesConfig::new();
    config.frame.pole = [1.0, -2.0, 0.5];
    config.frame.maximum_radius = 12.5;
    config.frame.maximum_angle = 270.0;
    config.frame.number_of_radial_axes = 7;
    config.ticks.tick_location = TickLocation::Both;
    config.labels.angle_unit = AngleUnit::Radians;
    config.labels.auto_label_scaling = false;
    config.labels.label_exponent = -3;
    config.labels.radial_label_format = "%.2f".parse().unwrap();
    config.visibility.polar_arcs = false;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frame.toml");

    let config = sample_config();
    config.save_to_file(&path).unwrap();
    let loaded = PolarAxesConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frame.json");

    let config = sample_config();
    config.save_to_file(&path).unwrap();
    let loaded = PolarAxesConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("frame.toml");

    PolarAxesConfig::new().save_to_file(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frame.toml");
    std::fs::write(&path, "[frame]\nmaximum_angle = 500.0\n").unwrap();

    let err = PolarAxesConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = PolarAxesConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}

#[test]
fn test_save_refuses_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frame.json");

    let mut config = PolarAxesConfig::new();
    config.ticks.number_of_polar_ticks = 1000;
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}
