//! Configuration of a polar axes frame
//!
//! A [`PolarAxesConfig`] carries every scalar property of the polar axes
//! actor and can be stored as JSON or TOML in the platform config
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Frame geometry (pole, radius, angle, radial axis count, bounds)
//! - Polar axis ticks (count, subdivision, tick mark placement)
//! - Labels (formats, units, label scaling, polar axis title)
//! - Visibility flags for each part of the frame
//! - Text sizing

use crate::error::{ConfigError, SettingsError, SettingsResult};
use polarkit_core::constants::{
    DEFAULT_MAXIMUM_POLAR_ANGLE, DEFAULT_MAXIMUM_RADIUS, DEFAULT_NUMBER_OF_POLAR_TICKS,
    DEFAULT_NUMBER_OF_RADIAL_AXES, DEFAULT_POLAR_AXIS_TITLE, DEFAULT_RADIAL_ANGLE_FORMAT,
    DEFAULT_RADIAL_LABEL_FORMAT, DEFAULT_SCREEN_SIZE, MAXIMUM_LABEL_POWER,
    MAXIMUM_NUMBER_OF_POLAR_TICKS, MAXIMUM_NUMBER_OF_RADIAL_AXES, MAXIMUM_POLAR_ANGLE,
    MINIMUM_NUMBER_OF_POLAR_TICKS, MINIMUM_NUMBER_OF_RADIAL_AXES,
};
use polarkit_core::{AngleUnit, Bounds, FrameError, LabelFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where polar tick marks are drawn relative to the polar axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickLocation {
    /// Ticks point towards increasing angle
    Inside,
    /// Ticks point away from the frame
    #[default]
    Outside,
    /// Ticks cross the axis
    Both,
}

impl std::fmt::Display for TickLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inside => write!(f, "inside"),
            Self::Outside => write!(f, "outside"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for TickLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inside" => Ok(Self::Inside),
            "outside" => Ok(Self::Outside),
            "both" => Ok(Self::Both),
            _ => Err(format!("Unknown tick location: {}", s)),
        }
    }
}

/// Frame geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Origin of the polar frame
    pub pole: [f64; 3],
    /// Radius of the outermost arc, ignored when `auto_scale_radius` is set
    pub maximum_radius: f64,
    /// Angular span in degrees, 0 to 360
    pub maximum_angle: f64,
    /// Number of radial axes, 2 to 50
    pub number_of_radial_axes: usize,
    /// Derive the radius from the bounds instead of `maximum_radius`
    pub auto_scale_radius: bool,
    /// Bounds used when no data source supplies them
    pub bounds: Bounds,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            pole: [0.0, 0.0, 0.0],
            maximum_radius: DEFAULT_MAXIMUM_RADIUS,
            maximum_angle: DEFAULT_MAXIMUM_POLAR_ANGLE,
            number_of_radial_axes: DEFAULT_NUMBER_OF_RADIAL_AXES,
            auto_scale_radius: false,
            bounds: Bounds::default(),
        }
    }
}

/// Polar axis ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickSettings {
    /// Tick count including both endpoints
    pub number_of_polar_ticks: usize,
    /// Pick a round tick step instead of a fixed count
    pub auto_subdivide_polar_axis: bool,
    /// Placement of tick marks
    pub tick_location: TickLocation,
}

impl Default for TickSettings {
    fn default() -> Self {
        Self {
            number_of_polar_ticks: DEFAULT_NUMBER_OF_POLAR_TICKS,
            auto_subdivide_polar_axis: false,
            tick_location: TickLocation::default(),
        }
    }
}

/// Label formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Format of polar labels under manual label scaling
    pub radial_label_format: LabelFormat,
    /// Format of the angle shown in radial axis titles
    pub radial_angle_format: LabelFormat,
    /// Append the angle unit to radial axis titles
    pub radial_units: bool,
    /// Unit of the angles shown in radial axis titles
    pub angle_unit: AngleUnit,
    /// Choose the label exponent and precision automatically
    pub auto_label_scaling: bool,
    /// Power of ten labels are divided by under manual label scaling
    pub label_exponent: i32,
    /// Title of the polar axis
    pub polar_axis_title: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            radial_label_format: default_format(DEFAULT_RADIAL_LABEL_FORMAT),
            radial_angle_format: default_format(DEFAULT_RADIAL_ANGLE_FORMAT),
            radial_units: true,
            angle_unit: AngleUnit::default(),
            auto_label_scaling: true,
            label_exponent: 0,
            polar_axis_title: DEFAULT_POLAR_AXIS_TITLE.to_string(),
        }
    }
}

fn default_format(source: &str) -> LabelFormat {
    source.parse().unwrap_or_else(|_| LabelFormat::fixed(1))
}

/// Visibility of each part of the frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilitySettings {
    pub radial_axes: bool,
    pub radial_title: bool,
    pub polar_arcs: bool,
    pub polar_tick: bool,
    pub polar_label: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            radial_axes: true,
            radial_title: true,
            polar_arcs: true,
            polar_tick: true,
            polar_label: true,
        }
    }
}

/// Text sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Target height of titles and labels in pixels
    pub screen_size: f64,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            screen_size: DEFAULT_SCREEN_SIZE,
        }
    }
}

/// Complete polar axes configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PolarAxesConfig {
    pub frame: FrameSettings,
    pub ticks: TickSettings,
    pub labels: LabelSettings,
    pub visibility: VisibilitySettings,
    pub text: TextSettings,
}

impl PolarAxesConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("polarkit").join("polar_axes.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded polar axes config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match FileFormat::from_path(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => self.to_toml()?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved polar axes config to {}", path.display());

        Ok(())
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let frame = &self.frame;

        if frame.pole.iter().any(|v| !v.is_finite()) {
            return Err(FrameError::NonFinite {
                property: "frame.pole".to_string(),
            }
            .into());
        }

        if !frame.maximum_radius.is_finite() || frame.maximum_radius < 0.0 {
            return Err(ConfigError::out_of_range("frame.maximum_radius", frame.maximum_radius).into());
        }

        if !(0.0..=MAXIMUM_POLAR_ANGLE).contains(&frame.maximum_angle) {
            return Err(ConfigError::out_of_range("frame.maximum_angle", frame.maximum_angle).into());
        }

        if !(MINIMUM_NUMBER_OF_RADIAL_AXES..=MAXIMUM_NUMBER_OF_RADIAL_AXES)
            .contains(&frame.number_of_radial_axes)
        {
            return Err(ConfigError::out_of_range(
                "frame.number_of_radial_axes",
                frame.number_of_radial_axes,
            )
            .into());
        }

        Bounds::try_from_array(frame.bounds.to_array())?;

        if !(MINIMUM_NUMBER_OF_POLAR_TICKS..=MAXIMUM_NUMBER_OF_POLAR_TICKS)
            .contains(&self.ticks.number_of_polar_ticks)
        {
            return Err(ConfigError::out_of_range(
                "ticks.number_of_polar_ticks",
                self.ticks.number_of_polar_ticks,
            )
            .into());
        }

        if self.labels.label_exponent.abs() > MAXIMUM_LABEL_POWER {
            return Err(ConfigError::out_of_range(
                "labels.label_exponent",
                self.labels.label_exponent,
            )
            .into());
        }

        if !self.text.screen_size.is_finite() || self.text.screen_size <= 0.0 {
            return Err(ConfigError::out_of_range("text.screen_size", self.text.screen_size).into());
        }

        Ok(())
    }

    /// Copy with every out-of-range value pulled back into range
    ///
    /// Non-finite values fall back to their defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let mut config = self.clone();

        let frame = &mut config.frame;
        for (value, fallback) in frame.pole.iter_mut().zip(defaults.frame.pole) {
            if !value.is_finite() {
                *value = fallback;
            }
        }
        frame.maximum_radius = if frame.maximum_radius.is_finite() {
            frame.maximum_radius.max(0.0)
        } else {
            defaults.frame.maximum_radius
        };
        frame.maximum_angle = if frame.maximum_angle.is_nan() {
            defaults.frame.maximum_angle
        } else {
            frame.maximum_angle.clamp(0.0, MAXIMUM_POLAR_ANGLE)
        };
        frame.number_of_radial_axes = frame
            .number_of_radial_axes
            .clamp(MINIMUM_NUMBER_OF_RADIAL_AXES, MAXIMUM_NUMBER_OF_RADIAL_AXES);
        if !frame.bounds.is_valid() {
            frame.bounds = defaults.frame.bounds;
        }

        config.ticks.number_of_polar_ticks = config
            .ticks
            .number_of_polar_ticks
            .clamp(MINIMUM_NUMBER_OF_POLAR_TICKS, MAXIMUM_NUMBER_OF_POLAR_TICKS);

        config.labels.label_exponent = config
            .labels
            .label_exponent
            .clamp(-MAXIMUM_LABEL_POWER, MAXIMUM_LABEL_POWER);

        if !config.text.screen_size.is_finite() || config.text.screen_size <= 0.0 {
            config.text.screen_size = defaults.text.screen_size;
        }

        config
    }
}

#[derive(Debug, Clone, Copy)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PolarAxesConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame.number_of_radial_axes, 5);
        assert_eq!(config.frame.maximum_angle, 90.0);
        assert_eq!(config.ticks.number_of_polar_ticks, 5);
        assert_eq!(config.labels.radial_label_format.as_str(), "%-#6.3g");
        assert_eq!(config.labels.polar_axis_title, "Radial Distance");
        assert!(config.labels.auto_label_scaling);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = PolarAxesConfig::new();
        config.frame.maximum_angle = 400.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("frame.maximum_angle"));

        let mut config = PolarAxesConfig::new();
        config.frame.number_of_radial_axes = 1;
        assert!(config.validate().is_err());

        let mut config = PolarAxesConfig::new();
        config.frame.maximum_radius = -1.0;
        assert!(config.validate().is_err());

        let mut config = PolarAxesConfig::new();
        config.frame.bounds = Bounds::from_array([1.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
        assert!(matches!(
            config.validate().unwrap_err(),
            SettingsError::Frame(FrameError::InvalidBounds { axis: 'x', .. })
        ));

        let mut config = PolarAxesConfig::new();
        config.text.screen_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamped() {
        let mut config = PolarAxesConfig::new();
        config.frame.maximum_angle = 720.0;
        config.frame.maximum_radius = -3.0;
        config.frame.number_of_radial_axes = 80;
        config.frame.pole = [f64::NAN, 1.0, 2.0];
        config.ticks.number_of_polar_ticks = 0;
        config.text.screen_size = -4.0;

        let clamped = config.clamped();
        assert_eq!(clamped.frame.maximum_angle, 360.0);
        assert_eq!(clamped.frame.maximum_radius, 0.0);
        assert_eq!(clamped.frame.number_of_radial_axes, 50);
        assert_eq!(clamped.frame.pole, [0.0, 1.0, 2.0]);
        assert_eq!(clamped.ticks.number_of_polar_ticks, 2);
        assert_eq!(clamped.text.screen_size, 10.0);
        assert!(clamped.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PolarAxesConfig = toml::from_str(
            r#"
            [frame]
            maximum_radius = 10.0
            number_of_radial_axes = 7

            [labels]
            radial_label_format = "%.2f"
            angle_unit = "radians"
            "#,
        )
        .unwrap();

        assert_eq!(config.frame.maximum_radius, 10.0);
        assert_eq!(config.frame.number_of_radial_axes, 7);
        assert_eq!(config.frame.maximum_angle, 90.0);
        assert_eq!(config.labels.radial_label_format.as_str(), "%.2f");
        assert_eq!(config.labels.angle_unit, AngleUnit::Radians);
        assert_eq!(config.ticks.tick_location, TickLocation::Outside);
    }

    #[test]
    fn test_invalid_label_format_rejected_on_parse() {
        let result: Result<PolarAxesConfig, _> = toml::from_str(
            r#"
            [labels]
            radial_label_format = "%d"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tick_location_parse() {
        assert_eq!("Both".parse::<TickLocation>(), Ok(TickLocation::Both));
        assert_eq!(TickLocation::Inside.to_string(), "inside");
        assert!("middle".parse::<TickLocation>().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = PolarAxesConfig::new()
            .save_to_file(Path::new("frame.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
    }
}
