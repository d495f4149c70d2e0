//! polarkit Settings Crate
//!
//! Serializable description of a polar axes frame, with TOML/JSON
//! persistence, validation and clamping.

pub mod config;
pub mod error;

pub use config::{
    FrameSettings, LabelSettings, PolarAxesConfig, TextSettings, TickLocation, TickSettings,
    VisibilitySettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
