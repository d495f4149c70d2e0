//! Angle unit handling
//!
//! Radial axes are titled with their polar angle. Angles are stored in
//! degrees everywhere; the unit only affects how a title is displayed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit used when displaying polar angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Degrees (0-360)
    #[default]
    Degrees,
    /// Radians (0-2π)
    Radians,
}

impl AngleUnit {
    /// Convert an angle in degrees into this unit.
    pub fn from_degrees(self, degrees: f64) -> f64 {
        match self {
            Self::Degrees => degrees,
            Self::Radians => degrees.to_radians(),
        }
    }

    /// Suffix appended to a displayed angle.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Radians => " rad",
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees => write!(f, "Degrees"),
            Self::Radians => write!(f, "Radians"),
        }
    }
}

impl FromStr for AngleUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "degrees" | "deg" | "°" => Ok(Self::Degrees),
            "radians" | "rad" => Ok(Self::Radians),
            _ => Err(format!("Unknown angle unit: {}", s)),
        }
    }
}
