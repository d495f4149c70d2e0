//! Shared constants for the polar axes frame.

/// Smallest number of radial axes a frame may carry.
pub const MINIMUM_NUMBER_OF_RADIAL_AXES: usize = 2;

/// Largest number of radial axes a frame may carry.
pub const MAXIMUM_NUMBER_OF_RADIAL_AXES: usize = 50;

/// Radial axes created by a default frame.
pub const DEFAULT_NUMBER_OF_RADIAL_AXES: usize = 5;

/// Default angular span of the frame, in degrees.
pub const DEFAULT_MAXIMUM_POLAR_ANGLE: f64 = 90.0;

/// Largest angular span of the frame, in degrees.
pub const MAXIMUM_POLAR_ANGLE: f64 = 360.0;

/// Default maximum radius when none is configured.
pub const DEFAULT_MAXIMUM_RADIUS: f64 = 1.0;

/// Default number of ticks on the polar axis, both endpoints included.
pub const DEFAULT_NUMBER_OF_POLAR_TICKS: usize = 5;

/// Smallest number of ticks on the polar axis.
pub const MINIMUM_NUMBER_OF_POLAR_TICKS: usize = 2;

/// Largest number of ticks on the polar axis.
pub const MAXIMUM_NUMBER_OF_POLAR_TICKS: usize = 100;

/// Upper bound on polar tick intervals when subdividing automatically.
pub const MAXIMUM_AUTO_POLAR_INTERVALS: usize = 10;

/// Arc segments generated per degree of polar angle.
pub const POLAR_ARC_RESOLUTION_PER_DEG: f64 = 0.2;

/// Default on-screen text size in pixels.
pub const DEFAULT_SCREEN_SIZE: f64 = 10.0;

/// Base pixel offset between an axis and its labels.
pub const LABEL_SCREEN_OFFSET_BASE: f64 = 15.0;

/// Floor applied to every computed text scale.
pub const MIN_TEXT_SCALE: f64 = 1.0e-6;

/// Extent substituted for a zero-width bounds axis before projection.
pub const BOUNDS_EPSILON: f64 = 1.0e-6;

/// Title shown on the polar axis by default.
pub const DEFAULT_POLAR_AXIS_TITLE: &str = "Radial Distance";

/// printf-style format applied to polar labels when label scaling is manual.
pub const DEFAULT_RADIAL_LABEL_FORMAT: &str = "%-#6.3g";

/// printf-style format applied to the angle titles of radial axes.
pub const DEFAULT_RADIAL_ANGLE_FORMAT: &str = "%-#3.1f";

/// Largest power of ten accepted for manual label scaling.
pub const MAXIMUM_LABEL_POWER: i32 = 30;

/// Exponent window inside which labels are shown without a multiplier.
pub const LABEL_EXPONENT_CUT_MIN: f64 = -1.5;
pub const LABEL_EXPONENT_CUT_MAX: f64 = 3.0;

/// Maximum decimals produced by the digit heuristic.
pub const MAXIMUM_LABEL_DIGITS: i32 = 5;
