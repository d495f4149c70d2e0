//! Error handling for polarkit
//!
//! Rendering itself never fails: out-of-range inputs are clamped and
//! degenerate frames simply draw nothing. `FrameError` covers the
//! values that are rejected outright: inverted bounds, unparsable label
//! formats and non-finite numbers. File I/O errors belong to the
//! settings crate.

use thiserror::Error;

/// Frame configuration error type
///
/// Raised when a value cannot be represented in a polar frame even after
/// clamping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Bounds with a minimum above the maximum on some axis
    #[error("Invalid bounds on {axis}: min {min} > max {max}")]
    InvalidBounds {
        /// The axis name (x, y or z).
        axis: char,
        /// The offending minimum.
        min: f64,
        /// The offending maximum.
        max: f64,
    },

    /// A printf-style label format that could not be parsed
    #[error("Invalid label format '{format}': {reason}")]
    InvalidLabelFormat {
        /// The rejected format string.
        format: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A NaN or infinite value supplied for a numeric property
    #[error("Non-finite value for {property}")]
    NonFinite {
        /// The property name.
        property: String,
    },
}
