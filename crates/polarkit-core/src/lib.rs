//! # polarkit Core
//!
//! Core types, numeric helpers, and utilities for polarkit.
//! Provides the bounding-box model, label number formatting, angle units,
//! the error hierarchy, and the shared-reference aliases used to hand
//! cameras and styles to the polar axes actor.

pub mod bounds;
pub mod constants;
pub mod error;
pub mod format;
pub mod scalar;
pub mod types;
pub mod units;

pub use bounds::Bounds;
pub use error::FrameError;
pub use format::LabelFormat;
pub use scalar::{digits, ffix, fsign, label_exponent, max_of};
pub use types::{same_shared, shared, Shared};
pub use units::AngleUnit;
