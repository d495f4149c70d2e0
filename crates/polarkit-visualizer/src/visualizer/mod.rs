//! Polar axes visualization
//!
//! This module provides:
//! - Camera and viewport contracts with display-space projection
//! - Line and text styles shared by reference
//! - Polar axis ticks, labels, radial axes and polar arcs
//! - Screen-constant text scaling
//! - The polar axes actor that orchestrates rebuild and draw
//! - A recording render target with SVG output

pub mod autoscale;
pub mod build_state;
pub mod camera;
pub mod polar_arcs;
pub mod polar_axes;
pub mod radial_axis;
pub mod render;
pub mod style;
pub mod ticks;
pub mod viewport;

pub use autoscale::{auto_scale_factor, label_screen_offset, ScaleState};
pub use build_state::RebuildState;
pub use camera::{Camera, OrbitCamera};
pub use polar_arcs::{build_polar_arcs, PolarArc, PolarArcs};
pub use polar_axes::{PolarAxesActor, SpatialExtentSource};
pub use radial_axis::{AxisAttributes, AxisScale, RadialAxis};
pub use render::{DrawCommand, FrameReport, ProjectionCache, RecordingViewport, Renderable};
pub use style::{Color, LineStyle, TextStyle};
pub use ticks::{build_polar_axis_labels, build_polar_axis_ticks, LabelOptions, Tick, TickSet};
pub use viewport::{
    display_bounds, transform_bounds, DisplayTransform, PixelRect, ViewKey, Viewport,
};
