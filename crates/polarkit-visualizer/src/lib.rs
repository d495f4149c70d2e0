//! # polarkit Visualizer
//!
//! Polar coordinate axes drawn over a 3-D scene: radial axes fanning out
//! from a pole, concentric arcs at every tick radius, and tick labels
//! that keep a constant on-screen size as the camera moves.

pub mod visualizer;

pub use visualizer::{
    build_polar_arcs, build_polar_axis_labels, build_polar_axis_ticks, AxisAttributes, AxisScale,
    Camera, Color, DisplayTransform, DrawCommand, FrameReport, LineStyle, OrbitCamera, PixelRect,
    PolarArc, PolarArcs, PolarAxesActor, RadialAxis, RecordingViewport, Renderable, ScaleState,
    SpatialExtentSource, TextStyle, Tick, TickSet, Viewport,
};
