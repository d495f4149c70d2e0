//! # polarkit
//!
//! A polar coordinate frame drawn over a 3-D scene:
//! - A fan of radial axes around a pole, spanning up to a full turn
//! - Concentric polar arcs at every tick radius
//! - Tick labels with automatic or manual power-of-ten scaling
//! - Text that keeps a constant on-screen size as the camera moves
//!
//! ## Architecture
//!
//! polarkit is organized as a workspace with multiple crates:
//!
//! 1. **polarkit-core** - Bounds, label formats, angle units, scalar helpers, errors
//! 2. **polarkit-settings** - Serializable frame configuration with TOML/JSON persistence
//! 3. **polarkit-visualizer** - Camera and viewport contracts, the polar axes actor, SVG output
//! 4. **polarkit** - Re-exports, logging setup and the command line renderer
//!
//! ## Usage
//!
//! ```no_run
//! use polarkit::{shared, OrbitCamera, PolarAxesActor, RecordingViewport, Renderable};
//!
//! let mut actor = PolarAxesActor::new();
//! actor.set_maximum_radius(10.0);
//! actor.set_camera(shared(OrbitCamera::default()));
//!
//! let mut viewport = RecordingViewport::new(800, 600);
//! let report = actor.render_opaque_geometry(&mut viewport);
//! if report.rendered {
//!     std::fs::write("frame.svg", viewport.to_svg(None)).unwrap();
//! }
//! ```

pub use polarkit_settings as settings;
pub use polarkit_visualizer::visualizer;

pub use polarkit_core::{
    digits, ffix, fsign, label_exponent, max_of, same_shared, shared, AngleUnit, Bounds,
    FrameError, LabelFormat, Shared,
};

pub use polarkit_settings::{
    ConfigError, FrameSettings, LabelSettings, PolarAxesConfig, SettingsError, SettingsResult,
    TextSettings, TickLocation, TickSettings, VisibilitySettings,
};

pub use polarkit_visualizer::{
    build_polar_arcs, build_polar_axis_labels, build_polar_axis_ticks, AxisAttributes, AxisScale,
    Camera, Color, DisplayTransform, DrawCommand, FrameReport, LineStyle, OrbitCamera, PixelRect,
    PolarArc, PolarArcs, PolarAxesActor, RadialAxis, RecordingViewport, Renderable, ScaleState,
    SpatialExtentSource, TextStyle, Tick, TickSet, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output to stderr, so SVG written to stdout stays clean
/// - RUST_LOG environment variable support, INFO by default
/// - Target, level and line numbers on every record
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
