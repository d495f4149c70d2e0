//! Screen-constant text scaling.
//!
//! A text scale is the world length that covers `screen_size` pixels at
//! a given anchor under the current camera. It is recomputed whenever
//! the camera or the viewport changes.

use super::camera::Camera;
use super::radial_axis::{AxisScale, RadialAxis};
use super::viewport::Viewport;
use glam::DVec3;
use polarkit_core::constants::{DEFAULT_SCREEN_SIZE, LABEL_SCREEN_OFFSET_BASE, MIN_TEXT_SCALE};
use tracing::{trace, warn};

/// Text scaling state of a polar frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    /// Target text height in pixels.
    pub screen_size: f64,
    /// Pixel gap between an axis and its labels.
    pub label_screen_offset: f64,
    /// Scale of the polar axis title.
    pub title_scale: f64,
    /// Scale of the polar axis labels.
    pub label_scale: f64,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::new(DEFAULT_SCREEN_SIZE)
    }
}

impl ScaleState {
    pub fn new(screen_size: f64) -> Self {
        Self {
            screen_size,
            label_screen_offset: label_screen_offset(screen_size),
            title_scale: 1.0,
            label_scale: 1.0,
        }
    }

    /// Change the target size, keeping the label offset in step.
    pub fn set_screen_size(&mut self, screen_size: f64) {
        self.screen_size = screen_size;
        self.label_screen_offset = label_screen_offset(screen_size);
    }

    fn axis_scale(&self, title_scale: f64, label_scale: f64) -> AxisScale {
        AxisScale {
            title_scale,
            label_scale,
            screen_size: self.screen_size,
            label_screen_offset: self.label_screen_offset,
        }
    }
}

/// Pixel gap between an axis and its labels for a given text size.
pub fn label_screen_offset(screen_size: f64) -> f64 {
    LABEL_SCREEN_OFFSET_BASE + screen_size * 0.5
}

/// World length at `anchor` that projects to `screen_size` pixels.
///
/// Without a camera the scale is 1. A camera at or behind the anchor, an
/// empty viewport, or any non-finite intermediate yields `MIN_TEXT_SCALE`.
pub fn auto_scale_factor(
    viewport: &dyn Viewport,
    camera: Option<&dyn Camera>,
    screen_size: f64,
    anchor: DVec3,
) -> f64 {
    let Some(camera) = camera else {
        return 1.0;
    };

    let height = viewport.pixel_rect().height;
    if height <= 0.0 {
        return MIN_TEXT_SCALE;
    }

    let scale = if camera.parallel_projection() {
        2.0 * screen_size * camera.parallel_scale() / height
    } else {
        let depth = (anchor - camera.position()).dot(camera.direction_of_projection());
        if depth <= 0.0 {
            trace!("Anchor at or behind the camera (depth {})", depth);
            return MIN_TEXT_SCALE;
        }
        let half_angle = (camera.view_angle() * 0.5).to_radians();
        2.0 * screen_size * half_angle.tan() / height * depth
    };

    if scale.is_finite() && scale > MIN_TEXT_SCALE {
        scale
    } else {
        MIN_TEXT_SCALE
    }
}

/// Apply screen-constant scales to `axes`.
///
/// Titles are scaled at their own anchor and labels at the pole, so
/// labels along one axis all share a size.
pub fn auto_scale_axes(
    viewport: &dyn Viewport,
    camera: Option<&dyn Camera>,
    state: &ScaleState,
    axes: &mut [RadialAxis],
) {
    if camera.is_none() {
        warn!("No camera attached, text keeps unit scale");
    }

    for axis in axes.iter_mut() {
        let title_scale =
            auto_scale_factor(viewport, camera, state.screen_size, axis.title_anchor());
        let label_scale = auto_scale_factor(viewport, camera, state.screen_size, axis.start());
        trace!(
            "Axis {}: title scale {:.4}, label scale {:.4}",
            axis.index(),
            title_scale,
            label_scale
        );
        axis.set_scale(state.axis_scale(title_scale, label_scale));
    }
}
