//! Concentric arcs drawn at each polar tick radius.

use super::render::ProjectionCache;
use super::style::LineStyle;
use super::viewport::{DisplayTransform, Viewport};
use glam::DVec3;
use polarkit_core::constants::{MAXIMUM_POLAR_ANGLE, POLAR_ARC_RESOLUTION_PER_DEG};
use tracing::trace;

/// One arc (or full circle) about the pole, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarArc {
    pub radius: f64,
    pub points: Vec<DVec3>,
    /// True for a full circle; the last point is not repeated.
    pub closed: bool,
}

/// Sample arcs of `max_angle` degrees at every positive radius.
///
/// Arcs lie in the plane `z = pole.z`, starting on the +X side of the pole.
pub fn build_polar_arcs(pole: DVec3, radii: &[f64], max_angle: f64) -> Vec<PolarArc> {
    if max_angle.is_nan() || max_angle <= 0.0 {
        return Vec::new();
    }
    let max_angle = max_angle.min(MAXIMUM_POLAR_ANGLE);
    let closed = max_angle >= MAXIMUM_POLAR_ANGLE;

    let segments = ((max_angle * POLAR_ARC_RESOLUTION_PER_DEG).ceil() as usize).max(1);
    let step = max_angle.to_radians() / segments as f64;
    let count = if closed { segments } else { segments + 1 };

    radii
        .iter()
        .filter(|&&r| r > 0.0)
        .map(|&radius| {
            let points = (0..count)
                .map(|i| {
                    let (sin, cos) = (i as f64 * step).sin_cos();
                    pole + DVec3::new(radius * cos, radius * sin, 0.0)
                })
                .collect();
            PolarArc {
                radius,
                points,
                closed,
            }
        })
        .collect()
}

/// The polar arc renderable: geometry plus its projected polylines.
#[derive(Debug, Default, Clone)]
pub struct PolarArcs {
    arcs: Vec<PolarArc>,
    cache: ProjectionCache,
}

impl PolarArcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the arc geometry; the projected copy is dropped.
    pub fn set_arcs(&mut self, arcs: Vec<PolarArc>) {
        self.arcs = arcs;
        self.cache.release();
    }

    pub fn arcs(&self) -> &[PolarArc] {
        &self.arcs
    }

    pub fn has_graphics_resources(&self) -> bool {
        self.cache.is_allocated()
    }

    pub fn release_graphics_resources(&mut self) {
        self.cache.release();
    }

    /// Draw every arc, returning the number of draw calls issued.
    pub fn render(
        &mut self,
        transform: &DisplayTransform,
        viewport: &mut dyn Viewport,
        style: &LineStyle,
    ) -> usize {
        if self.arcs.is_empty() {
            return 0;
        }

        let key = transform.key();
        if self.cache.needs_update(&key) {
            trace!("Projecting {} polar arcs", self.arcs.len());
            let polylines = self
                .arcs
                .iter()
                .map(|arc| {
                    arc.points
                        .iter()
                        .map(|&p| transform.world_to_display_2d(p))
                        .collect()
                })
                .collect();
            self.cache.update(key, polylines);
        }

        for (arc, points) in self.arcs.iter().zip(self.cache.polylines()) {
            viewport.draw_polyline(points, arc.closed, style);
        }
        self.arcs.len()
    }
}
