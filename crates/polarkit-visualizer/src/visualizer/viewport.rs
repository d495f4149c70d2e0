//! Viewport capability and world-to-display transforms.
//!
//! Display coordinates follow the usual renderer convention: pixels with
//! the origin in the lower-left corner of the window, plus a depth in
//! `[0, 1]` from the near to the far plane.

use super::camera::Camera;
use super::style::{LineStyle, TextStyle};
use glam::{DMat4, DVec2, DVec3, DVec4};
use polarkit_core::Bounds;

/// Smallest homogeneous `w` used when dividing, keeps points at the eye finite.
const MIN_CLIP_W: f64 = 1.0e-12;

/// A render target the actor draws into.
///
/// The window has a pixel size; the viewport occupies the normalized
/// rectangle `[xmin, ymin, xmax, ymax]` of it.
pub trait Viewport {
    /// Window size in pixels.
    fn size(&self) -> (u32, u32);

    /// Normalized viewport rectangle `[xmin, ymin, xmax, ymax]`.
    fn rect(&self) -> [f64; 4] {
        [0.0, 0.0, 1.0, 1.0]
    }

    /// Draw a polyline given in display coordinates.
    fn draw_polyline(&mut self, points: &[DVec2], closed: bool, style: &LineStyle);

    /// Draw text whose baseline starts at `position`, `height` pixels tall.
    fn draw_text(&mut self, text: &str, position: DVec2, height: f64, style: &TextStyle);

    /// Viewport rectangle in pixels.
    fn pixel_rect(&self) -> PixelRect {
        let (w, h) = self.size();
        let [x0, y0, x1, y1] = self.rect();
        PixelRect {
            x: x0 * f64::from(w),
            y: y0 * f64::from(h),
            width: (x1 - x0) * f64::from(w),
            height: (y1 - y0) * f64::from(h),
        }
    }
}

/// Viewport rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// True when the display-space box `[xmin, xmax, ymin, ymax, ..]`
    /// shares at least one pixel with this rectangle.
    pub fn overlaps(&self, display: &[f64; 6]) -> bool {
        display[0] <= self.x + self.width
            && display[1] >= self.x
            && display[2] <= self.y + self.height
            && display[3] >= self.y
    }
}

/// Identity of a view: what the projection of a point depends on.
///
/// Two frames with equal keys project every world point identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewKey {
    view_projection: [f64; 16],
    rect: [f64; 4],
}

/// World-to-display mapping for one camera and viewport.
#[derive(Debug, Clone, Copy)]
pub struct DisplayTransform {
    view_projection: DMat4,
    rect: PixelRect,
}

impl DisplayTransform {
    pub fn new(camera: &dyn Camera, viewport: &dyn Viewport) -> Self {
        let rect = viewport.pixel_rect();
        Self {
            view_projection: camera.view_projection(rect.aspect()),
            rect,
        }
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    pub fn key(&self) -> ViewKey {
        ViewKey {
            view_projection: self.view_projection.to_cols_array(),
            rect: [self.rect.x, self.rect.y, self.rect.width, self.rect.height],
        }
    }

    /// Display coordinates `(x, y, depth)` of a world point.
    pub fn world_to_display(&self, point: DVec3) -> DVec3 {
        let clip: DVec4 = self.view_projection * point.extend(1.0);
        let w = if clip.w.abs() < MIN_CLIP_W {
            MIN_CLIP_W.copysign(clip.w)
        } else {
            clip.w
        };
        let ndc = clip.truncate() / w;

        DVec3::new(
            self.rect.x + (ndc.x + 1.0) * 0.5 * self.rect.width,
            self.rect.y + (ndc.y + 1.0) * 0.5 * self.rect.height,
            (ndc.z + 1.0) * 0.5,
        )
    }

    pub fn world_to_display_2d(&self, point: DVec3) -> DVec2 {
        self.world_to_display(point).truncate()
    }
}

/// Replace world bounds with the display-space extent of their corners.
///
/// Zero-width axes are widened to a small epsilon first so the box
/// always projects to a proper volume.
pub fn transform_bounds(viewport: &dyn Viewport, camera: &dyn Camera, bounds: &mut [f64; 6]) {
    let transform = DisplayTransform::new(camera, viewport);
    *bounds = display_bounds(&transform, &Bounds::from_array(*bounds));
}

/// Display-space extent of the corners of `bounds` under `transform`.
pub fn display_bounds(transform: &DisplayTransform, bounds: &Bounds) -> [f64; 6] {
    let mut display = Bounds::empty();
    for [x, y, z] in bounds.with_min_extent().corners() {
        let p = transform.world_to_display(DVec3::new(x, y, z));
        display.update(p.x, p.y, p.z);
    }
    display.to_array()
}
