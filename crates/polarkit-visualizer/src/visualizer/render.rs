//! Rendering contract, recording render target and SVG output.
//!
//! [`Renderable`] is what a render loop drives. [`RecordingViewport`]
//! keeps every draw call so frames can be inspected or written out as an
//! SVG document. [`ProjectionCache`] holds the display-space geometry of
//! one renderable between frames.

use super::style::{LineStyle, TextStyle};
use super::viewport::{ViewKey, Viewport};
use glam::DVec2;
use polarkit_core::Bounds;
use std::fmt::Write;
use tracing::trace;

/// Outcome of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// At least one draw call was issued.
    pub rendered: bool,
    /// Number of draw calls issued.
    pub draw_calls: usize,
    /// Geometry was regenerated during this pass.
    pub rebuilt: bool,
    /// Display-space extent of the rendered object, when a camera was available.
    pub display_bounds: Option<Bounds>,
}

/// Something a render loop can draw and tear down.
pub trait Renderable {
    fn render_opaque_geometry(&mut self, viewport: &mut dyn Viewport) -> FrameReport;

    /// Translucent pass; line and text overlays draw nothing here.
    fn render_translucent_geometry(&mut self, _viewport: &mut dyn Viewport) -> FrameReport {
        FrameReport::default()
    }

    /// Drop every cached graphics resource. Must be safe to call at any time.
    fn release_graphics_resources(&mut self);

    /// World-space extent of the object.
    fn bounds(&self) -> Bounds;
}

/// One recorded draw call, in display coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline {
        points: Vec<DVec2>,
        closed: bool,
        style: LineStyle,
    },
    Text {
        text: String,
        position: DVec2,
        height: f64,
        style: TextStyle,
    },
}

/// A viewport that records draw calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingViewport {
    width: u32,
    height: u32,
    rect: [f64; 4],
    commands: Vec<DrawCommand>,
}

impl RecordingViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rect: [0.0, 0.0, 1.0, 1.0],
            commands: Vec::new(),
        }
    }

    /// Restrict drawing to the normalized rectangle `[xmin, ymin, xmax, ymax]`.
    pub fn with_rect(mut self, rect: [f64; 4]) -> Self {
        self.rect = rect;
        self
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[DVec2], bool)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Polyline { points, closed, .. } => Some((points.as_slice(), *closed)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Polyline { .. } => None,
        })
    }

    /// Render the recorded commands as a standalone SVG document.
    ///
    /// Display coordinates have their origin at the bottom left, so y is
    /// flipped on the way out.
    pub fn to_svg(&self, background: Option<&str>) -> String {
        let height = f64::from(self.height);
        let mut svg = String::with_capacity(self.commands.len() * 96 + 256);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if let Some(fill) = background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                escape_xml(fill)
            );
        }

        for cmd in &self.commands {
            match cmd {
                DrawCommand::Polyline {
                    points,
                    closed,
                    style,
                } => {
                    let mut path = String::with_capacity(points.len() * 16);
                    for (idx, p) in points.iter().enumerate() {
                        let op = if idx == 0 { 'M' } else { 'L' };
                        let _ = write!(path, "{} {:.2} {:.2} ", op, p.x, height - p.y);
                    }
                    if *closed {
                        path.push('Z');
                    }
                    let _ = writeln!(
                        svg,
                        r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-opacity="{:.2}"/>"#,
                        path.trim_end(),
                        style.color.to_hex(),
                        style.width,
                        style.opacity
                    );
                }
                DrawCommand::Text {
                    text,
                    position,
                    height: font_size,
                    style,
                } => {
                    let _ = writeln!(
                        svg,
                        r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}" fill-opacity="{:.2}"{}{}>{}</text>"#,
                        position.x,
                        height - position.y,
                        escape_xml(&style.font_family),
                        font_size,
                        style.color.to_hex(),
                        style.opacity,
                        if style.bold { r#" font-weight="bold""# } else { "" },
                        if style.italic { r#" font-style="italic""# } else { "" },
                        escape_xml(text)
                    );
                }
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl Viewport for RecordingViewport {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn rect(&self) -> [f64; 4] {
        self.rect
    }

    fn draw_polyline(&mut self, points: &[DVec2], closed: bool, style: &LineStyle) {
        trace!("polyline with {} points", points.len());
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            style: style.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, position: DVec2, height: f64, style: &TextStyle) {
        trace!("text '{}' at ({:.1}, {:.1})", text, position.x, position.y);
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            height,
            style: style.clone(),
        });
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Display-space polylines of one renderable, valid for one view.
///
/// This is the graphics resource a renderable holds between frames;
/// releasing it only forces the next frame to project again.
#[derive(Debug, Default, Clone)]
pub struct ProjectionCache {
    key: Option<ViewKey>,
    polylines: Vec<Vec<DVec2>>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_update(&self, key: &ViewKey) -> bool {
        self.key.as_ref() != Some(key)
    }

    pub fn update(&mut self, key: ViewKey, polylines: Vec<Vec<DVec2>>) {
        self.key = Some(key);
        self.polylines = polylines;
    }

    pub fn polylines(&self) -> &[Vec<DVec2>] {
        &self.polylines
    }

    pub fn is_allocated(&self) -> bool {
        self.key.is_some()
    }

    /// Drop the cached geometry. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.key = None;
        self.polylines = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::style::Color;

    #[test]
    fn test_records_commands() {
        let mut viewport = RecordingViewport::new(100, 50);
        viewport.draw_polyline(
            &[DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0)],
            false,
            &LineStyle::default(),
        );
        viewport.draw_text("5.0", DVec2::new(1.0, 2.0), 10.0, &TextStyle::default());

        assert_eq!(viewport.commands().len(), 2);
        assert_eq!(viewport.polylines().count(), 1);
        assert_eq!(viewport.texts().collect::<Vec<_>>(), vec!["5.0"]);

        viewport.clear();
        assert!(viewport.commands().is_empty());
    }

    #[test]
    fn test_svg_flips_y_and_escapes() {
        let mut viewport = RecordingViewport::new(100, 50);
        viewport.draw_polyline(
            &[DVec2::new(0.0, 0.0), DVec2::new(10.0, 50.0)],
            true,
            &LineStyle::default().with_color(Color::new(1.0, 0.0, 0.0)),
        );
        viewport.draw_text("a<b", DVec2::new(5.0, 10.0), 12.0, &TextStyle::default());

        let svg = viewport.to_svg(Some("black"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"d="M 0.00 50.00 L 10.00 0.00 Z""#));
        assert!(svg.contains(r##"stroke="#ff0000""##));
        assert!(svg.contains(r#"y="40.00""#));
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains(r#"fill="black""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_projection_cache_release_is_idempotent() {
        let viewport = RecordingViewport::new(10, 10);
        let camera = crate::visualizer::camera::OrbitCamera::default();
        let key = crate::visualizer::viewport::DisplayTransform::new(&camera, &viewport).key();

        let mut cache = ProjectionCache::new();
        assert!(cache.needs_update(&key));
        cache.update(key, vec![vec![DVec2::ZERO]]);
        assert!(!cache.needs_update(&key));
        assert!(cache.is_allocated());

        cache.release();
        cache.release();
        assert!(!cache.is_allocated());
        assert!(cache.polylines().is_empty());
        assert!(cache.needs_update(&key));
    }
}
