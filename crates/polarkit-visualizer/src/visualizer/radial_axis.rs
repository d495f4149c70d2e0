//! A single radial axis of the polar frame.
//!
//! Every axis draws its line and its title. The polar axis (index 0)
//! additionally carries the tick marks and tick labels. Geometry is set
//! on rebuild, styling through [`AxisAttributes`], and text scales by
//! the auto-scale pass every time the view changes.

use super::render::ProjectionCache;
use super::style::{LineStyle, TextStyle};
use super::ticks::Tick;
use super::viewport::{DisplayTransform, Viewport};
use glam::DVec3;
use polarkit_core::Shared;
use polarkit_settings::TickLocation;
use tracing::trace;

/// Styling and visibility pushed to an axis without touching its geometry.
#[derive(Debug, Clone)]
pub struct AxisAttributes {
    pub title: String,
    pub axis_visible: bool,
    pub title_visible: bool,
    pub tick_visible: bool,
    pub label_visible: bool,
    pub tick_location: TickLocation,
    pub line_style: Shared<LineStyle>,
    pub title_style: Shared<TextStyle>,
    pub label_style: Shared<TextStyle>,
}

/// Text scale of one axis, in world units per `screen_size` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub title_scale: f64,
    pub label_scale: f64,
    pub screen_size: f64,
    pub label_screen_offset: f64,
}

impl AxisScale {
    /// World length of `pixels` at the given text scale.
    pub fn world_length(&self, scale: f64, pixels: f64) -> f64 {
        if self.screen_size > 0.0 {
            pixels * scale / self.screen_size
        } else {
            0.0
        }
    }
}

#[derive(Debug)]
pub struct RadialAxis {
    index: usize,
    angle: f64,
    start: DVec3,
    end: DVec3,
    ticks: Vec<Tick>,
    attributes: Option<AxisAttributes>,
    scale: Option<AxisScale>,
    cache: ProjectionCache,
}

impl RadialAxis {
    /// Axis `index` at `angle` degrees, running from `pole` out to `radius`.
    pub fn new(index: usize, pole: DVec3, angle: f64, radius: f64) -> Self {
        let direction = direction(angle);
        Self {
            index,
            angle,
            start: pole,
            end: pole + direction * radius,
            ticks: Vec::new(),
            attributes: None,
            scale: None,
            cache: ProjectionCache::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_polar_axis(&self) -> bool {
        self.index == 0
    }

    /// Polar angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn start(&self) -> DVec3 {
        self.start
    }

    pub fn end(&self) -> DVec3 {
        self.end
    }

    pub fn direction(&self) -> DVec3 {
        direction(self.angle)
    }

    /// In-plane unit normal on the decreasing-angle side.
    pub fn normal(&self) -> DVec3 {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        DVec3::new(sin, -cos, 0.0)
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn set_ticks(&mut self, ticks: Vec<Tick>) {
        self.ticks = ticks;
        self.cache.release();
    }

    pub fn attributes(&self) -> Option<&AxisAttributes> {
        self.attributes.as_ref()
    }

    pub fn set_attributes(&mut self, attributes: AxisAttributes) {
        if self
            .attributes
            .as_ref()
            .is_some_and(|a| a.tick_location != attributes.tick_location)
        {
            self.cache.release();
        }
        self.attributes = Some(attributes);
    }

    pub fn title(&self) -> Option<&str> {
        self.attributes.as_ref().map(|a| a.title.as_str())
    }

    pub fn scale(&self) -> Option<AxisScale> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: AxisScale) {
        if self.scale != Some(scale) {
            self.scale = Some(scale);
            self.cache.release();
        }
    }

    /// Where the title is anchored before auto-scaling moves it outward.
    pub fn title_anchor(&self) -> DVec3 {
        self.end
    }

    pub fn has_graphics_resources(&self) -> bool {
        self.cache.is_allocated()
    }

    pub fn release_graphics_resources(&mut self) {
        self.cache.release();
    }

    /// World-space end points of each tick mark.
    fn tick_marks(&self, attributes: &AxisAttributes, scale: &AxisScale) -> Vec<[DVec3; 2]> {
        let length = scale.world_length(scale.label_scale, scale.label_screen_offset / 3.0);
        let direction = self.direction();
        let normal = self.normal() * length;

        self.ticks
            .iter()
            .map(|tick| {
                let p = self.start + direction * tick.radius;
                match attributes.tick_location {
                    TickLocation::Outside => [p, p + normal],
                    TickLocation::Inside => [p, p - normal],
                    TickLocation::Both => [p - normal, p + normal],
                }
            })
            .collect()
    }

    /// Draw the axis, returning the number of draw calls issued.
    pub fn render(
        &mut self,
        transform: &DisplayTransform,
        view_up: DVec3,
        viewport: &mut dyn Viewport,
    ) -> usize {
        let Some(attributes) = self.attributes.clone() else {
            return 0;
        };
        let scale = self.scale.unwrap_or(AxisScale {
            title_scale: 1.0,
            label_scale: 1.0,
            screen_size: 1.0,
            label_screen_offset: 0.0,
        });

        let key = transform.key();
        if self.cache.needs_update(&key) {
            trace!("Projecting radial axis {}", self.index);
            let mut polylines = vec![vec![
                transform.world_to_display_2d(self.start),
                transform.world_to_display_2d(self.end),
            ]];
            polylines.extend(self.tick_marks(&attributes, &scale).iter().map(|[a, b]| {
                vec![
                    transform.world_to_display_2d(*a),
                    transform.world_to_display_2d(*b),
                ]
            }));
            self.cache.update(key, polylines);
        }

        let mut draw_calls = 0;
        let polylines = self.cache.polylines();

        if attributes.axis_visible {
            if let Some(line) = polylines.first() {
                viewport.draw_polyline(line, false, &attributes.line_style.borrow());
                draw_calls += 1;
            }
        }

        if attributes.tick_visible {
            let style = attributes.line_style.borrow();
            for mark in polylines.iter().skip(1) {
                viewport.draw_polyline(mark, false, &style);
                draw_calls += 1;
            }
        }

        if attributes.label_visible {
            let offset = scale.world_length(scale.label_scale, scale.label_screen_offset);
            let style = attributes.label_style.borrow();
            for tick in &self.ticks {
                let anchor = self.start + self.direction() * tick.radius + self.normal() * offset;
                let height = text_height(transform, anchor, view_up, scale.label_scale);
                viewport.draw_text(
                    &tick.label,
                    transform.world_to_display_2d(anchor),
                    height,
                    &style,
                );
                draw_calls += 1;
            }
        }

        if attributes.title_visible && !attributes.title.is_empty() {
            let offset = scale.world_length(scale.title_scale, scale.label_screen_offset);
            let anchor = self.title_anchor() + self.direction() * offset;
            let height = text_height(transform, anchor, view_up, scale.title_scale);
            viewport.draw_text(
                &attributes.title,
                transform.world_to_display_2d(anchor),
                height,
                &attributes.title_style.borrow(),
            );
            draw_calls += 1;
        }

        draw_calls
    }
}

fn direction(angle: f64) -> DVec3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    DVec3::new(cos, sin, 0.0)
}

/// On-screen height in pixels of text `scale` world units tall at `anchor`.
fn text_height(transform: &DisplayTransform, anchor: DVec3, view_up: DVec3, scale: f64) -> f64 {
    let base = transform.world_to_display_2d(anchor);
    let top = transform.world_to_display_2d(anchor + view_up * scale);
    (top - base).length()
}
