//! Polar axes actor
//!
//! Draws a polar reference frame over a 3-D scene: a pole, a fan of
//! radial axes spanning the maximum angle, concentric arcs at every tick
//! radius, and tick labels along the polar axis (the radial axis at angle
//! 0). Text keeps a constant on-screen size as the camera moves.
//!
//! Each call to [`Renderable::render_opaque_geometry`] runs, in order:
//! 1. resolve bounds and radius, project the frame to display space
//! 2. rebuild geometry if a geometry setter ran, bounds moved, or a
//!    rebuild was forced; push styling if only attributes changed
//! 3. auto-scale text if the geometry or the view changed
//! 4. draw arcs, then every radial axis with its ticks, labels and title

use super::autoscale::{self, auto_scale_factor, ScaleState};
use super::build_state::RebuildState;
use super::camera::Camera;
use super::polar_arcs::{build_polar_arcs, PolarArcs};
use super::radial_axis::{AxisAttributes, RadialAxis};
use super::render::{FrameReport, Renderable};
use super::style::{LineStyle, TextStyle};
use super::ticks::{LabelOptions, TickSet};
use super::viewport::{display_bounds, DisplayTransform, Viewport};
use glam::DVec3;
use polarkit_core::constants::{
    MAXIMUM_LABEL_POWER, MAXIMUM_NUMBER_OF_POLAR_TICKS, MAXIMUM_NUMBER_OF_RADIAL_AXES,
    MAXIMUM_POLAR_ANGLE, MINIMUM_NUMBER_OF_POLAR_TICKS, MINIMUM_NUMBER_OF_RADIAL_AXES,
};
use polarkit_core::{shared, AngleUnit, Bounds, FrameError, LabelFormat, Shared};
use polarkit_settings::{PolarAxesConfig, TickLocation};
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Supplies the bounds of the data the frame is drawn around.
pub trait SpatialExtentSource {
    /// Current bounds, or `None` while the source is empty.
    fn bounds(&self) -> Option<Bounds>;
}

impl SpatialExtentSource for Bounds {
    fn bounds(&self) -> Option<Bounds> {
        Some(*self)
    }
}

/// Assign `value` to `slot`, returning true when it changed.
fn update<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Polar coordinate frame overlaid on a scene.
pub struct PolarAxesActor {
    config: PolarAxesConfig,
    camera: Option<Shared<dyn Camera>>,
    data_source: Option<Rc<dyn SpatialExtentSource>>,

    polar_axis_title_style: Shared<TextStyle>,
    polar_axis_label_style: Shared<TextStyle>,
    radial_axes_line_style: Shared<LineStyle>,
    polar_arcs_line_style: Shared<LineStyle>,

    radial_axes: Vec<RadialAxis>,
    polar_arcs: PolarArcs,
    tick_set: TickSet,
    scale: ScaleState,
    rebuild: RebuildState,
    effective_radius: f64,
}

impl Default for PolarAxesActor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PolarAxesActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolarAxesActor")
            .field("config", &self.config)
            .field("has_camera", &self.camera.is_some())
            .field("has_data_source", &self.data_source.is_some())
            .field("radial_axes", &self.radial_axes.len())
            .field("tick_set", &self.tick_set)
            .field("scale", &self.scale)
            .field("effective_radius", &self.effective_radius)
            .finish()
    }
}

impl PolarAxesActor {
    pub fn new() -> Self {
        Self::from_config(PolarAxesConfig::default())
    }

    /// Create an actor from a configuration; out-of-range values are clamped.
    pub fn from_config(config: PolarAxesConfig) -> Self {
        let config = config.clamped();
        let scale = ScaleState::new(config.text.screen_size);
        let effective_radius = config.frame.maximum_radius;
        Self {
            config,
            camera: None,
            data_source: None,
            polar_axis_title_style: shared(TextStyle::default()),
            polar_axis_label_style: shared(TextStyle::default()),
            radial_axes_line_style: shared(LineStyle::default()),
            polar_arcs_line_style: shared(LineStyle::default()),
            radial_axes: Vec::new(),
            polar_arcs: PolarArcs::new(),
            tick_set: TickSet::default(),
            scale,
            rebuild: RebuildState::new(),
            effective_radius,
        }
    }

    /// Every scalar property of the actor.
    pub fn config(&self) -> &PolarAxesConfig {
        &self.config
    }

    /// Replace every scalar property at once.
    pub fn set_config(&mut self, config: PolarAxesConfig) {
        let config = config.clamped();
        if update(&mut self.config, config) {
            self.scale.set_screen_size(self.config.text.screen_size);
            self.rebuild.touch_geometry();
            self.rebuild.touch_attributes();
            self.rebuild.invalidate_view();
        }
    }

    // ---------------------------------------------------------------
    // Frame geometry
    // ---------------------------------------------------------------

    pub fn pole(&self) -> DVec3 {
        DVec3::from_array(self.config.frame.pole)
    }

    /// Move the pole. Non-finite coordinates are ignored.
    pub fn set_pole(&mut self, pole: DVec3) {
        if !pole.is_finite() {
            warn!("Ignoring non-finite pole {:?}", pole);
            return;
        }
        if update(&mut self.config.frame.pole, pole.to_array()) {
            self.rebuild.touch_geometry();
        }
    }

    /// Configured radius; see [`Self::effective_radius`] for the one in use.
    pub fn maximum_radius(&self) -> f64 {
        self.config.frame.maximum_radius
    }

    /// Set the radius, clamped to be non-negative. NaN is ignored.
    pub fn set_maximum_radius(&mut self, radius: f64) {
        if radius.is_nan() {
            warn!("Ignoring NaN maximum radius");
            return;
        }
        let radius = radius.clamp(0.0, f64::MAX);
        if update(&mut self.config.frame.maximum_radius, radius) {
            self.rebuild.touch_geometry();
        }
    }

    /// Radius resolved by the last build.
    pub fn effective_radius(&self) -> f64 {
        self.effective_radius
    }

    pub fn maximum_angle(&self) -> f64 {
        self.config.frame.maximum_angle
    }

    /// Set the angular span in degrees, clamped to `[0, 360]`. NaN is ignored.
    pub fn set_maximum_angle(&mut self, angle: f64) {
        if angle.is_nan() {
            warn!("Ignoring NaN maximum angle");
            return;
        }
        let angle = angle.clamp(0.0, MAXIMUM_POLAR_ANGLE);
        if update(&mut self.config.frame.maximum_angle, angle) {
            self.rebuild.touch_geometry();
        }
    }

    pub fn number_of_radial_axes(&self) -> usize {
        self.config.frame.number_of_radial_axes
    }

    /// Set the radial axis count, clamped to `[2, 50]`.
    pub fn set_number_of_radial_axes(&mut self, count: usize) {
        let count = count.clamp(MINIMUM_NUMBER_OF_RADIAL_AXES, MAXIMUM_NUMBER_OF_RADIAL_AXES);
        if update(&mut self.config.frame.number_of_radial_axes, count) {
            self.rebuild.touch_geometry();
        }
    }

    pub fn auto_scale_radius(&self) -> bool {
        self.config.frame.auto_scale_radius
    }

    pub fn set_auto_scale_radius(&mut self, enabled: bool) {
        if update(&mut self.config.frame.auto_scale_radius, enabled) {
            self.rebuild.touch_geometry();
        }
    }

    /// Explicit bounds, used while no data source supplies any.
    pub fn explicit_bounds(&self) -> Bounds {
        self.config.frame.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), FrameError> {
        let bounds = Bounds::try_from_array(bounds.to_array())?;
        if update(&mut self.config.frame.bounds, bounds) {
            self.rebuild.touch_geometry();
        }
        Ok(())
    }

    pub fn data_source(&self) -> Option<&Rc<dyn SpatialExtentSource>> {
        self.data_source.as_ref()
    }

    /// Attach or detach the source of the data bounds.
    pub fn set_data_source(&mut self, source: Option<Rc<dyn SpatialExtentSource>>) {
        self.data_source = source;
        self.rebuild.touch_geometry();
    }

    // ---------------------------------------------------------------
    // Ticks and labels
    // ---------------------------------------------------------------

    pub fn number_of_polar_ticks(&self) -> usize {
        self.config.ticks.number_of_polar_ticks
    }

    pub fn set_number_of_polar_ticks(&mut self, count: usize) {
        let count = count.clamp(MINIMUM_NUMBER_OF_POLAR_TICKS, MAXIMUM_NUMBER_OF_POLAR_TICKS);
        if update(&mut self.config.ticks.number_of_polar_ticks, count) {
            self.rebuild.touch_geometry();
        }
    }

    pub fn auto_subdivide_polar_axis(&self) -> bool {
        self.config.ticks.auto_subdivide_polar_axis
    }

    pub fn set_auto_subdivide_polar_axis(&mut self, enabled: bool) {
        if update(&mut self.config.ticks.auto_subdivide_polar_axis, enabled) {
            self.rebuild.touch_geometry();
        }
    }

    pub fn tick_location(&self) -> TickLocation {
        self.config.ticks.tick_location
    }

    pub fn set_tick_location(&mut self, location: TickLocation) {
        if update(&mut self.config.ticks.tick_location, location) {
            self.rebuild.touch_attributes();
        }
    }

    pub fn radial_label_format(&self) -> &LabelFormat {
        &self.config.labels.radial_label_format
    }

    /// Set the printf-style format of polar labels under manual scaling.
    ///
    /// An unparsable format is rejected and the current one kept.
    pub fn set_radial_label_format(&mut self, format: &str) -> Result<(), FrameError> {
        let format: LabelFormat = format.parse()?;
        if update(&mut self.config.labels.radial_label_format, format) {
            self.rebuild.touch_geometry();
        }
        Ok(())
    }

    pub fn radial_angle_format(&self) -> &LabelFormat {
        &self.config.labels.radial_angle_format
    }

    pub fn set_radial_angle_format(&mut self, format: &str) -> Result<(), FrameError> {
        let format: LabelFormat = format.parse()?;
        if update(&mut self.config.labels.radial_angle_format, format) {
            self.rebuild.touch_attributes();
        }
        Ok(())
    }

    pub fn radial_units(&self) -> bool {
        self.config.labels.radial_units
    }

    /// Show the angle unit after each radial axis title.
    pub fn set_radial_units(&mut self, enabled: bool) {
        if update(&mut self.config.labels.radial_units, enabled) {
            self.rebuild.touch_attributes();
        }
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.config.labels.angle_unit
    }

    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        if update(&mut self.config.labels.angle_unit, unit) {
            self.rebuild.touch_attributes();
        }
    }

    pub fn auto_label_scaling(&self) -> bool {
        self.config.labels.auto_label_scaling
    }

    pub fn set_auto_label_scaling(&mut self, enabled: bool) {
        if update(&mut self.config.labels.auto_label_scaling, enabled) {
            self.rebuild.touch_geometry();
        }
    }

    /// Power of ten labels are divided by under manual scaling.
    pub fn label_exponent(&self) -> i32 {
        self.config.labels.label_exponent
    }

    pub fn set_label_exponent(&mut self, exponent: i32) {
        let exponent = exponent.clamp(-MAXIMUM_LABEL_POWER, MAXIMUM_LABEL_POWER);
        if update(&mut self.config.labels.label_exponent, exponent) {
            self.rebuild.touch_geometry();
        }
    }

    /// Choose automatic label scaling, or manual scaling by `10^exponent`.
    pub fn set_label_scaling(&mut self, auto: bool, exponent: i32) {
        self.set_auto_label_scaling(auto);
        self.set_label_exponent(exponent);
    }

    pub fn polar_axis_title(&self) -> &str {
        &self.config.labels.polar_axis_title
    }

    pub fn set_polar_axis_title(&mut self, title: impl Into<String>) {
        if update(&mut self.config.labels.polar_axis_title, title.into()) {
            self.rebuild.touch_attributes();
        }
    }

    /// Ticks and labels of the polar axis from the last build.
    pub fn tick_set(&self) -> &TickSet {
        &self.tick_set
    }

    // ---------------------------------------------------------------
    // Visibility
    // ---------------------------------------------------------------

    pub fn radial_axes_visibility(&self) -> bool {
        self.config.visibility.radial_axes
    }

    pub fn set_radial_axes_visibility(&mut self, visible: bool) {
        if update(&mut self.config.visibility.radial_axes, visible) {
            self.rebuild.touch_attributes();
        }
    }

    pub fn radial_title_visibility(&self) -> bool {
        self.config.visibility.radial_title
    }

    pub fn set_radial_title_visibility(&mut self, visible: bool) {
        if update(&mut self.config.visibility.radial_title, visible) {
            self.rebuild.touch_attributes();
        }
    }

    pub fn polar_arcs_visibility(&self) -> bool {
        self.config.visibility.polar_arcs
    }

    pub fn set_polar_arcs_visibility(&mut self, visible: bool) {
        if update(&mut self.config.visibility.polar_arcs, visible) {
            self.rebuild.touch_attributes();
        }
    }

    pub fn polar_tick_visibility(&self) -> bool {
        self.config.visibility.polar_tick
    }

    pub fn set_polar_tick_visibility(&mut self, visible: bool) {
        if update(&mut self.config.visibility.polar_tick, visible) {
            self.rebuild.touch_attributes();
        }
    }

    pub fn polar_label_visibility(&self) -> bool {
        self.config.visibility.polar_label
    }

    pub fn set_polar_label_visibility(&mut self, visible: bool) {
        if update(&mut self.config.visibility.polar_label, visible) {
            self.rebuild.touch_attributes();
        }
    }

    // ---------------------------------------------------------------
    // Text sizing
    // ---------------------------------------------------------------

    pub fn screen_size(&self) -> f64 {
        self.scale.screen_size
    }

    /// Set the target text height in pixels; the label offset follows.
    ///
    /// Values that are not strictly positive and finite are ignored.
    pub fn set_screen_size(&mut self, screen_size: f64) {
        if !screen_size.is_finite() || screen_size <= 0.0 {
            warn!("Ignoring screen size {}", screen_size);
            return;
        }
        if update(&mut self.config.text.screen_size, screen_size) {
            self.scale.set_screen_size(screen_size);
            self.rebuild.invalidate_view();
        }
    }

    pub fn label_screen_offset(&self) -> f64 {
        self.scale.label_screen_offset
    }

    pub fn scale_state(&self) -> &ScaleState {
        &self.scale
    }

    // ---------------------------------------------------------------
    // Rebuild control
    // ---------------------------------------------------------------

    pub fn rebuild_axes(&self) -> bool {
        self.rebuild.is_forced()
    }

    /// Force (or cancel forcing) a geometry rebuild on the next frame.
    pub fn set_rebuild_axes(&mut self, rebuild: bool) {
        self.rebuild.set_forced(rebuild);
    }

    pub fn rebuild_state(&self) -> &RebuildState {
        &self.rebuild
    }

    // ---------------------------------------------------------------
    // Shared collaborators
    // ---------------------------------------------------------------

    pub fn camera(&self) -> Option<&Shared<dyn Camera>> {
        self.camera.as_ref()
    }

    /// Attach a camera; the next frame rebuilds.
    pub fn set_camera(&mut self, camera: Shared<dyn Camera>) {
        self.camera = Some(camera);
        self.rebuild.set_forced(true);
    }

    pub fn clear_camera(&mut self) {
        if self.camera.take().is_some() {
            self.rebuild.set_forced(true);
        }
    }

    pub fn polar_axis_title_text_style(&self) -> &Shared<TextStyle> {
        &self.polar_axis_title_style
    }

    pub fn set_polar_axis_title_text_style(&mut self, style: Shared<TextStyle>) {
        self.polar_axis_title_style = style;
        self.rebuild.touch_attributes();
    }

    pub fn polar_axis_label_text_style(&self) -> &Shared<TextStyle> {
        &self.polar_axis_label_style
    }

    pub fn set_polar_axis_label_text_style(&mut self, style: Shared<TextStyle>) {
        self.polar_axis_label_style = style;
        self.rebuild.touch_attributes();
    }

    pub fn radial_axes_line_style(&self) -> &Shared<LineStyle> {
        &self.radial_axes_line_style
    }

    pub fn set_radial_axes_line_style(&mut self, style: Shared<LineStyle>) {
        self.radial_axes_line_style = style;
        self.rebuild.touch_attributes();
    }

    pub fn polar_arcs_line_style(&self) -> &Shared<LineStyle> {
        &self.polar_arcs_line_style
    }

    /// Arcs read this style at draw time, so no rebuild is needed.
    pub fn set_polar_arcs_line_style(&mut self, style: Shared<LineStyle>) {
        self.polar_arcs_line_style = style;
    }

    // ---------------------------------------------------------------
    // Owned sub-objects
    // ---------------------------------------------------------------

    pub fn radial_axes(&self) -> &[RadialAxis] {
        &self.radial_axes
    }

    pub fn polar_arcs(&self) -> &PolarArcs {
        &self.polar_arcs
    }

    /// True while any owned renderable holds projected geometry.
    pub fn has_graphics_resources(&self) -> bool {
        self.polar_arcs.has_graphics_resources()
            || self.radial_axes.iter().any(RadialAxis::has_graphics_resources)
    }

    // ---------------------------------------------------------------
    // Building
    // ---------------------------------------------------------------

    /// Bounds the frame is fitted to: the data source's, else the explicit ones.
    pub fn effective_bounds(&self) -> Bounds {
        self.data_source
            .as_ref()
            .and_then(|source| source.bounds())
            .filter(Bounds::is_valid)
            .unwrap_or(self.config.frame.bounds)
    }

    /// Radius for `bounds`: the mean planar extent under auto-scaling,
    /// else the configured radius.
    fn resolve_radius(&self, bounds: &Bounds) -> f64 {
        if self.config.frame.auto_scale_radius {
            ((bounds.x_length() + bounds.y_length()) * 0.5).max(0.0)
        } else {
            self.config.frame.maximum_radius
        }
    }

    /// Extent of the frame itself: pole ± radius in x and y, flat in z.
    fn frame_bounds(&self, radius: f64) -> Bounds {
        let pole = self.pole();
        Bounds::from_array([
            pole.x - radius,
            pole.x + radius,
            pole.y - radius,
            pole.y + radius,
            pole.z,
            pole.z,
        ])
    }

    /// Title of a non-polar radial axis: its angle, optionally with unit.
    fn angle_title(&self, angle: f64) -> String {
        let labels = &self.config.labels;
        let value = labels.angle_unit.from_degrees(angle);
        let text = labels.radial_angle_format.format(value);
        let text = text.trim();
        if labels.radial_units {
            format!("{}{}", text, labels.angle_unit.suffix())
        } else {
            text.to_string()
        }
    }

    /// Rebuild geometry when needed; returns true when it did.
    ///
    /// Styling is pushed after a rebuild, or on its own when only
    /// attributes changed. Freshly built axes are scaled for `viewport`
    /// straight away.
    pub fn build_axes(&mut self, viewport: &dyn Viewport) -> bool {
        let bounds = self.effective_bounds();
        let radius = self.resolve_radius(&bounds);
        self.effective_radius = radius;

        let rebuilt = self
            .rebuild
            .needs_rebuild(&bounds, self.radial_axes.is_empty());
        if rebuilt {
            self.rebuild_geometry(bounds, radius);
        } else {
            trace!("Polar axes unchanged, skipping rebuild");
        }

        if rebuilt || self.rebuild.needs_attributes() {
            self.set_non_dependent_attributes();
        }
        if rebuilt {
            self.auto_scale(viewport);
        }
        rebuilt
    }

    fn rebuild_geometry(&mut self, bounds: Bounds, radius: f64) {
        let pole = self.pole();
        let count = self.config.frame.number_of_radial_axes;
        let max_angle = self.config.frame.maximum_angle;

        debug!(
            "Rebuilding polar axes: {} radial axes over {}°, radius {} (version {})",
            count,
            max_angle,
            radius,
            self.rebuild.geometry_version()
        );
        if radius <= 0.0 {
            warn!("Polar axes radius is {}, frame is degenerate", radius);
        }

        let step = max_angle / (count - 1) as f64;
        self.radial_axes = (0..count)
            .map(|i| {
                let angle = if i + 1 == count {
                    max_angle
                } else {
                    i as f64 * step
                };
                RadialAxis::new(i, pole, angle, radius)
            })
            .collect();

        self.build_polar_axis_ticks(radius);
        self.build_polar_axis_labels();

        let radii: Vec<f64> = self.tick_set.radii().collect();
        self.polar_arcs
            .set_arcs(build_polar_arcs(pole, &radii, max_angle));
        trace!("{} polar arcs", self.polar_arcs.arcs().len());

        self.rebuild.mark_built(bounds);
    }

    /// Compute the tick radii and labels for `radius`.
    fn build_polar_axis_ticks(&mut self, radius: f64) {
        let labels = &self.config.labels;
        let options = LabelOptions {
            auto_label_scaling: labels.auto_label_scaling,
            user_exponent: labels.label_exponent,
            format: &labels.radial_label_format,
        };
        self.tick_set = TickSet::build(
            radius,
            self.config.ticks.number_of_polar_ticks,
            self.config.ticks.auto_subdivide_polar_axis,
            options,
        );
    }

    /// Hand the tick labels to the polar axis.
    fn build_polar_axis_labels(&mut self) {
        if let Some(polar_axis) = self.radial_axes.first_mut() {
            polar_axis.set_ticks(self.tick_set.ticks.clone());
        }
    }

    /// Push titles, visibility and styles to every radial axis.
    pub fn set_non_dependent_attributes(&mut self) {
        let visibility = self.config.visibility.clone();
        let polar_title = match self.tick_set.exponent_suffix() {
            Some(suffix) => format!("{}{}", self.config.labels.polar_axis_title, suffix),
            None => self.config.labels.polar_axis_title.clone(),
        };

        let titles: Vec<String> = self
            .radial_axes
            .iter()
            .map(|axis| {
                if axis.is_polar_axis() {
                    polar_title.clone()
                } else {
                    self.angle_title(axis.angle())
                }
            })
            .collect();

        for (axis, title) in self.radial_axes.iter_mut().zip(titles) {
            let polar = axis.is_polar_axis();
            axis.set_attributes(AxisAttributes {
                title,
                axis_visible: visibility.radial_axes,
                title_visible: visibility.radial_axes && visibility.radial_title,
                tick_visible: polar && visibility.polar_tick,
                label_visible: polar && visibility.polar_label,
                tick_location: self.config.ticks.tick_location,
                line_style: self.radial_axes_line_style.clone(),
                title_style: self.polar_axis_title_style.clone(),
                label_style: self.polar_axis_label_style.clone(),
            });
        }
        self.rebuild.mark_attributes_applied();
    }

    // ---------------------------------------------------------------
    // Auto-scaling
    // ---------------------------------------------------------------

    /// Recompute the text scale of the whole frame and push it to every axis.
    pub fn auto_scale(&mut self, viewport: &dyn Viewport) {
        let camera = self.camera.clone();
        let camera = camera.as_ref().map(|c| c.borrow());
        let camera = camera.as_deref();

        let scale = auto_scale_factor(viewport, camera, self.scale.screen_size, self.pole());
        self.scale.title_scale = scale;
        self.scale.label_scale = scale;
        trace!("Frame text scale {:.6}", scale);

        autoscale::auto_scale_axes(viewport, camera, &self.scale, &mut self.radial_axes);
    }

    /// Apply the current scale state to an explicit set of axes.
    pub fn auto_scale_axes(&self, viewport: &dyn Viewport, axes: &mut [RadialAxis]) {
        let camera = self.camera.as_ref().map(|c| c.borrow());
        autoscale::auto_scale_axes(viewport, camera.as_deref(), &self.scale, axes);
    }

    /// World length at `anchor` that projects to `screen_size` pixels.
    pub fn auto_scale_at(&self, viewport: &dyn Viewport, screen_size: f64, anchor: DVec3) -> f64 {
        let camera = self.camera.as_ref().map(|c| c.borrow());
        auto_scale_factor(viewport, camera.as_deref(), screen_size, anchor)
    }

    // ---------------------------------------------------------------
    // Copying
    // ---------------------------------------------------------------

    /// Copy every scalar property of `other` and share its camera,
    /// data source and styles. Owned geometry is rebuilt on the next frame.
    pub fn shallow_copy(&mut self, other: &PolarAxesActor) {
        self.config = other.config.clone();
        self.scale.set_screen_size(other.scale.screen_size);

        self.camera = other.camera.clone();
        self.data_source = other.data_source.clone();
        self.polar_axis_title_style = Rc::clone(&other.polar_axis_title_style);
        self.polar_axis_label_style = Rc::clone(&other.polar_axis_label_style);
        self.radial_axes_line_style = Rc::clone(&other.radial_axes_line_style);
        self.polar_arcs_line_style = Rc::clone(&other.polar_arcs_line_style);

        self.rebuild.touch_geometry();
        self.rebuild.touch_attributes();
        self.rebuild.invalidate_view();
        self.rebuild.set_forced(other.rebuild.is_forced());
    }
}

impl Renderable for PolarAxesActor {
    fn render_opaque_geometry(&mut self, viewport: &mut dyn Viewport) -> FrameReport {
        let camera = self.camera.clone();

        // Bounds to display space
        let bounds = self.effective_bounds();
        let radius = self.resolve_radius(&bounds);
        let transform = camera
            .as_ref()
            .map(|c| DisplayTransform::new(&*c.borrow(), &*viewport));
        let display = transform
            .as_ref()
            .map(|t| Bounds::from_array(display_bounds(t, &self.frame_bounds(radius))));

        // Rebuild decision
        let view_changed = self.rebuild.view_changed(transform.as_ref().map(|t| t.key()));
        let rebuilt = self.build_axes(&*viewport);

        // Auto-scale
        if view_changed && !rebuilt {
            self.auto_scale(&*viewport);
        }

        let mut report = FrameReport {
            rebuilt,
            display_bounds: display,
            ..FrameReport::default()
        };

        let (Some(camera), Some(transform), Some(display)) = (camera, transform, display) else {
            debug!("Polar axes have no camera, nothing drawn");
            return report;
        };
        if self.effective_radius <= 0.0 || self.config.frame.maximum_angle <= 0.0 {
            debug!("Polar axes span no area, nothing drawn");
            return report;
        }
        if !transform.rect().overlaps(&display.to_array()) {
            trace!("Polar axes outside the viewport, culled");
            return report;
        }

        // Draw
        let view_up = camera.borrow().view_up();
        let mut draw_calls = 0;

        if self.config.visibility.polar_arcs {
            let style = self.polar_arcs_line_style.borrow();
            draw_calls += self.polar_arcs.render(&transform, viewport, &style);
        }
        for axis in self.radial_axes.iter_mut() {
            draw_calls += axis.render(&transform, view_up, viewport);
        }

        trace!("Polar axes issued {} draw calls", draw_calls);
        report.draw_calls = draw_calls;
        report.rendered = draw_calls > 0;
        report
    }

    fn release_graphics_resources(&mut self) {
        for axis in self.radial_axes.iter_mut() {
            axis.release_graphics_resources();
        }
        self.polar_arcs.release_graphics_resources();
    }

    /// Pole ± radius in x and y, the pole's z.
    fn bounds(&self) -> Bounds {
        let bounds = self.effective_bounds();
        self.frame_bounds(self.resolve_radius(&bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::camera::OrbitCamera;
    use crate::visualizer::render::RecordingViewport;

    fn top_camera() -> Shared<OrbitCamera> {
        let mut camera = OrbitCamera::new(DVec3::ZERO, 40.0);
        camera.set_top_view();
        shared(camera)
    }

    #[test]
    fn test_defaults() {
        let actor = PolarAxesActor::new();
        assert_eq!(actor.number_of_radial_axes(), 5);
        assert_eq!(actor.maximum_angle(), 90.0);
        assert_eq!(actor.maximum_radius(), 1.0);
        assert_eq!(actor.screen_size(), 10.0);
        assert_eq!(actor.label_screen_offset(), 20.0);
        assert_eq!(actor.polar_axis_title(), "Radial Distance");
        assert!(actor.radial_axes().is_empty());
    }

    #[test]
    fn test_setters_clamp() {
        let mut actor = PolarAxesActor::new();
        actor.set_number_of_radial_axes(1);
        assert_eq!(actor.number_of_radial_axes(), 2);
        actor.set_number_of_radial_axes(500);
        assert_eq!(actor.number_of_radial_axes(), 50);
        actor.set_maximum_angle(-10.0);
        assert_eq!(actor.maximum_angle(), 0.0);
        actor.set_maximum_angle(720.0);
        assert_eq!(actor.maximum_angle(), 360.0);
        actor.set_maximum_radius(-4.0);
        assert_eq!(actor.maximum_radius(), 0.0);
        actor.set_maximum_radius(f64::NAN);
        assert_eq!(actor.maximum_radius(), 0.0);
        actor.set_label_exponent(400);
        assert_eq!(actor.label_exponent(), 30);
        actor.set_label_exponent(-400);
        assert_eq!(actor.label_exponent(), -30);
    }

    #[test]
    fn test_setters_only_bump_on_change() {
        let mut actor = PolarAxesActor::new();
        let version = actor.rebuild_state().geometry_version();
        actor.set_maximum_angle(90.0);
        actor.set_number_of_radial_axes(5);
        assert_eq!(actor.rebuild_state().geometry_version(), version);

        actor.set_maximum_angle(45.0);
        assert_eq!(actor.rebuild_state().geometry_version(), version + 1);

        let attributes = actor.rebuild_state().attribute_version();
        actor.set_polar_arcs_visibility(false);
        assert_eq!(actor.rebuild_state().attribute_version(), attributes + 1);
        assert_eq!(actor.rebuild_state().geometry_version(), version + 1);
    }

    #[test]
    fn test_screen_size_moves_label_offset() {
        let mut actor = PolarAxesActor::new();
        actor.set_screen_size(30.0);
        assert_eq!(actor.label_screen_offset(), 30.0);
        actor.set_screen_size(-1.0);
        assert_eq!(actor.screen_size(), 30.0);
    }

    #[test]
    fn test_invalid_formats_are_rejected() {
        let mut actor = PolarAxesActor::new();
        assert!(actor.set_radial_label_format("%d").is_err());
        assert_eq!(actor.radial_label_format().as_str(), "%-#6.3g");
        assert!(actor.set_radial_label_format("%.2f").is_ok());
        assert_eq!(actor.radial_label_format().as_str(), "%.2f");
    }

    #[test]
    fn test_set_bounds_rejects_inverted() {
        let mut actor = PolarAxesActor::new();
        let err = actor
            .set_bounds(Bounds::from_array([1.0, 0.0, 0.0, 1.0, 0.0, 1.0]))
            .unwrap_err();
        assert!(matches!(err, FrameError::InvalidBounds { axis: 'x', .. }));
        assert_eq!(actor.explicit_bounds(), Bounds::default());
    }

    #[test]
    fn test_build_axes_angles() {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(10.0);
        let viewport = RecordingViewport::new(100, 100);

        assert!(actor.build_axes(&viewport));
        let angles: Vec<f64> = actor.radial_axes().iter().map(|a| a.angle()).collect();
        assert_eq!(angles, vec![0.0, 22.5, 45.0, 67.5, 90.0]);

        assert!(!actor.build_axes(&viewport));
    }

    #[test]
    fn test_titles() {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(10.0);
        let viewport = RecordingViewport::new(100, 100);
        actor.build_axes(&viewport);

        let titles: Vec<&str> = actor
            .radial_axes()
            .iter()
            .filter_map(|a| a.title())
            .collect();
        assert_eq!(
            titles,
            vec!["Radial Distance", "22.5°", "45.0°", "67.5°", "90.0°"]
        );

        actor.set_radial_units(false);
        actor.build_axes(&viewport);
        assert_eq!(actor.radial_axes()[1].title(), Some("22.5"));
    }

    #[test]
    fn test_polar_title_carries_exponent() {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(20_000.0);
        actor.build_axes(&RecordingViewport::new(100, 100));
        assert_eq!(
            actor.radial_axes()[0].title(),
            Some("Radial Distance (x10^3)")
        );
    }

    #[test]
    fn test_render_without_camera_draws_nothing() {
        let mut actor = PolarAxesActor::new();
        let mut viewport = RecordingViewport::new(100, 100);
        let report = actor.render_opaque_geometry(&mut viewport);
        assert!(!report.rendered);
        assert!(report.rebuilt);
        assert_eq!(report.display_bounds, None);
        assert!(viewport.commands().is_empty());
        assert_eq!(actor.scale_state().label_scale, 1.0);
    }

    #[test]
    fn test_render_with_camera() {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(10.0);
        actor.set_camera(top_camera());
        let mut viewport = RecordingViewport::new(400, 400);

        let report = actor.render_opaque_geometry(&mut viewport);
        assert!(report.rendered);
        assert!(report.rebuilt);
        // 4 arcs (none at radius 0), 5 axis lines, 5 ticks, 5 labels, 5 titles
        assert_eq!(report.draw_calls, 24);
        assert_eq!(viewport.commands().len(), 24);
        assert!(actor.has_graphics_resources());
    }

    #[test]
    fn test_translucent_pass_draws_nothing() {
        let mut actor = PolarAxesActor::new();
        actor.set_camera(top_camera());
        let mut viewport = RecordingViewport::new(100, 100);
        let report = actor.render_translucent_geometry(&mut viewport);
        assert!(!report.rendered);
        assert!(viewport.commands().is_empty());
    }

    #[test]
    fn test_release_before_render() {
        let mut actor = PolarAxesActor::new();
        actor.release_graphics_resources();
        actor.release_graphics_resources();
        assert!(!actor.has_graphics_resources());
    }

    #[test]
    fn test_bounds() {
        let mut actor = PolarAxesActor::new();
        actor.set_pole(DVec3::new(1.0, 2.0, 3.0));
        actor.set_maximum_radius(2.0);
        assert_eq!(
            actor.bounds().to_array(),
            [-1.0, 3.0, 0.0, 4.0, 3.0, 3.0]
        );
    }
}
