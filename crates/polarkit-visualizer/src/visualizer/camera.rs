//! Camera capability consumed by the polar axes actor.
//!
//! The actor only needs the view and projection matrices, the eye and
//! focal point, and the projection parameters used to keep text at a
//! constant pixel size. [`OrbitCamera`] is a Z-up orbiting camera that
//! implements the trait for the CLI and for tests.

use glam::{DMat4, DVec3};
use polarkit_core::Bounds;

/// Projection and view parameters of a scene camera.
pub trait Camera {
    /// Eye position in world coordinates.
    fn position(&self) -> DVec3;

    /// Point the camera looks at.
    fn focal_point(&self) -> DVec3;

    /// Unit vector pointing up on screen.
    fn view_up(&self) -> DVec3;

    /// Vertical field of view in degrees (perspective only).
    fn view_angle(&self) -> f64;

    /// True for orthographic projection.
    fn parallel_projection(&self) -> bool;

    /// Half the visible height in world units (orthographic only).
    fn parallel_scale(&self) -> f64;

    fn view_matrix(&self) -> DMat4;

    /// Projection matrix for the given width / height ratio.
    fn projection_matrix(&self, aspect: f64) -> DMat4;

    /// Unit vector from the eye towards the focal point.
    fn direction_of_projection(&self) -> DVec3 {
        (self.focal_point() - self.position()).normalize_or_zero()
    }

    /// Combined world-to-clip transform.
    fn view_projection(&self, aspect: f64) -> DMat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: DVec3,
    pub distance: f64,
    pub yaw: f64,   // radians
    pub pitch: f64, // radians
    pub fov: f64,   // degrees
    pub near: f64,
    pub far: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub parallel: bool,
    pub parallel_scale: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: DVec3::ZERO,
            distance: 10.0,
            yaw: -90.0f64.to_radians(),
            pitch: 60.0f64.to_radians(),
            fov: 30.0,
            near: 0.01,
            far: 1000.0,
            min_distance: 1.0e-3,
            max_distance: 1.0e6,
            parallel: false,
            parallel_scale: 1.0,
        }
    }
}

impl OrbitCamera {
    pub fn new(target: DVec3, distance: f64) -> Self {
        Self {
            target,
            distance,
            ..Default::default()
        }
    }

    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;

        // Keep pitch short of the poles to avoid flipping
        let limit = 89.0f64.to_radians();
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.distance -= delta;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        let (right, up) = self.screen_basis();
        let scale = self.distance * 0.001;

        self.target -= right * delta_x * scale;
        self.target += up * delta_y * scale;
    }

    pub fn eye_position(&self) -> DVec3 {
        self.target + self.offset_direction() * self.distance
    }

    pub fn set_view(&mut self, yaw_deg: f64, pitch_deg: f64) {
        self.yaw = yaw_deg.to_radians();
        self.pitch = pitch_deg.to_radians();
    }

    /// Look straight down the Z axis.
    pub fn set_top_view(&mut self) {
        self.yaw = -90.0f64.to_radians();
        self.pitch = 90.0f64.to_radians();
    }

    pub fn set_isometric(&mut self) {
        self.yaw = -45.0f64.to_radians();
        self.pitch = 35.264f64.to_radians();
    }

    /// Center on `bounds` and move back until the whole box is visible.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds) {
        let [cx, cy, cz] = bounds.center();
        let radius = (0.5 * bounds.diagonal()).max(1.0e-3);

        self.target = DVec3::new(cx, cy, cz);

        // tan(fov/2) = radius / distance, with a margin
        let half_fov = (self.fov.to_radians() / 2.0).max(1.0e-3);
        let distance = (radius * 1.2) / half_fov.tan();

        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.parallel_scale = radius * 1.2;
        self.near = (self.distance - 2.0 * radius).max(self.distance * 1.0e-3);
        self.far = self.distance + 2.0 * radius;
    }

    fn offset_direction(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        // Z-up convention
        DVec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch).normalize()
    }

    /// Right and up vectors of the screen in world coordinates.
    fn screen_basis(&self) -> (DVec3, DVec3) {
        let forward = -self.offset_direction();

        // Straight up or down: Y is up on screen
        let world_up = if forward.cross(DVec3::Z).length_squared() < 1.0e-6 {
            DVec3::Y
        } else {
            DVec3::Z
        };

        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward).normalize();
        (right, up)
    }
}

impl Camera for OrbitCamera {
    fn position(&self) -> DVec3 {
        self.eye_position()
    }

    fn focal_point(&self) -> DVec3 {
        self.target
    }

    fn view_up(&self) -> DVec3 {
        self.screen_basis().1
    }

    fn view_angle(&self) -> f64 {
        self.fov
    }

    fn parallel_projection(&self) -> bool {
        self.parallel
    }

    fn parallel_scale(&self) -> f64 {
        self.parallel_scale
    }

    fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye_position(), self.target, self.view_up())
    }

    fn projection_matrix(&self, aspect: f64) -> DMat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };

        if self.parallel {
            let h = self.parallel_scale;
            let w = h * aspect;
            DMat4::orthographic_rh_gl(-w, w, -h, h, self.near, self.far)
        } else {
            DMat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
        }
    }
}
