use bytemuck::{Pod, Zeroable};
use glam::{DMat4, DVec2, DVec3, DVec4};
use serde::Deserialize;

use crate::picking::ray::Ray;

/// Orbit camera parameters. All fields default, so hosts can override a subset
/// from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Initial eye position in world space.
    pub eye: [f64; 3],
    pub target: [f64; 3],
    /// Fraction of pending orbit motion applied per 60 Hz frame.
    /// 0 disables damping and applies drags immediately.
    pub damping: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 3000.0,
            eye: [0.0, 50.0, 150.0],
            target: [0.0, 0.0, 0.0],
            damping: 0.05,
            min_distance: 10.0,
            max_distance: 1000.0,
        }
    }
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

/// Perspective camera orbiting a target point.
///
/// Position is kept in spherical form (azimuth about +Y, elevation above the
/// XZ plane, distance from the target). Drags queue up angular motion that
/// [`OrbitCamera::update`] releases gradually when damping is on.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub azimuth: f64,
    pub elevation: f64,
    pub distance: f64,
    pub target: DVec3,
    fov_y: f64,
    near: f64,
    far: f64,
    damping: f64,
    min_distance: f64,
    max_distance: f64,
    pending_azimuth: f64,
    pending_elevation: f64,
    viewport: DVec2,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1280.0, 720.0)
    }
}

impl OrbitCamera {
    /// Radians of orbit per pixel of drag.
    pub const ORBIT_SENSITIVITY: f64 = 0.005;
    /// Fractional distance change per zoom step.
    pub const ZOOM_SPEED: f64 = 0.1;
    /// Just short of straight up or down, so the view basis stays defined.
    pub const MAX_ELEVATION: f64 = 1.55;

    pub fn from_config(config: &CameraConfig, viewport_width: f64, viewport_height: f64) -> Self {
        let target = DVec3::from_array(config.target);
        let offset = DVec3::from_array(config.eye) - target;
        let distance = offset.length();
        let (azimuth, elevation) = if distance > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / distance).asin())
        } else {
            (0.0, 0.0)
        };
        let (min_distance, max_distance) = if config.min_distance <= config.max_distance {
            (config.min_distance, config.max_distance)
        } else {
            log::warn!(
                "camera distance range {}..{} is inverted, swapping",
                config.min_distance,
                config.max_distance
            );
            (config.max_distance, config.min_distance)
        };

        let mut camera = Self {
            azimuth,
            elevation: elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION),
            distance: distance.clamp(min_distance, max_distance),
            target,
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            damping: config.damping.clamp(0.0, 1.0),
            min_distance,
            max_distance,
            pending_azimuth: 0.0,
            pending_elevation: 0.0,
            viewport: DVec2::new(1.0, 1.0),
        };
        camera.resize(viewport_width, viewport_height);
        camera
    }

    /// Queue an orbit by a pointer drag delta in pixels.
    pub fn orbit(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.pending_azimuth -= dx * Self::ORBIT_SENSITIVITY;
        self.pending_elevation += dy * Self::ORBIT_SENSITIVITY;
        if self.damping <= 0.0 {
            self.apply_pending(1.0);
        }
    }

    /// Zoom by `steps` (positive = closer). Applied immediately.
    pub fn zoom(&mut self, steps: f64) {
        if !steps.is_finite() {
            return;
        }
        let factor = (1.0 - Self::ZOOM_SPEED).powf(steps);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Release queued orbit motion. Frame-rate independent: the same drag
    /// settles in the same wall time at any refresh rate.
    pub fn update(&mut self, dt: f64) {
        if self.pending_azimuth == 0.0 && self.pending_elevation == 0.0 {
            return;
        }
        let keep = (1.0 - self.damping).powf(dt.max(0.0) * 60.0);
        self.apply_pending(1.0 - keep);
        if self.pending_azimuth.abs() < 1e-9 && self.pending_elevation.abs() < 1e-9 {
            self.pending_azimuth = 0.0;
            self.pending_elevation = 0.0;
        }
    }

    fn apply_pending(&mut self, fraction: f64) {
        let da = self.pending_azimuth * fraction;
        let de = self.pending_elevation * fraction;
        self.azimuth += da;
        self.elevation = (self.elevation + de).clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        self.pending_azimuth -= da;
        self.pending_elevation -= de;
    }

    /// Update the viewport. Only the aspect ratio changes.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring degenerate viewport {width}x{height}");
            return;
        }
        self.viewport = DVec2::new(width, height);
        log::debug!("camera viewport {width}x{height}");
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f64 {
        self.viewport.x / self.viewport.y
    }

    /// Camera position in world space.
    pub fn eye(&self) -> DVec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + self.distance * DVec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye(), self.target, DVec3::Y)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        let eye = self.eye().as_vec3();
        CameraUniform {
            view_projection: self.view_projection().as_mat4().to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }

    /// World-space ray from the eye through a point in normalized device
    /// coordinates (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: DVec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far = inverse * DVec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        let eye = self.eye();
        Ray::new(eye, far - eye)
    }
}
