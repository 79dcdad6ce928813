use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::{CameraOptions, OrbitRates};

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 5000.0;
const SETTLE_EPSILON: f32 = 1e-4;

/// Orbit velocity still to be applied by [`OrbitController::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Momentum {
    rotate: Vec2,
    pan: Vec2,
    zoom: f32,
}

impl Momentum {
    fn is_settled(&self) -> bool {
        self.rotate.length_squared() < SETTLE_EPSILON
            && self.pan.length_squared() < SETTLE_EPSILON
            && self.zoom.abs() < SETTLE_EPSILON
    }
}

/// Orbit camera around a focus point with damped rotate, pan and zoom.
///
/// Gestures add momentum; every [`Self::update`] applies a `damping`
/// fraction of it and keeps the rest for later frames, so motion eases out.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    camera: Camera,
    momentum: Momentum,
    rates: OrbitRates,
    framing: f32,
}

impl OrbitController {
    /// Controller looking down −Z at the origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let distance = 50.0;
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };
        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point: Vec3::ZERO,
            camera,
            momentum: Momentum::default(),
            rates: options.orbit_rates(),
            framing: options.framing(),
        }
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Distance from the eye to the focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;
        self.camera.eye = self.focus_point + dir * self.distance;
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Viewport size changed.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.camera.aspect = width / height;
        }
    }

    /// Queue an orbit by a pointer delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.momentum.rotate += delta * self.rates.rotate;
    }

    /// Queue a pan by a pointer delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.momentum.pan += delta * self.rates.pan;
    }

    /// Queue a zoom step (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        self.momentum.zoom += delta * self.rates.zoom;
    }

    /// Advance damping by one frame. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        if self.momentum.is_settled() {
            self.momentum = Momentum::default();
            return false;
        }
        let step = Momentum {
            rotate: self.momentum.rotate * self.rates.damping,
            pan: self.momentum.pan * self.rates.damping,
            zoom: self.momentum.zoom * self.rates.damping,
        };
        self.momentum.rotate -= step.rotate;
        self.momentum.pan -= step.pan;
        self.momentum.zoom -= step.zoom;

        let up = self.orientation * Vec3::Y;
        self.orientation =
            Quat::from_axis_angle(up, -step.rotate.x) * self.orientation;
        let right = self.orientation * Vec3::X;
        self.orientation =
            Quat::from_axis_angle(right, -step.rotate.y) * self.orientation;
        self.orientation = self.orientation.normalize();

        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        self.focus_point += right * -step.pan.x + up * step.pan.y;

        self.distance = (self.distance * (1.0 - step.zoom))
            .clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.update_camera_pos();
        true
    }

    /// Whether queued momentum remains.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        !self.momentum.is_settled()
    }

    /// Frame a bounding sphere: camera on +Z of `center` at
    /// `radius / tan(fovy / 2)` times the framing margin, clip planes
    /// widened to contain it.
    pub fn fit_to_sphere(&mut self, center: Vec3, radius: f32) {
        let radius = if radius.is_finite() { radius.max(1.0) } else { 1.0 };
        let half_fov = (self.camera.fovy.to_radians() * 0.5).max(1e-3);
        self.orientation = Quat::IDENTITY;
        self.momentum = Momentum::default();
        self.focus_point = center;
        self.distance = radius / half_fov.tan() * self.framing;
        self.camera.zfar = self.camera.zfar.max(self.distance + radius * 2.0);
        self.camera.znear = self
            .camera
            .znear
            .min((self.distance - radius * 2.0).max(0.01));
        self.update_camera_pos();
    }
}
