use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scale from the user-facing rotate speed to radians per pixel.
const ROTATE_RADIANS_PER_PIXEL: f32 = 0.02;
/// Scale from the user-facing pan speed to Ångström per pixel at unit zoom.
const PAN_UNITS_PER_PIXEL: f32 = 0.2;

/// How the 3D view frames a molecule and reacts to orbit gestures.
///
/// The projection fields follow the perspective camera; the remaining
/// fields are user sensitivities that [`Self::orbit_rates`] turns into
/// per-pixel rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "3D View", inline)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of view", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Multiplier on the distance that exactly fits the bounding sphere.
    #[schemars(title = "Framing margin", range(min = 1.0, max = 4.0), extend("step" = 0.1))]
    pub fit_padding: f32,
    /// Drag-to-orbit sensitivity.
    #[schemars(title = "Orbit sensitivity", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Shift-drag translation sensitivity.
    #[schemars(title = "Pan sensitivity", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Wheel zoom sensitivity.
    #[schemars(title = "Zoom sensitivity", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Share of the pending orbit motion applied per frame.
    #[schemars(title = "Easing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Near clip distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clip distance, grown on demand to fit large molecules.
    #[schemars(skip)]
    pub zfar: f32,
}

/// Per-pixel gesture rates derived from [`CameraOptions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRates {
    /// Radians per dragged pixel.
    pub rotate: f32,
    /// Ångström per dragged pixel before distance scaling.
    pub pan: f32,
    /// Distance fraction per wheel unit.
    pub zoom: f32,
    /// Share of the pending motion applied per frame, in `0.01..=1`.
    pub damping: f32,
}

impl CameraOptions {
    /// Convert the sensitivities into the rates the orbit controller uses.
    #[must_use]
    pub fn orbit_rates(&self) -> OrbitRates {
        OrbitRates {
            rotate: self.rotate_speed * ROTATE_RADIANS_PER_PIXEL,
            pan: self.pan_speed * PAN_UNITS_PER_PIXEL,
            zoom: self.zoom_speed,
            damping: self.damping.clamp(0.01, 1.0),
        }
    }

    /// Framing margin, never tighter than an exact fit.
    #[must_use]
    pub fn framing(&self) -> f32 {
        self.fit_padding.max(1.0)
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            fit_padding: 1.5,
            rotate_speed: 0.5,
            pan_speed: 0.5,
            zoom_speed: 0.1,
            damping: 0.1,
            znear: 0.1,
            zfar: 2000.0,
        }
    }
}
