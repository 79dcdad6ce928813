//! Fixed light rig of the 3D scene: one ambient and two directional lights.

use glam::Vec3;
use serde::Serialize;

use crate::options::LightingOptions;

/// A directional light shining from `from` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionalLight {
    /// Position the light shines from.
    pub from: Vec3,
    /// Unit direction the light travels (`-from`, normalized).
    pub direction: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl DirectionalLight {
    fn new(from: [f32; 3], intensity: f32) -> Self {
        let from = Vec3::from_array(from);
        Self {
            from,
            direction: (-from).normalize_or(Vec3::NEG_Z),
            intensity,
        }
    }
}

/// Lights created once per scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneLights {
    /// Ambient intensity.
    pub ambient: f32,
    /// Key light.
    pub key: DirectionalLight,
    /// Fill light.
    pub fill: DirectionalLight,
}

impl SceneLights {
    /// Build the rig from options.
    #[must_use]
    pub fn new(options: &LightingOptions) -> Self {
        Self {
            ambient: options.ambient,
            key: DirectionalLight::new(options.key_from, options.key_intensity),
            fill: DirectionalLight::new(
                options.fill_from,
                options.fill_intensity,
            ),
        }
    }
}

impl Default for SceneLights {
    fn default() -> Self {
        Self::new(&LightingOptions::default())
    }
}
