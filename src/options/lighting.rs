use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Fixed three-light rig of the 3D scene.
pub struct LightingOptions {
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Position the key light shines from (toward the origin).
    #[schemars(skip)]
    pub key_from: [f32; 3],
    /// Fill light intensity.
    #[schemars(title = "Fill Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub fill_intensity: f32,
    /// Position the fill light shines from (toward the origin).
    #[schemars(skip)]
    pub fill_from: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            key_intensity: 0.8,
            key_from: [1.0, 1.0, 1.0],
            fill_intensity: 0.4,
            fill_from: [-1.0, -0.5, -1.0],
        }
    }
}
