use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bonds::DEFAULT_BOND_THRESHOLD;
use crate::color::ColorMapping;
use crate::error::ProtviewError;

/// Molecular representation.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Spheres for atoms, cylinders for bonds.
    #[default]
    BallAndStick,
    /// Smooth tube through the alpha-carbon trace.
    ProteinRibbon,
    /// Van der Waals spheres, no bonds.
    SpaceFill,
}

impl Style {
    /// Display label for titles and menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BallAndStick => "Ball and Stick",
            Self::ProteinRibbon => "Protein Ribbon",
            Self::SpaceFill => "Space Fill",
        }
    }

    /// Bond stroke width on the 2D canvases.
    #[must_use]
    pub fn flat_bond_width(self) -> f32 {
        match self {
            Self::BallAndStick => 2.0,
            Self::ProteinRibbon | Self::SpaceFill => 1.0,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Style {
    type Err = ProtviewError;

    /// Accepts `ball_and_stick`, `Ball-and-Stick`, `Ball and Stick`,
    /// `ribbon`, `spacefill` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "ballandstick" | "ballstick" => Ok(Self::BallAndStick),
            "proteinribbon" | "ribbon" | "cartoon" => Ok(Self::ProteinRibbon),
            "spacefill" | "spacefilling" | "vdw" => Ok(Self::SpaceFill),
            _ => Err(ProtviewError::InvalidOption(format!(
                "unknown style {s:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Visualization", inline)]
#[serde(default)]
/// What to draw and how to color it. Shared by the 2D and 3D views.
pub struct VisualizationOptions {
    /// Molecular representation.
    #[schemars(title = "Style")]
    pub style: Style,
    /// Atom coloring mode.
    #[schemars(title = "Color By")]
    pub color_mapping: ColorMapping,
    /// Maximum bonded distance in Ångström (exclusive).
    #[schemars(title = "Bond Threshold", range(min = 0.5, max = 5.0), extend("step" = 0.1))]
    pub bond_threshold: f32,
    /// Scale applied to every atom radius.
    #[schemars(title = "Atom Size", range(min = 0.1, max = 3.0), extend("step" = 0.1))]
    pub atom_size_multiplier: f32,
    /// Whether atom labels are drawn.
    #[schemars(title = "Show Labels")]
    pub show_labels: bool,
}

impl Default for VisualizationOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            color_mapping: ColorMapping::default(),
            bond_threshold: DEFAULT_BOND_THRESHOLD,
            atom_size_multiplier: 1.0,
            show_labels: false,
        }
    }
}

impl VisualizationOptions {
    /// Reject thresholds and size multipliers that are not positive finite
    /// numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ProtviewError::InvalidOption`] naming the offending field.
    pub fn validate(&self) -> Result<(), ProtviewError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.bond_threshold) {
            return Err(ProtviewError::InvalidOption(format!(
                "bond_threshold must be positive, got {}",
                self.bond_threshold
            )));
        }
        if !positive(self.atom_size_multiplier) {
            return Err(ProtviewError::InvalidOption(format!(
                "atom_size_multiplier must be positive, got {}",
                self.atom_size_multiplier
            )));
        }
        Ok(())
    }
}
