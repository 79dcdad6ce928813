use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::ProtviewError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Fitting and shading parameters for the 2D projected views.
pub struct LayoutOptions {
    /// Margin kept free on every canvas edge, in canvas units.
    #[schemars(title = "Padding", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub padding: f32,
    /// Fraction of the available area the molecule may occupy.
    #[schemars(title = "Fit Factor", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub fit_factor: f32,
    /// Draw farther atoms first so nearer ones overlap them.
    #[schemars(title = "Depth Sort")]
    pub depth_sort: bool,
    /// Fill atoms with a radial highlight instead of a flat color.
    #[schemars(title = "Gradient Shading")]
    pub gradient_shading: bool,
    /// Canvas clear color.
    #[schemars(skip)]
    pub background: Rgb,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding: 40.0,
            fit_factor: 0.8,
            depth_sort: true,
            gradient_shading: true,
            background: Rgb::new(255, 255, 255),
        }
    }
}

impl LayoutOptions {
    /// Reject a fit factor outside `(0, 1]` or a negative padding.
    ///
    /// Padding too wide for a particular canvas is clamped at layout time.
    ///
    /// # Errors
    ///
    /// [`ProtviewError::InvalidOption`] naming the offending field.
    pub fn validate(&self) -> Result<(), ProtviewError> {
        if !(self.fit_factor > 0.0 && self.fit_factor <= 1.0) {
            return Err(ProtviewError::InvalidOption(format!(
                "fit_factor must be in (0, 1], got {}",
                self.fit_factor
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(ProtviewError::InvalidOption(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }

    /// Preset of the simple viewer: tighter fit, flat fills.
    #[must_use]
    pub fn simple() -> Self {
        Self {
            fit_factor: 0.9,
            gradient_shading: false,
            ..Self::default()
        }
    }
}
