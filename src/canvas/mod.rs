//! Immediate-mode 2D drawing surface.
//!
//! The flat renderer only talks to [`Canvas2d`]. Implementations:
//!
//! - [`RecordingCanvas`] keeps an ordered [`DrawCall`] log (tests, replay).
//! - `SvgCanvas` (`binary` feature) builds an SVG document for the command
//!   line.
//! - `WebCanvas` (`web` feature) forwards to a DOM 2D context.

mod recording;
#[cfg(feature = "binary")]
mod vector;

use glam::Vec2;
pub use recording::{DrawCall, RecordingCanvas};
use serde::Serialize;
#[cfg(feature = "binary")]
pub use vector::SvgCanvas;

use crate::color::Rgb;

/// Color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    /// Opaque channels.
    pub rgb: Rgb,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(Rgb::new(0, 0, 0));

    /// Fully opaque color.
    #[must_use]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// Color with the given opacity.
    #[must_use]
    pub fn with_alpha(rgb: Rgb, alpha: f32) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// CSS `rgba(...)` notation.
    #[must_use]
    pub fn css(&self) -> String {
        let [r, g, b] = self.rgb.0;
        format!("rgba({r},{g},{b},{})", self.alpha)
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::opaque(rgb)
    }
}

/// Two-stop radial gradient: `inner` at the focus, `outer` at `radius`
/// around `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialGradient {
    /// Highlight point.
    pub focus: Vec2,
    /// Circle center.
    pub center: Vec2,
    /// Circle radius.
    pub radius: f32,
    /// Color at the focus.
    pub inner: Rgba,
    /// Color at the rim.
    pub outer: Rgba,
}

/// Paint used for filled shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Fill {
    /// Flat color.
    Solid(Rgba),
    /// Radial shading.
    Radial(RadialGradient),
}

/// Minimal 2D drawing surface.
///
/// Coordinates are canvas units with the origin at the top-left corner.
pub trait Canvas2d {
    /// Current drawable size `(width, height)`.
    fn size(&self) -> (f32, f32);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill);

    /// Outline a circle.
    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    );

    /// Draw text with its baseline starting at `at`.
    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: Rgba);
}

/// Something that can resolve canvas ids to drawing surfaces.
pub trait CanvasHost {
    /// Surface registered under `id`, if any.
    fn canvas(&mut self, id: &str) -> Option<&mut dyn Canvas2d>;
}
