//! Atom → color mapping shared by the 2D and 3D renderers.
//!
//! Everything here is pure. [`ColorMapping`] is a closed set of modes and
//! [`atom_color`] dispatches through a fixed table indexed by mode, so adding
//! a mode means adding one variant and one table entry.

mod gradient;
mod palette;

use std::fmt;
use std::str::FromStr;

pub use gradient::{flat_gradient, spatial_gradient, BFactorRange};
pub use palette::{
    element_color, residue_color, DEFAULT_ELEMENT_COLOR, RESIDUE_PALETTE,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProtviewError;
use crate::structure::Atom;

/// An opaque 8-bit RGB color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Build from 8-bit channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Build from channels on the 0..=255 scale, rounding to nearest.
    #[must_use]
    pub fn from_scaled(r: f32, g: f32, b: f32) -> Self {
        fn channel(v: f32) -> u8 {
            v.round().clamp(0.0, 255.0) as u8
        }
        Self([channel(r), channel(g), channel(b)])
    }

    /// Mix toward white by `amount` (0 = unchanged, 1 = white).
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let [r, g, b] = self.0.map(|c| {
            let c = f32::from(c);
            c + (255.0 - c) * t
        });
        Self::from_scaled(r, g, b)
    }

    /// `#rrggbb` notation.
    #[must_use]
    pub fn hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// How atoms are colored.
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
pub enum ColorMapping {
    /// CPK-style color per element.
    #[default]
    Atom,
    /// Blue → red gradient over the temperature factor.
    BFactor,
    /// Cycling palette per residue group.
    Residue,
}

impl ColorMapping {
    /// All modes, in table order.
    pub const ALL: [Self; 3] = [Self::Atom, Self::BFactor, Self::Residue];

    /// Display label for titles and menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Atom => "Atom",
            Self::BFactor => "B-Factor",
            Self::Residue => "Residue",
        }
    }
}

impl fmt::Display for ColorMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColorMapping {
    type Err = ProtviewError;

    /// Accepts host spellings such as `atom`, `b-factor`, `bfactor`,
    /// `B_Factor` and `residue`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "atom" | "element" => Ok(Self::Atom),
            "bfactor" => Ok(Self::BFactor),
            "residue" => Ok(Self::Residue),
            _ => Err(ProtviewError::InvalidOption(format!(
                "unknown color mapping {s:?}"
            ))),
        }
    }
}

/// Which B-factor gradient a call site uses.
///
/// The canvas views and the 3D scene use different channel formulas; see
/// [`flat_gradient`] and [`spatial_gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    /// Two-channel blue → red ramp of the 2D views.
    Flat,
    /// Blue → green → red ramp of the 3D scene.
    Spatial,
}

/// Per-render inputs shared by every atom's color lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorContext {
    /// B-factor range of the atoms being rendered.
    pub b_factors: BFactorRange,
    /// Gradient formula for B-factor mode.
    pub gradient: GradientKind,
}

impl ColorContext {
    /// Context for rendering `atoms`; the B-factor range is taken from
    /// exactly these atoms.
    #[must_use]
    pub fn new(atoms: &[Atom], gradient: GradientKind) -> Self {
        Self {
            b_factors: BFactorRange::from_atoms(atoms),
            gradient,
        }
    }
}

type MapFn = fn(&Atom, &ColorContext) -> Rgb;

fn by_element(atom: &Atom, _: &ColorContext) -> Rgb {
    element_color(&atom.element)
}

fn by_b_factor(atom: &Atom, ctx: &ColorContext) -> Rgb {
    let v = ctx.b_factors.normalize(atom.b_factor);
    match ctx.gradient {
        GradientKind::Flat => flat_gradient(v),
        GradientKind::Spatial => spatial_gradient(v),
    }
}

fn by_residue(atom: &Atom, _: &ColorContext) -> Rgb {
    residue_color(atom.residue_color_index)
}

/// Indexed by `ColorMapping as usize`.
const MAPPERS: [MapFn; 3] = [by_element, by_b_factor, by_residue];

/// Color of `atom` under `mapping`.
#[must_use]
pub fn atom_color(mapping: ColorMapping, atom: &Atom, ctx: &ColorContext) -> Rgb {
    MAPPERS[mapping as usize](atom, ctx)
}
