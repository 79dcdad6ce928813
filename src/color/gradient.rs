//! B-factor normalization and the two gradient ramps.

use super::Rgb;
use crate::structure::Atom;

/// Min/max temperature factor over a set of atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BFactorRange {
    /// Smallest B-factor.
    pub min: f32,
    /// Largest B-factor.
    pub max: f32,
}

impl Default for BFactorRange {
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

impl BFactorRange {
    /// Range over `atoms`; an empty slice gives the zero range.
    #[must_use]
    pub fn from_atoms(atoms: &[Atom]) -> Self {
        let mut values = atoms.iter().map(|a| a.b_factor);
        let Some(first) = values.next() else {
            return Self::default();
        };
        let (min, max) =
            values.fold((first, first), |(lo, hi), b| (lo.min(b), hi.max(b)));
        Self { min, max }
    }

    /// Map `b` into `[0, 1]`; `0.5` when the range is empty.
    #[must_use]
    pub fn normalize(&self, b: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return 0.5;
        }
        ((b - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Blue → red ramp used on the 2D canvases: `(255v, 0, 255(1−v))`.
#[must_use]
pub fn flat_gradient(v: f32) -> Rgb {
    let v = v.clamp(0.0, 1.0);
    Rgb::from_scaled(255.0 * v, 0.0, 255.0 * (1.0 - v))
}

/// Blue → green → red ramp used in 3D: green peaks at `v = 0.5`.
#[must_use]
pub fn spatial_gradient(v: f32) -> Rgb {
    let v = v.clamp(0.0, 1.0);
    Rgb::from_scaled(
        255.0 * v,
        255.0 * (1.0 - (2.0 * v - 1.0).abs()),
        255.0 * (1.0 - v),
    )
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::structure::Residue;

    fn with_b(b_factor: f32) -> Atom {
        Atom {
            position: Vec3::ZERO,
            element: "C".to_owned(),
            name: "CA".to_owned(),
            residue: Residue {
                name: "GLY".to_owned(),
                seq: 1,
                chain: 'A',
            },
            residue_color_index: 0,
            b_factor,
            hetero: false,
        }
    }

    #[test]
    fn normalization_endpoints() {
        let atoms: Vec<Atom> = [12.0, 40.0, 26.0].map(with_b).into();
        let range = BFactorRange::from_atoms(&atoms);
        assert_eq!(range.normalize(12.0), 0.0);
        assert_eq!(range.normalize(40.0), 1.0);
        assert!((range.normalize(26.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn flat_range_normalizes_to_half() {
        let atoms: Vec<Atom> = [7.5, 7.5].map(with_b).into();
        let range = BFactorRange::from_atoms(&atoms);
        assert_eq!(range.normalize(7.5), 0.5);
        assert_eq!(BFactorRange::from_atoms(&[]).normalize(3.0), 0.5);
    }

    #[test]
    fn gradient_endpoints() {
        assert_eq!(flat_gradient(0.0), Rgb::new(0, 0, 255));
        assert_eq!(flat_gradient(1.0), Rgb::new(255, 0, 0));
        assert_eq!(spatial_gradient(0.0), Rgb::new(0, 0, 255));
        assert_eq!(spatial_gradient(0.5), Rgb::new(128, 255, 128));
        assert_eq!(spatial_gradient(1.0), Rgb::new(255, 0, 0));
    }
}
