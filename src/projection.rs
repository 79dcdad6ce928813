//! Orthographic projection of atoms onto a 2D canvas.
//!
//! A [`Layout`] is computed once per (atoms, axis pair, canvas size). It
//! fits the selected two coordinates into the canvas with uniform scale,
//! keeps `padding` free on every edge, and derives a depth factor from the
//! third coordinate so farther atoms draw smaller.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::options::LayoutOptions;
use crate::structure::Atom;

/// Scale used when both projected axes have zero extent.
pub const DEGENERATE_SCALE: f32 = 1.0e4;

/// Depth factor of the farthest atom; the nearest gets `1.0`.
pub const MIN_DEPTH_FACTOR: f32 = 0.5;

/// Which two coordinates map onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AxisPair {
    /// Looking down Z: canvas (x, y), depth z.
    Top,
    /// Looking along Y: canvas (x, z), depth y.
    Side,
}

impl AxisPair {
    /// Both views, in the order the host shows them.
    pub const ALL: [Self; 2] = [Self::Top, Self::Side];

    /// `(horizontal, vertical, depth)` components of `p`.
    #[must_use]
    pub fn split(self, p: Vec3) -> (f32, f32, f32) {
        match self {
            Self::Top => (p.x, p.y, p.z),
            Self::Side => (p.x, p.z, p.y),
        }
    }

    /// Title shown on the canvas.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Top => "Top View (X-Y)",
            Self::Side => "Side View (X-Z)",
        }
    }
}

/// Fitted transform from molecule coordinates to canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    /// Projected axes.
    pub axes: AxisPair,
    /// Minimum of the two in-plane coordinates.
    pub min: Vec2,
    /// Maximum of the two in-plane coordinates.
    pub max: Vec2,
    /// Uniform canvas units per Ångström.
    pub scale: f32,
    /// Canvas margin.
    pub padding: f32,
    /// Minimum of the out-of-plane coordinate.
    pub depth_min: f32,
    /// Maximum of the out-of-plane coordinate.
    pub depth_max: f32,
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

impl Layout {
    /// Fit `atoms` into a `width × height` canvas.
    ///
    /// Returns `None` when there is nothing to project.
    #[must_use]
    pub fn compute(
        atoms: &[Atom],
        axes: AxisPair,
        width: f32,
        height: f32,
        options: &LayoutOptions,
    ) -> Option<Self> {
        let mut coords = atoms.iter().map(|a| axes.split(a.position));
        let (u, v, d) = coords.next()?;
        let init = (Vec2::new(u, v), Vec2::new(u, v), d, d);
        let (min, max, depth_min, depth_max) =
            coords.fold(init, |(lo, hi, dlo, dhi), (u, v, d)| {
                let p = Vec2::new(u, v);
                (lo.min(p), hi.max(p), dlo.min(d), dhi.max(d))
            });

        let (width, height) = (finite_or(width, 0.0), finite_or(height, 0.0));
        let padding = finite_or(options.padding, 0.0)
            .clamp(0.0, 0.5 * width.min(height).max(0.0));
        let available = Vec2::new(
            (width - 2.0 * padding).max(0.0),
            (height - 2.0 * padding).max(0.0),
        );
        let extent = max - min;
        let axis_scale = |avail: f32, ext: f32| {
            let s = avail / ext;
            (ext > 0.0 && s.is_finite()).then_some(s)
        };
        let fitted = match (
            axis_scale(available.x, extent.x),
            axis_scale(available.y, extent.y),
        ) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => DEGENERATE_SCALE,
        };
        let fit_factor =
            finite_or(options.fit_factor, 1.0).clamp(f32::EPSILON, 1.0);
        let scale = finite_or(fitted * fit_factor, DEGENERATE_SCALE);

        Some(Self {
            axes,
            min,
            max,
            scale,
            padding,
            depth_min,
            depth_max,
        })
    }

    /// Canvas position of `atom`.
    #[must_use]
    pub fn project(&self, atom: &Atom) -> Vec2 {
        self.project_point(atom.position)
    }

    /// Canvas position of an arbitrary point.
    #[must_use]
    pub fn project_point(&self, p: Vec3) -> Vec2 {
        let (u, v, _) = self.axes.split(p);
        (Vec2::new(u, v) - self.min) * self.scale + Vec2::splat(self.padding)
    }

    /// Linear map of the out-of-plane coordinate into `[0.5, 1.0]`.
    #[must_use]
    pub fn depth_factor(&self, atom: &Atom) -> f32 {
        let (_, _, d) = self.axes.split(atom.position);
        let range = self.depth_max - self.depth_min;
        if range <= 0.0 || !range.is_finite() {
            return 1.0;
        }
        let t = ((d - self.depth_min) / range).clamp(0.0, 1.0);
        MIN_DEPTH_FACTOR + (1.0 - MIN_DEPTH_FACTOR) * t
    }

    /// Atom indices sorted by ascending out-of-plane coordinate (farther
    /// first). Ties keep file order.
    #[must_use]
    pub fn draw_order(&self, atoms: &[Atom]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..atoms.len()).collect();
        order.sort_by(|&a, &b| {
            let (_, _, da) = self.axes.split(atoms[a].position);
            let (_, _, db) = self.axes.split(atoms[b].position);
            da.total_cmp(&db)
        });
        order
    }
}
