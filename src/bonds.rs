//! Distance-threshold bond inference.
//!
//! A bond is any unordered atom pair closer than the threshold. No element,
//! valence or bond-order chemistry is considered. Two strategies produce the
//! identical, `(a, b)`-sorted bond list:
//!
//! - [`infer_bonds_exhaustive`] tests every pair (O(n²)).
//! - [`infer_bonds_grid`] buckets atoms into cubic cells about one threshold wide
//!   and only tests pairs in neighboring cells.
//!
//! [`infer_bonds`] picks between them by atom count.

use glam::{IVec3, Vec3};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::structure::Atom;

/// Default bonding threshold in Ångström.
pub const DEFAULT_BOND_THRESHOLD: f32 = 3.0;

/// Atom count above which [`infer_bonds`] switches to the spatial grid.
pub const GRID_CUTOFF: usize = 2048;

/// Cells per axis the grid never exceeds; widening the cells instead keeps
/// every cell coordinate far inside `i32`.
const MAX_CELLS_PER_AXIS: f32 = 1_048_576.0;

/// An inferred bond between two atoms, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bond {
    /// Index of the first atom.
    pub a: usize,
    /// Index of the second atom (always greater than `a`).
    pub b: usize,
    /// Euclidean distance between the two atoms.
    pub distance: f32,
}

fn usable(threshold: f32) -> bool {
    threshold.is_finite() && threshold > 0.0
}

/// Infer bonds, choosing the strategy by input size.
///
/// A non-positive or non-finite threshold yields no bonds.
#[must_use]
pub fn infer_bonds(atoms: &[Atom], threshold: f32) -> Vec<Bond> {
    let bonds = if atoms.len() > GRID_CUTOFF {
        infer_bonds_grid(atoms, threshold)
    } else {
        infer_bonds_exhaustive(atoms, threshold)
    };
    log::debug!(
        "inferred {} bonds over {} atoms (threshold {threshold} Å)",
        bonds.len(),
        atoms.len()
    );
    bonds
}

/// Test every unordered pair.
#[must_use]
pub fn infer_bonds_exhaustive(atoms: &[Atom], threshold: f32) -> Vec<Bond> {
    if !usable(threshold) {
        return Vec::new();
    }
    let mut bonds = Vec::new();
    for (a, atom_a) in atoms.iter().enumerate() {
        for (offset, atom_b) in atoms[a + 1..].iter().enumerate() {
            let distance = atom_a.position.distance(atom_b.position);
            if distance < threshold {
                bonds.push(Bond {
                    a,
                    b: a + 1 + offset,
                    distance,
                });
            }
        }
    }
    bonds
}

fn cell_of(position: Vec3, cell_size: f32) -> IVec3 {
    (position / cell_size).floor().as_ivec3()
}

/// Bucket atoms into a uniform grid and test neighboring cells only.
#[must_use]
pub fn infer_bonds_grid(atoms: &[Atom], threshold: f32) -> Vec<Bond> {
    if !usable(threshold) {
        return Vec::new();
    }

    let Some(origin) = atoms.iter().map(|a| a.position).reduce(Vec3::min) else {
        return Vec::new();
    };
    let extent = atoms
        .iter()
        .map(|a| a.position - origin)
        .fold(Vec3::ZERO, Vec3::max)
        .max_element();
    // Cells are a hair wider than the threshold so division rounding can
    // never put a bonded pair two cells apart.
    let cell_size = (threshold * 1.001).max(extent / MAX_CELLS_PER_AXIS);
    let mut cells: FxHashMap<IVec3, Vec<usize>> = FxHashMap::default();
    for (i, atom) in atoms.iter().enumerate() {
        cells
            .entry(cell_of(atom.position - origin, cell_size))
            .or_default()
            .push(i);
    }

    let mut bonds = Vec::new();
    for (a, atom_a) in atoms.iter().enumerate() {
        let home = cell_of(atom_a.position - origin, cell_size);
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let neighbour =
                        home.saturating_add(IVec3::new(dx, dy, dz));
                    let Some(members) = cells.get(&neighbour) else {
                        continue;
                    };
                    for &b in members.iter().filter(|&&b| b > a) {
                        let distance =
                            atom_a.position.distance(atoms[b].position);
                        if distance < threshold {
                            bonds.push(Bond { a, b, distance });
                        }
                    }
                }
            }
        }
    }
    bonds.sort_unstable_by(|x, y| x.a.cmp(&y.a).then(x.b.cmp(&y.b)));
    bonds
}
