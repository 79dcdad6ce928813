//! Summary statistics for the info panel.

use std::collections::BTreeSet;

use glam::Vec3;
use serde::Serialize;

use super::{Aabb, Structure};
use crate::bonds::Bond;

/// Counts, extents and distinct residues/elements of a loaded molecule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeInfo {
    /// Number of atoms.
    pub num_atoms: usize,
    /// Number of inferred bonds.
    pub num_bonds: usize,
    /// Bounding box, absent for an empty structure.
    pub bounds: Option<Aabb>,
    /// Box edge lengths in Ångström.
    pub dimensions: Vec3,
    /// Distinct residues as `(chain, sequence number)`, ascending.
    pub unique_residues: Vec<(char, i32)>,
    /// Distinct chain identifiers, ascending.
    pub unique_chains: Vec<char>,
    /// Distinct element symbols, ascending.
    pub unique_elements: Vec<String>,
}

impl MoleculeInfo {
    /// Gather statistics for `structure` and its bonds.
    #[must_use]
    pub fn compute(structure: &Structure, bonds: &[Bond]) -> Self {
        let bounds = structure.bounds();
        let residues: BTreeSet<(char, i32)> = structure
            .atoms()
            .iter()
            .map(|a| (a.residue.chain, a.residue.seq))
            .collect();
        let chains: BTreeSet<char> =
            residues.iter().map(|&(chain, _)| chain).collect();
        let elements: BTreeSet<&str> = structure
            .atoms()
            .iter()
            .map(|a| a.element.as_str())
            .collect();
        Self {
            num_atoms: structure.len(),
            num_bonds: bonds.len(),
            bounds,
            dimensions: bounds.map_or(Vec3::ZERO, |b| b.size()),
            unique_residues: residues.into_iter().collect(),
            unique_chains: chains.into_iter().collect(),
            unique_elements: elements.into_iter().map(str::to_owned).collect(),
        }
    }

    /// Human-readable multi-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.num_atoms == 0 {
            return "No molecule loaded".to_owned();
        }
        let d = self.dimensions;
        [
            format!("Atoms: {}", self.num_atoms),
            format!("Bonds: {}", self.num_bonds),
            format!("Size: {:.2} × {:.2} × {:.2} Å", d.x, d.y, d.z),
            format!("Residues: {}", self.unique_residues.len()),
            format!("Chains: {}", self.unique_chains.len()),
            format!("Atom types: {}", self.unique_elements.len()),
        ]
        .join("\n")
    }
}
