//! Parsed molecular structure: atoms, residues and derived bounds.
//!
//! A [`Structure`] is produced once per input text by
//! [`parse_structure`] and never mutated afterwards. Every downstream
//! engine (bond inference, projection, the 3D scene) refers to atoms by
//! their index into [`Structure::atoms`].

pub mod element;
mod parser;
mod stats;

use glam::Vec3;
pub use parser::parse_structure;
use serde::Serialize;
pub use stats::MoleculeInfo;

/// Atom name that marks the alpha-carbon of each residue.
pub const BACKBONE_ATOM_NAME: &str = "CA";

/// Number of entries in the residue palette; residue color indices cycle
/// modulo this value.
pub const RESIDUE_PALETTE_SIZE: usize = 5;

/// Residue descriptor shared by all atoms of one residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Residue {
    /// Three-letter residue name (e.g. `ALA`).
    pub name: String,
    /// Residue sequence number.
    pub seq: i32,
    /// Chain identifier (a space when the column is blank).
    pub chain: char,
}

/// One parsed structural record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    /// Position in Ångström.
    pub position: Vec3,
    /// Uppercase element symbol, one or two characters.
    pub element: String,
    /// Trimmed atom label (e.g. `CA`).
    pub name: String,
    /// Owning residue.
    pub residue: Residue,
    /// Residue-change counter modulo [`RESIDUE_PALETTE_SIZE`].
    pub residue_color_index: usize,
    /// Crystallographic temperature factor.
    pub b_factor: f32,
    /// Whether the record was a `HETATM` line.
    pub hetero: bool,
}

impl Atom {
    /// Whether this atom is the alpha-carbon backbone marker.
    #[must_use]
    pub fn is_backbone(&self) -> bool {
        self.name == BACKBONE_ATOM_NAME
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(mut points: impl Iterator<Item = Vec3>) -> Option<Self> {
        let first = points.next()?;
        let (min, max) =
            points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere circumscribing the box.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

/// Ordered list of atoms parsed from one input text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Structure {
    atoms: Vec<Atom>,
}

impl Structure {
    /// Wrap an already-built atom list.
    #[must_use]
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Atoms in file order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Number of atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether no atom was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Bounding box of all atom positions.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.atoms.iter().map(|a| a.position))
    }

    /// Indices of alpha-carbon atoms, in file order.
    #[must_use]
    pub fn backbone_indices(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_backbone())
            .map(|(i, _)| i)
            .collect()
    }

    /// Serialize atom `index` back into a fixed-column record line.
    ///
    /// Uses the same column layout the parser reads, so parsing the
    /// returned line yields the same coordinates (to three decimals).
    #[must_use]
    pub fn to_record_line(&self, index: usize) -> Option<String> {
        let atom = self.atoms.get(index)?;
        let record = if atom.hetero { "HETATM" } else { "ATOM" };
        // Names shorter than four characters start in column 14.
        let name = if atom.name.len() < 4 {
            format!(" {:<3}", atom.name)
        } else {
            atom.name.clone()
        };
        Some(format!(
            "{record:<6}{serial:>5} {name:<4} {res:>3.3} {chain}{seq:>4}    \
             {x:>8.3}{y:>8.3}{z:>8.3}{occ:>6.2}{b:>6.2}          {el:>2}",
            serial = (index + 1) % 100_000,
            res = atom.residue.name,
            chain = atom.residue.chain,
            seq = atom.residue.seq,
            x = atom.position.x,
            y = atom.position.y,
            z = atom.position.z,
            occ = 1.0,
            b = atom.b_factor,
            el = atom.element,
        ))
    }
}

/// Full description of one atom, published on hover and selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomDetail {
    /// Index into the structure's atom list.
    pub index: usize,
    /// Element symbol.
    pub element: String,
    /// Atom label.
    pub name: String,
    /// Residue name.
    pub residue_name: String,
    /// Residue sequence number.
    pub residue_seq: i32,
    /// Chain identifier.
    pub chain: char,
    /// Temperature factor.
    pub b_factor: f32,
    /// Position in the file's coordinate frame (not scene-centered).
    pub position: Vec3,
}

impl AtomDetail {
    /// Build the detail record for `atom` at `index`.
    #[must_use]
    pub fn new(index: usize, atom: &Atom) -> Self {
        Self {
            index,
            element: atom.element.clone(),
            name: atom.name.clone(),
            residue_name: atom.residue.name.clone(),
            residue_seq: atom.residue.seq,
            chain: atom.residue.chain,
            b_factor: atom.b_factor,
            position: atom.position,
        }
    }

    /// Multi-line text used by hover labels and the side panel.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} ({})\n{} {} chain {}\nB-factor: {:.2}\n({:.3}, {:.3}, {:.3})",
            self.element,
            self.name,
            self.residue_name,
            self.residue_seq,
            self.chain,
            self.b_factor,
            self.position.x,
            self.position.y,
            self.position.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRAMBIN_HEAD: &str = "\
ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N
ATOM      2  CA  THR A   1      16.967  12.784   4.338  1.00 10.80           C
ATOM      3  C   THR A   1      15.685  12.755   5.133  1.00  9.19           C
HETATM    4 FE   HEM A 101      -1.250   0.000  22.125  1.00 30.00          FE
";

    #[test]
    fn record_line_round_trips_coordinates() {
        let structure = parse_structure(CRAMBIN_HEAD);
        assert_eq!(structure.len(), 4);
        for i in 0..structure.len() {
            let line = structure.to_record_line(i).unwrap();
            let reparsed = parse_structure(&line);
            assert_eq!(reparsed.len(), 1, "line {line:?}");
            let a = &structure.atoms()[i];
            let b = &reparsed.atoms()[0];
            assert!(a.position.distance(b.position) < 1e-3);
            assert_eq!(a.name, b.name);
            assert_eq!(a.element, b.element);
            assert_eq!(a.residue, b.residue);
            assert_eq!(a.hetero, b.hetero);
            assert!((a.b_factor - b.b_factor).abs() < 1e-2);
        }
    }

    #[test]
    fn record_line_uses_fixed_columns() {
        let structure = parse_structure(CRAMBIN_HEAD);
        let line = structure.to_record_line(3).unwrap();
        assert_eq!(line.len(), 78);
        assert!(line.starts_with("HETATM    4  FE  HEM A 101"));
        assert_eq!(&line[30..38], "  -1.250");
        assert_eq!(&line[76..78], "FE");
    }

    #[test]
    fn bounds_and_backbone() {
        let structure = parse_structure(CRAMBIN_HEAD);
        let bounds = structure.bounds().unwrap();
        assert_eq!(bounds.min.x, -1.25);
        assert_eq!(bounds.max.z, 22.125);
        assert_eq!(structure.backbone_indices(), vec![1]);
    }

    #[test]
    fn empty_structure_has_no_bounds() {
        let structure = Structure::default();
        assert!(structure.bounds().is_none());
        assert!(structure.to_record_line(0).is_none());
    }

    #[test]
    fn detail_text_mentions_everything() {
        let structure = parse_structure(CRAMBIN_HEAD);
        let detail = AtomDetail::new(1, &structure.atoms()[1]);
        let text = detail.describe();
        assert!(text.contains("C (CA)"));
        assert!(text.contains("THR 1 chain A"));
        assert!(text.contains("B-factor: 10.80"));
        assert!(text.contains("16.967"));
    }
}
