//! Fixed-column structural record parser.
//!
//! Recognizes `ATOM` and `HETATM` lines and reads each field from its fixed
//! column range. A record whose coordinates do not parse is skipped with a
//! warning; it never aborts the whole parse.

use std::fmt;
use std::ops::Range;

use glam::Vec3;

use super::{Atom, Residue, Structure, RESIDUE_PALETTE_SIZE};

// Column ranges, 0-based half-open (the format documents them 1-based
// inclusive: x is columns 31-38, and so on).
const NAME: Range<usize> = 12..16;
const RESIDUE_NAME: Range<usize> = 17..20;
const CHAIN: Range<usize> = 21..22;
const RESIDUE_SEQ: Range<usize> = 22..26;
const X: Range<usize> = 30..38;
const Y: Range<usize> = 38..46;
const Z: Range<usize> = 46..54;
const B_FACTOR: Range<usize> = 60..66;
const ELEMENT: Range<usize> = 76..78;

/// The two record kinds the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Polymer,
    Hetero,
}

impl RecordKind {
    fn classify(line: &str) -> Option<Self> {
        if line.starts_with("ATOM") {
            Some(Self::Polymer)
        } else if line.starts_with("HETATM") {
            Some(Self::Hetero)
        } else {
            None
        }
    }
}

/// Why a single record line was dropped.
#[derive(Debug, Clone, PartialEq)]
struct CoordinateError {
    axis: char,
    raw: String,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparseable {} coordinate {:?}", self.axis, self.raw)
    }
}

/// Slice a column range, reading past-the-end columns as empty.
fn column(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).unwrap_or("")
}

fn coordinate(
    line: &str,
    range: Range<usize>,
    axis: char,
) -> Result<f32, CoordinateError> {
    let raw = column(line, range).trim();
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError {
            axis,
            raw: raw.to_owned(),
        })
}

/// Tracks the residue cursor that drives residue color indices.
#[derive(Default)]
struct RecordParser {
    current_residue: Option<i32>,
    residue_changes: usize,
}

impl RecordParser {
    fn parse_line(
        &mut self,
        line: &str,
        kind: RecordKind,
    ) -> Result<Atom, CoordinateError> {
        let position = Vec3::new(
            coordinate(line, X, 'x')?,
            coordinate(line, Y, 'y')?,
            coordinate(line, Z, 'z')?,
        );

        let name = column(line, NAME).trim().to_owned();
        let element = match column(line, ELEMENT).trim() {
            "" => name
                .chars()
                .next()
                .map_or_else(|| "X".to_owned(), |c| c.to_string()),
            symbol => symbol.to_owned(),
        }
        .to_ascii_uppercase();

        let seq_raw = column(line, RESIDUE_SEQ).trim();
        let seq = seq_raw.parse::<i32>().unwrap_or_else(|_| {
            log::debug!("residue number {seq_raw:?} unreadable, using 0");
            0
        });
        let residue = Residue {
            name: column(line, RESIDUE_NAME).trim().to_owned(),
            seq,
            chain: column(line, CHAIN).chars().next().unwrap_or(' '),
        };

        let b_raw = column(line, B_FACTOR).trim();
        let b_factor = if b_raw.is_empty() {
            0.0
        } else {
            b_raw
                .parse::<f32>()
                .ok()
                .filter(|b| b.is_finite())
                .unwrap_or_else(|| {
                    log::debug!("temperature factor {b_raw:?} unreadable, using 0");
                    0.0
                })
        };

        if self.current_residue.is_some_and(|current| current != seq) {
            self.residue_changes += 1;
        }
        self.current_residue = Some(seq);

        Ok(Atom {
            position,
            element,
            name,
            residue,
            residue_color_index: self.residue_changes % RESIDUE_PALETTE_SIZE,
            b_factor,
            hetero: kind == RecordKind::Hetero,
        })
    }
}

/// Parse fixed-column structural text into a [`Structure`].
///
/// Zero recognized records is a valid, empty result.
#[must_use]
pub fn parse_structure(text: &str) -> Structure {
    let mut parser = RecordParser::default();
    let mut atoms = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let Some(kind) = RecordKind::classify(line) else {
            continue;
        };
        match parser.parse_line(line, kind) {
            Ok(atom) => atoms.push(atom),
            Err(e) => {
                skipped += 1;
                log::warn!("skipping record on line {}: {e}", line_no + 1);
            }
        }
    }

    log::debug!("parsed {} atoms ({skipped} records skipped)", atoms.len());
    Structure::from_atoms(atoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RESIDUES: &str = "\
HEADER    PLANT PROTEIN                           30-APR-81   1CRN
ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N
ATOM      2  CA  THR A   1      16.967  12.784   4.338  1.00 10.80           C
ATOM      3  N   THR A   2      15.115  11.555   5.265  1.00  7.81           N
ATOM      4  CA  THR A   2      13.856  11.469   6.066  1.00  8.31           C
TER
END
";

    #[test]
    fn reads_fixed_columns() {
        let structure = parse_structure(TWO_RESIDUES);
        assert_eq!(structure.len(), 4);
        let ca = &structure.atoms()[1];
        assert_eq!(ca.position, Vec3::new(16.967, 12.784, 4.338));
        assert_eq!(ca.name, "CA");
        assert_eq!(ca.element, "C");
        assert_eq!(ca.residue.name, "THR");
        assert_eq!(ca.residue.seq, 1);
        assert_eq!(ca.residue.chain, 'A');
        assert!((ca.b_factor - 10.80).abs() < 1e-5);
        assert!(!ca.hetero);
    }

    #[test]
    fn residue_color_index_follows_residue_changes() {
        let structure = parse_structure(TWO_RESIDUES);
        let indices: Vec<usize> = structure
            .atoms()
            .iter()
            .map(|a| a.residue_color_index)
            .collect();
        assert_eq!(indices, vec![0, 0, 1, 1]);
    }

    #[test]
    fn residue_color_index_cycles() {
        let text: String = (1..=7)
            .map(|seq| {
                format!(
                    "ATOM  {seq:>5}  CA  GLY A{seq:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C\n",
                    seq as f32, 0.0, 0.0
                )
            })
            .collect();
        let structure = parse_structure(&text);
        let indices: Vec<usize> = structure
            .atoms()
            .iter()
            .map(|a| a.residue_color_index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn element_falls_back_to_atom_name() {
        let line = "ATOM      1  OG1 THR A   1       1.000   2.000   3.000";
        let structure = parse_structure(line);
        assert_eq!(structure.len(), 1);
        assert_eq!(structure.atoms()[0].element, "O");
        assert_eq!(structure.atoms()[0].b_factor, 0.0);
    }

    #[test]
    fn element_is_uppercased() {
        let line = "HETATM    1 ZN    ZN A 201       0.000   0.000   0.000  1.00 20.00          Zn";
        let structure = parse_structure(line);
        assert_eq!(structure.atoms()[0].element, "ZN");
        assert!(structure.atoms()[0].hetero);
    }

    #[test]
    fn bad_coordinates_skip_only_that_line() {
        let text = "\
ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N
ATOM      2  CA  THR A   1      16.967  xx.xxx   4.338  1.00 10.80           C
ATOM      3  C   THR A   1      15.685  12.755   5.133  1.00  9.19           C
ATOM      4  O   THR A   1
";
        let structure = parse_structure(text);
        let names: Vec<&str> =
            structure.atoms().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["N", "C"]);
    }

    #[test]
    fn non_finite_coordinates_skip_the_line() {
        let text = "\
ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N
ATOM      2  CA  THR A   1         nan  12.784   4.338  1.00 10.80           C
ATOM      3  C   THR A   1         inf  12.755   5.133  1.00  9.19           C
ATOM      4  O   THR A   1      15.685    -inf   5.133  1.00  9.19           O
ATOM      5  CB  THR A   1      15.685  12.755   5.133  1.00   NaN           C
";
        let structure = parse_structure(text);
        let names: Vec<&str> =
            structure.atoms().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["N", "CB"]);
        assert_eq!(structure.atoms()[1].b_factor, 0.0);
        let bounds = structure.bounds().unwrap();
        assert!(bounds.center().is_finite());
        assert!(bounds.bounding_radius().is_finite());
    }

    #[test]
    fn no_records_is_empty_not_error() {
        let structure = parse_structure("HEADER    NOTHING HERE\nREMARK 1\n");
        assert!(structure.is_empty());
        assert!(parse_structure("").is_empty());
    }

    #[test]
    fn column_clamps_short_and_multibyte_lines() {
        assert_eq!(column("ATOM", 12..16), "");
        assert_eq!(column("ATOM      1  N", 12..16), " N");
        assert_eq!(column("ATOMÅÅÅÅÅÅÅÅ", 5..6), "");
    }
}
