//! Fixed lookup tables: CPK element colors and the residue palette.

use super::Rgb;
use crate::structure::RESIDUE_PALETTE_SIZE;

/// Color of elements missing from the CPK table.
pub const DEFAULT_ELEMENT_COLOR: Rgb = Rgb::new(230, 230, 230);

const GREY: Rgb = Rgb::new(128, 128, 128);

/// Cycling residue colors: red, green, blue, yellow, magenta.
pub const RESIDUE_PALETTE: [Rgb; RESIDUE_PALETTE_SIZE] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 255),
];

/// CPK-style color for an uppercase element symbol.
#[must_use]
pub fn element_color(element: &str) -> Rgb {
    match element {
        "H" => Rgb::new(255, 255, 255),
        "C" | "CA" | "ZN" => GREY,
        "N" | "NA" => Rgb::new(0, 0, 255),
        "O" => Rgb::new(255, 0, 0),
        "S" => Rgb::new(255, 255, 0),
        "P" => Rgb::new(255, 128, 0),
        "CL" | "MG" => Rgb::new(0, 255, 0),
        "FE" => Rgb::new(179, 128, 0),
        "K" => Rgb::new(204, 153, 255),
        _ => DEFAULT_ELEMENT_COLOR,
    }
}

/// Palette entry for a residue color index (taken modulo the palette size).
#[must_use]
pub fn residue_color(index: usize) -> Rgb {
    RESIDUE_PALETTE[index % RESIDUE_PALETTE_SIZE]
}
