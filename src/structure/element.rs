//! Per-element size tables.
//!
//! Symbols are matched in their uppercase-normalized form, the way the
//! parser stores them.

/// Base circle radius (canvas units) for the 2D views.
pub const DEFAULT_FLAT_RADIUS: f32 = 4.0;

/// Van der Waals radius used for unlisted elements, in Ångström.
pub const DEFAULT_VDW_RADIUS: f32 = 1.70;

/// Base circle radius for the 2D renderer before size multiplier and depth
/// factor are applied.
#[must_use]
pub fn flat_radius(element: &str) -> f32 {
    match element {
        "H" => 2.5,
        "S" | "P" => 5.5,
        "FE" | "ZN" | "MG" | "CA" | "NA" | "K" | "CL" => 5.0,
        _ => DEFAULT_FLAT_RADIUS,
    }
}

/// Van der Waals radius in Ångström.
#[must_use]
pub fn vdw_radius(element: &str) -> f32 {
    match element {
        "H" => 1.20,
        "C" => 1.70,
        "N" => 1.55,
        "O" => 1.52,
        "S" | "P" => 1.80,
        "SE" => 1.90,
        "FE" | "MN" | "CO" => 2.00,
        "ZN" => 1.39,
        "MG" => 1.73,
        "CA" => 2.31,
        "NA" => 2.27,
        "CL" => 1.75,
        "K" => 2.75,
        "NI" => 1.63,
        "CU" => 1.40,
        "BR" => 1.85,
        "I" => 1.98,
        "F" => 1.47,
        _ => DEFAULT_VDW_RADIUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sulfur_and_phosphorus_draw_larger() {
        assert!(flat_radius("S") > flat_radius("C"));
        assert!(flat_radius("P") > flat_radius("O"));
        assert_eq!(flat_radius("C"), DEFAULT_FLAT_RADIUS);
        assert_eq!(flat_radius("XX"), DEFAULT_FLAT_RADIUS);
    }

    #[test]
    fn vdw_lookup() {
        assert!((vdw_radius("C") - 1.70).abs() < 0.01);
        assert!((vdw_radius("H") - 1.20).abs() < 0.01);
        assert_eq!(vdw_radius("UNK"), DEFAULT_VDW_RADIUS);
    }
}
