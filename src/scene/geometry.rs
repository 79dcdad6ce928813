//! Per-style geometry builders.
//!
//! Every builder appends to a [`SceneGraph`] and registers one pickable
//! sphere per represented atom in the [`PickMap`]. Positions are shifted by
//! `offset` so the molecule is centered at the origin.

use glam::{Quat, Vec3};

use super::graph::{GradientTexture, Material, Primitive, SceneGraph};
use super::picking::PickMap;
use super::spline::{arc_length_fractions, catmull_rom, frame_points};
use super::tube::TubeMesh;
use crate::bonds::Bond;
use crate::color::{
    atom_color, element_color, residue_color, ColorContext, ColorMapping,
    GradientKind, Rgb,
};
use crate::options::{Style, VisualizationOptions};
use crate::structure::element::vdw_radius;
use crate::structure::Atom;

/// Ball radius as a fraction of the van der Waals radius.
pub const BALL_SCALE: f32 = 0.4;
/// Bond cylinder radius in Ångström.
pub const BOND_RADIUS: f32 = 0.15;
/// Backbone tube radius in Ångström.
pub const TUBE_RADIUS: f32 = 0.4;
/// Radius of the pickable marker on each alpha carbon.
pub const MARKER_RADIUS: f32 = 0.5;
/// Spline samples between consecutive alpha carbons.
pub const SEGMENTS_PER_SPAN: usize = 8;
/// Texels in the B-factor ribbon texture.
pub const GRADIENT_TEXELS: usize = 256;

const BOND_COLOR: Rgb = Rgb::new(150, 150, 150);

/// Inputs shared by every builder.
#[derive(Debug, Clone, Copy)]
pub struct BuildInput<'a> {
    /// Atoms in file order.
    pub atoms: &'a [Atom],
    /// Bonds over `atoms`.
    pub bonds: &'a [Bond],
    /// Subtracted from every position.
    pub offset: Vec3,
    /// Style and color choices.
    pub options: &'a VisualizationOptions,
}

impl BuildInput<'_> {
    fn colors(&self) -> ColorContext {
        ColorContext::new(self.atoms, GradientKind::Spatial)
    }

    fn color_of(&self, colors: &ColorContext, atom: &Atom) -> Rgb {
        atom_color(self.options.color_mapping, atom, colors)
    }

    fn position(&self, atom: &Atom) -> Vec3 {
        atom.position - self.offset
    }
}

/// Build geometry for `input.options.style`. Returns the style actually
/// built, which differs from the requested one when the ribbon falls back.
pub fn build(
    graph: &mut SceneGraph,
    picks: &mut PickMap,
    input: &BuildInput<'_>,
) -> Style {
    match input.options.style {
        Style::BallAndStick => {
            build_ball_and_stick(graph, picks, input);
            Style::BallAndStick
        }
        Style::SpaceFill => {
            build_space_fill(graph, picks, input);
            Style::SpaceFill
        }
        Style::ProteinRibbon => {
            if build_ribbon(graph, picks, input) {
                Style::ProteinRibbon
            } else {
                log::warn!(
                    "fewer than two backbone atoms; drawing ball and stick \
                     instead of a ribbon"
                );
                build_ball_and_stick(graph, picks, input);
                Style::BallAndStick
            }
        }
    }
}

fn add_atom_spheres(
    graph: &mut SceneGraph,
    picks: &mut PickMap,
    input: &BuildInput<'_>,
    scale: f32,
) {
    let colors = input.colors();
    for (i, atom) in input.atoms.iter().enumerate() {
        let id = graph.add(
            Primitive::Sphere {
                center: input.position(atom),
                radius: vdw_radius(&atom.element) * scale,
            },
            Material::solid(input.color_of(&colors, atom)),
        );
        picks.insert(id, i);
    }
}

/// Spheres at `vdW × 0.4 × multiplier` plus one cylinder per bond.
pub fn build_ball_and_stick(
    graph: &mut SceneGraph,
    picks: &mut PickMap,
    input: &BuildInput<'_>,
) {
    add_atom_spheres(
        graph,
        picks,
        input,
        BALL_SCALE * input.options.atom_size_multiplier,
    );
    for bond in input.bonds {
        let (Some(a), Some(b)) =
            (input.atoms.get(bond.a), input.atoms.get(bond.b))
        else {
            continue;
        };
        let (pa, pb) = (input.position(a), input.position(b));
        let dir = (pb - pa).normalize_or(Vec3::Y);
        let _ = graph.add(
            Primitive::Cylinder {
                center: (pa + pb) * 0.5,
                length: bond.distance,
                radius: BOND_RADIUS,
                rotation: Quat::from_rotation_arc(Vec3::Y, dir),
            },
            Material::solid(BOND_COLOR),
        );
    }
}

/// Spheres at the full van der Waals radius, no bonds.
pub fn build_space_fill(
    graph: &mut SceneGraph,
    picks: &mut PickMap,
    input: &BuildInput<'_>,
) {
    add_atom_spheres(graph, picks, input, input.options.atom_size_multiplier);
}

/// Index into `atom_fractions` closest to `fraction`.
fn nearest(atom_fractions: &[f32], fraction: f32) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (j, &f) in atom_fractions.iter().enumerate() {
        let d = (f - fraction).abs();
        if d < best_distance {
            best = j;
            best_distance = d;
        }
    }
    best
}

/// Tube through the alpha-carbon trace plus a pick marker on each alpha
/// carbon. Returns `false` (building nothing) with fewer than two.
pub fn build_ribbon(
    graph: &mut SceneGraph,
    picks: &mut PickMap,
    input: &BuildInput<'_>,
) -> bool {
    let backbone: Vec<usize> = input
        .atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_backbone())
        .map(|(i, _)| i)
        .collect();
    if backbone.len() < 2 {
        return false;
    }

    let control: Vec<Vec3> = backbone
        .iter()
        .map(|&i| input.position(&input.atoms[i]))
        .collect();
    let samples = catmull_rom(&control, SEGMENTS_PER_SPAN);
    let fractions = arc_length_fractions(&samples);
    // Control point j sits at sample j × SEGMENTS_PER_SPAN.
    let atom_fractions: Vec<f32> = (0..backbone.len())
        .map(|j| fractions[(j * SEGMENTS_PER_SPAN).min(fractions.len() - 1)])
        .collect();
    let mut mesh =
        TubeMesh::sweep(&frame_points(&samples), &fractions, TUBE_RADIUS);

    let colors = input.colors();
    let backbone_atom =
        |fraction: f32| &input.atoms[backbone[nearest(&atom_fractions, fraction)]];
    let material = match input.options.color_mapping {
        ColorMapping::BFactor => {
            let texels = (0..GRADIENT_TEXELS)
                .map(|t| {
                    let u = t as f32 / (GRADIENT_TEXELS - 1) as f32;
                    input.color_of(&colors, backbone_atom(u))
                })
                .collect();
            Material {
                texture: Some(GradientTexture { texels }),
                ..Material::solid(Rgb::new(255, 255, 255))
            }
        }
        mapping => {
            mesh.colors = mesh
                .fractions
                .iter()
                .map(|&f| {
                    let atom = backbone_atom(f);
                    match mapping {
                        ColorMapping::Residue => {
                            residue_color(atom.residue_color_index)
                        }
                        _ => element_color(&atom.element),
                    }
                })
                .collect();
            Material {
                vertex_colors: true,
                ..Material::solid(Rgb::new(255, 255, 255))
            }
        }
    };
    let _ = graph.add(Primitive::Tube(mesh), material);

    for &i in &backbone {
        let atom = &input.atoms[i];
        let id = graph.add(
            Primitive::Sphere {
                center: input.position(atom),
                radius: MARKER_RADIUS,
            },
            Material::solid(input.color_of(&colors, atom)),
        );
        picks.insert(id, i);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonds::infer_bonds;
    use crate::color::spatial_gradient;
    use crate::structure::parse_structure;

    const TRACE: &str = "\
ATOM      1  N   MET A   1       0.000   0.000   0.000  1.00 10.00           N
ATOM      2  CA  MET A   1       1.460   0.000   0.000  1.00 10.00           C
ATOM      3  CA  ALA A   2       5.260   0.000   0.000  1.00 20.00           C
ATOM      4  CA  GLY A   3       8.000   2.600   0.000  1.00 30.00           C
";

    fn input<'a>(
        atoms: &'a [Atom],
        bonds: &'a [Bond],
        options: &'a VisualizationOptions,
    ) -> BuildInput<'a> {
        BuildInput {
            atoms,
            bonds,
            offset: Vec3::ZERO,
            options,
        }
    }

    #[test]
    fn ball_and_stick_cylinders_span_bonds() {
        let structure = parse_structure(TRACE);
        let bonds = infer_bonds(structure.atoms(), 3.0);
        let options = VisualizationOptions::default();
        let mut graph = SceneGraph::new();
        let mut picks = PickMap::new();
        let style =
            build(&mut graph, &mut picks, &input(structure.atoms(), &bonds, &options));
        assert_eq!(style, Style::BallAndStick);
        assert_eq!(graph.counts().spheres, 4);
        assert_eq!(graph.counts().cylinders, bonds.len());
        assert_eq!(picks.len(), 4);

        let cylinder = graph
            .objects()
            .iter()
            .find_map(|o| match o.primitive {
                Primitive::Cylinder {
                    center,
                    length,
                    radius,
                    rotation,
                } => Some((center, length, radius, rotation)),
                _ => None,
            })
            .unwrap();
        let (center, length, radius, rotation) = cylinder;
        // First bond is N–CA along +X.
        assert!((length - 1.46).abs() < 1e-5);
        assert_eq!(radius, BOND_RADIUS);
        assert!(center.distance(Vec3::new(0.73, 0.0, 0.0)) < 1e-5);
        assert!((rotation * Vec3::Y).distance(Vec3::X) < 1e-5);
    }

    #[test]
    fn space_fill_has_no_bonds() {
        let structure = parse_structure(TRACE);
        let bonds = infer_bonds(structure.atoms(), 3.0);
        let options = VisualizationOptions {
            style: Style::SpaceFill,
            atom_size_multiplier: 2.0,
            ..VisualizationOptions::default()
        };
        let mut graph = SceneGraph::new();
        let mut picks = PickMap::new();
        let _ = build(&mut graph, &mut picks, &input(structure.atoms(), &bonds, &options));
        assert_eq!(graph.counts().cylinders, 0);
        let Primitive::Sphere { radius, .. } = graph.objects()[0].primitive else {
            panic!("expected a sphere");
        };
        assert!((radius - vdw_radius("N") * 2.0).abs() < 1e-6);
    }

    #[test]
    fn ribbon_builds_tube_and_markers() {
        let structure = parse_structure(TRACE);
        let options = VisualizationOptions {
            style: Style::ProteinRibbon,
            color_mapping: ColorMapping::Residue,
            ..VisualizationOptions::default()
        };
        let mut graph = SceneGraph::new();
        let mut picks = PickMap::new();
        let style = build(&mut graph, &mut picks, &input(structure.atoms(), &[], &options));
        assert_eq!(style, Style::ProteinRibbon);
        assert_eq!(graph.counts().tubes, 1);
        assert_eq!(graph.counts().spheres, 3);
        assert_eq!(picks.atoms(), vec![1, 2, 3]);

        let tube = &graph.objects()[0];
        let Primitive::Tube(mesh) = &tube.primitive else {
            panic!("tube must come first");
        };
        assert!(tube.material.vertex_colors);
        assert_eq!(mesh.colors.len(), mesh.vertex_count());
        // Residue indices 0, 1, 2 along the trace.
        assert_eq!(mesh.colors[0], residue_color(0));
        assert_eq!(*mesh.colors.last().unwrap(), residue_color(2));
    }

    #[test]
    fn ribbon_b_factor_uses_texture() {
        let structure = parse_structure(TRACE);
        let options = VisualizationOptions {
            style: Style::ProteinRibbon,
            color_mapping: ColorMapping::BFactor,
            ..VisualizationOptions::default()
        };
        let mut graph = SceneGraph::new();
        let mut picks = PickMap::new();
        let _ = build(&mut graph, &mut picks, &input(structure.atoms(), &[], &options));
        let material = &graph.objects()[0].material;
        let texture = material.texture.as_ref().unwrap();
        assert_eq!(texture.texels.len(), GRADIENT_TEXELS);
        // B-factors span 10..30: first CA at 0.0, last at 1.0.
        assert_eq!(texture.sample(0.0), Some(spatial_gradient(0.0)));
        assert_eq!(texture.sample(1.0), Some(spatial_gradient(1.0)));
    }

    #[test]
    fn single_backbone_atom_falls_back_to_ball_and_stick() {
        let text = "\
ATOM      1  CA  GLY A   1       0.000   0.000   0.000  1.00  5.00           C
";
        let structure = parse_structure(text);
        let options = VisualizationOptions {
            style: Style::ProteinRibbon,
            ..VisualizationOptions::default()
        };
        let mut graph = SceneGraph::new();
        let mut picks = PickMap::new();
        let style = build(&mut graph, &mut picks, &input(structure.atoms(), &[], &options));
        assert_eq!(style, Style::BallAndStick);
        assert_eq!(graph.counts().tubes, 0);
        assert_eq!(graph.counts().spheres, 1);
        assert_eq!(picks.atoms(), vec![0]);
    }
}
