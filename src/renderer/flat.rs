use glam::Vec2;
use serde::Serialize;

use crate::bonds::Bond;
use crate::canvas::{Canvas2d, Fill, RadialGradient, Rgba};
use crate::color::{atom_color, ColorContext, GradientKind, Rgb};
use crate::options::{LayoutOptions, VisualizationOptions};
use crate::projection::{AxisPair, Layout};
use crate::structure::element::flat_radius;
use crate::structure::Structure;

/// Where the view title is drawn.
pub const TITLE_POSITION: Vec2 = Vec2::new(10.0, 20.0);
/// Font of the view title.
pub const TITLE_FONT: &str = "14px sans-serif";
/// Font of per-atom labels.
pub const LABEL_FONT: &str = "10px sans-serif";

const BOND_COLOR: Rgb = Rgb::new(110, 110, 110);
const OUTLINE_WIDTH: f32 = 0.5;
const HIGHLIGHT_MIX: f32 = 0.6;

/// What a render call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderOutcome {
    /// The view was drawn.
    Rendered {
        /// Atoms drawn.
        atoms: usize,
        /// Bonds drawn.
        bonds: usize,
    },
    /// No atoms; the canvas was left untouched.
    NothingToRender,
}

fn atom_fill(center: Vec2, radius: f32, color: Rgb, shaded: bool) -> Fill {
    if !shaded {
        return Fill::Solid(color.into());
    }
    Fill::Radial(RadialGradient {
        focus: center - Vec2::splat(radius / 3.0),
        center,
        radius,
        inner: color.lighten(HIGHLIGHT_MIX).into(),
        outer: color.into(),
    })
}

/// Draw one projected view of `structure`.
///
/// Order: background, bonds, atoms (farther first when depth sorting),
/// optional atom labels, then the title. An empty structure issues no
/// drawing call at all.
pub fn render_flat(
    canvas: &mut dyn Canvas2d,
    structure: &Structure,
    bonds: &[Bond],
    axes: AxisPair,
    options: &VisualizationOptions,
    layout_options: &LayoutOptions,
) -> RenderOutcome {
    let atoms = structure.atoms();
    let (width, height) = canvas.size();
    let Some(layout) =
        Layout::compute(atoms, axes, width, height, layout_options)
    else {
        log::info!("{}: nothing to render", axes.title());
        return RenderOutcome::NothingToRender;
    };

    canvas.fill_rect(
        Vec2::ZERO,
        Vec2::new(width.max(0.0), height.max(0.0)),
        layout_options.background.into(),
    );

    let bond_color = Rgba::with_alpha(BOND_COLOR, 0.8);
    let bond_width = options.style.flat_bond_width();
    let mut drawn_bonds = 0;
    for bond in bonds {
        let (Some(a), Some(b)) = (atoms.get(bond.a), atoms.get(bond.b)) else {
            continue;
        };
        canvas.stroke_line(
            layout.project(a),
            layout.project(b),
            bond_width,
            bond_color,
        );
        drawn_bonds += 1;
    }

    let order: Vec<usize> = if layout_options.depth_sort {
        layout.draw_order(atoms)
    } else {
        (0..atoms.len()).collect()
    };
    let colors = ColorContext::new(atoms, GradientKind::Flat);
    let outline = Rgba::with_alpha(Rgb::new(0, 0, 0), 0.3);
    for &i in &order {
        let atom = &atoms[i];
        let center = layout.project(atom);
        let radius = flat_radius(&atom.element)
            * options.atom_size_multiplier
            * layout.depth_factor(atom);
        let color = atom_color(options.color_mapping, atom, &colors);
        canvas.fill_circle(
            center,
            radius,
            atom_fill(center, radius, color, layout_options.gradient_shading),
        );
        canvas.stroke_circle(center, radius, OUTLINE_WIDTH, outline);
    }

    if options.show_labels {
        for &i in &order {
            let atom = &atoms[i];
            let at = layout.project(atom) + Vec2::new(4.0, -4.0);
            canvas.fill_text(&atom.name, at, LABEL_FONT, Rgba::BLACK);
        }
    }

    let title = format!(
        "{} - {} - {}",
        axes.title(),
        options.style,
        options.color_mapping
    );
    canvas.fill_text(&title, TITLE_POSITION, TITLE_FONT, Rgba::BLACK);

    log::debug!(
        "{}: {} atoms, {drawn_bonds} bonds at scale {:.3}",
        axes.title(),
        atoms.len(),
        layout.scale
    );
    RenderOutcome::Rendered {
        atoms: atoms.len(),
        bonds: drawn_bonds,
    }
}
