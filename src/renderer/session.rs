use super::flat::{render_flat, RenderOutcome};
use crate::bonds::Bond;
use crate::canvas::CanvasHost;
use crate::error::ProtviewError;
use crate::options::{LayoutOptions, VisualizationOptions};
use crate::projection::AxisPair;
use crate::structure::Structure;

/// Per-view results of one [`FlatSession::render`] pass.
#[derive(Debug)]
pub struct FlatReport {
    /// Top (X-Y) view.
    pub top: Result<RenderOutcome, ProtviewError>,
    /// Side (X-Z) view.
    pub side: Result<RenderOutcome, ProtviewError>,
}

impl FlatReport {
    /// Whether both views resolved their canvas.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.top.is_ok() && self.side.is_ok()
    }
}

/// Last-rendered state of the two projected views.
///
/// Re-rendering is a pure function of the retained data and the canvas
/// size, so [`Self::render`] doubles as the resize handler.
#[derive(Debug, Clone, Default)]
pub struct FlatSession {
    structure: Structure,
    bonds: Vec<Bond>,
    options: VisualizationOptions,
    layout: LayoutOptions,
    top_id: String,
    side_id: String,
    loaded: bool,
}

impl FlatSession {
    /// Session with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain a structure and the canvases it is drawn on. Replaces any
    /// previous content.
    pub fn load(
        &mut self,
        structure: Structure,
        bonds: Vec<Bond>,
        options: VisualizationOptions,
        layout: LayoutOptions,
        top_id: &str,
        side_id: &str,
    ) {
        self.structure = structure;
        self.bonds = bonds;
        self.options = options;
        self.layout = layout;
        self.top_id = top_id.to_owned();
        self.side_id = side_id.to_owned();
        self.loaded = true;
    }

    /// Whether a structure has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Retained structure.
    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Retained bonds.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Retained visualization options.
    #[must_use]
    pub fn options(&self) -> &VisualizationOptions {
        &self.options
    }

    /// Swap options without re-parsing; bonds are recomputed by the caller
    /// when the threshold changes.
    pub fn restyle(
        &mut self,
        options: VisualizationOptions,
        bonds: Option<Vec<Bond>>,
    ) {
        self.options = options;
        if let Some(bonds) = bonds {
            self.bonds = bonds;
        }
    }

    /// Draw both views at the canvases' current size.
    ///
    /// A canvas id the host cannot resolve fails only that view.
    pub fn render(&self, host: &mut dyn CanvasHost) -> FlatReport {
        FlatReport {
            top: self.render_view(host, AxisPair::Top, &self.top_id),
            side: self.render_view(host, AxisPair::Side, &self.side_id),
        }
    }

    fn render_view(
        &self,
        host: &mut dyn CanvasHost,
        axes: AxisPair,
        id: &str,
    ) -> Result<RenderOutcome, ProtviewError> {
        let Some(canvas) = host.canvas(id) else {
            log::error!("canvas {id:?} not found for {}", axes.title());
            return Err(ProtviewError::MissingTarget(id.to_owned()));
        };
        Ok(render_flat(
            canvas,
            &self.structure,
            &self.bonds,
            axes,
            &self.options,
            &self.layout,
        ))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::bonds::infer_bonds;
    use crate::canvas::{Canvas2d, DrawCall, RecordingCanvas};
    use crate::structure::parse_structure;

    #[derive(Default)]
    struct Surfaces(FxHashMap<String, RecordingCanvas>);

    impl CanvasHost for Surfaces {
        fn canvas(&mut self, id: &str) -> Option<&mut dyn Canvas2d> {
            let canvas: &mut dyn Canvas2d = self.0.get_mut(id)?;
            Some(canvas)
        }
    }

    const TRIANGLE: &str = "\
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  5.00           N
ATOM      2  CA  ALA A   1      10.000   0.000   4.000  1.00  6.00           C
ATOM      3  C   ALA A   2       5.000   8.000   2.000  1.00  7.00           C
";

    fn centers(canvas: &RecordingCanvas) -> Vec<Vec2> {
        canvas
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillCircle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }

    fn loaded_session() -> FlatSession {
        let structure = parse_structure(TRIANGLE);
        let bonds = infer_bonds(structure.atoms(), 3.0);
        let mut session = FlatSession::new();
        session.load(
            structure,
            bonds,
            VisualizationOptions::default(),
            LayoutOptions::default(),
            "top",
            "side",
        );
        session
    }

    #[test]
    fn resize_rescales_proportionally() {
        let session = loaded_session();
        let mut host = Surfaces::default();
        let _ = host.0.insert("top".to_owned(), RecordingCanvas::new(480.0, 480.0));
        let _ = host.0.insert("side".to_owned(), RecordingCanvas::new(480.0, 480.0));
        assert!(session.render(&mut host).is_ok());
        let before = centers(&host.0["top"]);

        for canvas in host.0.values_mut() {
            canvas.resize(880.0, 880.0);
        }
        assert!(session.render(&mut host).is_ok());
        let after = centers(&host.0["top"]);

        // Available area grows from 400 to 800: offsets from the padding
        // corner double.
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            let expected = (*b - Vec2::splat(40.0)) * 2.0 + Vec2::splat(40.0);
            assert!(a.distance(expected) < 1e-3, "{a} vs {expected}");
        }
    }

    #[test]
    fn missing_canvas_fails_only_that_view() {
        let session = loaded_session();
        let mut host = Surfaces::default();
        let _ = host.0.insert("side".to_owned(), RecordingCanvas::new(300.0, 300.0));
        let report = session.render(&mut host);
        assert!(matches!(report.top, Err(ProtviewError::MissingTarget(ref id)) if id == "top"));
        assert!(matches!(
            report.side,
            Ok(RenderOutcome::Rendered { atoms: 3, .. })
        ));
        assert!(!host.0["side"].calls().is_empty());
    }

    #[test]
    fn restyle_keeps_structure() {
        let mut session = loaded_session();
        let options = VisualizationOptions {
            show_labels: true,
            ..VisualizationOptions::default()
        };
        session.restyle(options, None);
        assert!(session.options().show_labels);
        assert_eq!(session.structure().len(), 3);
        assert!(session.is_loaded());
        assert!(!FlatSession::new().is_loaded());
    }
}
