//! Host-facing facade tying the 2D views and the 3D scene together.
//!
//! A host hands raw PDB text plus the ids of its canvases or container;
//! the [`Viewer`] parses, infers bonds, keeps the per-view state and
//! re-renders on option changes and resizes.
//!
//! ```no_run
//! # use protview::viewer::{Host, Viewer};
//! # use protview::options::Options;
//! # fn demo(host: &mut impl Host, text: &str) -> Result<(), protview::error::ProtviewError> {
//! let mut viewer = Viewer::new(Options::default());
//! let options = viewer.options().visualization.clone();
//! let report = viewer.render_2d(host, text, "top", "side", &options)?;
//! assert!(report.is_ok());
//! # Ok(())
//! # }
//! ```

use glam::Vec2;
use web_time::Instant;

use crate::bonds::{infer_bonds, Bond};
use crate::canvas::CanvasHost;
use crate::error::ProtviewError;
use crate::input::{InputEvent, InputProcessor};
use crate::options::{Options, VisualizationOptions};
use crate::renderer::{FlatReport, FlatSession, RenderOutcome};
use crate::scene::{SceneManager, DEFAULT_HOVER_TEXT};
use crate::structure::{parse_structure, MoleculeInfo, Structure};

/// Surfaces a host page provides.
pub trait Host: CanvasHost {
    /// Pixel size of the 3D container `id`, if it exists.
    fn container_size(&self, id: &str) -> Option<(f32, f32)>;
}

fn parse_and_bond(text: &str, threshold: f32) -> (Structure, Vec<Bond>) {
    let start = Instant::now();
    let structure = parse_structure(text);
    let bonds = infer_bonds(structure.atoms(), threshold);
    log::debug!(
        "parsed {} atoms and {} bonds in {:?}",
        structure.len(),
        bonds.len(),
        start.elapsed()
    );
    (structure, bonds)
}

/// Both views of one page.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    options: Options,
    flat: FlatSession,
    scene: Option<SceneManager>,
    container: Option<String>,
    input: InputProcessor,
}

impl Viewer {
    /// Viewer with nothing loaded.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse `text` and draw the top and side projections.
    ///
    /// # Errors
    ///
    /// [`ProtviewError::InvalidOption`] when `options` fail validation.
    /// Missing canvases are reported per view inside the [`FlatReport`].
    pub fn render_2d<H: Host>(
        &mut self,
        host: &mut H,
        text: &str,
        top_id: &str,
        side_id: &str,
        options: &VisualizationOptions,
    ) -> Result<FlatReport, ProtviewError> {
        options.validate()?;
        let (structure, bonds) = parse_and_bond(text, options.bond_threshold);
        self.options.visualization = options.clone();
        self.flat.load(
            structure,
            bonds,
            options.clone(),
            self.options.layout.clone(),
            top_id,
            side_id,
        );
        Ok(self.flat.render(host))
    }

    /// Parse `text` and build the 3D scene for container `container_id`.
    ///
    /// # Errors
    ///
    /// [`ProtviewError::InvalidOption`] for invalid options and
    /// [`ProtviewError::MissingTarget`] when the host has no such container.
    pub fn load_3d<H: Host>(
        &mut self,
        host: &mut H,
        text: &str,
        container_id: &str,
        options: &VisualizationOptions,
    ) -> Result<RenderOutcome, ProtviewError> {
        options.validate()?;
        let Some((width, height)) = host.container_size(container_id) else {
            log::error!("3D container {container_id:?} not found");
            return Err(ProtviewError::MissingTarget(container_id.to_owned()));
        };
        let (structure, bonds) = parse_and_bond(text, options.bond_threshold);
        self.options.visualization = options.clone();
        let scene = self.scene.get_or_insert_with(|| {
            SceneManager::new(&self.options, Vec2::new(width, height))
        });
        scene.resize(width, height);
        let outcome = scene.load(structure, bonds, options.clone());
        self.container = Some(container_id.to_owned());
        Ok(outcome)
    }

    /// Restyle every loaded view without re-parsing.
    ///
    /// Returns the 2D report when projections were loaded.
    ///
    /// # Errors
    ///
    /// [`ProtviewError::InvalidOption`] when `options` fail validation; no
    /// view is touched in that case.
    pub fn set_options<H: Host>(
        &mut self,
        host: &mut H,
        options: VisualizationOptions,
    ) -> Result<Option<FlatReport>, ProtviewError> {
        options.validate()?;
        if let Some(scene) = &mut self.scene {
            scene.set_options(options.clone());
        }
        let report = if self.flat.is_loaded() {
            let bonds = (options.bond_threshold
                != self.flat.options().bond_threshold)
                .then(|| {
                    infer_bonds(
                        self.flat.structure().atoms(),
                        options.bond_threshold,
                    )
                });
            self.flat.restyle(options.clone(), bonds);
            Some(self.flat.render(host))
        } else {
            None
        };
        self.options.visualization = options;
        Ok(report)
    }

    /// Show or hide persistent atom labels in the 3D scene.
    pub fn toggle_labels(&mut self, show: bool) {
        self.options.visualization.show_labels = show;
        if let Some(scene) = &mut self.scene {
            scene.set_show_labels(show);
        }
    }

    /// Re-layout after the host surfaces changed size.
    pub fn resize<H: Host>(&mut self, host: &mut H) -> Option<FlatReport> {
        if let (Some(scene), Some(id)) = (&mut self.scene, &self.container) {
            if let Some((width, height)) = host.container_size(id) {
                scene.resize(width, height);
            }
        }
        self.flat.is_loaded().then(|| self.flat.render(host))
    }

    /// Advance per-frame tasks. Returns whether the 3D view needs a redraw.
    pub fn frame(&mut self) -> bool {
        self.scene.as_mut().is_some_and(SceneManager::frame)
    }

    /// Feed a raw pointer event to the 3D view.
    pub fn handle_input(&mut self, event: InputEvent) {
        let Some(command) = self.input.handle_event(event) else {
            return;
        };
        if let Some(scene) = &mut self.scene {
            scene.handle(command);
        }
    }

    /// Statistics of the most recently loaded molecule (3D first).
    #[must_use]
    pub fn info(&self) -> MoleculeInfo {
        match &self.scene {
            Some(scene) => MoleculeInfo::compute(scene.structure(), scene.bonds()),
            None => MoleculeInfo::compute(self.flat.structure(), self.flat.bonds()),
        }
    }

    /// Hover panel text of the 3D view.
    #[must_use]
    pub fn hover_text(&self) -> String {
        self.scene.as_ref().map_or_else(
            || DEFAULT_HOVER_TEXT.to_owned(),
            SceneManager::hover_text,
        )
    }

    /// The 3D scene, once loaded.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneManager> {
        self.scene.as_ref()
    }

    /// Mutable 3D scene, for direct pointer calls.
    pub fn scene_mut(&mut self) -> Option<&mut SceneManager> {
        self.scene.as_mut()
    }

    /// The 2D session.
    #[must_use]
    pub fn flat(&self) -> &FlatSession {
        &self.flat
    }
}
