//! Interactive 3D scene: geometry arena, orbit camera, picking and labels.
//!
//! [`SceneManager`] is the per-view owner of everything 3D. It keeps the
//! loaded atoms so a restyle never re-parses, and exposes the resulting
//! [`SceneGraph`] read-only for whatever draws it.

pub mod geometry;
pub mod graph;
pub mod labels;
pub mod picking;
pub mod spline;
pub mod tube;

use glam::{Vec2, Vec3};
pub use graph::{
    GradientTexture, Material, ObjectId, Primitive, PrimitiveCounts,
    SceneGraph, SceneObject,
};
pub use labels::{FrameTask, FrameTasks, Label, LabelOverlay};
pub use picking::{pick, PickMap, SceneState};
use serde::Serialize;

use self::geometry::BuildInput;
use crate::bonds::{infer_bonds, Bond};
use crate::camera::{Camera, OrbitController};
use crate::color::Rgb;
use crate::input::SceneCommand;
use crate::lighting::SceneLights;
use crate::options::{Options, Style, VisualizationOptions};
use crate::renderer::RenderOutcome;
use crate::structure::{AtomDetail, Structure};

/// Emissive tint of the hovered atom.
pub const HOVER_EMISSIVE: Rgb = Rgb::new(70, 70, 70);
/// Emissive tint of the selected atom; wins over hover.
pub const SELECT_EMISSIVE: Rgb = Rgb::new(255, 170, 0);
/// Hover text when nothing is under the cursor.
pub const DEFAULT_HOVER_TEXT: &str = "Hover over atoms to see details";

const NO_EMISSIVE: Rgb = Rgb::new(0, 0, 0);

/// Serializable snapshot of a loaded scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    /// Style the caller asked for.
    pub requested_style: Style,
    /// Style that was built (differs after a ribbon fallback).
    pub built_style: Style,
    /// Loaded atoms.
    pub atoms: usize,
    /// Current bonds.
    pub bonds: usize,
    /// Objects by primitive kind.
    pub objects: PrimitiveCounts,
    /// Pickable atoms.
    pub pickable: usize,
    /// Bounding-sphere radius in Ångström.
    pub bounding_radius: f32,
    /// Translation applied to center the molecule.
    pub offset: Vec3,
    /// Camera at the time of the snapshot.
    pub camera: Camera,
    /// Hover and selection.
    pub state: SceneState,
    /// Light rig for the host renderer.
    pub lights: SceneLights,
}

/// Owner of one 3D view.
#[derive(Debug, Clone)]
pub struct SceneManager {
    graph: SceneGraph,
    picks: PickMap,
    state: SceneState,
    labels: LabelOverlay,
    tasks: FrameTasks,
    orbit: OrbitController,
    lights: SceneLights,
    structure: Structure,
    bonds: Vec<Bond>,
    options: VisualizationOptions,
    built_style: Style,
    offset: Vec3,
    bounding_radius: f32,
    viewport: Vec2,
}

impl SceneManager {
    /// Empty scene for a `viewport`-sized container. Lights are fixed here.
    #[must_use]
    pub fn new(options: &Options, viewport: Vec2) -> Self {
        let aspect = if viewport.x > 0.0 && viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        Self {
            graph: SceneGraph::new(),
            picks: PickMap::new(),
            state: SceneState::default(),
            labels: LabelOverlay::default(),
            tasks: FrameTasks::default(),
            orbit: OrbitController::new(&options.camera, aspect),
            lights: SceneLights::new(&options.lighting),
            structure: Structure::default(),
            bonds: Vec::new(),
            options: options.visualization.clone(),
            built_style: options.visualization.style,
            offset: Vec3::ZERO,
            bounding_radius: 0.0,
            viewport,
        }
    }

    /// Replace the scene with `structure`.
    ///
    /// Previous geometry, labels, hover and selection are discarded, the
    /// molecule is centered at the origin and the camera framed on it.
    pub fn load(
        &mut self,
        structure: Structure,
        bonds: Vec<Bond>,
        options: VisualizationOptions,
    ) -> RenderOutcome {
        self.graph.clear();
        self.picks.clear();
        self.labels.clear();
        self.state.clear();
        self.tasks.clear();
        self.structure = structure;
        self.bonds = bonds;
        self.options = options;

        let Some(bounds) = self.structure.bounds() else {
            log::info!("3D view: nothing to render");
            self.offset = Vec3::ZERO;
            self.bounding_radius = 0.0;
            return RenderOutcome::NothingToRender;
        };
        self.offset = bounds.center();
        self.bounding_radius = bounds.bounding_radius();
        self.rebuild();
        self.orbit.fit_to_sphere(Vec3::ZERO, self.bounding_radius);
        log::debug!(
            "3D view: {} objects, radius {:.2}",
            self.graph.len(),
            self.bounding_radius
        );
        RenderOutcome::Rendered {
            atoms: self.structure.len(),
            bonds: self.bonds.len(),
        }
    }

    fn rebuild(&mut self) {
        self.graph.clear();
        self.picks.clear();
        self.built_style = geometry::build(
            &mut self.graph,
            &mut self.picks,
            &BuildInput {
                atoms: self.structure.atoms(),
                bonds: &self.bonds,
                offset: self.offset,
                options: &self.options,
            },
        );
        self.labels.clear_persistent();
        if self.options.show_labels {
            self.show_all_labels();
        }
        self.update_label_task();
    }

    /// Restyle from the retained atoms. Bonds are recomputed only when the
    /// threshold changed; hover is cleared and the selection kept when its
    /// atom is still pickable.
    pub fn set_options(&mut self, options: VisualizationOptions) {
        if options.bond_threshold != self.options.bond_threshold {
            self.bonds =
                infer_bonds(self.structure.atoms(), options.bond_threshold);
        }
        self.options = options;
        self.state.hovered = None;
        self.labels.set_hover(None);
        if self.structure.is_empty() {
            self.update_label_task();
            return;
        }
        self.rebuild();
        self.state.selected =
            self.state.selected.filter(|&a| self.picks.contains_atom(a));
        if let Some(atom) = self.state.selected {
            self.refresh_highlight(atom);
        }
    }

    fn refresh_highlight(&mut self, atom: usize) {
        let emissive = if self.state.selected == Some(atom) {
            SELECT_EMISSIVE
        } else if self.state.hovered == Some(atom) {
            HOVER_EMISSIVE
        } else {
            NO_EMISSIVE
        };
        let Some(object) = self.picks.object_of(atom) else {
            return;
        };
        if let Some(material) = self.graph.material_mut(object) {
            material.emissive = emissive;
        }
    }

    fn pick_at(&self, pos: Vec2) -> Option<usize> {
        let ray = self.orbit.camera().screen_ray(pos, self.viewport);
        pick(&self.graph, &self.picks, &ray)
    }

    fn label_for(&self, atom: usize, text: String) -> Option<Label> {
        let a = self.structure.atoms().get(atom)?;
        Some(Label::new(atom, a.position - self.offset, text))
    }

    fn show_all_labels(&mut self) {
        for atom in self.picks.atoms() {
            let Some(a) = self.structure.atoms().get(atom) else {
                continue;
            };
            let text = format!("{}{}", a.element, a.residue.seq);
            if let Some(label) = self.label_for(atom, text) {
                self.labels.show(label);
            }
        }
    }

    fn update_label_task(&mut self) {
        if self.labels.is_empty() {
            self.tasks.unsubscribe(FrameTask::LabelSync);
        } else {
            self.tasks.subscribe(FrameTask::LabelSync);
            self.labels.sync(self.orbit.camera(), self.viewport);
        }
    }

    /// Update hover from a cursor position in pixels.
    pub fn pointer_move(&mut self, pos: Vec2) -> Option<AtomDetail> {
        let hit = self.pick_at(pos);
        if hit != self.state.hovered {
            let previous = std::mem::replace(&mut self.state.hovered, hit);
            if let Some(atom) = previous {
                self.refresh_highlight(atom);
            }
            let label = hit.and_then(|atom| {
                self.refresh_highlight(atom);
                let text = self.detail(atom)?.describe();
                self.label_for(atom, text)
            });
            self.labels.set_hover(label);
            self.update_label_task();
        }
        self.hovered_detail()
    }

    /// Toggle the selection of the atom under `pos`. Empty space leaves the
    /// selection unchanged.
    pub fn click(&mut self, pos: Vec2) -> Option<AtomDetail> {
        if let Some(hit) = self.pick_at(pos) {
            let previous = self.state.selected;
            self.state.selected =
                if previous == Some(hit) { None } else { Some(hit) };
            if let Some(atom) = previous {
                self.refresh_highlight(atom);
            }
            self.refresh_highlight(hit);
        }
        self.selected_detail()
    }

    fn detail(&self, atom: usize) -> Option<AtomDetail> {
        self.structure
            .atoms()
            .get(atom)
            .map(|a| AtomDetail::new(atom, a))
    }

    /// Detail of the selected atom.
    #[must_use]
    pub fn selected_detail(&self) -> Option<AtomDetail> {
        self.detail(self.state.selected?)
    }

    /// Detail of the hovered atom.
    #[must_use]
    pub fn hovered_detail(&self) -> Option<AtomDetail> {
        self.detail(self.state.hovered?)
    }

    /// Text for a hover panel.
    #[must_use]
    pub fn hover_text(&self) -> String {
        self.hovered_detail()
            .map_or_else(|| DEFAULT_HOVER_TEXT.to_owned(), |d| d.describe())
    }

    /// Add or remove a persistent label on every pickable atom.
    pub fn set_show_labels(&mut self, show: bool) {
        self.options.show_labels = show;
        if show {
            self.show_all_labels();
        } else {
            self.labels.clear_persistent();
        }
        self.update_label_task();
    }

    /// Apply a command from the input processor.
    pub fn handle(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::PointerMove { pos } => {
                let _ = self.pointer_move(pos);
            }
            SceneCommand::Click { pos } => {
                let _ = self.click(pos);
            }
            SceneCommand::Rotate { delta } => {
                self.orbit.rotate(delta);
                self.tasks.subscribe(FrameTask::CameraDamping);
            }
            SceneCommand::Pan { delta } => {
                self.orbit.pan(delta);
                self.tasks.subscribe(FrameTask::CameraDamping);
            }
            SceneCommand::Zoom { delta } => {
                self.orbit.zoom(delta);
                self.tasks.subscribe(FrameTask::CameraDamping);
            }
        }
    }

    /// Container size changed.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.orbit.resize(width, height);
        if self.tasks.is_subscribed(FrameTask::LabelSync) {
            self.labels.sync(self.orbit.camera(), self.viewport);
        }
    }

    /// Run subscribed frame tasks. Returns whether the view needs a redraw.
    pub fn frame(&mut self) -> bool {
        let mut moved = false;
        if self.tasks.is_subscribed(FrameTask::CameraDamping) {
            moved = self.orbit.update();
            if !self.orbit.is_moving() {
                self.tasks.unsubscribe(FrameTask::CameraDamping);
            }
        }
        if self.tasks.is_subscribed(FrameTask::LabelSync) {
            self.labels.sync(self.orbit.camera(), self.viewport);
        }
        moved || self.graph.is_dirty()
    }

    /// Scene objects, read-only.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mark the graph as consumed by the host renderer.
    pub fn mark_rendered(&mut self) {
        self.graph.mark_rendered();
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.orbit.camera()
    }

    /// Scene lights.
    #[must_use]
    pub fn lights(&self) -> &SceneLights {
        &self.lights
    }

    /// Hover and selection.
    #[must_use]
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Label overlay.
    #[must_use]
    pub fn labels(&self) -> &LabelOverlay {
        &self.labels
    }

    /// Object → atom side table.
    #[must_use]
    pub fn picks(&self) -> &PickMap {
        &self.picks
    }

    /// Subscribed frame tasks.
    #[must_use]
    pub fn tasks(&self) -> &FrameTasks {
        &self.tasks
    }

    /// Loaded structure.
    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Current bonds.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Current visualization options.
    #[must_use]
    pub fn options(&self) -> &VisualizationOptions {
        &self.options
    }

    /// Snapshot for hosts and the command line.
    #[must_use]
    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            requested_style: self.options.style,
            built_style: self.built_style,
            atoms: self.structure.len(),
            bonds: self.bonds.len(),
            objects: self.graph.counts(),
            pickable: self.picks.len(),
            bounding_radius: self.bounding_radius,
            offset: self.offset,
            camera: *self.orbit.camera(),
            state: self.state,
            lights: self.lights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonds::DEFAULT_BOND_THRESHOLD;
    use crate::color::ColorMapping;
    use crate::structure::parse_structure;

    // C at the origin, O 1.2 Å along +Z.
    const PAIR: &str = "\
ATOM      1  C   GLY A   1       0.000   0.000   0.000  1.00 10.00           C
ATOM      2  O   GLY A   1       0.000   0.000   1.200  1.00 20.00           O
";

    const VIEWPORT: Vec2 = Vec2::new(200.0, 200.0);
    const CENTER: Vec2 = Vec2::new(100.0, 100.0);
    const CORNER: Vec2 = Vec2::new(1.0, 1.0);

    fn loaded(text: &str, options: VisualizationOptions) -> SceneManager {
        let structure = parse_structure(text);
        let bonds = infer_bonds(structure.atoms(), options.bond_threshold);
        let mut scene = SceneManager::new(&Options::default(), VIEWPORT);
        let _ = scene.load(structure, bonds, options);
        scene
    }

    fn emissive_of(scene: &SceneManager, atom: usize) -> Rgb {
        let object = scene.picks().object_of(atom).unwrap();
        scene.graph().get(object).unwrap().material.emissive
    }

    #[test]
    fn load_centers_and_frames() {
        let scene = loaded(PAIR, VisualizationOptions::default());
        let summary = scene.summary();
        assert_eq!(summary.atoms, 2);
        assert_eq!(summary.bonds, 1);
        assert_eq!(summary.objects.spheres, 2);
        assert_eq!(summary.objects.cylinders, 1);
        assert!(summary.offset.distance(Vec3::new(0.0, 0.0, 0.6)) < 1e-6);
        assert!((summary.bounding_radius - 0.6).abs() < 1e-6);
        assert_eq!(summary.lights, SceneLights::default());
        assert_eq!(scene.camera().target, Vec3::ZERO);
        assert!(scene.camera().eye.z > 0.0);
    }

    #[test]
    fn empty_input_builds_nothing() {
        let mut scene = SceneManager::new(&Options::default(), VIEWPORT);
        let outcome = scene.load(
            Structure::default(),
            Vec::new(),
            VisualizationOptions::default(),
        );
        assert_eq!(outcome, RenderOutcome::NothingToRender);
        assert!(scene.graph().is_empty());
        assert_eq!(scene.hover_text(), DEFAULT_HOVER_TEXT);
    }

    #[test]
    fn hover_tints_and_labels_nearest_atom() {
        let mut scene = loaded(PAIR, VisualizationOptions::default());
        // The oxygen is closer to the camera on the +Z axis.
        let detail = scene.pointer_move(CENTER).unwrap();
        assert_eq!(detail.index, 1);
        assert_eq!(emissive_of(&scene, 1), HOVER_EMISSIVE);
        assert_eq!(scene.labels().hover().unwrap().atom, 1);
        assert!(scene.tasks().is_subscribed(FrameTask::LabelSync));
        assert!(scene.hover_text().starts_with("O (O)"));

        assert!(scene.pointer_move(CORNER).is_none());
        assert_eq!(emissive_of(&scene, 1), NO_EMISSIVE);
        assert!(scene.labels().hover().is_none());
        assert!(!scene.tasks().is_subscribed(FrameTask::LabelSync));
    }

    #[test]
    fn click_toggles_selection() {
        let mut scene = loaded(PAIR, VisualizationOptions::default());
        assert_eq!(scene.click(CENTER).map(|d| d.index), Some(1));
        assert_eq!(emissive_of(&scene, 1), SELECT_EMISSIVE);
        // Selection wins over hover.
        let _ = scene.pointer_move(CENTER);
        assert_eq!(emissive_of(&scene, 1), SELECT_EMISSIVE);
        // Empty space keeps it.
        assert_eq!(scene.click(CORNER).map(|d| d.index), Some(1));
        assert!(scene.click(CENTER).is_none());
        assert_eq!(emissive_of(&scene, 1), HOVER_EMISSIVE);
    }

    #[test]
    fn restyle_keeps_pickable_selection() {
        let mut scene = loaded(PAIR, VisualizationOptions::default());
        let _ = scene.click(CENTER);
        let _ = scene.pointer_move(CENTER);
        scene.set_options(VisualizationOptions {
            style: Style::SpaceFill,
            color_mapping: ColorMapping::BFactor,
            ..VisualizationOptions::default()
        });
        assert_eq!(scene.state().selected, Some(1));
        assert_eq!(scene.state().hovered, None);
        assert_eq!(emissive_of(&scene, 1), SELECT_EMISSIVE);
        assert_eq!(scene.graph().counts().cylinders, 0);
        // Same threshold: bonds untouched.
        assert_eq!(scene.bonds().len(), 1);

        scene.set_options(VisualizationOptions {
            bond_threshold: 1.0,
            ..VisualizationOptions::default()
        });
        assert!(scene.bonds().is_empty());
        assert_eq!(scene.graph().counts().cylinders, 0);
    }

    #[test]
    fn ribbon_selection_dropped_when_atom_not_pickable() {
        let text = "\
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00 10.00           N
ATOM      2  CA  GLY A   1       1.460   0.000   0.000  1.00 10.00           C
ATOM      3  CA  ALA A   2       5.260   0.000   0.000  1.00 10.00           C
";
        let mut scene = loaded(
            text,
            VisualizationOptions {
                style: Style::SpaceFill,
                ..VisualizationOptions::default()
            },
        );
        // Select the nitrogen directly through the state machine.
        scene.state.selected = Some(0);
        scene.set_options(VisualizationOptions {
            style: Style::ProteinRibbon,
            ..VisualizationOptions::default()
        });
        assert_eq!(scene.summary().built_style, Style::ProteinRibbon);
        assert_eq!(scene.state().selected, None);
        assert_eq!(scene.picks().atoms(), vec![1, 2]);
    }

    #[test]
    fn labels_subscribe_frame_task() {
        let mut scene = loaded(PAIR, VisualizationOptions::default());
        assert!(scene.tasks().is_idle());
        scene.set_show_labels(true);
        assert_eq!(scene.labels().persistent_len(), 2);
        assert!(scene.tasks().is_subscribed(FrameTask::LabelSync));
        assert!(scene.labels().get(0).unwrap().screen.is_some());
        scene.set_show_labels(false);
        assert!(scene.tasks().is_idle());
    }

    #[test]
    fn camera_damping_runs_until_settled() {
        let mut scene = loaded(PAIR, VisualizationOptions::default());
        scene.mark_rendered();
        scene.handle(SceneCommand::Zoom { delta: 1.0 });
        assert!(scene.tasks().is_subscribed(FrameTask::CameraDamping));
        let before = scene.camera().eye;
        assert!(scene.frame());
        assert!(scene.camera().eye.z < before.z);
        for _ in 0..500 {
            let _ = scene.frame();
        }
        assert!(!scene.tasks().is_subscribed(FrameTask::CameraDamping));
        assert!(!scene.frame());
    }

    #[test]
    fn threshold_default_matches_bond_module() {
        assert_eq!(
            VisualizationOptions::default().bond_threshold,
            DEFAULT_BOND_THRESHOLD
        );
    }
}
