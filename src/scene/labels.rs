//! Screen-space atom labels and per-frame task subscriptions.

use glam::{Vec2, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::camera::Camera;

/// Text anchored to a 3D point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    /// Labelled atom.
    pub atom: usize,
    /// Scene-space anchor.
    pub anchor: Vec3,
    /// Text shown.
    pub text: String,
    /// Pixel position from the last sync; `None` when off-screen or not
    /// yet synced.
    pub screen: Option<Vec2>,
}

impl Label {
    /// New, not yet projected label.
    #[must_use]
    pub fn new(atom: usize, anchor: Vec3, text: String) -> Self {
        Self {
            atom,
            anchor,
            text,
            screen: None,
        }
    }
}

/// Persistent labels keyed by atom plus one transient hover label.
#[derive(Debug, Clone, Default)]
pub struct LabelOverlay {
    persistent: FxHashMap<usize, Label>,
    hover: Option<Label>,
}

impl LabelOverlay {
    /// Add or replace the persistent label of `label.atom`.
    pub fn show(&mut self, label: Label) {
        let _ = self.persistent.insert(label.atom, label);
    }

    /// Replace the transient hover label.
    pub fn set_hover(&mut self, label: Option<Label>) {
        self.hover = label;
    }

    /// The transient hover label.
    #[must_use]
    pub fn hover(&self) -> Option<&Label> {
        self.hover.as_ref()
    }

    /// Persistent label of `atom`.
    #[must_use]
    pub fn get(&self, atom: usize) -> Option<&Label> {
        self.persistent.get(&atom)
    }

    /// Number of persistent labels.
    #[must_use]
    pub fn persistent_len(&self) -> usize {
        self.persistent.len()
    }

    /// Whether no label of either kind is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persistent.is_empty() && self.hover.is_none()
    }

    /// Drop every persistent label.
    pub fn clear_persistent(&mut self) {
        self.persistent.clear();
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.persistent.clear();
        self.hover = None;
    }

    /// Re-project every label anchor through `camera`.
    pub fn sync(&mut self, camera: &Camera, viewport: Vec2) {
        for label in self.persistent.values_mut().chain(self.hover.as_mut()) {
            label.screen = camera.project(label.anchor, viewport);
        }
    }

    /// All labels, persistent ones by ascending atom index, hover last.
    #[must_use]
    pub fn labels(&self) -> Vec<&Label> {
        let mut labels: Vec<&Label> = self.persistent.values().collect();
        labels.sort_unstable_by_key(|l| l.atom);
        labels.extend(self.hover.as_ref());
        labels
    }
}

/// Work the scene wants done on every animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FrameTask {
    /// Re-project labels.
    LabelSync,
    /// Apply orbit damping.
    CameraDamping,
}

/// Set of subscribed frame tasks.
#[derive(Debug, Clone, Default)]
pub struct FrameTasks {
    active: FxHashSet<FrameTask>,
}

impl FrameTasks {
    /// Run `task` on every frame until unsubscribed.
    pub fn subscribe(&mut self, task: FrameTask) {
        let _ = self.active.insert(task);
    }

    /// Stop running `task`.
    pub fn unsubscribe(&mut self, task: FrameTask) {
        let _ = self.active.remove(&task);
    }

    /// Whether `task` runs on the next frame.
    #[must_use]
    pub fn is_subscribed(&self, task: FrameTask) -> bool {
        self.active.contains(&task)
    }

    /// Whether any task is subscribed.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}
