//! Atom picking: object ↔ atom side table, ray tests, hover/selection state.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::graph::{ObjectId, Primitive, SceneGraph};
use crate::camera::Ray;

/// Hover and selection of one 3D view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneState {
    /// Atom under the cursor.
    pub hovered: Option<usize>,
    /// Atom clicked last (toggled).
    pub selected: Option<usize>,
}

impl SceneState {
    /// Forget hover and selection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Bidirectional map between pickable scene objects and atom indices.
#[derive(Debug, Clone, Default)]
pub struct PickMap {
    by_object: FxHashMap<ObjectId, usize>,
    by_atom: FxHashMap<usize, ObjectId>,
}

impl PickMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `object` as the pick proxy of `atom`.
    pub fn insert(&mut self, object: ObjectId, atom: usize) {
        if let Some(previous) = self.by_atom.insert(atom, object) {
            let _ = self.by_object.remove(&previous);
        }
        let _ = self.by_object.insert(object, atom);
    }

    /// Atom represented by `object`.
    #[must_use]
    pub fn atom_of(&self, object: ObjectId) -> Option<usize> {
        self.by_object.get(&object).copied()
    }

    /// Pick proxy of `atom`.
    #[must_use]
    pub fn object_of(&self, atom: usize) -> Option<ObjectId> {
        self.by_atom.get(&atom).copied()
    }

    /// Whether `atom` can be picked.
    #[must_use]
    pub fn contains_atom(&self, atom: usize) -> bool {
        self.by_atom.contains_key(&atom)
    }

    /// Pickable atom indices, ascending.
    #[must_use]
    pub fn atoms(&self) -> Vec<usize> {
        let mut atoms: Vec<usize> = self.by_atom.keys().copied().collect();
        atoms.sort_unstable();
        atoms
    }

    /// Number of pickable atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_atom.len()
    }

    /// Whether nothing is pickable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_atom.is_empty()
    }

    /// Forget every mapping.
    pub fn clear(&mut self) {
        self.by_object.clear();
        self.by_atom.clear();
    }
}

/// Nearest pickable atom sphere along `ray`.
#[must_use]
pub fn pick(graph: &SceneGraph, picks: &PickMap, ray: &Ray) -> Option<usize> {
    let mut best: Option<(f32, usize)> = None;
    for (&object, &atom) in &picks.by_object {
        let Some(Primitive::Sphere { center, radius }) =
            graph.get(object).map(|o| &o.primitive)
        else {
            continue;
        };
        let Some(t) = ray.hit_sphere(*center, *radius) else {
            continue;
        };
        let closer = best.map_or(true, |(bt, ba)| {
            t < bt || (t == bt && atom < ba)
        });
        if closer {
            best = Some((t, atom));
        }
    }
    best.map(|(_, atom)| atom)
}
