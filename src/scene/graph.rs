//! Flat arena of renderable objects.
//!
//! Objects are addressed by [`ObjectId`]; ids are never reused within one
//! graph, so stale ids held by side tables simply stop resolving after
//! [`SceneGraph::clear`].

use glam::{Quat, Vec3};
use serde::Serialize;

use super::tube::TubeMesh;
use crate::color::Rgb;

/// Stable handle of a scene object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct ObjectId(pub u32);

/// 1D color lookup sampled by a vertex's length fraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientTexture {
    /// Evenly spaced texels covering `[0, 1]`.
    pub texels: Vec<Rgb>,
}

impl GradientTexture {
    /// Nearest texel for coordinate `u`.
    #[must_use]
    pub fn sample(&self, u: f32) -> Option<Rgb> {
        let last = self.texels.len().checked_sub(1)?;
        let i = (u.clamp(0.0, 1.0) * last as f32).round() as usize;
        self.texels.get(i.min(last)).copied()
    }
}

/// Surface appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    /// Base color (ignored when vertex colors or a texture are present).
    pub color: Rgb,
    /// Emissive tint added on top of the lit color; black means none.
    pub emissive: Rgb,
    /// Colors come from the mesh's per-vertex colors.
    pub vertex_colors: bool,
    /// Colors come from sampling this texture by length fraction.
    pub texture: Option<GradientTexture>,
}

impl Material {
    /// Plain colored surface without emission.
    #[must_use]
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            emissive: Rgb::new(0, 0, 0),
            vertex_colors: false,
            texture: None,
        }
    }
}

/// Geometry of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    /// Sphere.
    Sphere {
        /// Center.
        center: Vec3,
        /// Radius.
        radius: f32,
    },
    /// Cylinder whose local axis is +Y, centered on `center`.
    Cylinder {
        /// Midpoint.
        center: Vec3,
        /// Length along the axis.
        length: f32,
        /// Radius.
        radius: f32,
        /// Rotation taking +Y onto the axis direction.
        rotation: Quat,
    },
    /// Swept tube mesh.
    Tube(TubeMesh),
}

/// One renderable object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    /// Handle.
    pub id: ObjectId,
    /// Geometry.
    pub primitive: Primitive,
    /// Appearance.
    pub material: Material,
}

/// Object counts by primitive kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrimitiveCounts {
    /// Spheres.
    pub spheres: usize,
    /// Cylinders.
    pub cylinders: usize,
    /// Tubes.
    pub tubes: usize,
}

/// Arena of scene objects in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    next_id: u32,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the host renderer.
    #[serde(skip)]
    rendered_generation: u64,
}

impl SceneGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether the graph changed since the last [`Self::mark_rendered`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark the current generation as consumed by the host renderer.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Insert an object and return its handle.
    pub fn add(&mut self, primitive: Primitive, material: Material) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            primitive,
            material,
        });
        self.invalidate();
        id
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        // Ids are assigned in increasing order and never reordered.
        self.objects.binary_search_by_key(&id, |o| o.id).ok()
    }

    /// Object by handle.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index_of(id).map(|i| &self.objects[i])
    }

    /// Mutable material of an object.
    pub fn material_mut(&mut self, id: ObjectId) -> Option<&mut Material> {
        let i = self.index_of(id)?;
        self.invalidate();
        Some(&mut self.objects[i].material)
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the graph holds no object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Dispose every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.invalidate();
    }

    /// Count objects by primitive kind.
    #[must_use]
    pub fn counts(&self) -> PrimitiveCounts {
        let mut counts = PrimitiveCounts::default();
        for object in &self.objects {
            match object.primitive {
                Primitive::Sphere { .. } => counts.spheres += 1,
                Primitive::Cylinder { .. } => counts.cylinders += 1,
                Primitive::Tube(_) => counts.tubes += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: f32) -> Primitive {
        Primitive::Sphere {
            center: Vec3::new(x, 0.0, 0.0),
            radius: 1.0,
        }
    }

    #[test]
    fn ids_survive_clear_without_reuse() {
        let mut graph = SceneGraph::new();
        let a = graph.add(sphere(0.0), Material::solid(Rgb::new(1, 2, 3)));
        let b = graph.add(sphere(1.0), Material::solid(Rgb::new(4, 5, 6)));
        assert_ne!(a, b);
        assert_eq!(graph.get(b).unwrap().material.color, Rgb::new(4, 5, 6));
        graph.clear();
        assert!(graph.get(a).is_none());
        let c = graph.add(sphere(2.0), Material::solid(Rgb::new(7, 8, 9)));
        assert!(c > b);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn material_edits_mark_dirty() {
        let mut graph = SceneGraph::new();
        let a = graph.add(sphere(0.0), Material::solid(Rgb::new(1, 2, 3)));
        graph.mark_rendered();
        assert!(!graph.is_dirty());
        graph.material_mut(a).unwrap().emissive = Rgb::new(50, 50, 50);
        assert!(graph.is_dirty());
        assert_eq!(graph.counts().spheres, 1);
    }

    #[test]
    fn texture_sampling() {
        let texture = GradientTexture {
            texels: vec![Rgb::new(0, 0, 255), Rgb::new(0, 255, 0), Rgb::new(255, 0, 0)],
        };
        assert_eq!(texture.sample(0.0), Some(Rgb::new(0, 0, 255)));
        assert_eq!(texture.sample(0.5), Some(Rgb::new(0, 255, 0)));
        assert_eq!(texture.sample(2.0), Some(Rgb::new(255, 0, 0)));
        assert_eq!(GradientTexture { texels: vec![] }.sample(0.5), None);
    }
}
