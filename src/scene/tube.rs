//! Tube mesh swept along framed spline points.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::Serialize;

use super::spline::SplinePoint;
use crate::color::Rgb;

/// Vertices around each tube ring.
pub const RADIAL_SEGMENTS: usize = 8;

/// Indexed triangle mesh of a tube.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TubeMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Outward unit normals, one per vertex.
    pub normals: Vec<Vec3>,
    /// Spline-length fraction of each vertex's ring, in `[0, 1]`. Doubles as
    /// the texture coordinate.
    pub fractions: Vec<f32>,
    /// Per-vertex colors; empty when the material is textured.
    pub colors: Vec<Rgb>,
    /// Triangle list, counter-clockwise seen from outside.
    pub indices: Vec<u32>,
}

impl TubeMesh {
    /// Sweep a circle of `radius` along `points`. `fractions[i]` is the
    /// length fraction of `points[i]`.
    #[must_use]
    pub fn sweep(points: &[SplinePoint], fractions: &[f32], radius: f32) -> Self {
        let mut mesh = Self::default();
        if points.len() < 2 {
            return mesh;
        }
        for (i, p) in points.iter().enumerate() {
            let fraction = fractions.get(i).copied().unwrap_or(0.0);
            for k in 0..RADIAL_SEGMENTS {
                let angle = TAU * k as f32 / RADIAL_SEGMENTS as f32;
                let normal = p.normal * angle.cos() + p.binormal * angle.sin();
                mesh.positions.push(p.pos + normal * radius);
                mesh.normals.push(normal);
                mesh.fractions.push(fraction);
            }
        }
        let ring = RADIAL_SEGMENTS as u32;
        for i in 0..(points.len() - 1) as u32 {
            for k in 0..ring {
                let a = i * ring + k;
                let b = i * ring + (k + 1) % ring;
                let c = a + ring;
                let d = b + ring;
                mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }
        mesh
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::spline::{arc_length_fractions, catmull_rom, frame_points};

    #[test]
    fn sweep_builds_closed_rings() {
        let samples = catmull_rom(
            &[Vec3::ZERO, Vec3::new(3.8, 0.0, 0.0), Vec3::new(6.0, 3.0, 0.0)],
            4,
        );
        let fractions = arc_length_fractions(&samples);
        let mesh = TubeMesh::sweep(&frame_points(&samples), &fractions, 0.4);
        assert_eq!(mesh.vertex_count(), samples.len() * RADIAL_SEGMENTS);
        assert_eq!(
            mesh.triangle_count(),
            (samples.len() - 1) * RADIAL_SEGMENTS * 2
        );
        for (i, p) in mesh.positions.iter().enumerate() {
            let center = samples[i / RADIAL_SEGMENTS];
            assert!((p.distance(center) - 0.4).abs() < 1e-4);
        }
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertex_count()));
        assert_eq!(mesh.fractions[0], 0.0);
        assert_eq!(*mesh.fractions.last().unwrap(), 1.0);
    }

    #[test]
    fn single_point_yields_empty_mesh() {
        let samples = [Vec3::ONE];
        let mesh = TubeMesh::sweep(&frame_points(&samples), &[0.0], 0.4);
        assert_eq!(mesh.vertex_count(), 0);
    }
}
