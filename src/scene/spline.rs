//! Centerline sampling for the backbone tube: Catmull-Rom through the
//! alpha carbons, arc-length parameters and rotation-minimizing frames.

use glam::Vec3;

/// Sample on the tube centerline with its local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplinePoint {
    /// Position.
    pub pos: Vec3,
    /// Unit tangent.
    pub tangent: Vec3,
    /// Unit normal, rotation-minimizing along the curve.
    pub normal: Vec3,
    /// `tangent × normal`.
    pub binormal: Vec3,
}

/// Uniform Catmull-Rom segment between `p1` and `p2` at `t ∈ [0, 1)`.
fn segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let w0 = -t3 + 2.0 * t2 - t;
    let w1 = 3.0 * t3 - 5.0 * t2 + 2.0;
    let w2 = -3.0 * t3 + 4.0 * t2 + t;
    let w3 = t3 - t2;
    (p0 * w0 + p1 * w1 + p2 * w2 + p3 * w3) * 0.5
}

fn span_steps(segments_per_span: usize) -> impl Iterator<Item = f32> + Clone {
    (0..segments_per_span).map(move |j| j as f32 / segments_per_span as f32)
}

/// Curve through every control point, `segments_per_span` samples per
/// span plus the final point.
///
/// The ends are extended by mirroring the neighbouring point. Two points
/// give a straight line; fewer are returned unchanged.
#[must_use]
pub fn catmull_rom(points: &[Vec3], segments_per_span: usize) -> Vec<Vec3> {
    let segments_per_span = segments_per_span.max(1);
    match points {
        [] | [_] => return points.to_vec(),
        [_, _] => return linear_interpolate(points, segments_per_span),
        _ => {}
    }
    let (first, last) = (points[0], points[points.len() - 1]);
    let mut padded = Vec::with_capacity(points.len() + 2);
    padded.push(first * 2.0 - points[1]);
    padded.extend_from_slice(points);
    padded.push(last * 2.0 - points[points.len() - 2]);

    let mut out = Vec::with_capacity((points.len() - 1) * segments_per_span + 1);
    for w in padded.windows(4) {
        out.extend(
            span_steps(segments_per_span).map(|t| segment(w[0], w[1], w[2], w[3], t)),
        );
    }
    out.push(last);
    out
}

/// Straight segments between consecutive points, sampled like
/// [`catmull_rom`].
#[must_use]
pub fn linear_interpolate(points: &[Vec3], segments_per_span: usize) -> Vec<Vec3> {
    let steps = span_steps(segments_per_span.max(1));
    points
        .windows(2)
        .flat_map(|w| steps.clone().map(move |t| w[0].lerp(w[1], t)))
        .chain(points.last().copied())
        .collect()
}

/// Cumulative arc length at each point, normalized to `[0, 1]`.
///
/// A curve of zero total length maps every point to `0.0`.
#[must_use]
pub fn arc_length_fractions(points: &[Vec3]) -> Vec<f32> {
    let mut total = 0.0;
    let mut cumulative: Vec<f32> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            total
        })
        .collect();
    if total > 0.0 {
        cumulative.iter_mut().for_each(|c| *c /= total);
    }
    cumulative
}

/// Attach tangents and rotation-minimizing frames to sampled positions.
///
/// Tangents are central differences (one-sided at the ends).
#[must_use]
pub fn frame_points(positions: &[Vec3]) -> Vec<SplinePoint> {
    let n = positions.len();
    let mut points: Vec<SplinePoint> = (0..n)
        .map(|i| {
            let prev = positions[i.saturating_sub(1)];
            let next = positions[(i + 1).min(n - 1)];
            SplinePoint {
                pos: positions[i],
                tangent: (next - prev).normalize_or(Vec3::Z),
                normal: Vec3::X,
                binormal: Vec3::Y,
            }
        })
        .collect();
    propagate_frames(&mut points);
    points
}

/// Mirror `v` in the plane through the origin with normal `axis`, where
/// `axis_sq` is `axis · axis`.
fn reflect(v: Vec3, axis: Vec3, axis_sq: f32) -> Vec3 {
    v - axis * (2.0 * axis.dot(v) / axis_sq)
}

/// Double-reflection rotation-minimizing frames (Wang et al. 2008),
/// seeded with an arbitrary normal at the first point.
fn propagate_frames(points: &mut [SplinePoint]) {
    let Some(head) = points.first_mut() else {
        return;
    };
    let seed = if head.tangent.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    head.normal = head.tangent.cross(seed).normalize();
    head.binormal = head.tangent.cross(head.normal).normalize();

    for i in 1..points.len() {
        let prev = points[i - 1];
        let cur = &mut points[i];
        let step = cur.pos - prev.pos;
        let step_sq = step.length_squared();
        if step_sq < 1e-10 {
            cur.normal = prev.normal;
            cur.binormal = prev.binormal;
            continue;
        }
        let normal = reflect(prev.normal, step, step_sq);
        let tangent = reflect(prev.tangent, step, step_sq);
        let fix = cur.tangent - tangent;
        let fix_sq = fix.length_squared();
        let normal = if fix_sq < 1e-10 {
            normal
        } else {
            reflect(normal, fix, fix_sq)
        };
        cur.normal = (normal - cur.tangent * cur.tangent.dot(normal))
            .normalize_or(prev.normal);
        cur.binormal = cur.tangent.cross(cur.normal).normalize_or(prev.binormal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catmull_rom_passes_through_control_points() {
        let control = [
            Vec3::ZERO,
            Vec3::new(3.8, 0.0, 0.0),
            Vec3::new(5.0, 3.5, 0.0),
            Vec3::new(8.0, 4.0, 2.0),
        ];
        let samples = catmull_rom(&control, 6);
        assert_eq!(samples.len(), 3 * 6 + 1);
        for (i, c) in control.iter().enumerate() {
            assert!(samples[i * 6].distance(*c) < 1e-5);
        }
    }

    #[test]
    fn two_points_interpolate_linearly() {
        let samples = catmull_rom(&[Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)], 4);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[2], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn fractions_are_monotonic_unit_range() {
        let samples = catmull_rom(
            &[Vec3::ZERO, Vec3::X * 2.0, Vec3::new(2.0, 2.0, 0.0)],
            5,
        );
        let fractions = arc_length_fractions(&samples);
        assert_eq!(fractions[0], 0.0);
        assert!((fractions[fractions.len() - 1] - 1.0).abs() < 1e-6);
        assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
        assert!(arc_length_fractions(&[Vec3::ONE, Vec3::ONE])
            .iter()
            .all(|&f| f == 0.0));
    }

    #[test]
    fn frames_are_orthonormal() {
        let samples = catmull_rom(
            &[
                Vec3::ZERO,
                Vec3::new(2.0, 1.0, 0.0),
                Vec3::new(4.0, 0.0, 1.5),
                Vec3::new(6.0, -1.0, 0.0),
            ],
            8,
        );
        for p in frame_points(&samples) {
            assert!((p.tangent.length() - 1.0).abs() < 1e-4);
            assert!((p.normal.length() - 1.0).abs() < 1e-4);
            assert!(p.tangent.dot(p.normal).abs() < 1e-3);
            assert!(p.normal.dot(p.binormal).abs() < 1e-3);
        }
    }
}
