use crate::graph::Storage;
use crate::shape::split_inverse_mass;
use crate::vector::{Gradient, PointId, Vec2};

/// Angle of `v` in degrees, clockwise from +x — the convention this crate
/// uses throughout because +y points down in rendering space, which flips
/// the usual counter-clockwise sense of `atan2`.
fn clockwise_angle(v: Vec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Wraps `deg` into `(-180, 180]`.
fn wrap_signed(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d <= -180.0 {
        d += 360.0;
    } else if d > 180.0 {
        d -= 360.0;
    }
    d
}

/// A force (not a hard constraint) that nudges `p`/`q` tangentially so the
/// pq angle drifts toward whichever of `angles` is currently closest.
/// `strength` scales the (degree-valued) signed difference into a
/// displacement magnitude.
pub fn constrain_angle(storage: &Storage, p: PointId, q: PointId, angles: &[f64], strength: f64, masses: (f64, f64)) -> Vec<Gradient> {
    nudge_angle(storage, p, q, angles, strength, masses)
}

pub fn nudge_angle(storage: &Storage, p: PointId, q: PointId, angles: &[f64], strength: f64, masses: (f64, f64)) -> Vec<Gradient> {
    let pq = storage.point(q) - storage.point(p);
    if pq == Vec2::zero() || angles.is_empty() {
        return Vec::new();
    }
    let current = clockwise_angle(pq);

    let target = angles
        .iter()
        .copied()
        .min_by(|a, b| wrap_signed(*a - current).abs().partial_cmp(&wrap_signed(*b - current).abs()).unwrap())
        .unwrap();
    let signed_diff = wrap_signed(target - current);
    if signed_diff.abs() < crate::vector::ZERO_THRESHOLD {
        return Vec::new();
    }

    let tangent = pq.normalize().perp();
    let (wp, wq) = split_inverse_mass(masses.0, masses.1);
    let magnitude = strength * signed_diff;
    vec![
        Gradient::new(p, tangent.scale(-magnitude * wp)),
        Gradient::new(q, tangent.scale(magnitude * wq)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Storage;

    #[test]
    fn nudges_toward_the_closest_angle() {
        let mut storage = Storage::new();
        let p = storage.alloc_point(Vec2::new(0.0, 0.0), 1.0);
        let q = storage.alloc_point(Vec2::new(1.0, 0.0), 1.0);

        let g = nudge_angle(&storage, p, q, &[10.0, 190.0], 1.0, (1.0, 1.0));
        assert_eq!(g.len(), 2);
        // pq currently points along +x (angle 0); the 10 degree target is closer.
        assert!(g[1].delta.length() > 0.0);
    }

    #[test]
    fn no_nudge_when_already_aligned() {
        let mut storage = Storage::new();
        let p = storage.alloc_point(Vec2::new(0.0, 0.0), 1.0);
        let q = storage.alloc_point(Vec2::new(1.0, 0.0), 1.0);
        assert!(nudge_angle(&storage, p, q, &[0.0], 1.0, (1.0, 1.0)).is_empty());
    }
}
