use crate::constraints::Op;
use crate::graph::Storage;
use crate::shape::split_inverse_mass;
use crate::vector::{Gradient, PointId, Vec2, ZERO_THRESHOLD};

/// Constrains the distance between `p` and `q` (or its projection onto
/// `axis`, if given) relative to `d`. Emits opposite-signed gradients along
/// the comparison axis, split by inverse mass; empty if already satisfied.
pub fn constrain_distance(storage: &Storage, p: PointId, q: PointId, op: Op, d: f64, axis: Option<Vec2>, masses: (f64, f64)) -> Vec<Gradient> {
    let diff = storage.point(q) - storage.point(p);
    let (current, direction) = match axis {
        Some(ax) => {
            let ax_n = ax.normalize();
            let proj = diff.dot(ax_n);
            (proj.abs(), if proj >= 0.0 { ax_n } else { -ax_n })
        }
        None => (diff.length(), diff.normalize()),
    };

    if op.satisfied(current, d) || direction == Vec2::zero() {
        return Vec::new();
    }
    let delta_mag = d - current;
    if delta_mag.abs() < ZERO_THRESHOLD {
        return Vec::new();
    }

    let (wp, wq) = split_inverse_mass(masses.0, masses.1);
    vec![
        Gradient::new(p, direction.scale(-delta_mag * wp)),
        Gradient::new(q, direction.scale(delta_mag * wq)),
    ]
}

/// Constrains the *signed* projection of `q - p` onto `direction` relative
/// to `o`. Otherwise identical to [`constrain_distance`].
pub fn constrain_offset(storage: &Storage, p: PointId, q: PointId, op: Op, o: f64, direction: Vec2, masses: (f64, f64)) -> Vec<Gradient> {
    let dir_n = direction.normalize();
    if dir_n == Vec2::zero() {
        return Vec::new();
    }
    let diff = storage.point(q) - storage.point(p);
    let current = diff.dot(dir_n);

    if op.satisfied(current, o) {
        return Vec::new();
    }
    let delta_mag = o - current;
    if delta_mag.abs() < ZERO_THRESHOLD {
        return Vec::new();
    }

    let (wp, wq) = split_inverse_mass(masses.0, masses.1);
    vec![
        Gradient::new(p, dir_n.scale(-delta_mag * wp)),
        Gradient::new(q, dir_n.scale(delta_mag * wq)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Storage;

    fn two_points(storage: &mut Storage, a: Vec2, b: Vec2) -> (PointId, PointId) {
        (storage.alloc_point(a, 1.0), storage.alloc_point(b, 1.0))
    }

    #[test]
    fn scenario_2_constrain_distance() {
        let mut storage = Storage::new();
        let (p, q) = two_points(&mut storage, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0));

        assert!(constrain_distance(&storage, p, q, Op::Ge, 0.5, None, (1.0, 1.0)).is_empty());

        let g = constrain_distance(&storage, p, q, Op::Eq, 2.0, None, (1.0, 1.0));
        assert_eq!(g.len(), 2);
        assert_eq!(g[0].delta, Vec2::new(-0.5, 0.0));
        assert_eq!(g[1].delta, Vec2::new(0.5, 0.0));

        let g0 = constrain_distance(&storage, p, q, Op::Eq, 0.0, None, (1.0, 1.0));
        assert!(g0[0].delta.x > 0.0);
        assert!(g0[1].delta.x < 0.0);
    }

    #[test]
    fn scenario_3_constrain_distance_along_axis() {
        let mut storage = Storage::new();
        let (p, q) = two_points(&mut storage, Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let axis = Vec2::new(1.0, 0.0);

        assert!(constrain_distance(&storage, p, q, Op::Ge, 0.5, Some(axis), (1.0, 1.0)).is_empty());

        let g = constrain_distance(&storage, p, q, Op::Eq, 2.0, Some(axis), (1.0, 1.0));
        assert!((g[1].delta.x - 0.5).abs() < 1e-9);
        assert_eq!(g[1].delta.y, 0.0);

        let g_rev = constrain_distance(&storage, p, q, Op::Eq, 2.0, Some(Vec2::new(-1.0, 0.0)), (1.0, 1.0));
        assert!((g_rev[1].delta.x - 0.5).abs() < 1e-9);
    }
}
