use crate::graph::Storage;
use crate::vector::{Gradient, PointId, Vec2};

/// Nudges `p` along the unit vector from `q` to `p`, scaled by
/// `magnitudes.0`, and `q` the opposite way scaled by `magnitudes.1`. A zero
/// magnitude on one side cancels that point's share (e.g. for a fixed
/// point).
pub fn nudge_pair(storage: &Storage, p: PointId, q: PointId, magnitudes: (f64, f64)) -> Vec<Gradient> {
    let dir = storage.point(p) - storage.point(q);
    let unit = dir.normalize();
    if unit == Vec2::zero() {
        return Vec::new();
    }
    vec![Gradient::new(p, unit.scale(magnitudes.0)), Gradient::new(q, unit.scale(-magnitudes.1))]
}

/// Nudges `p` by `direction` (need not be normalized) scaled to `strength`.
pub fn nudge_point(p: PointId, strength: f64, direction: Vec2) -> Vec<Gradient> {
    let delta = direction.with_length(strength);
    if delta == Vec2::zero() {
        return Vec::new();
    }
    vec![Gradient::new(p, delta)]
}

/// A power-law force between `u` and `v`: magnitude
/// `scalar * |distance - control|^power`, floored so it never vanishes at
/// `distance == control`. Positive `(distance - control)` pushes the pair
/// apart; negative pulls them together.
pub fn force_pairwise_power(storage: &Storage, u: PointId, v: PointId, power: f64, control: f64, scalar: (f64, f64)) -> Vec<Gradient> {
    const FLOOR: f64 = 0.1;
    let diff = storage.point(v) - storage.point(u);
    let dist = diff.length();
    if dist < 1e-9 {
        return Vec::new();
    }
    let dir = diff.scale(1.0 / dist);
    let base = (dist - control).abs().max(FLOOR);
    let magnitude = base.powf(power);
    let sign = if dist >= control { 1.0 } else { -1.0 };

    vec![
        Gradient::new(u, dir.scale(-sign * magnitude * scalar.0)),
        Gradient::new(v, dir.scale(sign * magnitude * scalar.1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Storage;

    #[test]
    fn nudge_pair_pushes_apart_along_the_pq_axis() {
        let mut storage = Storage::new();
        let p = storage.alloc_point(Vec2::new(0.0, 0.0), 1.0);
        let q = storage.alloc_point(Vec2::new(1.0, 0.0), 1.0);
        let g = nudge_pair(&storage, p, q, (1.0, 1.0));
        assert_eq!(g[0].delta, Vec2::new(-1.0, 0.0));
        assert_eq!(g[1].delta, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn force_pairwise_power_repels_when_beyond_control() {
        let mut storage = Storage::new();
        let u = storage.alloc_point(Vec2::new(0.0, 0.0), 1.0);
        let v = storage.alloc_point(Vec2::new(5.0, 0.0), 1.0);
        let g = force_pairwise_power(&storage, u, v, 1.0, 2.0, (1.0, 1.0));
        assert!(g[0].delta.x < 0.0);
        assert!(g[1].delta.x > 0.0);
    }

    #[test]
    fn force_pairwise_power_attracts_when_within_control() {
        let mut storage = Storage::new();
        let u = storage.alloc_point(Vec2::new(0.0, 0.0), 1.0);
        let v = storage.alloc_point(Vec2::new(1.0, 0.0), 1.0);
        let g = force_pairwise_power(&storage, u, v, 1.0, 5.0, (1.0, 1.0));
        assert!(g[0].delta.x > 0.0);
        assert!(g[1].delta.x < 0.0);
    }
}
