//! Pure geometry for the rectangle shape kind. `control` is the half-width /
//! half-height vector; all functions take `center`/`control` by value so they
//! can be shared between the gradient-producing wrappers in
//! [`super`] without borrowing `Storage`.

use crate::shape::Bounds;
use crate::vector::Vec2;

pub fn bounds(center: Vec2, control: Vec2) -> Bounds {
    Bounds {
        min: Vec2::new(center.x - control.x, center.y - control.y),
        max: Vec2::new(center.x + control.x, center.y + control.y),
    }
}

/// Intersects the ray `t * direction` (t >= 0) with the box expanded by
/// `offset`, returning the intersection point in world coordinates.
/// `direction` must be non-zero; behavior for a zero-length direction is an
/// unhandled degeneracy per the shape contract.
pub fn boundary(center: Vec2, control: Vec2, direction: Vec2, offset: f64) -> Vec2 {
    let half_w = control.x + offset;
    let half_h = control.y + offset;
    let t_x = if direction.x != 0.0 {
        half_w / direction.x.abs()
    } else {
        f64::INFINITY
    };
    let t_y = if direction.y != 0.0 {
        half_h / direction.y.abs()
    } else {
        f64::INFINITY
    };
    let t = t_x.min(t_y);
    center + direction.scale(t)
}

/// The corner of the (un-offset) box that maximizes the dot product with
/// `direction`.
pub fn support(center: Vec2, control: Vec2, direction: Vec2) -> Vec2 {
    let sx = if direction.x >= 0.0 { control.x } else { -control.x };
    let sy = if direction.y >= 0.0 { control.y } else { -control.y };
    center + Vec2::new(sx, sy)
}

pub fn contains(center: Vec2, control: Vec2, p: Vec2, offset: f64) -> bool {
    (p.x - center.x).abs() <= control.x + offset && (p.y - center.y).abs() <= control.y + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_scenarios() {
        let center = Vec2::new(1.0, 1.0);
        let control = Vec2::new(1.0, 1.0);

        assert_eq!(boundary(center, control, Vec2::new(1.0, 0.0), 0.0), Vec2::new(2.0, 1.0));
        assert_eq!(boundary(center, control, Vec2::new(2.0, 0.0), 0.0), Vec2::new(2.0, 1.0));
        assert_eq!(boundary(center, control, Vec2::new(0.0, 1.0), 0.0), Vec2::new(1.0, 2.0));
        assert_eq!(boundary(center, control, Vec2::new(1.0, 0.0), 1.0), Vec2::new(3.0, 1.0));
        assert_eq!(boundary(center, control, Vec2::new(-1.0, 0.0), -0.5), Vec2::new(0.5, 1.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let center = Vec2::new(1.0, 1.0);
        let control = Vec2::new(1.0, 1.0);
        assert!(contains(center, control, Vec2::new(2.0, 1.0), 0.0));
        assert!(!contains(center, control, Vec2::new(2.01, 1.0), 0.0));
    }

    #[test]
    fn boundary_lies_on_the_offset_boundary_for_any_direction() {
        let center = Vec2::new(0.0, 0.0);
        let control = Vec2::new(3.0, 2.0);
        for angle in 0..16 {
            let theta = angle as f64 * std::f64::consts::TAU / 16.0;
            let dir = Vec2::new(theta.cos(), theta.sin());
            assert!(contains(center, control, boundary(center, control, dir, 0.0), 1e-9));
            assert!(contains(center, control, boundary(center, control, dir, 0.5), 0.5 + 1e-9));
            assert!(contains(center, control, boundary(center, control, dir, -0.5), -0.5 + 1e-9));
        }
    }
}
