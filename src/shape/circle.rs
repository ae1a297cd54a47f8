//! Pure geometry for the circle shape kind. `control.x` holds the radius;
//! `control.y` mirrors it so the control vector stays generically usable
//! (e.g. by the bounding-circle approximation in children containment).

use crate::shape::Bounds;
use crate::vector::Vec2;

pub fn bounds(center: Vec2, control: Vec2) -> Bounds {
    let r = control.x;
    Bounds {
        min: Vec2::new(center.x - r, center.y - r),
        max: Vec2::new(center.x + r, center.y + r),
    }
}

pub fn boundary(center: Vec2, control: Vec2, direction: Vec2, offset: f64) -> Vec2 {
    let r = control.x + offset;
    center + direction.with_length(r)
}

/// Identical to [`boundary`] with no offset: the support point of a circle
/// along any direction is the point on its rim in that direction.
pub fn support(center: Vec2, control: Vec2, direction: Vec2) -> Vec2 {
    boundary(center, control, direction, 0.0)
}

pub fn contains(center: Vec2, control: Vec2, p: Vec2, offset: f64) -> bool {
    (p - center).length() <= control.x + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_on_the_rim() {
        let center = Vec2::new(0.0, 0.0);
        let control = Vec2::new(5.0, 5.0);
        let b = boundary(center, control, Vec2::new(1.0, 0.0), 0.0);
        assert_eq!(b, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn support_equals_boundary() {
        let center = Vec2::new(2.0, -3.0);
        let control = Vec2::new(4.0, 4.0);
        let dir = Vec2::new(3.0, 4.0);
        assert_eq!(support(center, control, dir), boundary(center, control, dir, 0.0));
    }

    #[test]
    fn contains_inclusive() {
        let center = Vec2::new(0.0, 0.0);
        let control = Vec2::new(2.0, 2.0);
        assert!(contains(center, control, Vec2::new(2.0, 0.0), 0.0));
        assert!(!contains(center, control, Vec2::new(2.01, 0.0), 0.0));
    }
}
