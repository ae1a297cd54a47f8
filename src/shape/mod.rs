//! Convex shape abstraction shared by node boundaries and port placement.
//!
//! A [`Shape`] pairs a [`ShapeType`] with a `control` point (the half-extent
//! for a rectangle, the radius for a circle) and a [`Preserve`] policy that
//! governs how `constrain_shape_within` may resize it. All boundary math is
//! delegated to the free functions in [`rectangle`] and [`circle`], which
//! operate on bare `Vec2`s so they stay reusable outside the arena.

pub mod circle;
pub mod rectangle;

use crate::vector::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }

    pub fn union(&self, other: Bounds) -> Bounds {
        Bounds {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds {
            min: Vec2::new(self.min.x - margin, self.min.y - margin),
            max: Vec2::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Rectangle,
    Circle,
}

/// Governs how a shape's `control` (size) may move when
/// `constrain_shape_within` needs to grow the shape to contain its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preserve {
    /// The control point is free to move on both axes independently.
    None,
    /// The control point never moves; only the center may shift.
    Size,
    /// The control point may grow, but its aspect ratio (x/y) is held fixed.
    Ratio,
}

impl Default for Preserve {
    fn default() -> Self {
        Preserve::None
    }
}

/// Inverse masses of the two points a boundary constraint nudges: the point
/// being constrained, and the shape's own control point.
#[derive(Debug, Clone, Copy)]
pub struct ShapeMasses {
    pub point_mass: f64,
    pub shape_mass: f64,
}

impl ShapeMasses {
    pub fn new(point_mass: f64, shape_mass: f64) -> Self {
        Self { point_mass, shape_mass }
    }
}

/// Splits a unit correction between two points weighted by the *other*
/// point's mass, so the heavier point moves less. `f64::INFINITY` marks a
/// fixed point: an infinite mass on one side sends its whole share to the
/// other, and infinite mass on both sides splits evenly (neither one should
/// have been asked to move).
pub fn split_inverse_mass(mass_a: f64, mass_b: f64) -> (f64, f64) {
    if mass_a.is_infinite() && mass_b.is_infinite() {
        return (0.5, 0.5);
    }
    if mass_a.is_infinite() {
        return (0.0, 1.0);
    }
    if mass_b.is_infinite() {
        return (1.0, 0.0);
    }
    let total = mass_a + mass_b;
    if total <= 0.0 {
        return (0.5, 0.5);
    }
    (mass_b / total, mass_a / total)
}

/// A shape instance: its kind, the `PointId` of its control vector, and the
/// resize policy applied when it must grow to contain its children.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub kind: ShapeType,
    pub control: crate::vector::PointId,
    pub preserve: Preserve,
    pub original_control: Vec2,
}

impl Shape {
    pub fn new(kind: ShapeType, control: crate::vector::PointId, preserve: Preserve, original_control: Vec2) -> Self {
        Self {
            kind,
            control,
            preserve,
            original_control,
        }
    }

    pub fn bounds(&self, center: Vec2, control: Vec2) -> Bounds {
        match self.kind {
            ShapeType::Rectangle => rectangle::bounds(center, control),
            ShapeType::Circle => circle::bounds(center, control),
        }
    }

    pub fn boundary(&self, center: Vec2, control: Vec2, direction: Vec2, offset: f64) -> Vec2 {
        match self.kind {
            ShapeType::Rectangle => rectangle::boundary(center, control, direction, offset),
            ShapeType::Circle => circle::boundary(center, control, direction, offset),
        }
    }

    pub fn support(&self, center: Vec2, control: Vec2, direction: Vec2) -> Vec2 {
        match self.kind {
            ShapeType::Rectangle => rectangle::support(center, control, direction),
            ShapeType::Circle => circle::support(center, control, direction),
        }
    }

    pub fn contains(&self, center: Vec2, control: Vec2, p: Vec2, offset: f64) -> bool {
        match self.kind {
            ShapeType::Rectangle => rectangle::contains(center, control, p, offset),
            ShapeType::Circle => circle::contains(center, control, p, offset),
        }
    }

    /// Clamps a resize delta (the proposed change to `control`) to this
    /// shape's [`Preserve`] policy. `size` discards all growth; `ratio`
    /// re-projects the delta onto the *original* control's direction so the
    /// shape's aspect ratio never drifts from how it started.
    pub fn clamp_resize(&self, delta: Vec2) -> Vec2 {
        match self.preserve {
            Preserve::None => delta,
            Preserve::Size => Vec2::zero(),
            Preserve::Ratio => {
                let original_dir = self.original_control.normalize();
                if original_dir == Vec2::zero() {
                    return delta;
                }
                original_dir.scale(delta.dot(original_dir))
            }
        }
    }

    /// Keeps `control` non-negative on either axis: a proposed delta that
    /// would drive a component below zero is clamped to bring it exactly to
    /// zero instead, so the shape repels past-zero growth rather than
    /// inverting.
    pub fn repel_negative_control(control: Vec2, delta: Vec2) -> Vec2 {
        let mut out = delta;
        if control.x + delta.x < 0.0 {
            out.x = -control.x;
        }
        if control.y + delta.y < 0.0 {
            out.y = -control.y;
        }
        out
    }

    /// Pins `point` to this shape's boundary (offset outward by `offset`,
    /// negative for an inward pin) along the ray from `center` through
    /// `point`. `expansion` in `[0, 1]` controls how much of the shape's own
    /// correction goes into resizing `control` (1.0) versus moving `center`
    /// (0.0); a shape with `Preserve::Size` should be called with
    /// `expansion = 0.0`.
    ///
    /// Returns `(point_delta, center_delta, control_delta)`.
    pub fn constrain_point_on_boundary(
        &self,
        center: Vec2,
        control: Vec2,
        point: Vec2,
        masses: ShapeMasses,
        expansion: f64,
        offset: f64,
    ) -> (Vec2, Vec2, Vec2) {
        let direction = (point - center).normalize();
        if direction == Vec2::zero() {
            return (Vec2::zero(), Vec2::zero(), Vec2::zero());
        }
        let target = self.boundary(center, control, direction, offset);
        let violation = target - point;
        if violation.length() < crate::vector::ZERO_THRESHOLD {
            return (Vec2::zero(), Vec2::zero(), Vec2::zero());
        }

        let (point_w, shape_w) = split_inverse_mass(masses.point_mass, masses.shape_mass);
        let point_delta = violation.scale(point_w);
        let shape_delta = violation.scale(-shape_w);

        let center_delta = shape_delta.scale(1.0 - expansion);

        let control_delta = if expansion > 0.0 {
            let control_dir = control.normalize();
            let denom = control_dir.dot(direction);
            if control_dir == Vec2::zero() || denom.abs() < 1e-9 {
                // Growth along `direction` can't be expressed as a scaling
                // of `control_dir` (e.g. they're perpendicular); skip it
                // rather than divide by ~0.
                Vec2::zero()
            } else {
                let share = shape_delta.scale(expansion);
                let proj_len = share.dot(direction) / denom;
                self.clamp_resize(control_dir.scale(proj_len))
            }
        } else {
            Vec2::zero()
        };

        (point_delta, center_delta, control_delta)
    }

    /// Keeps `inner` (another shape's boundary point set) inside `self`,
    /// expanding `self` outward (per `expansion`/`preserve`) only on axes
    /// where containment is currently violated. `padding` shrinks the
    /// effective interior so children stay inset from the edge.
    ///
    /// Returns `(point_delta, center_delta, control_delta)`, all zero when
    /// `point` already lies within `self` (offset by `-padding`).
    pub fn constrain_shape_within(
        &self,
        center: Vec2,
        control: Vec2,
        point: Vec2,
        masses: ShapeMasses,
        expansion: f64,
        padding: f64,
    ) -> (Vec2, Vec2, Vec2) {
        if self.contains(center, control, point, -padding) {
            return (Vec2::zero(), Vec2::zero(), Vec2::zero());
        }
        self.constrain_point_on_boundary(center, control, point, masses, expansion, -padding)
    }
}
