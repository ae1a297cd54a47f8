//! 2D vector arithmetic used throughout the layout engine.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2D vector or point. Used both for absolute positions and for deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn scale(&self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    /// Returns the unit vector in this direction, or `Vec2::zero()` if this
    /// vector has (near) zero length.
    pub fn normalize(&self) -> Vec2 {
        let len = self.length();
        if len < 1e-9 {
            Vec2::zero()
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Returns this vector rescaled to have the given length, preserving
    /// direction. Zero vectors stay zero.
    pub fn with_length(&self, length: f64) -> Vec2 {
        self.normalize().scale(length)
    }

    /// `self + other * scalar`.
    pub fn add_scaled(&self, other: Vec2, scalar: f64) -> Vec2 {
        *self + other.scale(scalar)
    }

    /// The vector rotated 90 degrees counter-clockwise in math coordinates
    /// (i.e. perpendicular to `self`).
    pub fn perp(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        self.scale(rhs)
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Vec2::zero()
    }
}

/// A stable index into the point arena owned by [`crate::graph::Storage`].
/// Node centers, port points, and shape controls are all `PointId`s so that
/// gradients can address them without holding a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

/// A single `(point, delta)` nudge produced by a constraint or force.
/// Optimizers apply gradients as `point += lr * delta`.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    pub point: PointId,
    pub delta: Vec2,
}

impl Gradient {
    pub fn new(point: PointId, delta: Vec2) -> Self {
        Self { point, delta }
    }
}

/// Below this magnitude a gradient (or the violation driving it) is
/// considered already satisfied and is not emitted.
pub const ZERO_THRESHOLD: f64 = 1e-3;
