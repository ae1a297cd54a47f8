use crate::vector::PointId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The side of a node's shape a port is anchored to. The port's point sits
/// on the outward normal of that side, per [`crate::constraints::ports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    North,
    South,
    East,
    West,
    /// Pinned to the node center, same as leaving `location` unset.
    Center,
}

impl Location {
    /// The outward normal for this side, in screen coordinates (+y down).
    /// `Center` has no normal; callers must special-case it.
    pub fn normal(self) -> crate::vector::Vec2 {
        use crate::vector::Vec2;
        match self {
            Location::North => Vec2::new(0.0, -1.0),
            Location::South => Vec2::new(0.0, 1.0),
            Location::East => Vec2::new(1.0, 0.0),
            Location::West => Vec2::new(-1.0, 0.0),
            Location::Center => Vec2::zero(),
        }
    }
}

/// A named attachment point on a node. Edges terminate at ports, never
/// directly at node centers.
#[derive(Debug, Clone)]
pub struct Port {
    pub name: String,
    pub point: PointId,
    pub location: Option<Location>,
    /// Ordering among ports sharing the same `location`, used to space
    /// ports out along a side. `None` ports are unordered.
    pub order: Option<i64>,
    /// `true` for ports synthesized by edge resolution rather than declared
    /// on the node schema.
    pub anonymous: bool,
    pub metadata: HashMap<String, crate::graph::MetadataValue>,
}

impl Port {
    pub fn new(name: impl Into<String>, point: PointId) -> Self {
        Self {
            name: name.into(),
            point,
            location: None,
            order: None,
            anonymous: false,
            metadata: HashMap::new(),
        }
    }
}
