use crate::graph::{MetadataValue, NodeId, Port};
use crate::shape::Shape;
use std::collections::HashMap;

/// A node in the containment hierarchy. `center` and `shape.control` are
/// arena point ids; `parent`/`children` encode the nesting used by
/// containment queries, compound-aware forces, and the router's front-to-
/// back ordering.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub center: crate::vector::PointId,
    pub shape: Shape,
    pub fixed: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub ports: Vec<Port>,
    pub metadata: HashMap<String, MetadataValue>,
}

impl Node {
    pub fn port_by_name(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }
}
