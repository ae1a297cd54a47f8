use crate::graph::{MetadataValue, NodeId};
use crate::vector::Vec2;
use std::collections::HashMap;

/// An edge between two ports. `path` is a snapshot of waypoints (initially
/// just the two port points); the router overwrites it wholesale, it is not
/// kept in sync with point movement afterward.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub source_port: usize,
    pub target: NodeId,
    pub target_port: usize,
    pub path: Vec<Vec2>,
    pub metadata: HashMap<String, MetadataValue>,
}
