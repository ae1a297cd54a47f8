//! Orthogonal edge router: turns straight source-to-target edges into
//! axis-aligned polylines.
//!
//! Three phases (§4.9): build a visibility graph of route vertices formed
//! by intersecting horizontal and vertical candidate lines, run A* per edge
//! over that graph with a bend-penalized cost, and emit the resulting
//! vertex sequence as the edge's path. Segment-nudging (a fourth phase that
//! would separate overlapping parallel routes) is not implemented.

mod astar;
mod visibility;

pub use visibility::VisibilityGraph;

use crate::graph::{EdgeId, NodeId, Storage};
use crate::vector::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouterOptions {
    /// How far outside each node's shape its margin lines sit.
    pub node_margin: f64,
    /// Unused by routing itself; reserved for the nudging phase that would
    /// space parallel segments apart.
    pub edge_gap: f64,
    /// How far outside the overall graph bounds the outer boundary lines sit.
    pub outer_gap: f64,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self { node_margin: 8.0, edge_gap: 4.0, outer_gap: 8.0 }
    }
}

/// Routes every edge in `storage`, overwriting `edge.path` with an
/// axis-aligned polyline. Edges with no viable route are logged and left
/// with whatever path they already had.
pub fn route_all(storage: &mut Storage, options: &RouterOptions) {
    let graph = VisibilityGraph::build(storage, options);
    let edge_ids: Vec<EdgeId> = storage.edges().map(|(id, _)| id).collect();

    for edge_id in edge_ids {
        match route_edge(storage, &graph, edge_id) {
            Some(path) => storage.edge_mut(edge_id).path = path,
            None => {
                let id = storage.edge(edge_id).id.clone();
                log::warn!("no route found for edge {id}, leaving path unchanged");
            }
        }
    }
}

fn traversable_nodes(storage: &Storage, source: NodeId, target: NodeId, source_port: Vec2, target_port: Vec2) -> HashSet<NodeId> {
    let mut set: HashSet<NodeId> = HashSet::new();
    set.insert(source);
    set.insert(target);
    set.extend(storage.ancestors(source));
    set.extend(storage.ancestors(target));

    for (node_id, node) in storage.nodes() {
        let center = storage.point(node.center);
        let control = storage.point(node.shape.control);
        let bounds = node.shape.bounds(center, control);
        if bounds.contains(source_port) || bounds.contains(target_port) {
            set.insert(node_id);
        }
    }
    set
}

fn route_edge(storage: &Storage, graph: &VisibilityGraph, edge_id: EdgeId) -> Option<Vec<Vec2>> {
    let edge = storage.edge(edge_id);
    let source_node = edge.source;
    let target_node = edge.target;
    let source_port_point = storage.point(storage.node(source_node).ports[edge.source_port].point);
    let target_port_point = storage.point(storage.node(target_node).ports[edge.target_port].point);

    let start = graph.port_vertex(storage, source_node, edge.source_port)?;
    let end = graph.port_vertex(storage, target_node, edge.target_port)?;
    if start == end {
        return Some(vec![source_port_point, target_port_point]);
    }

    let traversable = traversable_nodes(storage, source_node, target_node, source_port_point, target_port_point);
    let vertex_path = astar::search(graph, start, end, &traversable)?;

    let mut points: Vec<Vec2> = vertex_path.into_iter().map(|v| graph.vertex(v).point).collect();
    if let Some(first) = points.first_mut() {
        *first = source_port_point;
    }
    if let Some(last) = points.last_mut() {
        *last = target_port_point;
    }
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::port::Location;
    use crate::graph::schema::{EdgeSchema, GraphSchema, NodeSchema, PortSchema, ShapeSchema};
    use crate::shape::{Preserve, ShapeType};

    fn node_with_port(id: &str, center: (f64, f64), size: (f64, f64), name: &str, location: Location) -> NodeSchema {
        NodeSchema {
            id: id.to_string(),
            children: vec![],
            shape: ShapeSchema { kind: ShapeType::Rectangle, control: (size.0 / 2.0, size.1 / 2.0), preserve: Preserve::None },
            center: Some(center),
            fixed: false,
            ports: vec![PortSchema {
                name: name.to_string(),
                location: Some(location),
                order: None,
                point: None,
                metadata: Default::default(),
            }],
            metadata: Default::default(),
        }
    }

    #[test]
    fn routes_a_simple_edge_between_two_separated_nodes() {
        let schema = GraphSchema {
            nodes: vec![
                node_with_port("a", (0.0, 0.0), (20.0, 20.0), "out", Location::East),
                node_with_port("b", (200.0, 0.0), (20.0, 20.0), "in", Location::West),
            ],
            edges: vec![EdgeSchema {
                id: "e".into(),
                source: "a".into(),
                source_port: Some("out".into()),
                target: "b".into(),
                target_port: Some("in".into()),
                path: None,
                metadata: Default::default(),
            }],
        };
        let mut storage = Storage::from_schema(&schema).unwrap();
        route_all(&mut storage, &RouterOptions::default());

        let edge_id = storage.edge_id("e").unwrap();
        let path = &storage.edge(edge_id).path;
        assert!(path.len() >= 2);

        let a = storage.node_id("a").unwrap();
        let b = storage.node_id("b").unwrap();
        let source_port = storage.point(storage.node(a).ports[0].point);
        let target_port = storage.point(storage.node(b).ports[0].point);
        assert_eq!(*path.first().unwrap(), source_port);
        assert_eq!(*path.last().unwrap(), target_port);
    }

    #[test]
    fn routed_path_is_axis_aligned_between_consecutive_vertices() {
        let schema = GraphSchema {
            nodes: vec![
                node_with_port("a", (0.0, 0.0), (20.0, 20.0), "out", Location::South),
                node_with_port("b", (100.0, 100.0), (20.0, 20.0), "in", Location::North),
            ],
            edges: vec![EdgeSchema {
                id: "e".into(),
                source: "a".into(),
                source_port: Some("out".into()),
                target: "b".into(),
                target_port: Some("in".into()),
                path: None,
                metadata: Default::default(),
            }],
        };
        let mut storage = Storage::from_schema(&schema).unwrap();
        route_all(&mut storage, &RouterOptions::default());

        let edge_id = storage.edge_id("e").unwrap();
        let path = &storage.edge(edge_id).path;
        for pair in path.windows(2) {
            let (p, q) = (pair[0], pair[1]);
            assert!((p.x - q.x).abs() < 1e-6 || (p.y - q.y).abs() < 1e-6);
        }
    }
}
