//! Phase 1 of the orthogonal router (§4.9): the grid of route vertices
//! formed by intersecting horizontal and vertical candidate lines.
//!
//! Candidate lines come from four sources: the graph's outer boundary, a
//! margin box around every node, a center cross through every node, and a
//! cross through every non-center port. Every horizontal line is
//! intersected with every vertical one; each intersection inside both
//! lines' extents becomes a [`Vertex`]. Consecutive vertices along a line
//! are linked as neighbors so [`super::astar`] can walk the grid.

use crate::graph::port::Location;
use crate::graph::{NodeId, Storage};
use crate::router::RouterOptions;
use crate::vector::Vec2;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];
}

/// A single point in the visibility graph, with up to four cardinal
/// neighbors and (optionally) the frontmost node whose bounds contain it.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub point: Vec2,
    pub node: Option<NodeId>,
    north: Option<VertexId>,
    south: Option<VertexId>,
    east: Option<VertexId>,
    west: Option<VertexId>,
}

impl Vertex {
    pub fn neighbor(&self, dir: Direction) -> Option<VertexId> {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}

/// A horizontal candidate line at `y`, valid for `x in [x_min, x_max]`.
struct HLine {
    y: f64,
    x_min: f64,
    x_max: f64,
}

/// A vertical candidate line at `x`, valid for `y in [y_min, y_max]`.
struct VLine {
    x: f64,
    y_min: f64,
    y_max: f64,
}

pub struct VisibilityGraph {
    vertices: Vec<Vertex>,
    center_vertices: HashMap<NodeId, VertexId>,
    port_vertices: HashMap<(NodeId, usize), VertexId>,
}

fn get_or_create(
    vertices: &mut Vec<Vertex>,
    coord_index: &mut HashMap<(OrderedFloat<f64>, OrderedFloat<f64>), VertexId>,
    x: f64,
    y: f64,
) -> VertexId {
    let key = (OrderedFloat(x), OrderedFloat(y));
    if let Some(&id) = coord_index.get(&key) {
        return id;
    }
    let id = VertexId(vertices.len());
    vertices.push(Vertex { point: Vec2::new(x, y), node: None, north: None, south: None, east: None, west: None });
    coord_index.insert(key, id);
    id
}

impl VisibilityGraph {
    /// Builds the visibility graph for the current state of `storage`. An
    /// empty graph (no nodes) yields no vertices.
    pub fn build(storage: &Storage, options: &RouterOptions) -> Self {
        let mut out = VisibilityGraph { vertices: Vec::new(), center_vertices: HashMap::new(), port_vertices: HashMap::new() };
        let Some(bounds) = storage.bounds() else {
            return out;
        };
        let outer = bounds.expand(options.outer_gap);

        let mut hlines: Vec<HLine> = vec![
            HLine { y: outer.min.y, x_min: outer.min.x, x_max: outer.max.x },
            HLine { y: outer.max.y, x_min: outer.min.x, x_max: outer.max.x },
        ];
        let mut vlines: Vec<VLine> = vec![
            VLine { x: outer.min.x, y_min: outer.min.y, y_max: outer.max.y },
            VLine { x: outer.max.x, y_min: outer.min.y, y_max: outer.max.y },
        ];

        let mut center_h: HashMap<NodeId, usize> = HashMap::new();
        let mut center_v: HashMap<NodeId, usize> = HashMap::new();
        let mut port_h: HashMap<(NodeId, usize), usize> = HashMap::new();
        let mut port_v: HashMap<(NodeId, usize), usize> = HashMap::new();

        for (node_id, node) in storage.nodes() {
            let center = storage.point(node.center);
            let control = storage.point(node.shape.control);
            let margin_box = node.shape.bounds(center, control).expand(options.node_margin);

            hlines.push(HLine { y: margin_box.min.y, x_min: margin_box.min.x, x_max: margin_box.max.x });
            hlines.push(HLine { y: margin_box.max.y, x_min: margin_box.min.x, x_max: margin_box.max.x });
            vlines.push(VLine { x: margin_box.min.x, y_min: margin_box.min.y, y_max: margin_box.max.y });
            vlines.push(VLine { x: margin_box.max.x, y_min: margin_box.min.y, y_max: margin_box.max.y });

            center_h.insert(node_id, hlines.len());
            hlines.push(HLine { y: center.y, x_min: outer.min.x, x_max: outer.max.x });
            center_v.insert(node_id, vlines.len());
            vlines.push(VLine { x: center.x, y_min: outer.min.y, y_max: outer.max.y });

            for (port_idx, port) in node.ports.iter().enumerate() {
                if port.location == Some(Location::Center) {
                    continue;
                }
                let p = storage.point(port.point);
                port_h.insert((node_id, port_idx), hlines.len());
                hlines.push(HLine { y: p.y, x_min: outer.min.x, x_max: outer.max.x });
                port_v.insert((node_id, port_idx), vlines.len());
                vlines.push(VLine { x: p.x, y_min: outer.min.y, y_max: outer.max.y });
            }
        }

        let mut coord_index: HashMap<(OrderedFloat<f64>, OrderedFloat<f64>), VertexId> = HashMap::new();
        let mut cell: HashMap<(usize, usize), VertexId> = HashMap::new();

        const EPS: f64 = 1e-9;
        for (hi, h) in hlines.iter().enumerate() {
            for (vi, v) in vlines.iter().enumerate() {
                if v.x + EPS >= h.x_min && v.x - EPS <= h.x_max && h.y + EPS >= v.y_min && h.y - EPS <= v.y_max {
                    let id = get_or_create(&mut out.vertices, &mut coord_index, v.x, h.y);
                    cell.insert((hi, vi), id);
                }
            }
        }

        for (&node_id, &hi) in &center_h {
            if let Some(&vi) = center_v.get(&node_id) {
                if let Some(&id) = cell.get(&(hi, vi)) {
                    out.center_vertices.insert(node_id, id);
                }
            }
        }
        for (&key, &hi) in &port_h {
            if let Some(&vi) = port_v.get(&key) {
                if let Some(&id) = cell.get(&(hi, vi)) {
                    out.port_vertices.insert(key, id);
                }
            }
        }

        // Link consecutive vertices along each horizontal line (east/west).
        for hi in 0..hlines.len() {
            let mut points: Vec<(f64, VertexId)> = (0..vlines.len())
                .filter_map(|vi| cell.get(&(hi, vi)).map(|&id| (out.vertices[id.0].point.x, id)))
                .collect();
            points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            points.dedup_by_key(|&mut (_, id)| id);
            for pair in points.windows(2) {
                let (_, a) = pair[0];
                let (_, b) = pair[1];
                out.vertices[a.0].east = Some(b);
                out.vertices[b.0].west = Some(a);
            }
        }

        // Link consecutive vertices along each vertical line (north/south).
        // +y points down (screen coordinates), so the smaller-y vertex is
        // the northern neighbor.
        for vi in 0..vlines.len() {
            let mut points: Vec<(f64, VertexId)> = (0..hlines.len())
                .filter_map(|hi| cell.get(&(hi, vi)).map(|&id| (out.vertices[id.0].point.y, id)))
                .collect();
            points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            points.dedup_by_key(|&mut (_, id)| id);
            for pair in points.windows(2) {
                let (_, a) = pair[0];
                let (_, b) = pair[1];
                out.vertices[a.0].south = Some(b);
                out.vertices[b.0].north = Some(a);
            }
        }

        // Assign each vertex its frontmost containing node: innermost
        // nodes win, per the reversed hierarchical sort.
        let front_to_back: Vec<NodeId> = storage.hierarchical_sort().into_iter().rev().collect();
        for vertex in &mut out.vertices {
            for &node_id in &front_to_back {
                let node = storage.node(node_id);
                let center = storage.point(node.center);
                let control = storage.point(node.shape.control);
                if node.shape.bounds(center, control).contains(vertex.point) {
                    vertex.node = Some(node_id);
                    break;
                }
            }
        }

        out
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// The vertex for `node`'s `port_idx`-th port: its own cross for a
    /// cardinal port, or the node's center vertex for a center-located
    /// port.
    pub fn port_vertex(&self, storage: &Storage, node: NodeId, port_idx: usize) -> Option<VertexId> {
        let location = storage.node(node).ports[port_idx].location;
        if location == Some(Location::Center) {
            return self.center_vertices.get(&node).copied();
        }
        self.port_vertices.get(&(node, port_idx)).copied()
    }

    /// Whether `id` may be traversed by a route restricted to
    /// `traversable`: vertices with no owning node are always traversable.
    pub fn is_traversable(&self, id: VertexId, traversable: &std::collections::HashSet<NodeId>) -> bool {
        match self.vertices[id.0].node {
            None => true,
            Some(node) => traversable.contains(&node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::port::Location;
    use crate::graph::schema::{GraphSchema, NodeSchema, PortSchema, ShapeSchema};
    use crate::graph::Storage;
    use crate::shape::{Preserve, ShapeType};

    fn two_node_schema() -> GraphSchema {
        GraphSchema {
            nodes: vec![
                NodeSchema {
                    id: "a".into(),
                    children: vec![],
                    shape: ShapeSchema { kind: ShapeType::Rectangle, control: (10.0, 10.0), preserve: Preserve::None },
                    center: Some((0.0, 0.0)),
                    fixed: false,
                    ports: vec![PortSchema {
                        name: "out".into(),
                        location: Some(Location::East),
                        order: None,
                        point: None,
                        metadata: Default::default(),
                    }],
                    metadata: Default::default(),
                },
                NodeSchema {
                    id: "b".into(),
                    children: vec![],
                    shape: ShapeSchema { kind: ShapeType::Rectangle, control: (10.0, 10.0), preserve: Preserve::None },
                    center: Some((100.0, 0.0)),
                    fixed: false,
                    ports: vec![],
                    metadata: Default::default(),
                },
            ],
            edges: vec![],
        }
    }

    #[test]
    fn builds_a_center_vertex_for_every_node() {
        let storage = Storage::from_schema(&two_node_schema()).unwrap();
        let graph = VisibilityGraph::build(&storage, &RouterOptions::default());
        let a = storage.node_id("a").unwrap();
        let b = storage.node_id("b").unwrap();
        assert!(graph.center_vertices.contains_key(&a));
        assert!(graph.center_vertices.contains_key(&b));
        assert_eq!(graph.vertex(graph.center_vertices[&a]).point, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn port_vertex_resolves_a_located_port() {
        let storage = Storage::from_schema(&two_node_schema()).unwrap();
        let graph = VisibilityGraph::build(&storage, &RouterOptions::default());
        let a = storage.node_id("a").unwrap();
        let id = graph.port_vertex(&storage, a, 0).expect("port vertex");
        assert_eq!(graph.vertex(id).point, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn vertices_link_to_cardinal_neighbors() {
        let storage = Storage::from_schema(&two_node_schema()).unwrap();
        let graph = VisibilityGraph::build(&storage, &RouterOptions::default());
        let a = storage.node_id("a").unwrap();
        let center = graph.center_vertices[&a];
        let east = graph.vertex(center).neighbor(Direction::East);
        assert!(east.is_some());
        assert!(graph.vertex(east.unwrap()).point.x > 0.0);
    }
}
