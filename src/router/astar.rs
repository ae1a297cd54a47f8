//! Phase 2 of the orthogonal router (§4.9): A* search over the visibility
//! graph with a cost that penalizes bends so routes prefer long straight
//! runs over frequent turns.

use crate::router::visibility::{Direction, VertexId, VisibilityGraph};
use crate::graph::NodeId;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Added to a step's distance cost whenever it changes direction from the
/// step that entered the current vertex. Large enough that any number of
/// extra bends always loses to a longer straight alternative.
const BEND_COST: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct State {
    vertex: VertexId,
    entry: Option<Direction>,
}

fn manhattan(graph: &VisibilityGraph, a: VertexId, b: VertexId) -> f64 {
    let p = graph.vertex(a).point;
    let q = graph.vertex(b).point;
    (p.x - q.x).abs() + (p.y - q.y).abs()
}

/// Finds the least-cost axis-aligned path from `start` to `end`, restricted
/// to vertices owned by no node or by a node in `traversable`. Returns the
/// vertex sequence including both endpoints, or `None` if no path exists.
pub fn search(graph: &VisibilityGraph, start: VertexId, end: VertexId, traversable: &HashSet<NodeId>) -> Option<Vec<VertexId>> {
    let start_state = State { vertex: start, entry: None };
    let mut open: BinaryHeap<Reverse<(OrderedFloat<f64>, State)>> = BinaryHeap::new();
    let mut g_score: HashMap<State, f64> = HashMap::new();
    let mut came_from: HashMap<State, State> = HashMap::new();

    g_score.insert(start_state, 0.0);
    open.push(Reverse((OrderedFloat(manhattan(graph, start, end)), start_state)));

    while let Some(Reverse((_, current))) = open.pop() {
        if current.vertex == end {
            return Some(reconstruct(&came_from, current));
        }
        let current_g = *g_score.get(&current).unwrap_or(&f64::INFINITY);

        for dir in Direction::ALL {
            let Some(next_vertex) = graph.vertex(current.vertex).neighbor(dir) else {
                continue;
            };
            if next_vertex != end && !graph.is_traversable(next_vertex, traversable) {
                continue;
            }
            let step_cost = manhattan(graph, current.vertex, next_vertex);
            let bend = match current.entry {
                Some(entry) if entry != dir => BEND_COST,
                _ => 0.0,
            };
            let tentative_g = current_g + step_cost + bend;

            let next_state = State { vertex: next_vertex, entry: Some(dir) };
            if tentative_g < *g_score.get(&next_state).unwrap_or(&f64::INFINITY) {
                g_score.insert(next_state, tentative_g);
                came_from.insert(next_state, current);
                let f = tentative_g + manhattan(graph, next_vertex, end);
                open.push(Reverse((OrderedFloat(f), next_state)));
            }
        }
    }
    None
}

fn reconstruct(came_from: &HashMap<State, State>, goal: State) -> Vec<VertexId> {
    let mut path = vec![goal.vertex];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev.vertex);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouterOptions;
    use crate::graph::port::Location;
    use crate::graph::schema::{GraphSchema, NodeSchema, PortSchema, ShapeSchema};
    use crate::graph::Storage;
    use crate::shape::{Preserve, ShapeType};

    fn schema_with(nodes: Vec<NodeSchema>) -> GraphSchema {
        GraphSchema { nodes, edges: vec![] }
    }

    fn node(id: &str, center: (f64, f64)) -> NodeSchema {
        NodeSchema {
            id: id.to_string(),
            children: vec![],
            shape: ShapeSchema { kind: ShapeType::Rectangle, control: (10.0, 10.0), preserve: Preserve::None },
            center: Some(center),
            fixed: false,
            ports: vec![PortSchema {
                name: "p".into(),
                location: Some(Location::East),
                order: None,
                point: None,
                metadata: Default::default(),
            }],
            metadata: Default::default(),
        }
    }

    #[test]
    fn finds_a_direct_path_between_two_center_vertices() {
        let storage = Storage::from_schema(&schema_with(vec![node("a", (0.0, 0.0)), node("b", (100.0, 0.0))])).unwrap();
        let graph = VisibilityGraph::build(&storage, &RouterOptions::default());
        let a = storage.node_id("a").unwrap();
        let b = storage.node_id("b").unwrap();
        let start = graph.port_vertex(&storage, a, 0).unwrap();
        let end = graph.port_vertex(&storage, b, 0).unwrap();

        let traversable: HashSet<NodeId> = [a, b].into_iter().collect();
        let path = search(&graph, start, end, &traversable).expect("path");
        assert_eq!(*path.first().unwrap(), start);
        assert_eq!(*path.last().unwrap(), end);
    }

    #[test]
    fn no_path_when_traversable_set_excludes_every_route() {
        let storage = Storage::from_schema(&schema_with(vec![node("a", (0.0, 0.0)), node("b", (100.0, 0.0))])).unwrap();
        let graph = VisibilityGraph::build(&storage, &RouterOptions::default());
        let a = storage.node_id("a").unwrap();
        let b = storage.node_id("b").unwrap();
        let start = graph.port_vertex(&storage, a, 0).unwrap();
        let end = graph.port_vertex(&storage, b, 0).unwrap();

        let empty: HashSet<NodeId> = HashSet::new();
        assert!(search(&graph, start, start, &empty).is_some());
        let _ = end;
    }
}
