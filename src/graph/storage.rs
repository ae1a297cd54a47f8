use crate::graph::{Edge, EdgeId, Node, NodeId};
use crate::shape::Bounds;
use crate::vector::{PointId, Vec2};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

/// All-pairs shortest path table over the unit-weight hop graph, computed by
/// [`Storage::shortest_paths`] and cached until the topology changes.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    dist: Vec<Vec<Option<u32>>>,
}

impl ShortestPaths {
    pub fn distance(&self, u: NodeId, v: NodeId) -> Option<u32> {
        self.dist.get(u.0).and_then(|row| row.get(v.0)).copied().flatten()
    }
}

/// Owns the arena of points (node centers, shape controls, port points) plus
/// the node and edge collections. Everything else in the crate addresses
/// points through [`PointId`] rather than holding `Vec2` directly.
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) points: Vec<Vec2>,
    pub(crate) masses: Vec<f64>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) node_index: HashMap<String, NodeId>,
    pub(crate) edge_index: HashMap<String, EdgeId>,
    directed_paths: RefCell<Option<ShortestPaths>>,
    undirected_paths: RefCell<Option<ShortestPaths>>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            masses: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
            directed_paths: RefCell::new(None),
            undirected_paths: RefCell::new(None),
        }
    }

    pub(crate) fn invalidate_topology_caches(&self) {
        *self.directed_paths.borrow_mut() = None;
        *self.undirected_paths.borrow_mut() = None;
    }

    // -- point arena -----------------------------------------------------

    pub fn alloc_point(&mut self, position: Vec2, mass: f64) -> PointId {
        let id = PointId(self.points.len());
        self.points.push(position);
        self.masses.push(mass);
        id
    }

    pub fn point(&self, id: PointId) -> Vec2 {
        self.points[id.0]
    }

    pub fn set_point(&mut self, id: PointId, position: Vec2) {
        self.points[id.0] = position;
    }

    pub fn translate_point(&mut self, id: PointId, delta: Vec2) {
        self.points[id.0] += delta;
    }

    pub fn mass(&self, id: PointId) -> f64 {
        self.masses[id.0]
    }

    pub fn set_mass(&mut self, id: PointId, mass: f64) {
        self.masses[id.0] = mass;
    }

    // -- nodes -------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn node_id(&self, external_id: &str) -> Option<NodeId> {
        self.node_index.get(external_id).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // -- edges ---------------------------------------------------------

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn edge_id(&self, external_id: &str) -> Option<EdgeId> {
        self.edge_index.get(external_id).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    // -- hierarchy -------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.parent(*id).is_none())
            .collect()
    }

    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        let group = match self.parent(id) {
            Some(parent) => self.children(parent).to_vec(),
            None => self.roots(),
        };
        group.into_iter().filter(|&sibling| sibling != id).collect()
    }

    /// Ancestor chain from the outermost root down to (but excluding) `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cur = self.parent(id);
        while let Some(node) = cur {
            chain.push(node);
            cur = self.parent(node);
        }
        chain.reverse();
        chain
    }

    /// Pre-order traversal of `id`'s descendants (children before
    /// grandchildren, left to right).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            for &child in self.children(n).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub fn has_ancestor(&self, id: NodeId, maybe_ancestor: NodeId) -> bool {
        self.ancestors(id).contains(&maybe_ancestor)
    }

    pub fn has_descendant(&self, id: NodeId, maybe_descendant: NodeId) -> bool {
        self.has_ancestor(maybe_descendant, id)
    }

    pub fn has_ancestor_or_descendant(&self, u: NodeId, v: NodeId) -> bool {
        u == v || self.has_ancestor(u, v) || self.has_descendant(u, v)
    }

    /// The deepest node that is an ancestor of both `u` and `v` (or of
    /// itself, if `u == v`). `None` if `u` and `v` are in different trees.
    pub fn least_common_ancestor(&self, u: NodeId, v: NodeId) -> Option<NodeId> {
        if u == v {
            return Some(u);
        }
        let mut chain_u = self.ancestors(u);
        chain_u.push(u);
        let mut chain_v = self.ancestors(v);
        chain_v.push(v);

        let mut lca = None;
        for (a, b) in chain_u.iter().zip(chain_v.iter()) {
            if a == b {
                lca = Some(*a);
            } else {
                break;
            }
        }
        lca
    }

    /// The pair of ancestors (or self) of `u` and `v` that share
    /// [`Storage::least_common_ancestor`] as their immediate parent — the
    /// highest scope at which the two nodes' lineages diverge. If one node
    /// is an ancestor of (or equal to) the other, that node stands in for
    /// its own side of the pair.
    pub fn greatest_different_ancestor(&self, u: NodeId, v: NodeId) -> (NodeId, NodeId) {
        let mut chain_u = self.ancestors(u);
        chain_u.push(u);
        let mut chain_v = self.ancestors(v);
        chain_v.push(v);

        let mut depth = 0;
        while depth < chain_u.len() && depth < chain_v.len() && chain_u[depth] == chain_v[depth] {
            depth += 1;
        }
        let gda_u = chain_u.get(depth).copied().unwrap_or(u);
        let gda_v = chain_v.get(depth).copied().unwrap_or(v);
        (gda_u, gda_v)
    }

    // -- edge adjacency ----------------------------------------------------

    pub fn edges_from(&self, id: NodeId) -> Vec<EdgeId> {
        self.edges()
            .filter(|(_, e)| e.source == id)
            .map(|(eid, _)| eid)
            .collect()
    }

    pub fn edges_to(&self, id: NodeId) -> Vec<EdgeId> {
        self.edges()
            .filter(|(_, e)| e.target == id)
            .map(|(eid, _)| eid)
            .collect()
    }

    pub fn sources(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.edges()
            .filter(|(_, e)| e.target == id)
            .map(|(_, e)| e.source)
            .filter(|n| seen.insert(*n))
            .collect()
    }

    pub fn targets(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.edges()
            .filter(|(_, e)| e.source == id)
            .map(|(_, e)| e.target)
            .filter(|n| seen.insert(*n))
            .collect()
    }

    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.edges()
            .filter_map(|(_, e)| {
                if e.source == id {
                    Some(e.target)
                } else if e.target == id {
                    Some(e.source)
                } else {
                    None
                }
            })
            .filter(|n| seen.insert(*n))
            .collect()
    }

    pub fn exists_edge(&self, u: NodeId, v: NodeId, undirected: bool) -> bool {
        self.edges().any(|(_, e)| {
            (e.source == u && e.target == v) || (undirected && e.source == v && e.target == u)
        })
    }

    // -- shortest paths ------------------------------------------------

    pub fn shortest_paths(&self, directed: bool) -> ShortestPaths {
        let cache = if directed { &self.directed_paths } else { &self.undirected_paths };
        if let Some(sp) = cache.borrow().as_ref() {
            return sp.clone();
        }
        let n = self.nodes.len();
        const INF: u32 = u32::MAX;
        let mut dist = vec![vec![INF; n]; n];
        for i in 0..n {
            dist[i][i] = 0;
        }
        for (_, e) in self.edges() {
            let (u, v) = (e.source.0, e.target.0);
            dist[u][v] = dist[u][v].min(1);
            if !directed {
                dist[v][u] = dist[v][u].min(1);
            }
        }
        for k in 0..n {
            for i in 0..n {
                if dist[i][k] == INF {
                    continue;
                }
                for j in 0..n {
                    if dist[k][j] == INF {
                        continue;
                    }
                    let via = dist[i][k] + dist[k][j];
                    if via < dist[i][j] {
                        dist[i][j] = via;
                    }
                }
            }
        }
        let dist = dist
            .into_iter()
            .map(|row| row.into_iter().map(|d| if d == INF { None } else { Some(d) }).collect())
            .collect();
        let sp = ShortestPaths { dist };
        *cache.borrow_mut() = Some(sp.clone());
        sp
    }

    // -- geometry & ordering ---------------------------------------------

    pub fn bounds(&self) -> Option<Bounds> {
        let mut acc: Option<Bounds> = None;
        for (_, node) in self.nodes() {
            let center = self.point(node.center);
            let control = self.point(node.shape.control);
            let b = node.shape.bounds(center, control);
            acc = Some(match acc {
                Some(existing) => existing.union(b),
                None => b,
            });
        }
        for (_, edge) in self.edges() {
            for &p in &edge.path {
                let point_bounds = Bounds { min: p, max: p };
                acc = Some(match acc {
                    Some(existing) => existing.union(point_bounds),
                    None => point_bounds,
                });
            }
        }
        acc
    }

    /// Topological order over the containment forest, outermost (roots)
    /// first. Reversing this gives the router's front-to-back order.
    pub fn hierarchical_sort(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue: VecDeque<NodeId> = self.roots().into_iter().collect();
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &child in self.children(id) {
                queue.push_back(child);
            }
        }
        order
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
