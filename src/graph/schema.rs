//! JSON-friendly schema types and the construction/serialization pair that
//! turns them into (and back out of) a [`Storage`].

use crate::error::{LayoutError, LayoutResult};
use crate::graph::port::Location;
use crate::graph::{Edge, MetadataValue, Node, NodeId, Port, Storage};
use crate::shape::{Preserve, Shape, ShapeType};
use crate::vector::Vec2;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSchema {
    pub kind: ShapeType,
    pub control: (f64, f64),
    #[serde(default)]
    pub preserve: Preserve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSchema {
    pub name: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub order: Option<i64>,
    /// An explicit point, overriding the `location`-derived default.
    /// [`Storage::to_schema`] always emits the port's current concrete
    /// point here so a round trip reproduces it exactly.
    #[serde(default)]
    pub point: Option<(f64, f64)>,
    #[serde(default)]
    pub metadata: HashMap<String, MetadataValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSchema {
    pub id: String,
    #[serde(default)]
    pub children: Vec<String>,
    pub shape: ShapeSchema,
    #[serde(default)]
    pub center: Option<(f64, f64)>,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub ports: Vec<PortSchema>,
    #[serde(default)]
    pub metadata: HashMap<String, MetadataValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSchema {
    pub id: String,
    pub source: String,
    #[serde(default)]
    pub source_port: Option<String>,
    pub target: String,
    #[serde(default)]
    pub target_port: Option<String>,
    /// An explicit initial path, overriding the `[source_port,
    /// target_port]` default. [`Storage::to_schema`] always emits the
    /// edge's current concrete path here.
    #[serde(default)]
    pub path: Option<Vec<(f64, f64)>>,
    #[serde(default)]
    pub metadata: HashMap<String, MetadataValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphSchema {
    #[serde(default)]
    pub nodes: Vec<NodeSchema>,
    #[serde(default)]
    pub edges: Vec<EdgeSchema>,
}

fn seeded_rng(key: &str) -> StdRng {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}

/// A position in `[0, 1)^2`, deterministic for a given node id.
fn seeded_unit_square(id: &str) -> Vec2 {
    let mut rng = seeded_rng(id);
    Vec2::new(rng.gen::<f64>(), rng.gen::<f64>())
}

/// A tiny deterministic offset for an auto-allocated port, so two edges
/// resolved at the same node don't land on the exact same point.
fn seeded_small_offset(key: &str) -> Vec2 {
    let mut rng = seeded_rng(key);
    let angle = rng.gen::<f64>() * std::f64::consts::TAU;
    let radius = rng.gen::<f64>() * 1e-3;
    Vec2::new(radius * angle.cos(), radius * angle.sin())
}

fn port_initial_position(center: Vec2, control: Vec2, location: Option<Location>) -> Vec2 {
    match location {
        Some(Location::North) => center + Vec2::new(0.0, -control.y),
        Some(Location::South) => center + Vec2::new(0.0, control.y),
        Some(Location::East) => center + Vec2::new(control.x, 0.0),
        Some(Location::West) => center + Vec2::new(-control.x, 0.0),
        Some(Location::Center) | None => center,
    }
}

impl Storage {
    /// Builds a [`Storage`] from a schema: random-but-deterministic centers
    /// for nodes that don't specify one, auto-allocated private ports for
    /// edge endpoints that don't name one. Rejects duplicate ids and
    /// dangling references.
    pub fn from_schema(schema: &GraphSchema) -> LayoutResult<Storage> {
        let mut storage = Storage::new();

        for node_schema in &schema.nodes {
            if storage.node_index.contains_key(&node_schema.id) {
                return Err(LayoutError::DuplicateNodeId(node_schema.id.clone()));
            }

            let center_pos = node_schema.center.map(|(x, y)| Vec2::new(x, y)).unwrap_or_else(|| seeded_unit_square(&node_schema.id));
            let control_pos = Vec2::new(node_schema.shape.control.0, node_schema.shape.control.1);
            let mass = if node_schema.fixed { f64::INFINITY } else { 1.0 };
            let center = storage.alloc_point(center_pos, mass);
            let control = storage.alloc_point(control_pos, mass);

            let mut ports = Vec::with_capacity(node_schema.ports.len());
            for port_schema in &node_schema.ports {
                let point_pos = port_schema
                    .point
                    .map(|(x, y)| Vec2::new(x, y))
                    .unwrap_or_else(|| port_initial_position(center_pos, control_pos, port_schema.location));
                let point = storage.alloc_point(point_pos, 1.0);
                ports.push(Port {
                    name: port_schema.name.clone(),
                    point,
                    location: port_schema.location,
                    order: port_schema.order,
                    anonymous: false,
                    metadata: port_schema.metadata.clone(),
                });
            }

            let node_id = NodeId(storage.nodes.len());
            storage.nodes.push(Node {
                id: node_schema.id.clone(),
                center,
                shape: Shape::new(node_schema.shape.kind, control, node_schema.shape.preserve, control_pos),
                fixed: node_schema.fixed,
                parent: None,
                children: Vec::new(),
                ports,
                metadata: node_schema.metadata.clone(),
            });
            storage.node_index.insert(node_schema.id.clone(), node_id);
        }

        for node_schema in &schema.nodes {
            let node_id = storage.node_index[&node_schema.id];
            for child_ext in &node_schema.children {
                let child_id = storage.node_index.get(child_ext).copied().ok_or_else(|| LayoutError::UnknownChild {
                    node: node_schema.id.clone(),
                    child: child_ext.clone(),
                })?;
                storage.node_mut(child_id).parent = Some(node_id);
                storage.node_mut(node_id).children.push(child_id);
            }
        }

        for edge_schema in &schema.edges {
            if storage.edge_index.contains_key(&edge_schema.id) {
                return Err(LayoutError::DuplicateEdgeId(edge_schema.id.clone()));
            }
            let source_id = storage.node_id(&edge_schema.source).ok_or_else(|| LayoutError::UnknownNode {
                edge: edge_schema.id.clone(),
                node: edge_schema.source.clone(),
            })?;
            let target_id = storage.node_id(&edge_schema.target).ok_or_else(|| LayoutError::UnknownNode {
                edge: edge_schema.id.clone(),
                node: edge_schema.target.clone(),
            })?;

            let source_port = resolve_port(&mut storage, source_id, edge_schema.source_port.as_deref(), &edge_schema.id, "source")?;
            let target_port = resolve_port(&mut storage, target_id, edge_schema.target_port.as_deref(), &edge_schema.id, "target")?;

            let source_point = storage.node(source_id).ports[source_port].point;
            let target_point = storage.node(target_id).ports[target_port].point;
            let path = match &edge_schema.path {
                Some(pts) if !pts.is_empty() => pts.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
                _ => vec![storage.point(source_point), storage.point(target_point)],
            };

            let edge_id = crate::graph::EdgeId(storage.edges.len());
            storage.edges.push(Edge {
                id: edge_schema.id.clone(),
                source: source_id,
                source_port,
                target: target_id,
                target_port,
                path,
                metadata: edge_schema.metadata.clone(),
            });
            storage.edge_index.insert(edge_schema.id.clone(), edge_id);
        }

        Ok(storage)
    }

    /// Serializes the current concrete state back into a [`GraphSchema`].
    /// Centers and previously auto-allocated ports are emitted explicitly,
    /// so re-running [`Storage::from_schema`] on the result reproduces this
    /// exact layout rather than re-randomizing it.
    pub fn to_schema(&self) -> GraphSchema {
        let nodes = self
            .nodes()
            .map(|(_, node)| {
                let center = self.point(node.center);
                let control = self.point(node.shape.control);
                NodeSchema {
                    id: node.id.clone(),
                    children: node.children.iter().map(|&c| self.node(c).id.clone()).collect(),
                    shape: ShapeSchema {
                        kind: node.shape.kind,
                        control: (control.x, control.y),
                        preserve: node.shape.preserve,
                    },
                    center: Some((center.x, center.y)),
                    fixed: node.fixed,
                    ports: node
                        .ports
                        .iter()
                        .map(|p| {
                            let point = self.point(p.point);
                            PortSchema {
                                name: p.name.clone(),
                                location: p.location,
                                order: p.order,
                                point: Some((point.x, point.y)),
                                metadata: p.metadata.clone(),
                            }
                        })
                        .collect(),
                    metadata: node.metadata.clone(),
                }
            })
            .collect();

        let edges = self
            .edges()
            .map(|(_, edge)| EdgeSchema {
                id: edge.id.clone(),
                source: self.node(edge.source).id.clone(),
                source_port: Some(self.node(edge.source).ports[edge.source_port].name.clone()),
                target: self.node(edge.target).id.clone(),
                target_port: Some(self.node(edge.target).ports[edge.target_port].name.clone()),
                path: Some(edge.path.iter().map(|p| (p.x, p.y)).collect()),
                metadata: edge.metadata.clone(),
            })
            .collect();

        GraphSchema { nodes, edges }
    }
}

fn resolve_port(storage: &mut Storage, node_id: NodeId, port_name: Option<&str>, edge_id: &str, role: &str) -> LayoutResult<usize> {
    if let Some(name) = port_name {
        storage.node(node_id).port_by_name(name).ok_or_else(|| LayoutError::UnknownPort {
            edge: edge_id.to_string(),
            node: storage.node(node_id).id.clone(),
            port: name.to_string(),
        })
    } else {
        let center_pos = storage.point(storage.node(node_id).center);
        let offset = seeded_small_offset(&format!("{edge_id}:{role}"));
        let point = storage.alloc_point(center_pos + offset, 1.0);
        let name = format!("__auto_{edge_id}_{role}");
        storage.node_mut(node_id).ports.push(Port {
            name,
            point,
            location: None,
            order: None,
            anonymous: true,
            metadata: Default::default(),
        });
        Ok(storage.node(node_id).ports.len() - 1)
    }
}
