use super::{unordered_pairs, Generator};
use crate::constraints::pairwise::nudge_pair;
use crate::constraints::position::boundary_gap;
use crate::graph::{NodeId, Storage};
use crate::vector::Gradient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Multiplied by the hop distance between two nodes to get their ideal
    /// boundary-to-boundary separation.
    pub ideal_length: f64,
    /// Upper bound on a single attractive nudge's magnitude, so a very
    /// distant connected pair doesn't leap together in one step.
    pub max_attraction: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self { ideal_length: 50.0, max_attraction: 50.0 }
    }
}

fn node_mass_factor(storage: &Storage, node: NodeId) -> f64 {
    if storage.node(node).fixed {
        0.0
    } else {
        1.0
    }
}

/// Classic spring layout: connected pairs attract toward `ideal_length *
/// hop_distance`, and siblings that have collapsed closer than their ideal
/// distance repel apart. Pairs where both nodes are fixed, or one contains
/// the other in the hierarchy, are skipped entirely.
pub struct SpringGenerator {
    pub config: SpringConfig,
}

impl SpringGenerator {
    pub fn new(config: SpringConfig) -> Self {
        Self { config }
    }
}

impl Generator for SpringGenerator {
    fn generate(&self, storage: &Storage) -> Box<dyn Iterator<Item = Vec<Gradient>>> {
        let sp = storage.shortest_paths(false);
        let mut batches = Vec::new();

        for (u, v) in unordered_pairs(storage) {
            if storage.has_ancestor_or_descendant(u, v) {
                continue;
            }
            let mu = node_mass_factor(storage, u);
            let mv = node_mass_factor(storage, v);
            if mu == 0.0 && mv == 0.0 {
                continue;
            }
            let Some(hops) = sp.distance(u, v) else { continue };
            if hops == 0 {
                continue;
            }
            let ideal = hops as f64 * self.config.ideal_length;
            let actual = boundary_gap(storage, u, v);
            let connected = storage.exists_edge(u, v, true);

            if connected && actual > ideal {
                let magnitude = (actual - ideal).min(self.config.max_attraction);
                if magnitude <= 0.0 {
                    continue;
                }
                let cu = storage.node(u).center;
                let cv = storage.node(v).center;
                batches.push(nudge_pair(storage, cu, cv, (-magnitude * mu, -magnitude * mv)));
            } else if actual < ideal && storage.siblings(u).contains(&v) {
                let magnitude = (ideal - actual) / (hops as f64 * hops as f64);
                let cu = storage.node(u).center;
                let cv = storage.node(v).center;
                batches.push(nudge_pair(storage, cu, cv, (magnitude * mu, magnitude * mv)));
            }
        }

        Box::new(batches.into_iter().filter(|b| !b.is_empty()))
    }
}

/// The compound variant: repulsion only between siblings, attraction only
/// between the greatest-different-ancestor pair of each edge's endpoints,
/// so an edge between deeply nested descendants still pulls their
/// top-level containing groups together.
pub struct CompoundSpringGenerator {
    pub config: SpringConfig,
}

impl CompoundSpringGenerator {
    pub fn new(config: SpringConfig) -> Self {
        Self { config }
    }
}

impl Generator for CompoundSpringGenerator {
    fn generate(&self, storage: &Storage) -> Box<dyn Iterator<Item = Vec<Gradient>>> {
        let sp = storage.shortest_paths(false);
        let mut batches = Vec::new();

        for (u, v) in unordered_pairs(storage) {
            if storage.has_ancestor_or_descendant(u, v) {
                continue;
            }
            let mu = node_mass_factor(storage, u);
            let mv = node_mass_factor(storage, v);
            if mu == 0.0 && mv == 0.0 {
                continue;
            }
            if storage.siblings(u).contains(&v) {
                if let Some(hops) = sp.distance(u, v) {
                    if hops > 0 {
                        let ideal = hops as f64 * self.config.ideal_length;
                        let actual = boundary_gap(storage, u, v);
                        if actual < ideal {
                            let magnitude = (ideal - actual) / (hops as f64 * hops as f64);
                            let cu = storage.node(u).center;
                            let cv = storage.node(v).center;
                            batches.push(nudge_pair(storage, cu, cv, (magnitude * mu, magnitude * mv)));
                        }
                    }
                }
            }
        }

        for (_, edge) in storage.edges() {
            let (gu, gv) = storage.greatest_different_ancestor(edge.source, edge.target);
            if gu == gv {
                continue;
            }
            let mu = node_mass_factor(storage, gu);
            let mv = node_mass_factor(storage, gv);
            if mu == 0.0 && mv == 0.0 {
                continue;
            }
            let ideal = self.config.ideal_length;
            let actual = boundary_gap(storage, gu, gv);
            if actual > ideal {
                let magnitude = (actual - ideal).min(self.config.max_attraction);
                if magnitude <= 0.0 {
                    continue;
                }
                let cu = storage.node(gu).center;
                let cv = storage.node(gv).center;
                batches.push(nudge_pair(storage, cu, cv, (-magnitude * mu, -magnitude * mv)));
            }
        }

        Box::new(batches.into_iter().filter(|b| !b.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::schema::{EdgeSchema, GraphSchema, NodeSchema, ShapeSchema};
    use crate::shape::{Preserve, ShapeType};

    fn rect_node(id: &str, center: (f64, f64)) -> NodeSchema {
        NodeSchema {
            id: id.to_string(),
            children: vec![],
            shape: ShapeSchema { kind: ShapeType::Rectangle, control: (5.0, 5.0), preserve: Preserve::None },
            center: Some(center),
            fixed: false,
            ports: vec![],
            metadata: Default::default(),
        }
    }

    #[test]
    fn connected_distant_pair_attracts() {
        let schema = GraphSchema {
            nodes: vec![rect_node("a", (0.0, 0.0)), rect_node("b", (200.0, 0.0))],
            edges: vec![EdgeSchema {
                id: "e".into(),
                source: "a".into(),
                source_port: None,
                target: "b".into(),
                target_port: None,
                path: None,
                metadata: Default::default(),
            }],
        };
        let storage = Storage::from_schema(&schema).unwrap();
        let gen = SpringGenerator::new(SpringConfig::default());
        let batches: Vec<_> = gen.generate(&storage).collect();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        // a should be nudged toward +x, b toward -x.
        assert!(batch.iter().any(|g| g.point == storage.node(storage.node_id("a").unwrap()).center && g.delta.x > 0.0));
    }

    #[test]
    fn fixed_pair_is_skipped() {
        let mut schema = GraphSchema {
            nodes: vec![rect_node("a", (0.0, 0.0)), rect_node("b", (200.0, 0.0))],
            edges: vec![EdgeSchema {
                id: "e".into(),
                source: "a".into(),
                source_port: None,
                target: "b".into(),
                target_port: None,
                path: None,
                metadata: Default::default(),
            }],
        };
        schema.nodes[0].fixed = true;
        schema.nodes[1].fixed = true;
        let storage = Storage::from_schema(&schema).unwrap();
        let gen = SpringGenerator::new(SpringConfig::default());
        assert_eq!(gen.generate(&storage).count(), 0);
    }
}
