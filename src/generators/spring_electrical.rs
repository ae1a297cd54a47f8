use super::{unordered_pairs, Generator};
use crate::constraints::pairwise::nudge_pair;
use crate::constraints::position::boundary_gap;
use crate::graph::Storage;
use crate::vector::Gradient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringElectricalConfig {
    pub ideal_length: f64,
    /// Hookean spring constant for connected pairs.
    pub edge_strength: f64,
    /// Coulomb-like repulsion constant for unconnected pairs.
    pub repulsive_strength: f64,
}

impl Default for SpringElectricalConfig {
    fn default() -> Self {
        Self { ideal_length: 50.0, edge_strength: 0.1, repulsive_strength: 1000.0 }
    }
}

fn mass_factor(storage: &Storage, node: crate::graph::NodeId) -> f64 {
    if storage.node(node).fixed {
        0.0
    } else {
        1.0
    }
}

/// Every unconnected pair repels with magnitude `repulsive_strength /
/// distance`; every connected pair attracts (or repels, if compressed)
/// Hookean-style, proportional to `edge_strength * (distance - ideal)`.
/// Ancestor-related pairs are skipped, same as [`super::spring`].
pub struct SpringElectricalGenerator {
    pub config: SpringElectricalConfig,
}

impl SpringElectricalGenerator {
    pub fn new(config: SpringElectricalConfig) -> Self {
        Self { config }
    }
}

impl Generator for SpringElectricalGenerator {
    fn generate(&self, storage: &Storage) -> Box<dyn Iterator<Item = Vec<Gradient>>> {
        let mut batches = Vec::new();

        for (u, v) in unordered_pairs(storage) {
            if storage.has_ancestor_or_descendant(u, v) {
                continue;
            }
            let mu = mass_factor(storage, u);
            let mv = mass_factor(storage, v);
            if mu == 0.0 && mv == 0.0 {
                continue;
            }
            let actual = boundary_gap(storage, u, v).max(0.1);
            let cu = storage.node(u).center;
            let cv = storage.node(v).center;

            if storage.exists_edge(u, v, true) {
                // Positive magnitude (stretched past ideal) pulls u/v
                // together; negative (compressed) pushes them apart.
                let magnitude = self.config.edge_strength * (actual - self.config.ideal_length);
                if magnitude != 0.0 {
                    batches.push(nudge_pair(storage, cu, cv, (-magnitude * mu, -magnitude * mv)));
                }
            } else {
                let magnitude = self.config.repulsive_strength / actual;
                batches.push(nudge_pair(storage, cu, cv, (magnitude * mu, magnitude * mv)));
            }
        }

        Box::new(batches.into_iter().filter(|b| !b.is_empty()))
    }
}
