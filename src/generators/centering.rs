use super::Generator;
use crate::constraints::pairwise::nudge_point;
use crate::graph::Storage;
use crate::vector::Gradient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteringConfig {
    pub strength: f64,
}

impl Default for CenteringConfig {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

/// Nudges every non-fixed root toward the negated midpoint of the current
/// storage bounds, so the whole drawing drifts back toward the origin as it
/// spreads out under other forces.
pub struct CenteringGenerator {
    pub config: CenteringConfig,
}

impl CenteringGenerator {
    pub fn new(config: CenteringConfig) -> Self {
        Self { config }
    }
}

impl Generator for CenteringGenerator {
    fn generate(&self, storage: &Storage) -> Box<dyn Iterator<Item = Vec<Gradient>>> {
        let Some(bounds) = storage.bounds() else {
            return Box::new(std::iter::empty());
        };
        let target = -bounds.center();

        let mut batches = Vec::new();
        for root in storage.roots() {
            let node = storage.node(root);
            if node.fixed {
                continue;
            }
            let center = storage.point(node.center);
            let direction = target - center;
            let batch = nudge_point(node.center, self.config.strength, direction);
            if !batch.is_empty() {
                batches.push(batch);
            }
        }
        Box::new(batches.into_iter())
    }
}
