use super::Generator;
use crate::constraints::pairwise::nudge_point;
use crate::graph::Storage;
use crate::vector::Gradient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactnessConfig {
    pub strength: f64,
}

impl Default for CompactnessConfig {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

/// Nudges every non-fixed child toward its parent's center by a constant
/// amount, pulling compound groups inward so they don't sprawl.
pub struct CompactnessGenerator {
    pub config: CompactnessConfig,
}

impl CompactnessGenerator {
    pub fn new(config: CompactnessConfig) -> Self {
        Self { config }
    }
}

impl Generator for CompactnessGenerator {
    fn generate(&self, storage: &Storage) -> Box<dyn Iterator<Item = Vec<Gradient>>> {
        let mut batches = Vec::new();
        for (_, parent) in storage.nodes() {
            let parent_center = storage.point(parent.center);
            for &child_id in &parent.children {
                let child = storage.node(child_id);
                if child.fixed {
                    continue;
                }
                let child_center = storage.point(child.center);
                let toward_parent = parent_center - child_center;
                let batch = nudge_point(child.center, self.config.strength, toward_parent);
                if !batch.is_empty() {
                    batches.push(batch);
                }
            }
        }
        Box::new(batches.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::schema::{GraphSchema, NodeSchema, ShapeSchema};
    use crate::shape::{Preserve, ShapeType};

    #[test]
    fn nudges_child_toward_parent() {
        let schema = GraphSchema {
            nodes: vec![
                NodeSchema {
                    id: "p".into(),
                    children: vec!["c".into()],
                    shape: ShapeSchema { kind: ShapeType::Rectangle, control: (20.0, 20.0), preserve: Preserve::None },
                    center: Some((0.0, 0.0)),
                    fixed: false,
                    ports: vec![],
                    metadata: Default::default(),
                },
                NodeSchema {
                    id: "c".into(),
                    children: vec![],
                    shape: ShapeSchema { kind: ShapeType::Rectangle, control: (2.0, 2.0), preserve: Preserve::None },
                    center: Some((10.0, 0.0)),
                    fixed: false,
                    ports: vec![],
                    metadata: Default::default(),
                },
            ],
            edges: vec![],
        };
        let storage = Storage::from_schema(&schema).unwrap();
        let gen = CompactnessGenerator::new(CompactnessConfig::default());
        let batches: Vec<_> = gen.generate(&storage).collect();
        assert_eq!(batches.len(), 1);
        assert!(batches[0][0].delta.x < 0.0);
    }
}
