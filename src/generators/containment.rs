use super::Generator;
use crate::constraints::containment::constrain_shapes_within;
use crate::graph::Storage;
use crate::vector::Gradient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainmentConfig {
    pub padding: f64,
    /// Fraction of each correction that grows the parent's control versus
    /// moving its center; see [`crate::shape::Shape::constrain_point_on_boundary`].
    pub expansion: f64,
}

impl Default for ContainmentConfig {
    fn default() -> Self {
        Self { padding: 10.0, expansion: 1.0 }
    }
}

/// Yields one batch per node that has children: the gradients that grow and
/// reposition that node's shape so its bounds enclose every direct child,
/// expanded by `padding`.
pub struct ContainmentGenerator {
    pub config: ContainmentConfig,
}

impl ContainmentGenerator {
    pub fn new(config: ContainmentConfig) -> Self {
        Self { config }
    }
}

impl Generator for ContainmentGenerator {
    fn generate(&self, storage: &Storage) -> Box<dyn Iterator<Item = Vec<Gradient>>> {
        let mut batches = Vec::new();
        for (node_id, node) in storage.nodes() {
            if node.children.is_empty() {
                continue;
            }
            let batch = constrain_shapes_within(storage, node_id, self.config.padding, self.config.expansion);
            if !batch.is_empty() {
                batches.push(batch);
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
    fn grows_parent_to_contain_escaped_child() {
        let schema = GraphSchema {
            nodes: vec![
                NodeSchema {
                    id: "p".into(),
                    children: vec!["c".into()],
                    shape: ShapeSchema { kind: ShapeType::Rectangle, control: (2.0, 2.0), preserve: Preserve::None },
                    center: Some((0.0, 0.0)),
                    fixed: false,
                    ports: vec![],
                    metadata: Default::default(),
                },
                NodeSchema {
                    id: "c".into(),
                    children: vec![],
                    shape: ShapeSchema { kind: ShapeType::Rectangle, control: (1.0, 1.0), preserve: Preserve::None },
                    center: Some((20.0, 0.0)),
                    fixed: false,
                    ports: vec![],
                    metadata: Default::default(),
                },
            ],
            edges: vec![],
        };
        let storage = Storage::from_schema(&schema).unwrap();
        let gen = ContainmentGenerator::new(ContainmentConfig::default());
        let batches: Vec<_> = gen.generate(&storage).collect();
        assert_eq!(batches.len(), 1);
        assert!(!batches[0].is_empty());
    }
}
