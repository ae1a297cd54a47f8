use super::Optimizer;
use crate::graph::Storage;
use crate::vector::{Gradient, PointId, Vec2};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsPropConfig {
    pub lr: f64,
    pub smoothing: f64,
}

impl Default for RmsPropConfig {
    fn default() -> Self {
        Self { lr: 1.0, smoothing: 0.99 }
    }
}

/// Small constant added to the denominator to avoid dividing by (near) zero
/// before a point has accumulated any gradient history.
const EPSILON: f64 = 1e-3;

/// Per-point RMSProp: a running average of squared gradient components,
/// normalizing each component's step so points with a long history of large
/// gradients take smaller steps.
#[derive(Debug, Clone, Default)]
pub struct RmsPropOptimizer {
    config: RmsPropConfig,
    avg_sq: HashMap<PointId, Vec2>,
}

impl RmsPropOptimizer {
    pub fn new(config: RmsPropConfig) -> Self {
        Self { config, avg_sq: HashMap::new() }
    }
}

impl Optimizer for RmsPropOptimizer {
    fn step(&mut self, storage: &mut Storage, gradients: &[Gradient]) {
        for g in gradients {
            let avg = self.avg_sq.entry(g.point).or_insert_with(Vec2::zero);
            let sq = Vec2::new(g.delta.x * g.delta.x, g.delta.y * g.delta.y);
            *avg = Vec2::new(
                self.config.smoothing * avg.x + (1.0 - self.config.smoothing) * sq.x,
                self.config.smoothing * avg.y + (1.0 - self.config.smoothing) * sq.y,
            );
            let scaled = Vec2::new(
                self.config.lr * g.delta.x / (avg.x.sqrt() + EPSILON),
                self.config.lr * g.delta.y / (avg.y.sqrt() + EPSILON),
            );
            storage.translate_point(g.point, scaled);
        }
    }

    fn update(&mut self) {}
}
