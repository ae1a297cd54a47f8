use super::{apply_flat, Optimizer, LR_FLOOR};
use crate::graph::Storage;
use crate::vector::Gradient;

/// Constant learning rate, with optional per-update multiplicative decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedConfig {
    pub lr: f64,
    pub decay: f64,
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self { lr: 1.0, decay: 1.0 }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedOptimizer {
    config: FixedConfig,
    lr: f64,
}

impl FixedOptimizer {
    pub fn new(config: FixedConfig) -> Self {
        let lr = config.lr;
        Self { config, lr }
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }
}

impl Optimizer for FixedOptimizer {
    fn step(&mut self, storage: &mut Storage, gradients: &[Gradient]) {
        apply_flat(storage, gradients, self.lr);
    }

    fn update(&mut self) {
        self.lr = (self.lr * self.config.decay).max(LR_FLOOR);
    }
}
