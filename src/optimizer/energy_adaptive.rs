use super::{apply_flat, Optimizer};
use crate::error::{LayoutError, LayoutResult};
use crate::graph::Storage;
use crate::vector::Gradient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyAdaptiveConfig {
    pub lr_initial: f64,
    pub lr_max: f64,
    pub lr_min: f64,
    pub wait: i64,
    pub decay: f64,
    pub growth: f64,
    pub smoothing: f64,
}

impl Default for EnergyAdaptiveConfig {
    fn default() -> Self {
        Self {
            lr_initial: 1.0,
            lr_max: 1.0,
            lr_min: 0.01,
            wait: 5,
            decay: 0.9,
            growth: 1.1,
            smoothing: 0.1,
        }
    }
}

/// Grows `lr` when the mean gradient magnitude per step keeps improving for
/// `wait` consecutive updates, shrinks it the moment it gets worse. The
/// "current" energy is the mean gradient magnitude accumulated across every
/// `step()` call since the last `update()`; the accumulator resets on every
/// `update()`, per the energy-adaptive open question.
#[derive(Debug, Clone)]
pub struct EnergyAdaptiveOptimizer {
    config: EnergyAdaptiveConfig,
    lr: f64,
    energy_sum: f64,
    energy_count: u64,
    prev_energy: Option<f64>,
    improved_streak: i64,
}

impl EnergyAdaptiveOptimizer {
    pub fn new(config: EnergyAdaptiveConfig) -> LayoutResult<Self> {
        if config.decay > 1.0 {
            return Err(LayoutError::InvalidDecay(config.decay));
        }
        if config.growth < 1.0 {
            return Err(LayoutError::InvalidGrowth(config.growth));
        }
        if config.wait < 0 {
            return Err(LayoutError::InvalidWait(config.wait));
        }
        let lr = config.lr_initial;
        Ok(Self {
            config,
            lr,
            energy_sum: 0.0,
            energy_count: 0,
            prev_energy: None,
            improved_streak: 0,
        })
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }
}

impl Optimizer for EnergyAdaptiveOptimizer {
    fn step(&mut self, storage: &mut Storage, gradients: &[Gradient]) {
        for g in gradients {
            self.energy_sum += g.delta.length();
            self.energy_count += 1;
        }
        apply_flat(storage, gradients, self.lr);
    }

    fn update(&mut self) {
        let current = if self.energy_count > 0 { self.energy_sum / self.energy_count as f64 } else { 0.0 };

        if let Some(prev) = self.prev_energy {
            if current < prev {
                self.improved_streak += 1;
                if self.improved_streak >= self.config.wait {
                    self.lr = (self.lr * self.config.growth).min(self.config.lr_max);
                    self.improved_streak = 0;
                }
            } else if current > prev {
                self.lr = (self.lr * self.config.decay).max(self.config.lr_min);
                self.improved_streak = 0;
            }
            self.prev_energy = Some(self.config.smoothing * current + (1.0 - self.config.smoothing) * prev);
        } else {
            self.prev_energy = Some(current);
        }

        self.energy_sum = 0.0;
        self.energy_count = 0;
    }
}
