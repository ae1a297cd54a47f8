//! Gradient-application strategies.
//!
//! Every optimizer applies a batch of [`Gradient`]s to the storage's point
//! arena as `point += lr * delta`, then advances whatever learning-rate
//! state it carries on [`Optimizer::update`]. A [`crate::layout::Stage`]
//! owns one optimizer and calls `step` once per gradient batch, `update`
//! once per iteration.

mod energy_adaptive;
mod fixed;
mod rmsprop;
mod scheduled;
mod trust_region;

pub use energy_adaptive::{EnergyAdaptiveConfig, EnergyAdaptiveOptimizer};
pub use fixed::{FixedConfig, FixedOptimizer};
pub use rmsprop::{RmsPropConfig, RmsPropOptimizer};
pub use scheduled::ScheduledOptimizer;
pub use trust_region::{TrustRegionConfig, TrustRegionOptimizer};

use crate::graph::Storage;
use crate::vector::Gradient;

/// A small positive floor every learning rate is clamped to, so decay never
/// drives a stage's effective step size to exactly zero.
pub const LR_FLOOR: f64 = 1e-6;

pub trait Optimizer {
    /// Applies `point += lr * delta` for each gradient, in order. Gradients
    /// addressed to the same point within one batch accumulate.
    fn step(&mut self, storage: &mut Storage, gradients: &[Gradient]);

    /// Advances whatever learning-rate state this optimizer carries. Called
    /// once per stage iteration, after all of that iteration's batches have
    /// been applied.
    fn update(&mut self);
}

/// Applies a gradient batch at a flat learning rate. Shared by the fixed,
/// scheduled, and energy-adaptive optimizers, which differ only in how they
/// pick `lr` between calls.
pub(crate) fn apply_flat(storage: &mut Storage, gradients: &[Gradient], lr: f64) {
    for g in gradients {
        storage.translate_point(g.point, g.delta.scale(lr));
    }
}
