use super::Optimizer;
use crate::graph::Storage;
use crate::vector::{Gradient, PointId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustRegionConfig {
    pub lr: f64,
    pub adaption: f64,
    pub smoothing: f64,
    pub lr_max: f64,
    pub lr_min: f64,
}

impl Default for TrustRegionConfig {
    fn default() -> Self {
        Self { lr: 0.6, adaption: 0.1, smoothing: 0.5, lr_max: 1.0, lr_min: 1e-5 }
    }
}

/// Each point carries its own learning rate, grown or shrunk by `adaption`
/// depending on whether its latest gradient magnitude exceeds half of its
/// own running average — a per-point trust region that lets volatile
/// points take smaller, more cautious steps without slowing down stable
/// ones.
#[derive(Debug, Clone, Default)]
pub struct TrustRegionOptimizer {
    config: TrustRegionConfig,
    lr: HashMap<PointId, f64>,
    avg_magnitude: HashMap<PointId, f64>,
    latest_magnitude: HashMap<PointId, f64>,
}

impl TrustRegionOptimizer {
    pub fn new(config: TrustRegionConfig) -> Self {
        Self {
            config,
            lr: HashMap::new(),
            avg_magnitude: HashMap::new(),
            latest_magnitude: HashMap::new(),
        }
    }

    pub fn lr_for(&self, point: PointId) -> f64 {
        *self.lr.get(&point).unwrap_or(&self.config.lr)
    }
}

impl Optimizer for TrustRegionOptimizer {
    fn step(&mut self, storage: &mut Storage, gradients: &[Gradient]) {
        for g in gradients {
            let lr = self.lr_for(g.point);
            storage.translate_point(g.point, g.delta.scale(lr));
            *self.latest_magnitude.entry(g.point).or_insert(0.0) = g.delta.length();
        }
    }

    fn update(&mut self) {
        for (point, &latest) in &self.latest_magnitude {
            let lr_entry = self.lr.entry(*point).or_insert(self.config.lr);
            if let Some(&avg) = self.avg_magnitude.get(point) {
                if latest > avg * 0.5 {
                    *lr_entry = (*lr_entry * (1.0 + self.config.adaption)).min(self.config.lr_max);
                } else {
                    *lr_entry = (*lr_entry * (1.0 - self.config.adaption)).max(self.config.lr_min);
                }
                let new_avg = self.config.smoothing * latest + (1.0 - self.config.smoothing) * avg;
                self.avg_magnitude.insert(*point, new_avg);
            } else {
                self.avg_magnitude.insert(*point, latest);
            }
        }
        self.latest_magnitude.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Storage;
    use crate::vector::Vec2;

    #[test]
    fn grows_lr_for_a_point_with_consistently_large_gradients() {
        let mut storage = Storage::new();
        let p = storage.alloc_point(Vec2::zero(), 1.0);
        let mut opt = TrustRegionOptimizer::new(TrustRegionConfig::default());

        opt.step(&mut storage, &[Gradient::new(p, Vec2::new(1.0, 0.0))]);
        opt.update();
        let lr0 = opt.lr_for(p);

        for _ in 0..5 {
            opt.step(&mut storage, &[Gradient::new(p, Vec2::new(1.0, 0.0))]);
            opt.update();
        }
        assert!(opt.lr_for(p) >= lr0);
        assert!(opt.lr_for(p) <= opt.config.lr_max);
    }

    #[test]
    fn shrinks_lr_when_magnitude_drops_below_half_the_average() {
        let mut storage = Storage::new();
        let p = storage.alloc_point(Vec2::zero(), 1.0);
        let mut opt = TrustRegionOptimizer::new(TrustRegionConfig::default());

        for _ in 0..3 {
            opt.step(&mut storage, &[Gradient::new(p, Vec2::new(10.0, 0.0))]);
            opt.update();
        }
        let lr_before = opt.lr_for(p);
        opt.step(&mut storage, &[Gradient::new(p, Vec2::new(0.01, 0.0))]);
        opt.update();
        assert!(opt.lr_for(p) < lr_before);
        assert!(opt.lr_for(p) >= opt.config.lr_min);
    }
}
