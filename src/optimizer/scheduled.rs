use super::{apply_flat, Optimizer};
use crate::graph::Storage;
use crate::scheduler::NumberScheduler;
use crate::vector::Gradient;

/// Learning rate driven by a [`NumberScheduler`] keyed by a timestep that
/// advances by one on every [`Optimizer::update`].
#[derive(Debug, Clone)]
pub struct ScheduledOptimizer {
    scheduler: NumberScheduler,
    default_lr: f64,
    t: f64,
}

impl ScheduledOptimizer {
    pub fn new(scheduler: NumberScheduler, default_lr: f64) -> Self {
        Self { scheduler, default_lr, t: 0.0 }
    }

    pub fn lr(&self) -> f64 {
        self.scheduler.lookup(self.t, self.default_lr)
    }
}

impl Optimizer for ScheduledOptimizer {
    fn step(&mut self, storage: &mut Storage, gradients: &[Gradient]) {
        apply_flat(storage, gradients, self.lr());
    }

    fn update(&mut self) {
        self.t += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Interpolator;
    use crate::vector::Vec2;

    #[test]
    fn lr_tracks_the_scheduler_across_updates() {
        let sched = NumberScheduler::new().to(2.0, Interpolator::linear(1.0, 3.0)).unwrap();
        let mut opt = ScheduledOptimizer::new(sched, 86.0);
        let mut storage = Storage::new();
        let p = storage.alloc_point(Vec2::zero(), 1.0);

        assert_eq!(opt.lr(), 1.0);
        opt.step(&mut storage, &[Gradient::new(p, Vec2::new(1.0, 0.0))]);
        assert_eq!(storage.point(p), Vec2::new(1.0, 0.0));

        opt.update();
        assert_eq!(opt.lr(), 2.0);

        opt.update();
        assert_eq!(opt.lr(), 86.0);
    }
}
