//! The staged layout driver: runs a fixed number of steps, each composed of
//! ordered stages, each stage pairing a [`crate::generators::Generator`]
//! with an [`crate::optimizer::Optimizer`].
//!
//! Scheduling is single-threaded and cooperative (§5): `start()` pulls one
//! gradient batch at a time from each stage's generator and hands it to
//! that stage's optimizer, with no internal parallelism or I/O.

use crate::generators::Generator;
use crate::graph::Storage;
use crate::optimizer::Optimizer;

/// One phase of a layout step: run `generator` for `iterations` rounds,
/// stepping `optimizer` once per gradient batch and updating it once per
/// round.
pub struct Stage {
    pub iterations: u32,
    pub optimizer: Box<dyn Optimizer>,
    pub generator: Box<dyn Generator>,
}

impl Stage {
    pub fn new(iterations: u32, optimizer: Box<dyn Optimizer>, generator: Box<dyn Generator>) -> Self {
        Self { iterations, optimizer, generator }
    }
}

type StartCallback = Box<dyn FnMut(&Storage, u32) -> bool>;
type StepCallback = Box<dyn FnMut(&Storage, u32) -> bool>;
type EndCallback = Box<dyn FnMut(&Storage, u32)>;

/// Wraps a [`Storage`] with an ordered sequence of [`Stage`]s and drives
/// them for a fixed number of steps.
pub struct Layout {
    storage: Storage,
    stages: Vec<Stage>,
    steps: u32,
    finished: u32,
    on_start: Option<StartCallback>,
    on_step: Option<StepCallback>,
    on_end: Option<EndCallback>,
}

impl Layout {
    pub fn new(storage: Storage, steps: u32) -> Self {
        Self {
            storage,
            stages: Vec::new(),
            steps,
            finished: 0,
            on_start: None,
            on_step: None,
            on_end: None,
        }
    }

    pub fn add_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Called once before the first step with `(storage, 0)`. Returning
    /// `false` aborts before any step runs.
    pub fn on_start(mut self, f: impl FnMut(&Storage, u32) -> bool + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called after every completed step with the finished-step count.
    /// Returning `false` stops the run early and suppresses `on_end`.
    pub fn on_step(mut self, f: impl FnMut(&Storage, u32) -> bool + 'static) -> Self {
        self.on_step = Some(Box::new(f));
        self
    }

    /// Called once after `finished == steps`, unless `on_step` cut the run
    /// short.
    pub fn on_end(mut self, f: impl FnMut(&Storage, u32) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    pub fn into_storage(self) -> Storage {
        self.storage
    }

    pub fn finished_steps(&self) -> u32 {
        self.finished
    }

    /// Runs every remaining step, honoring `on_start`/`on_step`/`on_end`.
    pub fn start(&mut self) {
        let proceed = match &mut self.on_start {
            Some(f) => f(&self.storage, 0),
            None => true,
        };
        if !proceed {
            return;
        }

        while self.finished < self.steps {
            if !self.step() {
                return;
            }
        }

        if let Some(f) = &mut self.on_end {
            f(&self.storage, self.finished);
        }
    }

    /// Runs every stage once: each stage's generator is asked for batches
    /// across `iterations` rounds, each batch is applied by that stage's
    /// optimizer, and the optimizer is updated once per round. Returns
    /// whatever `on_step` reports (`true` if there is no callback).
    pub fn step(&mut self) -> bool {
        for stage in &mut self.stages {
            for _ in 0..stage.iterations {
                let batches = stage.generator.generate(&self.storage);
                for batch in batches {
                    stage.optimizer.step(&mut self.storage, &batch);
                }
                stage.optimizer.update();
            }
        }

        self.finished += 1;
        match &mut self.on_step {
            Some(f) => f(&self.storage, self.finished),
            None => true,
        }
    }
}
