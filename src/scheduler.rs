//! Piecewise interpolated time-varying values used by layout stages.
//!
//! A scheduler is built by chaining `.to(end, ...)` calls, each appending a
//! `[start, end)` range whose `start` is the previous call's `end` (or `0.0`
//! for the first range). Lookups outside the composed range return a
//! caller-supplied default.

use crate::error::{LayoutError, LayoutResult};

/// An interpolation curve evaluated over `u in [0, 1]`.
#[derive(Debug, Clone, Copy)]
pub enum Interpolator {
    Constant(f64),
    Linear(f64, f64),
    /// Falls back to `Linear(a, b)` when `curvature.abs() < 0.1`, since the
    /// exponential form is numerically unstable near zero curvature.
    Exponential(f64, f64, f64),
}

impl Interpolator {
    pub fn constant(v: f64) -> Self {
        Interpolator::Constant(v)
    }

    pub fn linear(a: f64, b: f64) -> Self {
        Interpolator::Linear(a, b)
    }

    pub fn exponential(a: f64, b: f64, curvature: f64) -> Self {
        Interpolator::Exponential(a, b, curvature)
    }

    pub fn eval(&self, u: f64) -> f64 {
        match *self {
            Interpolator::Constant(v) => v,
            Interpolator::Linear(a, b) => a + (b - a) * u,
            Interpolator::Exponential(a, b, curvature) => {
                if curvature.abs() < 0.1 {
                    a + (b - a) * u
                } else {
                    let denom = curvature.exp() - 1.0;
                    a + (b - a) * ((curvature * u).exp() - 1.0) / denom
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Range<V> {
    start: f64,
    end: f64,
    value: V,
}

/// A time-varying `f64` built from contiguous, strictly increasing ranges.
#[derive(Debug, Clone, Default)]
pub struct NumberScheduler {
    ranges: Vec<Range<Interpolator>>,
}

impl NumberScheduler {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    fn next_start(&self) -> f64 {
        self.ranges.last().map(|r| r.end).unwrap_or(0.0)
    }

    /// Appends a `[previous_end, end)` range using `interp`. `end` must be
    /// strictly greater than the previous end.
    pub fn to(mut self, end: f64, interp: Interpolator) -> LayoutResult<Self> {
        let start = self.next_start();
        if end <= start {
            return Err(LayoutError::NonMonotoneSchedule {
                previous_end: start,
                end,
            });
        }
        self.ranges.push(Range {
            start,
            end,
            value: interp,
        });
        Ok(self)
    }

    /// Looks up the value at time `t`, or `default` if `t` falls outside
    /// every composed range.
    pub fn lookup(&self, t: f64, default: f64) -> f64 {
        for range in &self.ranges {
            if t >= range.start && t < range.end {
                let u = (t - range.start) / (range.end - range.start);
                return range.value.eval(u);
            }
        }
        default
    }
}

/// A time-varying `bool`, analogous to [`NumberScheduler`].
#[derive(Debug, Clone, Default)]
pub struct BooleanScheduler {
    ranges: Vec<Range<bool>>,
}

impl BooleanScheduler {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    fn next_start(&self) -> f64 {
        self.ranges.last().map(|r| r.end).unwrap_or(0.0)
    }

    pub fn to(mut self, end: f64, value: bool) -> LayoutResult<Self> {
        let start = self.next_start();
        if end <= start {
            return Err(LayoutError::NonMonotoneSchedule {
                previous_end: start,
                end,
            });
        }
        self.ranges.push(Range { start, end, value });
        Ok(self)
    }

    pub fn lookup(&self, t: f64, default: bool) -> bool {
        for range in &self.ranges {
            if t >= range.start && t < range.end {
                return range.value;
            }
        }
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_scheduler_scenario() {
        let sched = BooleanScheduler::new()
            .to(2.0, true)
            .unwrap()
            .to(3.0, false)
            .unwrap()
            .to(4.0, true)
            .unwrap();

        assert_eq!(sched.lookup(-1.0, false), false);
        assert_eq!(sched.lookup(0.0, false), true);
        assert_eq!(sched.lookup(1.0, false), true);
        assert_eq!(sched.lookup(2.0, false), false);
        assert_eq!(sched.lookup(3.0, false), true);
        assert_eq!(sched.lookup(4.0, false), false);
    }

    #[test]
    fn number_scheduler_linear_scenario() {
        let sched = NumberScheduler::new()
            .to(2.0, Interpolator::linear(1.0, 3.0))
            .unwrap();

        assert_eq!(sched.lookup(0.0, 86.0), 1.0);
        assert_eq!(sched.lookup(1.0, 86.0), 2.0);
        assert_eq!(sched.lookup(2.0, 86.0), 86.0);
    }

    #[test]
    fn appends_must_be_strictly_increasing() {
        let sched = NumberScheduler::new().to(2.0, Interpolator::constant(1.0)).unwrap();
        assert!(sched.to(2.0, Interpolator::constant(2.0)).is_err());
        assert!(sched.to(1.0, Interpolator::constant(2.0)).is_err());
    }

    #[test]
    fn exponential_falls_back_to_linear_near_zero_curvature() {
        let exp = Interpolator::exponential(0.0, 10.0, 0.05);
        let lin = Interpolator::linear(0.0, 10.0);
        assert_eq!(exp.eval(0.3), lin.eval(0.3));
    }
}
