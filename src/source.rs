//! Sample sources feeding the live series
//!
//! The engine pulls one sample per tick through the [`SampleSource`] trait,
//! so a hardware or network feed can replace the random generator without
//! touching the rest of the core.
//!
//! # Implementations
//!
//! - [`RandomSource`] - Wall-clock timestamps with uniform random values
//! - [`SequenceSource`] - Replays a fixed list of samples (tests, demos)

use crate::types::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Anything that can produce one sample on demand
pub trait SampleSource {
    /// Produce the next sample
    fn next_sample(&mut self) -> Point;

    /// Short human-readable name for logs
    fn name(&self) -> &str {
        "source"
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn next_sample(&mut self) -> Point {
        (**self).next_sample()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Current wall-clock time as epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Uniform random values in `[min, max)` stamped with the wall clock
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: SmallRng,
    min: f64,
    max: f64,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl RandomSource {
    /// Create a source seeded from the OS
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
            min,
            max,
        }
    }

    /// Create a reproducible source
    pub fn with_seed(min: f64, max: f64, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            min,
            max,
        }
    }

    /// Draw a value without touching the clock
    pub fn next_value(&mut self) -> f64 {
        // An empty range would panic inside rand
        if self.min < self.max {
            self.rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

impl SampleSource for RandomSource {
    fn next_sample(&mut self) -> Point {
        let value = self.next_value();
        Point::at_millis(now_millis(), value)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Replays a fixed list of samples in order
///
/// Once the list is exhausted the source keeps producing the last value,
/// advancing the timestamp by `step_ms` each call so the timeline keeps
/// moving.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    pending: VecDeque<Point>,
    last: Point,
    step_ms: f64,
}

impl SequenceSource {
    /// Create a source from `(timestamp_ms, value)` pairs
    pub fn new(samples: impl IntoIterator<Item = (f64, f64)>, step_ms: f64) -> Self {
        Self {
            pending: samples
                .into_iter()
                .map(|(t, v)| Point::new(t, v))
                .collect(),
            last: Point::default(),
            step_ms,
        }
    }

    /// Values spaced `step_ms` apart starting at `start_ms`
    pub fn evenly_spaced(start_ms: f64, step_ms: f64, values: &[f64]) -> Self {
        Self::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (start_ms + i as f64 * step_ms, *v)),
            step_ms,
        )
    }

    /// Number of scripted samples not yet delivered
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl SampleSource for SequenceSource {
    fn next_sample(&mut self) -> Point {
        let next = match self.pending.pop_front() {
            Some(p) => p,
            None => Point::new(self.last.timestamp_ms + self.step_ms, self.last.value),
        };
        self.last = next;
        next
    }

    fn name(&self) -> &str {
        "sequence"
    }
}
