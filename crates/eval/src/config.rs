// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Computation settings.
use rand::{SeedableRng, rngs::SmallRng};
use std::thread;

/// Settings for probability and win rate computations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sampling budget for draw probabilities.
    pub budget: usize,
    /// The number of win rate simulation trials.
    pub trials: usize,
    /// The number of parallel tasks.
    pub tasks: usize,
    /// Seed for reproducible runs, each task gets its own generator.
    pub seed: Option<u64>,
}

impl Config {
    /// The default sampling budget.
    pub const DEFAULT_BUDGET: usize = 5_000;

    /// The default number of simulation trials.
    pub const DEFAULT_TRIALS: usize = 10_000;

    /// The number of parallel tasks, at least one.
    pub fn num_tasks(&self) -> usize {
        self.tasks.max(1)
    }

    /// Creates a random generator for the given stream.
    ///
    /// With a seed, generators for different streams are independent and the
    /// same stream always returns the same sequence.
    pub fn rng(&self, stream: u64) -> SmallRng {
        match self.seed {
            Some(seed) => {
                // Spread the streams with the golden ratio increment.
                let seed = seed.wrapping_add(stream.wrapping_mul(0x9e37_79b9_7f4a_7c15));
                SmallRng::seed_from_u64(seed)
            }
            None => SmallRng::from_os_rng(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget: Self::DEFAULT_BUDGET,
            trials: Self::DEFAULT_TRIALS,
            tasks: thread::available_parallelism().map_or(1, |n| n.get()),
            seed: None,
        }
    }
}
