//! Simulated-annealing refinement of a grown region.
//!
//! The refiner runs a time-budgeted Metropolis loop over add/remove flips of
//! cells incident to the region border. Moves that would break connectivity,
//! enclose a hole, or drop coverage below the target are rejected as null
//! moves that still advance the temperature schedule.

use std::time::{Duration, Instant};

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, NEIGHBORS_4};
use crate::region::Region;
use crate::topology::{self, HoleDetector};

/// Configuration for the annealing schedule.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Initial temperature.
    pub initial_temp: f64,
    /// Final temperature of the geometric schedule.
    pub final_temp: f64,
    /// Iteration cap.
    pub max_iterations: u64,
    /// Wall-clock budget; checked once per iteration.
    pub time_limit: Duration,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temp: 5.0,
            final_temp: 0.05,
            max_iterations: 5000,
            time_limit: Duration::from_millis(300),
        }
    }
}

impl SaConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial temperature.
    pub fn with_initial_temp(mut self, temp: f64) -> Self {
        self.initial_temp = temp.max(f64::MIN_POSITIVE);
        self
    }

    /// Sets the final temperature.
    pub fn with_final_temp(mut self, temp: f64) -> Self {
        self.final_temp = temp.max(f64::MIN_POSITIVE);
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }
}

/// Result of one refinement run.
#[derive(Debug)]
pub struct RefineOutcome {
    /// Best valid region seen during the anneal.
    pub best: Region,
    /// Cost of the best region.
    pub best_cost: f64,
    /// Iterations executed (accepted, rejected, and null moves).
    pub iterations: u64,
    /// Accepted moves.
    pub accepted: u64,
    /// Elapsed wall-clock time.
    pub elapsed: Duration,
}

/// Border-biased flip refiner over one trial's grid.
pub struct Refiner<'g> {
    grid: &'g Grid,
    coverage_target: usize,
    config: SaConfig,
    detector: HoleDetector,
}

impl<'g> Refiner<'g> {
    /// Creates a refiner for `grid` holding the coverage constraint.
    pub fn new(grid: &'g Grid, coverage_target: usize, config: SaConfig) -> Self {
        Self {
            grid,
            coverage_target,
            config,
            detector: HoleDetector::new(grid.split()),
        }
    }

    /// Refines `initial`, returning the best valid region encountered.
    ///
    /// `initial` must satisfy the region invariants and the coverage target;
    /// the outcome is never worse than it.
    pub fn refine<R: Rng>(&mut self, initial: Region, rng: &mut R) -> RefineOutcome {
        let s = self.grid.cell_size();
        let t0 = self.config.initial_temp;
        let beta = (t0 / self.config.final_temp).ln() / self.config.max_iterations as f64;

        let mut current = initial;
        let mut best = current.clone();
        let mut best_cost = best.cost(s);
        let mut accepted = 0u64;
        let mut iterations = 0u64;

        let start = Instant::now();
        while iterations < self.config.max_iterations {
            if start.elapsed() >= self.config.time_limit {
                break;
            }
            let temp = t0 * (-beta * iterations as f64).exp();
            iterations += 1;

            if current.border_len() == 0 {
                break;
            }
            let anchor = current.border_cell(rng.gen_range(0..current.border_len()));
            let (dx, dy) = NEIGHBORS_4[rng.gen_range(0..4)];
            let cell = (anchor.0 + dx, anchor.1 + dy);

            let applied = if current.contains(cell) {
                self.try_remove(&mut current, cell, temp, rng)
            } else {
                self.try_add(&mut current, cell, temp, rng)
            };

            if applied {
                accepted += 1;
                let cost = current.cost(s);
                if cost < best_cost {
                    best = current.clone();
                    best_cost = cost;
                }
            }
        }

        let elapsed = start.elapsed();
        log::debug!(
            "sa: split={} iterations={} accepted={} best={:.6} elapsed={:?}",
            self.grid.split(),
            iterations,
            accepted,
            best_cost,
            elapsed
        );

        RefineOutcome {
            best,
            best_cost,
            iterations,
            accepted,
            elapsed,
        }
    }

    fn try_remove<R: Rng>(
        &mut self,
        current: &mut Region,
        cell: (i32, i32),
        temp: f64,
        rng: &mut R,
    ) -> bool {
        if current.len() <= 1 {
            return false;
        }
        if current.coverage() - self.grid.count(cell) < self.coverage_target {
            return false;
        }
        // A cell with no remaining neighbor cannot leave a connected region.
        if current.neighbors_in(cell) == 0 {
            return false;
        }

        let delta = current.remove_delta(cell, self.grid);
        current.remove(cell, self.grid);
        if !topology::is_connected(current) || self.detector.has_hole(current) {
            current.insert(cell, self.grid);
            return false;
        }
        if accept(delta, temp, rng) {
            true
        } else {
            current.insert(cell, self.grid);
            false
        }
    }

    fn try_add<R: Rng>(
        &mut self,
        current: &mut Region,
        cell: (i32, i32),
        temp: f64,
        rng: &mut R,
    ) -> bool {
        if !self.grid.in_bounds(cell) {
            return false;
        }

        let delta = current.add_delta(cell, self.grid);
        current.insert(cell, self.grid);
        if self.detector.has_hole(current) {
            current.remove(cell, self.grid);
            return false;
        }
        if accept(delta, temp, rng) {
            true
        } else {
            current.remove(cell, self.grid);
            false
        }
    }
}

#[inline]
fn accept<R: Rng>(delta: f64, temp: f64, rng: &mut R) -> bool {
    delta <= 0.0 || rng.gen::<f64>() < (-delta / temp).exp()
}
