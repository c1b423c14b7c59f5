//! Multi-resolution sweep driver.
//!
//! The driver sweeps grid splits with jittered trials, runs the greedy grower
//! and the annealing refiner on each trial grid, and keeps the lowest-cost
//! valid region across all trials. The winning region's boundary is extracted
//! and the reported cost and enclosed count are re-derived geometrically from
//! the emitted polygon, so points on the boundary count as enclosed.

use std::cmp::Ordering;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::{self, Edge};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::greedy;
use crate::point::Point;
use crate::region::Region;
use crate::sa::{Refiner, SaConfig};

/// Sweep configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Largest split in the sweep (`S ∈ 1..=max_split`).
    pub max_split: u32,
    /// Trials per split for `S ∈ [2, 9]`.
    pub trials_small: u32,
    /// Trials per split for `S ∈ [10, 19]`.
    pub trials_medium: u32,
    /// Trials per split elsewhere.
    pub trials_large: u32,
    /// Annealing schedule applied to every trial.
    pub sa: SaConfig,
    /// Base RNG seed; each trial derives its own stream from it.
    pub seed: u64,
    /// Run trials on the rayon thread pool instead of sequentially.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_split: 110,
            trials_small: 80,
            trials_medium: 20,
            trials_large: 1,
            sa: SaConfig::default(),
            seed: 42,
            parallel: false,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest split in the sweep.
    pub fn with_max_split(mut self, max_split: u32) -> Self {
        self.max_split = max_split.max(1);
        self
    }

    /// Sets the per-split trial counts (small, medium, large bands).
    pub fn with_trials(mut self, small: u32, medium: u32, large: u32) -> Self {
        self.trials_small = small.max(1);
        self.trials_medium = medium.max(1);
        self.trials_large = large.max(1);
        self
    }

    /// Sets the annealing configuration.
    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    /// Sets the base RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel trial execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn trials_for(&self, split: u32) -> u32 {
        match split {
            2..=9 => self.trials_small,
            10..=19 => self.trials_medium,
            _ => self.trials_large,
        }
    }
}

/// The chosen polygon and its accounting.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// Perimeter length plus the weight of every enclosed point.
    pub cost: f64,
    /// Points inside the polygon or on its boundary.
    pub enclosed: usize,
    /// Clockwise boundary edges.
    pub edges: Vec<Edge>,
    /// Cell size of the winning grid.
    pub cell_size: f64,
    /// Split of the winning grid.
    pub split: u32,
    /// Wall-clock time of the whole sweep in milliseconds.
    pub computation_time_ms: u64,
}

impl Solution {
    /// Number of polygon edges (equals the vertex count).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// One trial's candidate, compared by (cost, split, trial) so that the
/// reduction has a unique minimum and replays deterministically.
struct TrialBest {
    cost: f64,
    split: u32,
    trial: u32,
    region: Region,
    grid: Grid,
}

impl TrialBest {
    fn order(&self, other: &Self) -> Ordering {
        self.cost
            .partial_cmp(&other.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.split.cmp(&other.split))
            .then_with(|| self.trial.cmp(&other.trial))
    }
}

/// Sweep solver over weighted points.
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Creates a solver with default configuration.
    pub fn default_config() -> Self {
        Self::new(SolverConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds a low-cost simply-connected rectilinear polygon enclosing at
    /// least `coverage_target` of `points`.
    pub fn solve(&self, points: &[Point], coverage_target: usize) -> Result<Solution> {
        if points.is_empty() {
            return Err(Error::EmptyInstance);
        }
        if coverage_target > points.len() {
            return Err(Error::InfeasibleCoverage {
                required: coverage_target,
                available: points.len(),
            });
        }
        let coverage_target = coverage_target.max(1);

        let started = Instant::now();
        let trials: Vec<(u32, u32)> = (1..=self.config.max_split)
            .flat_map(|split| (0..self.config.trials_for(split)).map(move |t| (split, t)))
            .collect();

        let best = if self.config.parallel {
            trials
                .into_par_iter()
                .filter_map(|(split, trial)| self.run_trial(points, coverage_target, split, trial))
                .min_by(TrialBest::order)
        } else {
            trials
                .into_iter()
                .filter_map(|(split, trial)| self.run_trial(points, coverage_target, split, trial))
                .min_by(TrialBest::order)
        };

        let Some(best) = best else {
            return Err(Error::NoFeasibleRegion {
                required: coverage_target,
            });
        };

        let edges = boundary::extract_boundary(&best.region, best.grid.cell_size());
        let mut enclosed = 0usize;
        let mut enclosed_weight = 0.0;
        for p in points {
            if boundary::contains_point(&edges, p.x, p.y) {
                enclosed += 1;
                enclosed_weight += p.w;
            }
        }
        let cost = boundary::perimeter_length(&edges) + enclosed_weight;

        log::info!(
            "best trial: split={} trial={} region_cost={:.6} reported_cost={:.6} enclosed={}",
            best.split,
            best.trial,
            best.cost,
            cost,
            enclosed
        );

        Ok(Solution {
            cost,
            enclosed,
            edges,
            cell_size: best.grid.cell_size(),
            split: best.split,
            computation_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn run_trial(
        &self,
        points: &[Point],
        coverage_target: usize,
        split: u32,
        trial: u32,
    ) -> Option<TrialBest> {
        let mut rng = StdRng::seed_from_u64(trial_seed(self.config.seed, split, trial));

        let epsilon = if split > 4 {
            0.01 / split as f64
        } else {
            5e-4
        };
        let jitter = 1.0 - epsilon * rng.gen::<f64>();

        let grid = Grid::build(points, split, jitter);
        if grid.cell_size() <= 0.0 {
            return None;
        }

        let grown = greedy::grow(&grid, coverage_target)?;
        let mut refiner = Refiner::new(&grid, coverage_target, self.config.sa.clone());
        let outcome = refiner.refine(grown, &mut rng);

        Some(TrialBest {
            cost: outcome.best_cost,
            split,
            trial,
            region: outcome.best,
            grid,
        })
    }
}

/// Derives a per-trial RNG seed from the base seed and trial coordinates.
fn trial_seed(base: u64, split: u32, trial: u32) -> u64 {
    let stream = ((split as u64) << 32) | trial as u64;
    base ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
