//! # rectfence
//!
//! Minimal-cost rectilinear enclosure of weighted planar points.
//!
//! Given `N` weighted points and a target `K ≤ N`, the solver searches for a
//! simply-connected, axis-aligned rectilinear polygon enclosing at least `K`
//! points that minimizes `perimeter + enclosed weight`. Negative weights make
//! enclosure attractive and trade against added perimeter.
//!
//! The search discretizes the plane at many grid resolutions. On each
//! jittered grid a greedy grower expands a hole-free region cell by cell
//! under a marginal-cost heap, and a time-budgeted simulated-annealing pass
//! refines the grown region with connectivity- and simplicity-preserving
//! flips. The best region across all trials is traced into a clockwise edge
//! list.
//!
//! ## Core Components
//!
//! - [`Grid`] — jittered binning of points into square cells
//! - [`topology::HoleDetector`] — flood-fill simplicity check
//! - [`greedy::grow`] — hole-free marginal-cost region growth
//! - [`sa::Refiner`] — Metropolis refinement under a time budget
//! - [`boundary::extract_boundary`] — clockwise boundary extraction
//! - [`Solver`] — the multi-resolution sweep driver
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use rectfence::{Point, SaConfig, Solver, SolverConfig};
//!
//! let points = vec![
//!     Point::new(1.0, 1.0, -2.0),
//!     Point::new(2.0, 1.5, -1.0),
//!     Point::new(8.0, 7.0, 3.0),
//! ];
//!
//! let config = SolverConfig::new()
//!     .with_max_split(6)
//!     .with_trials(4, 2, 1)
//!     .with_seed(7)
//!     .with_sa(
//!         SaConfig::new()
//!             .with_max_iterations(200)
//!             .with_time_limit(Duration::from_millis(20)),
//!     );
//!
//! let solution = Solver::new(config).solve(&points, 2).unwrap();
//! assert!(solution.enclosed >= 2);
//! println!("cost {:.6} over {} edges", solution.cost, solution.edge_count());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod boundary;
pub mod error;
pub mod greedy;
pub mod grid;
pub mod io;
pub mod point;
pub mod region;
pub mod sa;
pub mod solver;
pub mod topology;

// Re-exports
pub use boundary::Edge;
pub use error::{Error, Result};
pub use grid::{Cell, CellStats, Grid};
pub use io::{parse_instance, write_solution, Instance};
pub use point::Point;
pub use region::Region;
pub use sa::{RefineOutcome, Refiner, SaConfig};
pub use solver::{Solution, Solver, SolverConfig};
