//! Constructive heuristics used as the reference solver.
//!
//! - [`solve_baseline`] — Greedy nearest-neighbor over traffic-weighted time, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::{solve_baseline, BASELINE_SOLVER};
