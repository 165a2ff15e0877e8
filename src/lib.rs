//! # priority-routing
//!
//! Mixed-priority delivery routing on a city graph: encode the problem as a
//! binary quadratic model, sample it, decode the route, and compare it against
//! a nearest-neighbor baseline.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, Connection, CityGraph, SolverResult)
//! - [`distance`] — Travel matrix with traffic-weighted times
//! - [`qubo`] — BQM type, penalty weights, route encoder and decoder
//! - [`sampler`] — Pluggable BQM samplers (energy-greedy, first-fit, annealing)
//! - [`solver`] — Encode → sample → decode → evaluate pipeline
//! - [`constructive`] — Nearest-neighbor baseline
//! - [`evaluation`] — Route validation, cost, and metrics
//! - [`metrics`] — Baseline/candidate comparison and experiment summaries
//! - [`generator`] — Seeded synthetic city graphs
//! - [`settings`] — Solver settings from JSON or environment

pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod generator;
pub mod metrics;
pub mod models;
pub mod qubo;
pub mod sampler;
pub mod settings;
pub mod solver;
