//! Route validation and cost evaluation.
//!
//! - [`validate`] — feasibility and priority-zone checks
//! - [`route_cost`] — base distance and traffic-weighted time of a route
//! - [`RouteEvaluator`] — route → fully populated [`SolverResult`](crate::models::SolverResult)
//! - [`RouteMetrics`] — per-leg and per-zone breakdown of a solved route

mod cost;
mod evaluator;
mod validator;

pub use cost::{
    efficiency_ratio, priority_violations, route_cost, time_distance_ratio, RouteCost,
    RouteMetrics,
};
pub use evaluator::RouteEvaluator;
pub use validator::{is_feasible, is_priority_satisfied, validate, RouteValidation};
