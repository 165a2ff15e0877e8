//! Nearest-neighbor baseline.
//!
//! Builds a single open route greedily: starting from the depot (or the first
//! listed location), always travel to the unvisited location with the lowest
//! traffic-weighted time. Priority ordering is not enforced.
//!
//! # Complexity
//!
//! O(n²) where n = number of locations.

use std::time::Instant;

use tracing::debug;

use crate::distance::TravelMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::{CityGraph, SolverResult};

/// Identifier reported in [`SolverResult::solver_used`].
pub const BASELINE_SOLVER: &str = "greedy";

/// Solves the graph with the nearest-neighbor heuristic.
///
/// Ties go to the location listed first in the graph. If no unvisited
/// location is reachable the route stops early and the result is reported as
/// infeasible.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
/// use priority_routing::constructive::solve_baseline;
///
/// let graph = CityGraph::new(
///     vec![
///         Location::depot("D0", 0.0, 0.0),
///         Location::normal("N1", 10.0, 0.0),
///         Location::priority("P1", 1.0, 0.0),
///     ],
///     vec![Connection::new("D0", "P1", 1.0, TrafficLevel::Low)],
///     TrafficMultipliers::default(),
/// )
/// .unwrap();
///
/// let result = solve_baseline(&graph);
/// assert_eq!(result.route, vec!["D0", "P1", "N1"]);
/// assert!(result.feasible);
/// assert_eq!(result.solver_used, "greedy");
/// ```
pub fn solve_baseline(graph: &CityGraph) -> SolverResult {
    let start = Instant::now();
    let locations = graph.locations();
    let n = locations.len();
    let matrix = TravelMatrix::from_graph(graph);

    let first = graph
        .depot()
        .and_then(|d| graph.index_of(d.id()))
        .unwrap_or(0);

    let mut order = Vec::with_capacity(n);
    let mut unvisited: Vec<usize> = (0..n).filter(|&i| i != first).collect();
    if n > 0 {
        order.push(first);
    }
    let mut current = first;

    while !unvisited.is_empty() {
        let Some(next) = matrix.nearest_neighbor(current, &unvisited) else {
            break;
        };
        unvisited.retain(|&i| i != next);
        order.push(next);
        current = next;
    }

    let route: Vec<String> = order
        .into_iter()
        .map(|i| locations[i].id().to_string())
        .collect();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let result = RouteEvaluator::new(graph)
        .evaluate(route, BASELINE_SOLVER)
        .with_solve_time_ms(elapsed_ms);
    debug!(
        route_len = result.route.len(),
        feasible = result.feasible,
        priority_satisfied = result.priority_satisfied,
        elapsed_ms,
        "baseline solved"
    );
    result
}
