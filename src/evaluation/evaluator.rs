//! Route evaluator that turns a bare route into a fully populated result.

use crate::models::{CityGraph, SolverResult};

use super::cost::{efficiency_ratio, priority_violations, route_cost, time_distance_ratio};
use super::validator::validate;

/// Evaluates routes against one graph: validation flags, cost, and derived
/// metrics in a single pass.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
/// use priority_routing::evaluation::RouteEvaluator;
///
/// let graph = CityGraph::new(
///     vec![
///         Location::priority("P1", 0.0, 0.0),
///         Location::normal("N1", 3.0, 4.0),
///     ],
///     vec![Connection::new("P1", "N1", 5.0, TrafficLevel::High)],
///     TrafficMultipliers::default(),
/// )
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&graph);
/// let result = evaluator.evaluate(vec!["P1".into(), "N1".into()], "greedy");
/// assert!(result.is_valid());
/// assert_eq!(result.travel_time, 10.0);
/// assert_eq!(result.traffic_time_ratio, Some(2.0));
/// assert_eq!(result.priority_violations, Some(0));
/// ```
pub struct RouteEvaluator<'a> {
    graph: &'a CityGraph,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given graph.
    pub fn new(graph: &'a CityGraph) -> Self {
        Self { graph }
    }

    /// Builds a result for `route`: validation, distance, travel time,
    /// violation count, efficiency ratio and time/distance ratio.
    ///
    /// Solve time and energy are left for the caller.
    pub fn evaluate(&self, route: Vec<String>, solver_used: impl Into<String>) -> SolverResult {
        let validation = validate(&route, self.graph);
        let cost = route_cost(&route, self.graph);
        let violations = priority_violations(&route, self.graph);
        let efficiency = efficiency_ratio(&route, cost.distance, self.graph);

        let mut result = SolverResult::new(route, solver_used)
            .with_cost(cost.distance, cost.time)
            .with_validation(validation.feasible, validation.priority_satisfied);
        result.priority_violations = Some(violations);
        result.efficiency_ratio = Some(efficiency);
        result.traffic_time_ratio = time_distance_ratio(validation.feasible, cost);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Connection, Location, TrafficLevel, TrafficMultipliers};

    fn r(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn line_graph() -> CityGraph {
        CityGraph::new(
            vec![
                Location::priority("P1", 0.0, 0.0),
                Location::normal("N1", 1.0, 0.0),
                Location::normal("N2", 2.0, 0.0),
            ],
            vec![
                Connection::new("P1", "N1", 1.0, TrafficLevel::Low),
                Connection::new("N1", "N2", 1.0, TrafficLevel::High),
            ],
            TrafficMultipliers::default(),
        )
        .expect("valid graph")
    }

    #[test]
    fn test_evaluate_valid_route() {
        let g = line_graph();
        let res = RouteEvaluator::new(&g).evaluate(r(&["P1", "N1", "N2"]), "t");
        assert!(res.feasible && res.priority_satisfied);
        assert!((res.total_distance - 2.0).abs() < 1e-10);
        assert!((res.travel_time - 3.0).abs() < 1e-10);
        assert_eq!(res.priority_violations, Some(0));
        assert!((res.efficiency_ratio.expect("set") - 1.0).abs() < 1e-10);
        assert!((res.traffic_time_ratio.expect("set") - 1.5).abs() < 1e-10);
        assert_eq!(res.solver_used, "t");
        assert!(res.energy.is_none());
    }

    #[test]
    fn test_evaluate_priority_violation() {
        let g = line_graph();
        let res = RouteEvaluator::new(&g).evaluate(r(&["N2", "N1", "P1"]), "t");
        assert!(res.feasible);
        assert!(!res.priority_satisfied);
        assert_eq!(res.priority_violations, Some(1));
    }

    #[test]
    fn test_evaluate_infeasible_has_no_time_ratio() {
        let g = line_graph();
        let res = RouteEvaluator::new(&g).evaluate(r(&["P1", "N1"]), "t");
        assert!(!res.feasible);
        assert!(res.traffic_time_ratio.is_none());
        assert!((res.total_distance - 1.0).abs() < 1e-10);
    }
}
