//! Route feasibility and priority checks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::CityGraph;

/// Outcome of [`validate`]: two independent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteValidation {
    /// Visits every location exactly once.
    pub feasible: bool,
    /// Every priority location sits inside the first k delivery slots.
    pub priority_satisfied: bool,
}

/// Validates a route against the graph.
///
/// - **feasible**: the route's id set equals the graph's id set and no id
///   repeats. An empty route is never feasible.
/// - **priority_satisfied**: after stripping a leading depot, with `k`
///   priority locations: `k == 0` is trivially satisfied; otherwise every
///   priority location must appear, and only at delivery indices `< k`.
///   Order inside the zone is free.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
/// use priority_routing::evaluation::validate;
///
/// let graph = CityGraph::new(
///     vec![
///         Location::priority("P1", 0.0, 0.0),
///         Location::normal("N1", 1.0, 0.0),
///     ],
///     vec![Connection::new("P1", "N1", 1.0, TrafficLevel::Low)],
///     TrafficMultipliers::default(),
/// )
/// .unwrap();
///
/// let ok = validate(&["P1".into(), "N1".into()], &graph);
/// assert!(ok.feasible && ok.priority_satisfied);
///
/// let late = validate(&["N1".into(), "P1".into()], &graph);
/// assert!(late.feasible && !late.priority_satisfied);
/// ```
pub fn validate(route: &[String], graph: &CityGraph) -> RouteValidation {
    RouteValidation {
        feasible: is_feasible(route, graph),
        priority_satisfied: is_priority_satisfied(route, graph),
    }
}

/// Route-as-set equals the graph's location set and no id repeats.
pub fn is_feasible(route: &[String], graph: &CityGraph) -> bool {
    if route.is_empty() {
        return false;
    }
    let visited: HashSet<&str> = route.iter().map(String::as_str).collect();
    if visited.len() != route.len() || visited.len() != graph.len() {
        return false;
    }
    graph.locations().iter().all(|l| visited.contains(l.id()))
}

/// Every priority location appears, and only inside the priority zone.
pub fn is_priority_satisfied(route: &[String], graph: &CityGraph) -> bool {
    let priority: HashSet<&str> = graph
        .priority_locations()
        .into_iter()
        .map(|l| l.id())
        .collect();
    let k = priority.len();
    if k == 0 {
        return true;
    }

    let delivery = delivery_slice(route, graph);
    let mut seen = HashSet::with_capacity(k);
    for (i, id) in delivery.iter().enumerate() {
        if priority.contains(id.as_str()) {
            if i >= k {
                return false;
            }
            seen.insert(id.as_str());
        }
    }
    seen.len() == k
}

/// Route without its leading depot, if it starts at the graph's depot.
pub(crate) fn delivery_slice<'r>(route: &'r [String], graph: &CityGraph) -> &'r [String] {
    match (graph.depot(), route.first()) {
        (Some(depot), Some(first)) if first == depot.id() => &route[1..],
        _ => route,
    }
}
