//! Route cost and derived route metrics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{CityGraph, SolverResult};

use super::validator::delivery_slice;

/// Total base distance and traffic-weighted time of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteCost {
    /// Sum of untouched leg distances.
    pub distance: f64,
    /// Sum of traffic-weighted leg times.
    pub time: f64,
}

/// Sums every leg of an open route (no return to start).
///
/// Legs touching an unknown id contribute nothing.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
/// use priority_routing::evaluation::route_cost;
///
/// let graph = CityGraph::new(
///     vec![
///         Location::normal("A", 0.0, 0.0),
///         Location::normal("B", 2.0, 0.0),
///     ],
///     vec![Connection::new("A", "B", 2.0, TrafficLevel::Medium)],
///     TrafficMultipliers::default(),
/// )
/// .unwrap();
///
/// let cost = route_cost(&["A".into(), "B".into()], &graph);
/// assert_eq!(cost.distance, 2.0);
/// assert_eq!(cost.time, 3.0);
/// ```
pub fn route_cost(route: &[String], graph: &CityGraph) -> RouteCost {
    route
        .windows(2)
        .filter_map(|w| graph.leg(&w[0], &w[1]))
        .fold(RouteCost::default(), |acc, leg| RouteCost {
            distance: acc.distance + leg.distance,
            time: acc.time + leg.time,
        })
}

/// Number of priority locations at delivery index `>= k`.
pub fn priority_violations(route: &[String], graph: &CityGraph) -> usize {
    let priority: HashSet<&str> = graph
        .priority_locations()
        .into_iter()
        .map(|l| l.id())
        .collect();
    let k = priority.len();
    if k == 0 {
        return 0;
    }
    delivery_slice(route, graph)
        .iter()
        .enumerate()
        .filter(|(i, id)| *i >= k && priority.contains(id.as_str()))
        .count()
}

/// Route distance over the straight-line distance between its endpoints.
///
/// 1.0 means a perfectly straight route; higher means more detour. Returns
/// 1.0 for degenerate input: fewer than two stops, non-positive distance,
/// unknown endpoints, or coincident endpoints.
pub fn efficiency_ratio(route: &[String], total_distance: f64, graph: &CityGraph) -> f64 {
    if route.len() < 2 || total_distance <= 0.0 {
        return 1.0;
    }
    let (Some(start), Some(end)) = (
        route.first().and_then(|id| graph.location(id)),
        route.last().and_then(|id| graph.location(id)),
    ) else {
        return 1.0;
    };
    let straight = start.distance_to(end);
    if straight <= 0.0 {
        return 1.0;
    }
    total_distance / straight
}

/// Travel time per unit distance, only for feasible routes with distance > 0.
pub fn time_distance_ratio(feasible: bool, cost: RouteCost) -> Option<f64> {
    (feasible && cost.distance > 0.0).then(|| cost.time / cost.distance)
}

/// Per-leg breakdown of a solved route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Mean leg distance.
    pub avg_leg_distance: f64,
    /// Longest leg.
    pub max_leg_distance: f64,
    /// Shortest leg.
    pub min_leg_distance: f64,
    /// See [`efficiency_ratio`].
    pub efficiency_ratio: f64,
    /// Distance of legs between consecutive priority-zone slots.
    pub priority_zone_distance: f64,
    /// Distance of legs starting at or after slot k.
    pub normal_zone_distance: f64,
}

impl RouteMetrics {
    /// Computes the breakdown for `result.route` on `graph`.
    ///
    /// Zone distances are measured on the delivery part of the route (depot
    /// stripped). Legs touching an unknown id are ignored.
    pub fn compute(result: &SolverResult, graph: &CityGraph) -> Self {
        let legs: Vec<f64> = result
            .route
            .windows(2)
            .filter_map(|w| graph.leg(&w[0], &w[1]).map(|leg| leg.distance))
            .collect();

        let (avg, max, min) = if legs.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let sum: f64 = legs.iter().sum();
            (
                sum / legs.len() as f64,
                legs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                legs.iter().copied().fold(f64::INFINITY, f64::min),
            )
        };

        let delivery = delivery_slice(&result.route, graph);
        let delivery_legs: Vec<f64> = delivery
            .windows(2)
            .map(|w| graph.leg(&w[0], &w[1]).map_or(0.0, |leg| leg.distance))
            .collect();
        // Leg i joins slots i and i+1. The leg crossing from slot k-1 to
        // slot k belongs to neither zone.
        let k = graph.num_priority().min(delivery_legs.len());
        let priority_zone_distance: f64 = delivery_legs[..k.saturating_sub(1)].iter().sum();
        let normal_zone_distance: f64 = delivery_legs[k..].iter().sum();

        Self {
            avg_leg_distance: avg,
            max_leg_distance: max,
            min_leg_distance: min,
            efficiency_ratio: efficiency_ratio(&result.route, result.total_distance, graph),
            priority_zone_distance,
            normal_zone_distance,
        }
    }
}
