//! Solver output.

use serde::{Deserialize, Serialize};

/// Outcome of a single solve, shared by the baseline and the BQM pipeline.
///
/// # Examples
///
/// ```
/// use priority_routing::models::SolverResult;
///
/// let r = SolverResult::new(vec!["A".into(), "B".into()], "greedy")
///     .with_cost(4.0, 6.0)
///     .with_validation(true, true);
/// assert_eq!(r.route.len(), 2);
/// assert!(r.is_valid());
/// assert!(r.energy.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Ordered location ids; the depot, if any, comes first.
    pub route: Vec<String>,
    /// Sum of untouched leg distances.
    pub total_distance: f64,
    /// Sum of traffic-weighted leg times.
    pub travel_time: f64,
    /// Every location visited exactly once.
    pub feasible: bool,
    /// Every priority location inside the priority zone.
    pub priority_satisfied: bool,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: f64,
    /// BQM energy of the sampled assignment (BQM solvers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Identifier of the solver that produced this result.
    pub solver_used: String,
    /// Route distance over straight-line start-to-end distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_ratio: Option<f64>,
    /// Priority locations found at or after the priority-zone boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_violations: Option<usize>,
    /// Travel time over distance; set only for feasible, non-zero routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_time_ratio: Option<f64>,
}

impl SolverResult {
    /// Creates a result for the given route with zeroed metrics.
    pub fn new(route: Vec<String>, solver_used: impl Into<String>) -> Self {
        Self {
            route,
            total_distance: 0.0,
            travel_time: 0.0,
            feasible: false,
            priority_satisfied: false,
            solve_time_ms: 0.0,
            energy: None,
            solver_used: solver_used.into(),
            efficiency_ratio: None,
            priority_violations: None,
            traffic_time_ratio: None,
        }
    }

    /// Sets distance and travel time.
    pub fn with_cost(mut self, total_distance: f64, travel_time: f64) -> Self {
        self.total_distance = total_distance;
        self.travel_time = travel_time;
        self
    }

    /// Sets the validation flags.
    pub fn with_validation(mut self, feasible: bool, priority_satisfied: bool) -> Self {
        self.feasible = feasible;
        self.priority_satisfied = priority_satisfied;
        self
    }

    /// Sets the solve time.
    pub fn with_solve_time_ms(mut self, ms: f64) -> Self {
        self.solve_time_ms = ms;
        self
    }

    /// Sets the BQM energy.
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Feasible and priority-respecting.
    pub fn is_valid(&self) -> bool {
        self.feasible && self.priority_satisfied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let r = SolverResult::new(vec![], "x");
        assert_eq!(r.total_distance, 0.0);
        assert!(!r.feasible);
        assert!(!r.is_valid());
        assert_eq!(r.solver_used, "x");
    }

    #[test]
    fn test_json_omits_missing_optionals() {
        let r = SolverResult::new(vec!["A".into()], "greedy").with_cost(1.0, 2.0);
        let json = serde_json::to_string(&r).expect("serializable");
        assert!(!json.contains("energy"));
        assert!(!json.contains("efficiency_ratio"));

        let back: SolverResult = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, r);
    }

    #[test]
    fn test_json_keeps_energy() {
        let r = SolverResult::new(vec![], "greedy-bqm").with_energy(-12.5);
        let json = serde_json::to_string(&r).expect("serializable");
        assert!(json.contains("\"energy\":-12.5"));
    }
}
