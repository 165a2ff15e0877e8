//! Pairwise comparison of two solved results.

use serde::{Deserialize, Serialize};

use crate::models::SolverResult;

/// How a candidate result compares against a baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// `(b - c) / b × 100` on total distance; positive means the candidate is
    /// shorter. 0.0 when the baseline distance is 0.
    pub distance_reduction_pct: f64,
    /// Same on traffic-weighted travel time.
    pub time_reduction_pct: f64,
    /// Candidate solve time over baseline solve time; 1.0 when the baseline
    /// time is not positive.
    pub solve_time_ratio: f64,
    /// Candidate is strictly shorter and feasible.
    pub candidate_wins: bool,
    /// Candidate is feasible and priority-respecting.
    pub candidate_valid: bool,
    /// Baseline travel time per unit distance, if defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_traffic_time_ratio: Option<f64>,
    /// Candidate travel time per unit distance, if defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_traffic_time_ratio: Option<f64>,
}

/// Percentage reduction from `baseline` to `candidate`, rounded to two
/// decimals. 0.0 if the baseline is zero.
pub fn reduction_pct(baseline: f64, candidate: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    round2((baseline - candidate) / baseline * 100.0)
}

/// Compares `candidate` against `baseline`. Pure.
///
/// # Examples
///
/// ```
/// use priority_routing::metrics::compare;
/// use priority_routing::models::SolverResult;
///
/// let b = SolverResult::new(vec![], "greedy").with_cost(10.0, 12.0);
/// let c = SolverResult::new(vec![], "bqm (greedy)")
///     .with_cost(8.0, 9.0)
///     .with_validation(true, true);
///
/// let cmp = compare(&b, &c);
/// assert_eq!(cmp.distance_reduction_pct, 20.0);
/// assert_eq!(cmp.time_reduction_pct, 25.0);
/// assert!(cmp.candidate_wins);
/// ```
pub fn compare(baseline: &SolverResult, candidate: &SolverResult) -> ComparisonResult {
    let solve_time_ratio = if baseline.solve_time_ms > 0.0 {
        candidate.solve_time_ms / baseline.solve_time_ms
    } else {
        1.0
    };
    ComparisonResult {
        distance_reduction_pct: reduction_pct(baseline.total_distance, candidate.total_distance),
        time_reduction_pct: reduction_pct(baseline.travel_time, candidate.travel_time),
        solve_time_ratio,
        candidate_wins: candidate.total_distance < baseline.total_distance && candidate.feasible,
        candidate_valid: candidate.is_valid(),
        baseline_traffic_time_ratio: baseline.traffic_time_ratio,
        candidate_traffic_time_ratio: candidate.traffic_time_ratio,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(distance: f64, time: f64, ms: f64) -> SolverResult {
        SolverResult::new(vec!["A".into()], "t")
            .with_cost(distance, time)
            .with_solve_time_ms(ms)
    }

    #[test]
    fn test_distance_reduction() {
        let cmp = compare(&result(10.0, 10.0, 1.0), &result(8.0, 10.0, 1.0));
        assert!((cmp.distance_reduction_pct - 20.0).abs() < 1e-10);
        assert_eq!(cmp.time_reduction_pct, 0.0);
    }

    #[test]
    fn test_zero_baseline_distance() {
        let cmp = compare(&result(0.0, 0.0, 1.0), &result(5.0, 5.0, 1.0));
        assert_eq!(cmp.distance_reduction_pct, 0.0);
        assert_eq!(cmp.time_reduction_pct, 0.0);
    }

    #[test]
    fn test_negative_reduction_when_candidate_longer() {
        let cmp = compare(&result(10.0, 10.0, 1.0), &result(12.5, 10.0, 1.0));
        assert!((cmp.distance_reduction_pct + 25.0).abs() < 1e-10);
        assert!(!cmp.candidate_wins);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(reduction_pct(3.0, 2.0), 33.33);
    }

    #[test]
    fn test_solve_time_ratio() {
        let cmp = compare(&result(1.0, 1.0, 2.0), &result(1.0, 1.0, 5.0));
        assert!((cmp.solve_time_ratio - 2.5).abs() < 1e-10);
        let zero = compare(&result(1.0, 1.0, 0.0), &result(1.0, 1.0, 5.0));
        assert_eq!(zero.solve_time_ratio, 1.0);
    }

    #[test]
    fn test_wins_requires_feasible() {
        let b = result(10.0, 10.0, 1.0);
        let shorter_infeasible = result(5.0, 5.0, 1.0);
        assert!(!compare(&b, &shorter_infeasible).candidate_wins);

        let shorter_feasible = result(5.0, 5.0, 1.0).with_validation(true, false);
        let cmp = compare(&b, &shorter_feasible);
        assert!(cmp.candidate_wins);
        assert!(!cmp.candidate_valid);
    }

    #[test]
    fn test_traffic_ratios_carried() {
        let mut b = result(10.0, 15.0, 1.0);
        b.traffic_time_ratio = Some(1.5);
        let c = result(8.0, 8.0, 1.0);
        let cmp = compare(&b, &c);
        assert_eq!(cmp.baseline_traffic_time_ratio, Some(1.5));
        assert_eq!(cmp.candidate_traffic_time_ratio, None);
    }
}
