//! Aggregate statistics over repeated baseline/candidate runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::SolverResult;

use super::comparison::{reduction_pct, round2};

/// Mean, sample standard deviation, and range of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (0.0 for fewer than two values).
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl SeriesStats {
    /// Summarizes `values`; all zeros if empty.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if values.len() > 1 {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            var.sqrt()
        } else {
            0.0
        };
        Self {
            mean: round2(mean),
            std: round2(std),
            min: round2(values.iter().copied().fold(f64::INFINITY, f64::min)),
            max: round2(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        }
    }
}

/// Summary of an experiment: many (baseline, candidate) pairs on different
/// graphs or seeds.
///
/// Rates are percentages. Reductions only count pairs where the candidate is
/// feasible and the baseline value is positive.
///
/// # Examples
///
/// ```
/// use priority_routing::metrics::ExperimentSummary;
/// use priority_routing::models::SolverResult;
///
/// let b = SolverResult::new(vec![], "greedy").with_cost(10.0, 10.0);
/// let c = SolverResult::new(vec![], "bqm (greedy)")
///     .with_cost(9.0, 8.0)
///     .with_validation(true, true);
///
/// let summary = ExperimentSummary::from_pairs(&[(b, c)]);
/// assert_eq!(summary.runs, 1);
/// assert_eq!(summary.candidate_feasibility_rate, 100.0);
/// assert_eq!(summary.distance_reduction.mean, 10.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Number of pairs.
    pub runs: usize,
    /// Share of feasible candidate routes.
    pub candidate_feasibility_rate: f64,
    /// Share of priority-respecting candidate routes.
    pub candidate_priority_rate: f64,
    /// Share of feasible baseline routes.
    pub baseline_feasibility_rate: f64,
    /// Share of priority-respecting baseline routes.
    pub baseline_priority_rate: f64,
    /// Distance reduction percentages.
    pub distance_reduction: SeriesStats,
    /// Travel-time reduction percentages.
    pub time_reduction: SeriesStats,
    /// Mean baseline solve time.
    pub baseline_mean_solve_ms: f64,
    /// Mean candidate solve time.
    pub candidate_mean_solve_ms: f64,
}

impl ExperimentSummary {
    /// Aggregates `(baseline, candidate)` pairs.
    pub fn from_pairs(pairs: &[(SolverResult, SolverResult)]) -> Self {
        if pairs.is_empty() {
            return Self::default();
        }
        let runs = pairs.len();

        let distance: Vec<f64> = pairs
            .iter()
            .filter(|(b, c)| c.feasible && b.total_distance > 0.0)
            .map(|(b, c)| reduction_pct(b.total_distance, c.total_distance))
            .collect();
        let time: Vec<f64> = pairs
            .iter()
            .filter(|(b, c)| c.feasible && b.travel_time > 0.0)
            .map(|(b, c)| reduction_pct(b.travel_time, c.travel_time))
            .collect();

        Self {
            runs,
            candidate_feasibility_rate: rate(pairs, |(_, c)| c.feasible),
            candidate_priority_rate: rate(pairs, |(_, c)| c.priority_satisfied),
            baseline_feasibility_rate: rate(pairs, |(b, _)| b.feasible),
            baseline_priority_rate: rate(pairs, |(b, _)| b.priority_satisfied),
            distance_reduction: SeriesStats::from_values(&distance),
            time_reduction: SeriesStats::from_values(&time),
            baseline_mean_solve_ms: mean(pairs, |(b, _)| b.solve_time_ms),
            candidate_mean_solve_ms: mean(pairs, |(_, c)| c.solve_time_ms),
        }
    }
}

type Pair = (SolverResult, SolverResult);

/// Percentage of pairs matching `pred`. `pairs` must not be empty.
fn rate(pairs: &[Pair], pred: impl Fn(&Pair) -> bool) -> f64 {
    round2(pairs.iter().filter(|p| pred(p)).count() as f64 / pairs.len() as f64 * 100.0)
}

/// Mean of `value` over pairs. `pairs` must not be empty.
fn mean(pairs: &[Pair], value: impl Fn(&Pair) -> f64) -> f64 {
    round2(pairs.iter().map(value).sum::<f64>() / pairs.len() as f64)
}

impl fmt::Display for ExperimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Experiment summary ({} runs)", self.runs)?;
        writeln!(
            f,
            "  distance reduction: {:.1}% ± {:.1}% (min {:.1}%, max {:.1}%)",
            self.distance_reduction.mean,
            self.distance_reduction.std,
            self.distance_reduction.min,
            self.distance_reduction.max
        )?;
        writeln!(
            f,
            "  time reduction:     {:.1}% ± {:.1}%",
            self.time_reduction.mean, self.time_reduction.std
        )?;
        writeln!(
            f,
            "  feasibility:        candidate {:.1}%, baseline {:.1}%",
            self.candidate_feasibility_rate, self.baseline_feasibility_rate
        )?;
        writeln!(
            f,
            "  priority satisfied: candidate {:.1}%, baseline {:.1}%",
            self.candidate_priority_rate, self.baseline_priority_rate
        )?;
        write!(
            f,
            "  mean solve time:    candidate {:.2} ms, baseline {:.2} ms",
            self.candidate_mean_solve_ms, self.baseline_mean_solve_ms
        )
    }
}
