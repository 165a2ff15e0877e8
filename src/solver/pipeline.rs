//! The BQM solver: size check, encode, sample, decode, evaluate.

use std::fmt;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, warn};

use crate::evaluation::RouteEvaluator;
use crate::models::{CityGraph, SolverResult};
use crate::qubo::{decode, encode, DecodeError, PenaltyConfig};
use crate::sampler::{EnergyGreedySampler, Sampler};
use crate::settings::SolverSettings;

/// Pipeline failure.
///
/// An infeasible route is not an error: it comes back as a result with
/// `feasible == false`.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The sampler returned an assignment the decoder cannot read.
    #[error("sampler output could not be decoded: {0}")]
    Decode(#[from] DecodeError),
    /// The graph exceeds the configured size limit.
    #[error("graph has {count} locations, limit is {max}")]
    TooManyLocations {
        /// Locations in the graph.
        count: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Constraint-aware solver built on the BQM encoding.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
/// use priority_routing::solver::QuboSolver;
///
/// let graph = CityGraph::new(
///     vec![
///         Location::depot("D0", 0.0, 0.0),
///         Location::normal("N1", 1.0, 0.0),
///         Location::priority("P1", 4.0, 0.0),
///     ],
///     vec![Connection::new("D0", "N1", 1.0, TrafficLevel::Low)],
///     TrafficMultipliers::default(),
/// )
/// .unwrap();
///
/// let result = QuboSolver::default().solve(&graph).unwrap();
/// assert_eq!(result.route, vec!["D0", "P1", "N1"]);
/// assert!(result.is_valid());
/// assert!(result.energy.is_some());
/// ```
pub struct QuboSolver {
    penalties: PenaltyConfig,
    sampler: Box<dyn Sampler>,
    max_locations: Option<usize>,
}

impl QuboSolver {
    /// Creates a solver with no size limit.
    pub fn new(penalties: PenaltyConfig, sampler: Box<dyn Sampler>) -> Self {
        Self {
            penalties,
            sampler,
            max_locations: None,
        }
    }

    /// Rejects graphs with more than `max` locations.
    pub fn with_max_locations(mut self, max: usize) -> Self {
        self.max_locations = Some(max);
        self
    }

    /// Builds the solver described by `settings`.
    pub fn from_settings(settings: &SolverSettings) -> Self {
        Self {
            penalties: settings.penalties,
            sampler: settings.sampler.build(),
            max_locations: settings.max_locations,
        }
    }

    /// Penalty coefficients.
    pub fn penalties(&self) -> &PenaltyConfig {
        &self.penalties
    }

    /// Identifier reported in [`SolverResult::solver_used`].
    pub fn solver_name(&self) -> String {
        format!("bqm ({})", self.sampler.name())
    }

    /// Runs encode → sample → decode → validate on `graph`.
    ///
    /// # Errors
    ///
    /// [`SolveError::TooManyLocations`] if the graph exceeds the limit, and
    /// [`SolveError::Decode`] if the sampler returns a corrupt assignment.
    pub fn solve(&self, graph: &CityGraph) -> Result<SolverResult, SolveError> {
        if let Some(max) = self.max_locations {
            if graph.len() > max {
                return Err(SolveError::TooManyLocations {
                    count: graph.len(),
                    max,
                });
            }
        }

        let start = Instant::now();
        let bqm = encode(graph, &self.penalties);
        let sample = self.sampler.sample(&bqm);

        let delivery_ids: Vec<String> = graph
            .delivery_locations()
            .iter()
            .map(|l| l.id().to_string())
            .collect();
        let depot_id = graph.depot().map(|d| d.id());
        let route = decode(&sample.assignment, &delivery_ids, depot_id)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let result = RouteEvaluator::new(graph)
            .evaluate(route, self.solver_name())
            .with_solve_time_ms(elapsed_ms)
            .with_energy(sample.energy);

        if !result.feasible {
            warn!(
                sampler = %self.sampler.name(),
                route_len = result.route.len(),
                locations = graph.len(),
                energy = sample.energy,
                "sampled assignment decodes to an infeasible route"
            );
        }
        debug!(
            solver = %result.solver_used,
            route_len = result.route.len(),
            feasible = result.feasible,
            priority_satisfied = result.priority_satisfied,
            elapsed_ms,
            "bqm solved"
        );
        Ok(result)
    }
}

impl Default for QuboSolver {
    fn default() -> Self {
        Self::new(PenaltyConfig::default(), Box::new(EnergyGreedySampler))
    }
}

impl fmt::Debug for QuboSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuboSolver")
            .field("penalties", &self.penalties)
            .field("sampler", &self.sampler.name())
            .field("max_locations", &self.max_locations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Connection, Location, TrafficLevel, TrafficMultipliers};
    use crate::qubo::{Assignment, BinaryQuadraticModel};
    use crate::sampler::{FirstFitSampler, Sample, SamplerKind};

    fn square() -> CityGraph {
        CityGraph::new(
            vec![
                Location::priority("P1", 0.0, 0.0),
                Location::priority("P2", 1.0, 0.0),
                Location::normal("N1", 0.0, 1.0),
                Location::normal("N2", 1.0, 1.0),
            ],
            vec![
                Connection::new("P1", "P2", 1.0, TrafficLevel::Low),
                Connection::new("P1", "N1", 1.0, TrafficLevel::Low),
                Connection::new("P2", "N2", 1.0, TrafficLevel::Low),
                Connection::new("N1", "N2", 1.0, TrafficLevel::Low),
            ],
            TrafficMultipliers::default(),
        )
        .expect("valid graph")
    }

    struct CorruptSampler;

    impl Sampler for CorruptSampler {
        fn name(&self) -> String {
            "corrupt".to_string()
        }

        fn sample(&self, _bqm: &BinaryQuadraticModel) -> Sample {
            let mut assignment = Assignment::new();
            assignment.insert("x_ghost_0".to_string(), 1);
            Sample {
                assignment,
                energy: 0.0,
            }
        }
    }

    #[test]
    fn test_solve_priority_first() {
        let result = QuboSolver::default().solve(&square()).expect("solvable");
        assert!(result.feasible);
        assert!(result.priority_satisfied);
        assert_eq!(result.route.len(), 4);
        assert_eq!(result.solver_used, "bqm (greedy)");
        assert_eq!(result.priority_violations, Some(0));
        assert!(result.energy.is_some());
    }

    #[test]
    fn test_first_fit_is_feasible_but_blind() {
        let solver = QuboSolver::new(PenaltyConfig::default(), Box::new(FirstFitSampler));
        let result = solver.solve(&square()).expect("solvable");
        assert_eq!(result.route, vec!["P1", "P2", "N1", "N2"]);
        assert!(result.feasible);
        assert_eq!(result.solver_used, "bqm (first_fit)");
    }

    #[test]
    fn test_too_many_locations() {
        let solver = QuboSolver::default().with_max_locations(3);
        let err = solver.solve(&square()).unwrap_err();
        assert!(matches!(err, SolveError::TooManyLocations { count: 4, max: 3 }));
    }

    #[test]
    fn test_corrupt_sampler_is_an_error() {
        let solver = QuboSolver::new(PenaltyConfig::default(), Box::new(CorruptSampler));
        let err = solver.solve(&square()).unwrap_err();
        assert!(matches!(err, SolveError::Decode(DecodeError::UnknownLocation { .. })));
    }

    #[test]
    fn test_from_settings() {
        let settings = SolverSettings {
            sampler: SamplerKind::Annealing { seed: 3, sweeps: 20 },
            ..SolverSettings::default()
        };
        let solver = QuboSolver::from_settings(&settings);
        assert_eq!(solver.solver_name(), "bqm (annealing)");
        assert_eq!(solver.penalties(), &PenaltyConfig::default());
        let result = solver.solve(&square()).expect("solvable");
        assert!(result.is_valid());
    }
}
