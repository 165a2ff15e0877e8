//! Samplers: BQM in, low-energy binary assignment out.
//!
//! - [`EnergyGreedySampler`] — deterministic forward pass, one location per
//!   position, lowest marginal energy first, O(n²)
//! - [`FirstFitSampler`] — fills each position with the first unused
//!   location, ignoring every bias
//! - [`AnnealingSampler`] — seeded single-bit-flip simulated annealing,
//!   warm-started from the greedy assignment
//!
//! Any other optimizer can sit behind [`Sampler`] as long as it speaks the
//! `x_<node_id>_<position>` variable naming of [`crate::qubo`].

mod annealing;
mod first_fit;
mod greedy;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::qubo::{Assignment, BinaryQuadraticModel, VariableName};

pub use annealing::AnnealingSampler;
pub use first_fit::FirstFitSampler;
pub use greedy::EnergyGreedySampler;

/// A sampled assignment together with its BQM energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Value of every BQM variable.
    pub assignment: Assignment,
    /// BQM energy at `assignment`.
    pub energy: f64,
}

impl Sample {
    /// Builds a sample from a dense state, computing its energy.
    pub fn from_state(bqm: &BinaryQuadraticModel, state: &[bool]) -> Self {
        Self {
            assignment: bqm.assignment_from_state(state),
            energy: bqm.energy_of_state(state),
        }
    }
}

/// An approximate BQM minimizer.
///
/// Implementations must be pure with respect to the model: sampling the same
/// BQM with the same sampler configuration yields the same [`Sample`].
pub trait Sampler: Send + Sync {
    /// Short identifier, used in [`SolverResult::solver_used`](crate::models::SolverResult).
    fn name(&self) -> String;

    /// Returns one assignment covering every variable of `bqm`.
    fn sample(&self, bqm: &BinaryQuadraticModel) -> Sample;
}

/// Sampler selection for configuration files and environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SamplerKind {
    /// [`EnergyGreedySampler`].
    #[default]
    Greedy,
    /// [`FirstFitSampler`].
    FirstFit,
    /// [`AnnealingSampler`] with the given seed and sweep count.
    Annealing {
        /// RNG seed.
        #[serde(default)]
        seed: u64,
        /// Number of sweeps over all variables.
        #[serde(default = "default_sweeps")]
        sweeps: usize,
    },
}

fn default_sweeps() -> usize {
    AnnealingSampler::DEFAULT_SWEEPS
}

impl SamplerKind {
    /// Instantiates the selected sampler.
    pub fn build(self) -> Box<dyn Sampler> {
        match self {
            Self::Greedy => Box::new(EnergyGreedySampler),
            Self::FirstFit => Box::new(FirstFitSampler),
            Self::Annealing { seed, sweeps } => {
                Box::new(AnnealingSampler::new(seed).with_sweeps(sweeps))
            }
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => f.write_str("greedy"),
            Self::FirstFit => f.write_str("first_fit"),
            Self::Annealing { .. } => f.write_str("annealing"),
        }
    }
}

/// One candidate variable for a route position.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub index: usize,
    pub node_id: String,
}

/// Groups variable indices by parsed position, ascending. Inside a group,
/// candidates keep variable order. Names outside the `x_<node>_<pos>`
/// grammar are left out.
pub(crate) fn position_groups(bqm: &BinaryQuadraticModel) -> BTreeMap<usize, Vec<Candidate>> {
    let mut groups: BTreeMap<usize, Vec<Candidate>> = BTreeMap::new();
    for (index, name) in bqm.variables().iter().enumerate() {
        if let Ok(var) = VariableName::parse(name) {
            groups.entry(var.position()).or_default().push(Candidate {
                index,
                node_id: var.node_id().to_string(),
            });
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_groups_order() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_variable("x_B_1");
        bqm.add_variable("x_A_0");
        bqm.add_variable("junk");
        bqm.add_variable("x_B_0");
        let groups = position_groups(&bqm);
        assert_eq!(groups.len(), 2);
        let p0: Vec<&str> = groups[&0].iter().map(|c| c.node_id.as_str()).collect();
        assert_eq!(p0, vec!["A", "B"]);
        assert_eq!(groups[&1][0].index, 0);
    }

    #[test]
    fn test_sampler_kind_serde() {
        let k: SamplerKind = serde_json::from_str(r#"{"kind":"first_fit"}"#).expect("parse");
        assert_eq!(k, SamplerKind::FirstFit);
        let a: SamplerKind = serde_json::from_str(r#"{"kind":"annealing","seed":7}"#).expect("parse");
        assert_eq!(
            a,
            SamplerKind::Annealing {
                seed: 7,
                sweeps: AnnealingSampler::DEFAULT_SWEEPS
            }
        );
        assert_eq!(SamplerKind::default(), SamplerKind::Greedy);
    }

    #[test]
    fn test_sampler_kind_build_names() {
        assert_eq!(SamplerKind::Greedy.build().name(), "greedy");
        assert_eq!(SamplerKind::FirstFit.build().name(), "first_fit");
        let a = SamplerKind::Annealing { seed: 1, sweeps: 10 };
        assert_eq!(a.build().name(), "annealing");
        assert_eq!(a.to_string(), "annealing");
    }
}
