//! Bias-blind reference sampler.

use std::collections::HashSet;

use tracing::debug;

use crate::qubo::BinaryQuadraticModel;

use super::{position_groups, Sample, Sampler};

/// Fills each position, ascending, with the first candidate in variable
/// order whose location is still unused. Every bias is ignored.
///
/// Useful as a floor when judging how much the energy terms actually steer
/// the other samplers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFitSampler;

impl Sampler for FirstFitSampler {
    fn name(&self) -> String {
        "first_fit".to_string()
    }

    fn sample(&self, bqm: &BinaryQuadraticModel) -> Sample {
        let mut state = vec![false; bqm.num_variables()];
        let mut used: HashSet<String> = HashSet::new();
        for candidates in position_groups(bqm).into_values() {
            if let Some(c) = candidates.into_iter().find(|c| !used.contains(&c.node_id)) {
                state[c.index] = true;
                used.insert(c.node_id);
            }
        }
        let sample = Sample::from_state(bqm, &state);
        debug!(sampler = "first_fit", energy = sample.energy, "sampled bqm");
        sample
    }
}
