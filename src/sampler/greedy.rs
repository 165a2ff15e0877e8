//! Energy-aware greedy sampler.

use std::collections::HashSet;

use tracing::debug;

use crate::qubo::BinaryQuadraticModel;

use super::{position_groups, Sample, Sampler};

/// Deterministic single forward pass over route positions.
///
/// For each position, ascending, every candidate whose location is still
/// unused is scored by its marginal energy: its linear bias plus its
/// interactions with the variables already set to 1. The lowest score wins
/// (ties: first in variable order) and its location is marked used. No
/// backtracking, no randomness.
///
/// With n locations and n positions every position gets exactly one
/// location, so the result always satisfies both one-hot constraints.
///
/// # Examples
///
/// ```
/// use priority_routing::qubo::BinaryQuadraticModel;
/// use priority_routing::sampler::{EnergyGreedySampler, Sampler};
///
/// let mut bqm = BinaryQuadraticModel::new();
/// bqm.add_linear("x_A_0", 1.0);
/// bqm.add_linear("x_B_0", -1.0);
/// bqm.add_linear("x_A_1", 0.0);
/// bqm.add_linear("x_B_1", 0.0);
///
/// let sample = EnergyGreedySampler.sample(&bqm);
/// assert_eq!(sample.assignment["x_B_0"], 1);
/// assert_eq!(sample.assignment["x_A_1"], 1);
/// assert_eq!(sample.energy, -1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyGreedySampler;

impl EnergyGreedySampler {
    /// Runs the forward pass and returns the dense state.
    pub(crate) fn state(bqm: &BinaryQuadraticModel) -> Vec<bool> {
        let mut state = vec![false; bqm.num_variables()];
        let mut chosen: Vec<usize> = Vec::new();
        let mut used: HashSet<String> = HashSet::new();

        for candidates in position_groups(bqm).into_values() {
            let mut best: Option<(usize, &str, f64)> = None;
            for c in &candidates {
                if used.contains(&c.node_id) {
                    continue;
                }
                let marginal = bqm.linear_at(c.index)
                    + chosen
                        .iter()
                        .map(|&j| bqm.interaction(c.index, j))
                        .sum::<f64>();
                match best {
                    Some((_, _, e)) if marginal >= e => {}
                    _ => best = Some((c.index, &c.node_id, marginal)),
                }
            }
            if let Some((index, node_id, _)) = best {
                state[index] = true;
                chosen.push(index);
                used.insert(node_id.to_string());
            }
        }
        state
    }
}

impl Sampler for EnergyGreedySampler {
    fn name(&self) -> String {
        "greedy".to_string()
    }

    fn sample(&self, bqm: &BinaryQuadraticModel) -> Sample {
        let state = Self::state(bqm);
        let sample = Sample::from_state(bqm, &state);
        debug!(
            sampler = "greedy",
            variables = bqm.num_variables(),
            selected = state.iter().filter(|&&on| on).count(),
            energy = sample.energy,
            "sampled bqm"
        );
        sample
    }
}
