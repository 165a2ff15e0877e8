//! BQM encoding of the mixed-priority routing problem.
//!
//! One binary variable `x_{i,p}` per delivery location `i` and route
//! position `p`. The depot never gets variables: it is the fixed start, and
//! its distance to each location becomes a linear bias on position 0.
//!
//! # Terms
//!
//! ```text
//! A  · Σ_p (1 - Σ_i x_{i,p})²          one location per position
//! A  · Σ_i (1 - Σ_p x_{i,p})²          one position per location
//! B  · Σ_{i∈P, p≥k} x_{i,p}            priority outside the zone
//!    + Σ_{i∈N, p<k} x_{i,p}            normal inside the zone
//! Bp · Σ_{i∈P} (1 - Σ_p x_{i,p})²      priority coverage
//! C  · Σ_p Σ_{u≠v} w(u,v) x_{u,p} x_{v,p+1}
//! C  · Σ_i w(depot,i) x_{i,0}
//! ```
//!
//! # Complexity
//!
//! O(n³) interactions for n delivery locations (the objective term).

use tracing::debug;

use crate::distance::TravelMatrix;
use crate::models::CityGraph;

use super::bqm::BinaryQuadraticModel;
use super::penalty::PenaltyConfig;
use super::variable::variable_name;

/// Builds the BQM for `graph` under the given penalties.
///
/// Variables are created node-major in delivery order, so the variable for
/// delivery location `i` at position `p` has index `i * n + p`. A graph with
/// no delivery locations yields an empty model.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
/// use priority_routing::qubo::{encode, PenaltyConfig};
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
/// let bqm = encode(&graph, &PenaltyConfig::default());
/// assert_eq!(bqm.num_variables(), 4);
/// // Normal location inside the priority zone is penalized
/// assert!(bqm.linear("x_N1_0").unwrap() > bqm.linear("x_P1_0").unwrap());
/// ```
pub fn encode(graph: &CityGraph, penalties: &PenaltyConfig) -> BinaryQuadraticModel {
    let delivery = graph.delivery_locations();
    let n = delivery.len();
    let mut bqm = BinaryQuadraticModel::new();
    if n == 0 {
        return bqm;
    }

    let matrix = TravelMatrix::from_graph(graph);
    let graph_idx: Vec<usize> = delivery
        .iter()
        .filter_map(|l| graph.index_of(l.id()))
        .collect();
    let is_priority: Vec<bool> = delivery.iter().map(|l| l.is_priority()).collect();
    let k = is_priority.iter().filter(|&&p| p).count();
    let var = |i: usize, p: usize| i * n + p;

    for location in &delivery {
        for p in 0..n {
            bqm.add_variable(&variable_name(location.id(), p));
        }
    }

    let (a, b, bp, c) = (penalties.a(), penalties.b(), penalties.bp(), penalties.c());

    // Column one-hot: exactly one location per position.
    for p in 0..n {
        for i in 0..n {
            bqm.add_linear_at(var(i, p), -2.0 * a);
            for j in (i + 1)..n {
                bqm.add_interaction(var(i, p), var(j, p), 2.0 * a);
            }
        }
        bqm.add_offset(a);
    }

    // Row one-hot: exactly one position per location.
    for i in 0..n {
        add_row_one_hot(&mut bqm, i, n, a);
    }

    // Priority zone: the first k positions.
    for i in 0..n {
        let forbidden = if is_priority[i] { k..n } else { 0..k };
        for p in forbidden {
            bqm.add_linear_at(var(i, p), b);
        }
    }

    // Priority coverage reinforcement.
    for i in (0..n).filter(|&i| is_priority[i]) {
        add_row_one_hot(&mut bqm, i, n, bp);
    }

    // Travel cost between consecutive positions.
    for p in 0..n.saturating_sub(1) {
        for u in 0..n {
            for v in 0..n {
                if u == v {
                    continue;
                }
                let w = matrix.time(graph_idx[u], graph_idx[v]);
                if w.is_finite() {
                    bqm.add_interaction(var(u, p), var(v, p + 1), c * w);
                }
            }
        }
    }

    // Depot start.
    if let Some(depot_idx) = graph.depot().and_then(|d| graph.index_of(d.id())) {
        for (i, &gi) in graph_idx.iter().enumerate() {
            let w = matrix.time(depot_idx, gi);
            if w.is_finite() {
                bqm.add_linear_at(var(i, 0), c * w);
            }
        }
    }

    debug!(
        locations = n,
        priority = k,
        variables = bqm.num_variables(),
        interactions = bqm.num_interactions(),
        "encoded routing bqm"
    );
    bqm
}

/// `weight · (1 - Σ_p x_{i,p})²` expanded over the row of location `i`.
fn add_row_one_hot(bqm: &mut BinaryQuadraticModel, i: usize, n: usize, weight: f64) {
    for p in 0..n {
        bqm.add_linear_at(i * n + p, -2.0 * weight);
        for q in (p + 1)..n {
            bqm.add_interaction(i * n + p, i * n + q, 2.0 * weight);
        }
    }
    bqm.add_offset(weight);
}
