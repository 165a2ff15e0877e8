//! Binary quadratic model.

use std::collections::{BTreeMap, HashMap};

/// Binary assignment: variable name → 0 or 1.
pub type Assignment = BTreeMap<String, u8>;

/// A binary quadratic model over named variables.
///
/// ```text
/// E(x) = offset + Σ_i h_i x_i + Σ_{i<j} J_ij x_i x_j,   x ∈ {0, 1}
/// ```
///
/// Variables keep their insertion order. Quadratic biases are keyed by the
/// pair of variable indices with the lower index first, so adding `(u, v)`
/// and `(v, u)` accumulates into the same coefficient.
///
/// # Examples
///
/// ```
/// use priority_routing::qubo::{Assignment, BinaryQuadraticModel};
///
/// let mut bqm = BinaryQuadraticModel::new();
/// bqm.add_linear("a", -1.0);
/// bqm.add_linear("b", -1.0);
/// bqm.add_quadratic("a", "b", 2.0);
/// bqm.add_quadratic("b", "a", 1.0);
/// bqm.add_offset(1.0);
///
/// assert_eq!(bqm.quadratic("a", "b"), 3.0);
///
/// let mut x = Assignment::new();
/// x.insert("a".into(), 1);
/// x.insert("b".into(), 0);
/// assert_eq!(bqm.energy(&x), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryQuadraticModel {
    names: Vec<String>,
    index: HashMap<String, usize>,
    linear: Vec<f64>,
    quadratic: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl BinaryQuadraticModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable with zero bias if it is not present; returns its index.
    pub fn add_variable(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.linear.push(0.0);
        i
    }

    /// Accumulates a linear bias, creating the variable if needed.
    pub fn add_linear(&mut self, name: &str, bias: f64) {
        let i = self.add_variable(name);
        self.linear[i] += bias;
    }

    /// Accumulates a quadratic bias between two variables.
    ///
    /// `u == v` folds into the linear bias, since `x·x = x` for binary `x`.
    pub fn add_quadratic(&mut self, u: &str, v: &str, bias: f64) {
        let i = self.add_variable(u);
        let j = self.add_variable(v);
        self.add_interaction(i, j, bias);
    }

    /// Index-based form of [`add_quadratic`](Self::add_quadratic).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn add_interaction(&mut self, i: usize, j: usize, bias: f64) {
        assert!(i < self.names.len() && j < self.names.len());
        if i == j {
            self.linear[i] += bias;
            return;
        }
        *self.quadratic.entry((i.min(j), i.max(j))).or_insert(0.0) += bias;
    }

    /// Index-based linear accumulation.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn add_linear_at(&mut self, i: usize, bias: f64) {
        self.linear[i] += bias;
    }

    /// Accumulates the constant offset.
    pub fn add_offset(&mut self, value: f64) {
        self.offset += value;
    }

    /// Constant offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.names.len()
    }

    /// Number of non-zero-keyed quadratic interactions.
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Returns `true` if the model has no variables.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Variable names in insertion order.
    pub fn variables(&self) -> &[String] {
        &self.names
    }

    /// Index of a variable.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns `true` if the variable exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Linear bias of a variable, `None` if absent.
    pub fn linear(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|i| self.linear[i])
    }

    /// Linear bias by index.
    pub fn linear_at(&self, i: usize) -> f64 {
        self.linear[i]
    }

    /// Quadratic bias between two variables, 0.0 if they do not interact.
    pub fn quadratic(&self, u: &str, v: &str) -> f64 {
        match (self.index_of(u), self.index_of(v)) {
            (Some(i), Some(j)) => self.interaction(i, j),
            _ => 0.0,
        }
    }

    /// Quadratic bias by index, in either order.
    pub fn interaction(&self, i: usize, j: usize) -> f64 {
        self.quadratic
            .get(&(i.min(j), i.max(j)))
            .copied()
            .unwrap_or(0.0)
    }

    /// Iterates over `((i, j), bias)` with `i < j`.
    pub fn interactions(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.quadratic.iter().map(|(&k, &v)| (k, v))
    }

    /// Per-variable neighbor lists `(other, bias)`.
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adj = vec![Vec::new(); self.names.len()];
        for (&(i, j), &bias) in &self.quadratic {
            adj[i].push((j, bias));
            adj[j].push((i, bias));
        }
        adj
    }

    /// Energy of an assignment. Missing variables count as 0, any non-zero
    /// value counts as 1, and names outside the model are ignored.
    pub fn energy(&self, assignment: &Assignment) -> f64 {
        let state: Vec<bool> = self
            .names
            .iter()
            .map(|name| assignment.get(name).is_some_and(|&v| v != 0))
            .collect();
        self.energy_of_state(&state)
    }

    /// Energy of a dense state vector indexed like [`variables`](Self::variables).
    pub fn energy_of_state(&self, state: &[bool]) -> f64 {
        let mut e = self.offset;
        for (i, &on) in state.iter().enumerate() {
            if on {
                e += self.linear[i];
            }
        }
        for (&(i, j), &bias) in &self.quadratic {
            if state[i] && state[j] {
                e += bias;
            }
        }
        e
    }

    /// Converts a dense state vector to a named assignment.
    pub fn assignment_from_state(&self, state: &[bool]) -> Assignment {
        self.names
            .iter()
            .zip(state)
            .map(|(name, &on)| (name.clone(), u8::from(on)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let bqm = BinaryQuadraticModel::new();
        assert!(bqm.is_empty());
        assert_eq!(bqm.energy(&Assignment::new()), 0.0);
    }

    #[test]
    fn test_insertion_order_and_idempotent_add() {
        let mut bqm = BinaryQuadraticModel::new();
        assert_eq!(bqm.add_variable("b"), 0);
        assert_eq!(bqm.add_variable("a"), 1);
        assert_eq!(bqm.add_variable("b"), 0);
        assert_eq!(bqm.variables(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_linear_accumulates() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_linear("a", 1.5);
        bqm.add_linear("a", -0.5);
        assert_eq!(bqm.linear("a"), Some(1.0));
        assert_eq!(bqm.linear("missing"), None);
    }

    #[test]
    fn test_quadratic_canonical_pair() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_quadratic("a", "b", 1.0);
        bqm.add_quadratic("b", "a", 2.0);
        assert_eq!(bqm.num_interactions(), 1);
        assert_eq!(bqm.quadratic("a", "b"), 3.0);
        assert_eq!(bqm.quadratic("b", "a"), 3.0);
        assert_eq!(bqm.quadratic("a", "zzz"), 0.0);
    }

    #[test]
    fn test_self_interaction_folds_into_linear() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_quadratic("a", "a", 4.0);
        assert_eq!(bqm.num_interactions(), 0);
        assert_eq!(bqm.linear("a"), Some(4.0));
    }

    #[test]
    fn test_energy() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_linear("a", -2.0);
        bqm.add_linear("b", -3.0);
        bqm.add_quadratic("a", "b", 4.0);
        bqm.add_offset(10.0);

        let mut x = Assignment::new();
        x.insert("a".into(), 1);
        x.insert("b".into(), 1);
        assert!((bqm.energy(&x) - 9.0).abs() < 1e-10);

        x.insert("a".into(), 0);
        assert!((bqm.energy(&x) - 7.0).abs() < 1e-10);

        // Unknown names are ignored, missing names read as 0
        let mut y = Assignment::new();
        y.insert("zzz".into(), 1);
        assert!((bqm.energy(&y) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_quadratic("a", "b", 1.0);
        bqm.add_quadratic("b", "c", 2.0);
        let adj = bqm.adjacency();
        assert_eq!(adj[0], vec![(1, 1.0)]);
        assert_eq!(adj[1].len(), 2);
        assert_eq!(adj[2], vec![(1, 2.0)]);
    }

    #[test]
    fn test_state_round_trip() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_linear("a", 1.0);
        bqm.add_linear("b", 1.0);
        let x = bqm.assignment_from_state(&[true, false]);
        assert_eq!(x.get("a"), Some(&1));
        assert_eq!(x.get("b"), Some(&0));
        assert!((bqm.energy(&x) - bqm.energy_of_state(&[true, false])).abs() < 1e-12);
    }
}
