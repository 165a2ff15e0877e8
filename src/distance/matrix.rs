//! Dense travel matrix.

use crate::models::CityGraph;

/// Dense n×n matrices of base distance and traffic-weighted time, row-major,
/// indexed by position in [`CityGraph::locations`].
///
/// Every entry is resolved once through [`CityGraph::leg`], so hot loops
/// (encoding, nearest-neighbor search) avoid repeated connection lookups.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
/// use priority_routing::distance::TravelMatrix;
///
/// let graph = CityGraph::new(
///     vec![
///         Location::normal("A", 0.0, 0.0),
///         Location::normal("B", 3.0, 4.0),
///         Location::normal("C", 0.0, 8.0),
///     ],
///     vec![Connection::new("A", "B", 5.0, TrafficLevel::High)],
///     TrafficMultipliers::default(),
/// )
/// .unwrap();
///
/// let tm = TravelMatrix::from_graph(&graph);
/// assert_eq!(tm.distance(0, 1), 5.0);
/// assert_eq!(tm.time(0, 1), 10.0);
/// assert_eq!(tm.time(0, 2), 8.0); // Euclidean fallback
/// ```
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    distance: Vec<f64>,
    time: Vec<f64>,
    size: usize,
}

impl TravelMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            distance: vec![0.0; size * size],
            time: vec![0.0; size * size],
            size,
        }
    }

    /// Resolves every location pair of the graph.
    pub fn from_graph(graph: &CityGraph) -> Self {
        let locations = graph.locations();
        let n = locations.len();
        let mut tm = Self::new(n);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if let Some(leg) = graph.leg(locations[i].id(), locations[j].id()) {
                    tm.set(i, j, leg.distance, leg.time);
                }
            }
        }
        tm
    }

    /// Base distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance[from * self.size + to]
    }

    /// Traffic-weighted time from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn time(&self, from: usize, to: usize) -> f64 {
        self.time[from * self.size + to]
    }

    /// Sets both entries for a pair.
    pub fn set(&mut self, from: usize, to: usize, distance: f64, time: f64) {
        self.distance[from * self.size + to] = distance;
        self.time[from * self.size + to] = time;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the candidate with the lowest traffic-weighted time from `from`.
    ///
    /// Ties go to the earliest candidate; non-finite entries count as
    /// unreachable. Returns `None` if no candidate is reachable.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let t = self.time(from, c);
            if !t.is_finite() {
                continue;
            }
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((c, t)),
            }
        }
        best.map(|(c, _)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Connection, Location, TrafficLevel, TrafficMultipliers};

    fn sample_graph() -> CityGraph {
        CityGraph::new(
            vec![
                Location::depot("D", 0.0, 0.0),
                Location::priority("P", 3.0, 4.0),
                Location::normal("N", 0.0, 8.0),
            ],
            vec![
                Connection::new("D", "P", 5.0, TrafficLevel::Medium),
                Connection::new("P", "N", 5.0, TrafficLevel::Low),
            ],
            TrafficMultipliers::default(),
        )
        .expect("valid graph")
    }

    #[test]
    fn test_from_graph() {
        let tm = TravelMatrix::from_graph(&sample_graph());
        assert_eq!(tm.size(), 3);
        assert!((tm.distance(0, 1) - 5.0).abs() < 1e-10);
        assert!((tm.time(0, 1) - 7.5).abs() < 1e-10);
        assert!((tm.time(0, 2) - 8.0).abs() < 1e-10);
        assert_eq!(tm.time(1, 1), 0.0);
    }

    #[test]
    fn test_from_graph_is_symmetric() {
        let tm = TravelMatrix::from_graph(&sample_graph());
        for i in 0..tm.size() {
            for j in 0..tm.size() {
                assert_eq!(tm.distance(i, j), tm.distance(j, i));
                assert_eq!(tm.time(i, j), tm.time(j, i));
            }
        }
    }

    #[test]
    fn test_nearest_neighbor() {
        let tm = TravelMatrix::from_graph(&sample_graph());
        // From D: P costs 7.5, N costs 8.0
        assert_eq!(tm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(tm.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(tm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_nearest_neighbor_tie_first_wins() {
        let mut tm = TravelMatrix::new(3);
        tm.set(0, 1, 2.0, 2.0);
        tm.set(0, 2, 2.0, 2.0);
        assert_eq!(tm.nearest_neighbor(0, &[2, 1]), Some(2));
        assert_eq!(tm.nearest_neighbor(0, &[1, 2]), Some(1));
    }

    #[test]
    fn test_nearest_neighbor_skips_unreachable() {
        let mut tm = TravelMatrix::new(3);
        tm.set(0, 1, f64::INFINITY, f64::INFINITY);
        tm.set(0, 2, 4.0, 4.0);
        assert_eq!(tm.nearest_neighbor(0, &[1, 2]), Some(2));
        assert_eq!(tm.nearest_neighbor(0, &[1]), None);
    }
}
