//! Random city graph generator.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    CityGraph, Connection, GraphError, Location, TrafficLevel, TrafficMultipliers,
};

/// Smallest and largest supported location count.
pub const MIN_LOCATIONS: usize = 2;
/// See [`MIN_LOCATIONS`].
pub const MAX_LOCATIONS: usize = 25;

const GRID_SIZE: f64 = 10.0;
const DEPOT_MIN: f64 = 4.0;
const DEPOT_MAX: f64 = 6.0;
/// Connections shorter than this after rounding are clamped up to it.
const MIN_DISTANCE: f64 = 0.01;

/// Invalid generator parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    /// Location count outside `MIN_LOCATIONS..=MAX_LOCATIONS`.
    #[error("location count must be between {MIN_LOCATIONS} and {MAX_LOCATIONS}, got {0}")]
    InvalidLocationCount(usize),
    /// Priority ratio outside `0.0..=1.0`.
    #[error("priority ratio must be within 0.0..=1.0, got {0}")]
    InvalidPriorityRatio(f64),
    /// The generated graph failed validation.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// How traffic levels are drawn for generated connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficProfile {
    /// Mostly free-flowing.
    Low,
    /// Even split.
    Medium,
    /// Mostly congested.
    High,
    /// Even split.
    #[default]
    Mixed,
}

impl TrafficProfile {
    /// Draw weights for low, medium and high.
    pub fn weights(self) -> [f64; 3] {
        match self {
            TrafficProfile::Low => [0.7, 0.2, 0.1],
            TrafficProfile::High => [0.1, 0.2, 0.7],
            TrafficProfile::Medium | TrafficProfile::Mixed => [0.33, 0.34, 0.33],
        }
    }

    fn draw(self, rng: &mut StdRng) -> TrafficLevel {
        let weights = self.weights();
        let total: f64 = weights.iter().sum();
        let mut r = rng.random::<f64>() * total;
        for (level, w) in TrafficLevel::ALL.into_iter().zip(weights) {
            if r < w {
                return level;
            }
            r -= w;
        }
        TrafficLevel::High
    }
}

/// Builder for seeded synthetic city graphs.
///
/// Locations are scattered uniformly over a 10×10 grid with ids `N1..`; an
/// optional depot `D0` sits near the centre. Each location connects to its
/// `connectivity` nearest neighbors, and extra connections join any
/// components left disconnected. At least one delivery location is always a
/// priority location.
///
/// # Examples
///
/// ```
/// use priority_routing::generator::{CityGenerator, TrafficProfile};
///
/// let graph = CityGenerator::new(8)
///     .with_priority_ratio(0.25)
///     .with_traffic_profile(TrafficProfile::High)
///     .with_depot(true)
///     .with_seed(42)
///     .generate()
///     .unwrap();
///
/// assert_eq!(graph.len(), 8);
/// assert_eq!(graph.depot().map(|d| d.id()), Some("D0"));
/// assert!(graph.num_priority() >= 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CityGenerator {
    locations: usize,
    priority_ratio: f64,
    traffic_profile: TrafficProfile,
    connectivity: usize,
    include_depot: bool,
    seed: Option<u64>,
    multipliers: TrafficMultipliers,
}

impl CityGenerator {
    /// Generator for `locations` locations (depot included) with default
    /// settings: ratio 0.3, mixed traffic, 3 nearest neighbors, no depot,
    /// unseeded.
    pub fn new(locations: usize) -> Self {
        Self {
            locations,
            priority_ratio: 0.3,
            traffic_profile: TrafficProfile::default(),
            connectivity: 3,
            include_depot: false,
            seed: None,
            multipliers: TrafficMultipliers::default(),
        }
    }

    /// Fraction of delivery locations drawn as priority.
    pub fn with_priority_ratio(mut self, ratio: f64) -> Self {
        self.priority_ratio = ratio;
        self
    }

    /// Traffic level distribution.
    pub fn with_traffic_profile(mut self, profile: TrafficProfile) -> Self {
        self.traffic_profile = profile;
        self
    }

    /// Nearest neighbors connected per location.
    pub fn with_connectivity(mut self, k: usize) -> Self {
        self.connectivity = k;
        self
    }

    /// Makes the first location a depot near the grid centre.
    pub fn with_depot(mut self, include: bool) -> Self {
        self.include_depot = include;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Multiplier table attached to the generated graph.
    pub fn with_traffic_multipliers(mut self, multipliers: TrafficMultipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    /// Generates a graph.
    ///
    /// # Errors
    ///
    /// [`GeneratorError`] for out-of-range parameters or an invalid
    /// multiplier table.
    pub fn generate(&self) -> Result<CityGraph, GeneratorError> {
        if !(MIN_LOCATIONS..=MAX_LOCATIONS).contains(&self.locations) {
            return Err(GeneratorError::InvalidLocationCount(self.locations));
        }
        if !(0.0..=1.0).contains(&self.priority_ratio) {
            return Err(GeneratorError::InvalidPriorityRatio(self.priority_ratio));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut positions = Vec::with_capacity(self.locations);
        let mut locations = Vec::with_capacity(self.locations);
        if self.include_depot {
            let x = rng.random_range(DEPOT_MIN..DEPOT_MAX);
            let y = rng.random_range(DEPOT_MIN..DEPOT_MAX);
            positions.push((x, y));
            locations.push(Location::depot("D0", round2(x), round2(y)).with_label("Depot"));
        }

        let first_delivery = locations.len();
        for i in 1..=(self.locations - first_delivery) {
            let x = rng.random_range(0.0..GRID_SIZE);
            let y = rng.random_range(0.0..GRID_SIZE);
            positions.push((x, y));
            let id = format!("N{i}");
            let location = if rng.random::<f64>() < self.priority_ratio {
                Location::priority(id, round2(x), round2(y)).with_label(format!("Priority {i}"))
            } else {
                Location::normal(id, round2(x), round2(y)).with_label(format!("Normal {i}"))
            };
            locations.push(location);
        }

        if !locations.iter().any(Location::is_priority) {
            let first = &locations[first_delivery];
            let promoted = Location::priority(first.id(), first.x(), first.y())
                .with_label("Priority 1");
            locations[first_delivery] = promoted;
        }

        let connections = self.connect(&locations, &positions, &mut rng);
        debug!(
            locations = locations.len(),
            connections = connections.len(),
            profile = ?self.traffic_profile,
            seed = ?self.seed,
            "generated city"
        );
        Ok(CityGraph::new(
            locations,
            connections,
            self.multipliers.clone(),
        )?)
    }

    /// k-nearest-neighbor connections plus whatever joins the components.
    fn connect(
        &self,
        locations: &[Location],
        positions: &[(f64, f64)],
        rng: &mut StdRng,
    ) -> Vec<Connection> {
        let n = positions.len();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut connections = Vec::new();
        let mut components = DisjointSet::new(n);

        let mut link = |i: usize, j: usize, rng: &mut StdRng, components: &mut DisjointSet| {
            let distance = euclid(positions[i], positions[j]);
            connections.push(Connection::new(
                locations[i].id(),
                locations[j].id(),
                round2(distance).max(MIN_DISTANCE),
                self.traffic_profile.draw(rng),
            ));
            components.union(i, j);
        };

        for i in 0..n {
            let mut others: Vec<(usize, f64)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (j, euclid(positions[i], positions[j])))
                .collect();
            others.sort_by(|a, b| a.1.total_cmp(&b.1));
            for &(j, _) in others.iter().take(self.connectivity) {
                if seen.insert((i.min(j), i.max(j))) {
                    link(i, j, &mut *rng, &mut components);
                }
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if components.find(i) != components.find(j) {
                    link(i, j, &mut *rng, &mut components);
                }
            }
        }
        connections
    }
}

/// Union-find with path compression.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

fn euclid(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
