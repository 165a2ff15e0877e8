//! City graph: locations, connections, and traffic-weighted edge resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Connection, Location, TrafficMultipliers};

/// Reasons a city graph is rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Fewer than two locations.
    #[error("graph needs at least 2 locations, got {count}")]
    TooFewLocations {
        /// Number of locations supplied.
        count: usize,
    },
    /// No connections.
    #[error("graph needs at least 1 connection")]
    NoConnections,
    /// More than one depot.
    #[error("graph may contain at most one depot, found {count}")]
    MultipleDepots {
        /// Number of depots supplied.
        count: usize,
    },
    /// A location has an empty id.
    #[error("location ids must not be empty")]
    EmptyLocationId,
    /// Two locations share an id.
    #[error("duplicate location id {0:?}")]
    DuplicateLocation(String),
    /// A coordinate is NaN or infinite.
    #[error("location {0:?} has a non-finite coordinate")]
    NonFiniteCoordinate(String),
    /// A connection references a location that does not exist.
    #[error("connection {from:?}-{to:?} references unknown location {missing:?}")]
    UnknownEndpoint {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
        /// The endpoint that is not a known location.
        missing: String,
    },
    /// A connection distance is zero, negative, or non-finite.
    #[error("connection {from:?}-{to:?} has invalid distance {distance}")]
    InvalidDistance {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
        /// Offending distance.
        distance: f64,
    },
    /// A traffic multiplier is zero, negative, or non-finite.
    #[error("traffic multiplier for {level:?} must be positive, got {multiplier}")]
    InvalidMultiplier {
        /// Level name.
        level: String,
        /// Offending multiplier.
        multiplier: f64,
    },
}

/// Base distance and traffic-weighted travel time of a single leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// Untouched distance (connection distance or Euclidean fallback).
    pub distance: f64,
    /// Distance scaled by the connection's traffic multiplier.
    pub time: f64,
}

#[derive(Deserialize)]
struct CityGraphSpec {
    #[serde(alias = "nodes")]
    locations: Vec<Location>,
    #[serde(alias = "edges")]
    connections: Vec<Connection>,
    #[serde(default)]
    traffic_multipliers: TrafficMultipliers,
}

impl TryFrom<CityGraphSpec> for CityGraph {
    type Error = GraphError;

    fn try_from(spec: CityGraphSpec) -> Result<Self, Self::Error> {
        CityGraph::new(spec.locations, spec.connections, spec.traffic_multipliers)
    }
}

/// A validated city graph.
///
/// Construction enforces the invariants every solver relies on: at least two
/// locations, at least one connection, at most one depot, unique ids, and
/// connections that only reference known locations.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{CityGraph, Connection, Location, TrafficLevel, TrafficMultipliers};
///
/// let graph = CityGraph::new(
///     vec![
///         Location::priority("P1", 0.0, 0.0),
///         Location::normal("N1", 3.0, 4.0),
///     ],
///     vec![Connection::new("P1", "N1", 2.0, TrafficLevel::High)],
///     TrafficMultipliers::default(),
/// )
/// .unwrap();
///
/// assert_eq!(graph.edge_weight("P1", "N1"), Some(4.0));
/// assert_eq!(graph.edge_weight("P1", "missing"), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CityGraphSpec")]
pub struct CityGraph {
    locations: Vec<Location>,
    connections: Vec<Connection>,
    traffic_multipliers: TrafficMultipliers,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    lookup: HashMap<(usize, usize), usize>,
}

impl CityGraph {
    /// Builds a graph, validating every structural invariant.
    pub fn new(
        locations: Vec<Location>,
        connections: Vec<Connection>,
        traffic_multipliers: TrafficMultipliers,
    ) -> Result<Self, GraphError> {
        if locations.len() < 2 {
            return Err(GraphError::TooFewLocations {
                count: locations.len(),
            });
        }
        if connections.is_empty() {
            return Err(GraphError::NoConnections);
        }

        let depots = locations.iter().filter(|l| l.is_depot()).count();
        if depots > 1 {
            return Err(GraphError::MultipleDepots { count: depots });
        }

        let mut index = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            if location.id().is_empty() {
                return Err(GraphError::EmptyLocationId);
            }
            if !location.x().is_finite() || !location.y().is_finite() {
                return Err(GraphError::NonFiniteCoordinate(location.id().to_string()));
            }
            if index.insert(location.id().to_string(), i).is_some() {
                return Err(GraphError::DuplicateLocation(location.id().to_string()));
            }
        }

        for (level, multiplier) in traffic_multipliers.iter() {
            if !(multiplier.is_finite() && multiplier > 0.0) {
                return Err(GraphError::InvalidMultiplier {
                    level: level.to_string(),
                    multiplier,
                });
            }
        }

        // First connection listed for a pair wins.
        let mut lookup = HashMap::with_capacity(connections.len());
        for (ci, c) in connections.iter().enumerate() {
            let endpoint = |id: &str| {
                index.get(id).copied().ok_or_else(|| GraphError::UnknownEndpoint {
                    from: c.from().to_string(),
                    to: c.to().to_string(),
                    missing: id.to_string(),
                })
            };
            let a = endpoint(c.from())?;
            let b = endpoint(c.to())?;
            if !(c.distance().is_finite() && c.distance() > 0.0) {
                return Err(GraphError::InvalidDistance {
                    from: c.from().to_string(),
                    to: c.to().to_string(),
                    distance: c.distance(),
                });
            }
            lookup.entry((a.min(b), a.max(b))).or_insert(ci);
        }

        Ok(Self {
            locations,
            connections,
            traffic_multipliers,
            index,
            lookup,
        })
    }

    /// Rebuilds the graph under a different multiplier table.
    pub fn with_traffic_multipliers(
        self,
        traffic_multipliers: TrafficMultipliers,
    ) -> Result<Self, GraphError> {
        Self::new(self.locations, self.connections, traffic_multipliers)
    }

    /// All locations in the order supplied.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All connections in the order supplied.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Traffic multiplier table.
    pub fn traffic_multipliers(&self) -> &TrafficMultipliers {
        &self.traffic_multipliers
    }

    /// Number of locations (including the depot).
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Always `false` for a constructed graph; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Looks up a location by id.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.index_of(id).map(|i| &self.locations[i])
    }

    /// Position of a location in [`locations`](Self::locations).
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// The depot, if the graph has one.
    pub fn depot(&self) -> Option<&Location> {
        self.locations.iter().find(|l| l.is_depot())
    }

    /// Priority locations, in graph order.
    pub fn priority_locations(&self) -> Vec<&Location> {
        self.locations.iter().filter(|l| l.is_priority()).collect()
    }

    /// Normal locations, in graph order.
    pub fn normal_locations(&self) -> Vec<&Location> {
        self.locations.iter().filter(|l| l.is_normal()).collect()
    }

    /// Every location except the depot, in graph order.
    pub fn delivery_locations(&self) -> Vec<&Location> {
        self.locations.iter().filter(|l| !l.is_depot()).collect()
    }

    /// Number of priority locations (the size of the priority zone).
    pub fn num_priority(&self) -> usize {
        self.locations.iter().filter(|l| l.is_priority()).count()
    }

    /// Connection joining two locations, if one exists.
    pub fn connection_between(&self, a: &str, b: &str) -> Option<&Connection> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.lookup
            .get(&(i.min(j), i.max(j)))
            .map(|&ci| &self.connections[ci])
    }

    /// Base distance and traffic-weighted time between two locations.
    ///
    /// Uses the connection when present; otherwise falls back to the
    /// straight-line distance with no traffic adjustment. Returns `None` if
    /// either id is unknown.
    pub fn leg(&self, from: &str, to: &str) -> Option<Leg> {
        let a = self.location(from)?;
        let b = self.location(to)?;
        match self.connection_between(from, to) {
            Some(c) => {
                let multiplier = self.traffic_multipliers.multiplier(c.traffic());
                Some(Leg {
                    distance: c.distance(),
                    time: c.distance() * multiplier,
                })
            }
            None => {
                let d = a.distance_to(b);
                Some(Leg {
                    distance: d,
                    time: d,
                })
            }
        }
    }

    /// Traffic-weighted cost between two locations, `None` if either is unknown.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.leg(from, to).map(|leg| leg.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrafficLevel;

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
                Connection::new("P1", "N1", 2.0, TrafficLevel::Medium),
                Connection::new("N2", "P2", 1.0, TrafficLevel::High),
            ],
            TrafficMultipliers::default(),
        )
        .expect("valid graph")
    }

    #[test]
    fn test_views() {
        let g = square();
        assert_eq!(g.len(), 4);
        assert_eq!(g.priority_locations().len(), 2);
        assert_eq!(g.normal_locations().len(), 2);
        assert_eq!(g.delivery_locations().len(), 4);
        assert_eq!(g.num_priority(), 2);
        assert!(g.depot().is_none());
        assert_eq!(g.index_of("N1"), Some(2));
    }

    #[test]
    fn test_edge_weight_uses_traffic() {
        let g = square();
        assert!((g.edge_weight("P1", "N1").expect("known") - 3.0).abs() < 1e-10);
        assert!((g.edge_weight("P2", "N2").expect("known") - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_edge_weight_euclidean_fallback() {
        let g = square();
        // No P1-N2 connection: sqrt(2), no traffic adjustment
        let leg = g.leg("P1", "N2").expect("known");
        assert!((leg.distance - 2f64.sqrt()).abs() < 1e-10);
        assert!((leg.time - leg.distance).abs() < 1e-10);
    }

    #[test]
    fn test_edge_weight_unknown_node() {
        let g = square();
        assert!(g.edge_weight("P1", "X").is_none());
        assert!(g.leg("X", "P1").is_none());
    }

    #[test]
    fn test_first_duplicate_connection_wins() {
        let g = CityGraph::new(
            vec![Location::normal("A", 0.0, 0.0), Location::normal("B", 5.0, 0.0)],
            vec![
                Connection::new("A", "B", 1.0, TrafficLevel::Low),
                Connection::new("B", "A", 9.0, TrafficLevel::High),
            ],
            TrafficMultipliers::default(),
        )
        .expect("valid");
        assert_eq!(g.edge_weight("B", "A"), Some(1.0));
    }

    #[test]
    fn test_rejects_too_few_locations() {
        let err = CityGraph::new(
            vec![Location::normal("A", 0.0, 0.0)],
            vec![Connection::new("A", "A", 1.0, TrafficLevel::Low)],
            TrafficMultipliers::default(),
        )
        .unwrap_err();
        assert_eq!(err, GraphError::TooFewLocations { count: 1 });
    }

    #[test]
    fn test_rejects_empty_id() {
        let err = CityGraph::new(
            vec![Location::priority("", 0.0, 0.0), Location::normal("B", 1.0, 0.0)],
            vec![Connection::new("", "B", 1.0, TrafficLevel::Low)],
            TrafficMultipliers::default(),
        )
        .unwrap_err();
        assert_eq!(err, GraphError::EmptyLocationId);
    }

    #[test]
    fn test_rejects_no_connections() {
        let err = CityGraph::new(
            vec![Location::normal("A", 0.0, 0.0), Location::normal("B", 1.0, 0.0)],
            vec![],
            TrafficMultipliers::default(),
        )
        .unwrap_err();
        assert_eq!(err, GraphError::NoConnections);
    }

    #[test]
    fn test_rejects_multiple_depots() {
        let err = CityGraph::new(
            vec![Location::depot("D0", 0.0, 0.0), Location::depot("D1", 1.0, 0.0)],
            vec![Connection::new("D0", "D1", 1.0, TrafficLevel::Low)],
            TrafficMultipliers::default(),
        )
        .unwrap_err();
        assert_eq!(err, GraphError::MultipleDepots { count: 2 });
    }

    #[test]
    fn test_rejects_duplicate_and_unknown() {
        let dup = CityGraph::new(
            vec![Location::normal("A", 0.0, 0.0), Location::normal("A", 1.0, 0.0)],
            vec![Connection::new("A", "A", 1.0, TrafficLevel::Low)],
            TrafficMultipliers::default(),
        );
        assert!(matches!(dup, Err(GraphError::DuplicateLocation(id)) if id == "A"));

        let unknown = CityGraph::new(
            vec![Location::normal("A", 0.0, 0.0), Location::normal("B", 1.0, 0.0)],
            vec![Connection::new("A", "Z", 1.0, TrafficLevel::Low)],
            TrafficMultipliers::default(),
        );
        assert!(matches!(
            unknown,
            Err(GraphError::UnknownEndpoint { missing, .. }) if missing == "Z"
        ));
    }

    #[test]
    fn test_rejects_bad_distance_and_multiplier() {
        let locations = vec![Location::normal("A", 0.0, 0.0), Location::normal("B", 1.0, 0.0)];
        let bad_distance = CityGraph::new(
            locations.clone(),
            vec![Connection::new("A", "B", 0.0, TrafficLevel::Low)],
            TrafficMultipliers::default(),
        );
        assert!(matches!(bad_distance, Err(GraphError::InvalidDistance { .. })));

        let bad_multiplier = CityGraph::new(
            locations,
            vec![Connection::new("A", "B", 1.0, TrafficLevel::Low)],
            TrafficMultipliers::default().with_level(TrafficLevel::High, -1.0),
        );
        assert!(matches!(
            bad_multiplier,
            Err(GraphError::InvalidMultiplier { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "nodes": [
                {"id": "D0", "x": 0.0, "y": 0.0, "type": "depot"},
                {"id": "N1", "x": 1.0, "y": 0.0, "type": "normal"}
            ],
            "edges": [{"from": "D0", "to": "N1", "distance": 1.0, "traffic": "medium"}]
        }"#;
        let g: CityGraph = serde_json::from_str(json).expect("valid graph");
        assert_eq!(g.depot().map(|d| d.id()), Some("D0"));
        assert_eq!(g.edge_weight("N1", "D0"), Some(1.5));

        let bad = r#"{
            "nodes": [{"id": "D0", "x": 0.0, "y": 0.0, "type": "depot"}],
            "edges": [{"from": "D0", "to": "D0", "distance": 1.0, "traffic": "low"}]
        }"#;
        assert!(serde_json::from_str::<CityGraph>(bad).is_err());
    }

    #[test]
    fn test_with_traffic_multipliers() {
        let g = CityGraph::new(
            vec![Location::normal("A", 0.0, 0.0), Location::normal("B", 1.0, 0.0)],
            vec![Connection::new("A", "B", 2.0, TrafficLevel::High)],
            TrafficMultipliers::default(),
        )
        .expect("valid graph");
        assert_eq!(g.edge_weight("A", "B"), Some(4.0));

        let flat = g
            .clone()
            .with_traffic_multipliers(TrafficMultipliers::empty())
            .expect("valid multipliers");
        assert_eq!(flat.edge_weight("A", "B"), Some(2.0));

        let bad = TrafficMultipliers::empty().with_level(TrafficLevel::Low, 0.0);
        assert!(g.with_traffic_multipliers(bad).is_err());
    }
}
