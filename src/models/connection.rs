//! Connections and traffic multipliers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current traffic intensity on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    /// Free-flowing traffic.
    Low,
    /// Moderate congestion.
    Medium,
    /// Heavy congestion.
    High,
}

impl TrafficLevel {
    /// All levels, lightest first.
    pub const ALL: [TrafficLevel; 3] = [
        TrafficLevel::Low,
        TrafficLevel::Medium,
        TrafficLevel::High,
    ];

    /// Name used as the key in a [`TrafficMultipliers`] table.
    pub fn name(self) -> &'static str {
        match self {
            TrafficLevel::Low => "low",
            TrafficLevel::Medium => "medium",
            TrafficLevel::High => "high",
        }
    }
}

/// An undirected connection between two locations.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{Connection, TrafficLevel};
///
/// let c = Connection::new("A", "B", 2.0, TrafficLevel::Medium);
/// assert_eq!(c.from(), "A");
/// assert_eq!(c.traffic(), TrafficLevel::Medium);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    from: String,
    to: String,
    distance: f64,
    traffic: TrafficLevel,
}

impl Connection {
    /// Creates a connection with the given base distance and traffic level.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
        traffic: TrafficLevel,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            traffic,
        }
    }

    /// First endpoint.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Second endpoint.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Base distance, before traffic adjustment.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Traffic level.
    pub fn traffic(&self) -> TrafficLevel {
        self.traffic
    }
}

/// Traffic level name → travel time multiplier.
///
/// Levels missing from the table resolve to a multiplier of 1.0.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{TrafficLevel, TrafficMultipliers};
///
/// let m = TrafficMultipliers::default();
/// assert_eq!(m.multiplier(TrafficLevel::Medium), 1.5);
///
/// let custom = TrafficMultipliers::default().with_level(TrafficLevel::High, 3.0);
/// assert_eq!(custom.multiplier(TrafficLevel::High), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrafficMultipliers {
    table: BTreeMap<String, f64>,
}

impl TrafficMultipliers {
    /// Creates an empty table (every level resolves to 1.0).
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Sets the multiplier for a level.
    pub fn with_level(mut self, level: TrafficLevel, multiplier: f64) -> Self {
        self.table.insert(level.name().to_string(), multiplier);
        self
    }

    /// Multiplier for the given level, 1.0 if absent.
    pub fn multiplier(&self, level: TrafficLevel) -> f64 {
        self.table.get(level.name()).copied().unwrap_or(1.0)
    }

    /// Iterates over `(level name, multiplier)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.table.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl Default for TrafficMultipliers {
    fn default() -> Self {
        Self::empty()
            .with_level(TrafficLevel::Low, 1.0)
            .with_level(TrafficLevel::Medium, 1.5)
            .with_level(TrafficLevel::High, 2.0)
    }
}
