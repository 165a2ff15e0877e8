//! Location types.

use serde::{Deserialize, Serialize};

/// Classification of a location in the city graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    /// Must be visited before every normal location.
    Priority,
    /// Regular delivery stop.
    Normal,
    /// Fixed start of the route. At most one per graph.
    Depot,
}

/// A delivery location (or the depot) in a city graph.
///
/// # Examples
///
/// ```
/// use priority_routing::models::{Location, LocationKind};
///
/// let depot = Location::depot("D0", 5.0, 5.0);
/// assert!(depot.is_depot());
///
/// let p = Location::new("P1", 8.0, 9.0, LocationKind::Priority);
/// assert!(p.is_priority());
/// assert!((depot.distance_to(&p) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: String,
    x: f64,
    y: f64,
    #[serde(rename = "type")]
    kind: LocationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: impl Into<String>, x: f64, y: f64, kind: LocationKind) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            kind,
            label: None,
        }
    }

    /// Creates a priority location.
    pub fn priority(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, x, y, LocationKind::Priority)
    }

    /// Creates a normal location.
    pub fn normal(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, x, y, LocationKind::Normal)
    }

    /// Creates a depot.
    pub fn depot(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, x, y, LocationKind::Depot)
    }

    /// Attaches a human-readable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Location classification.
    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// Human-readable label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` for priority locations.
    pub fn is_priority(&self) -> bool {
        self.kind == LocationKind::Priority
    }

    /// Returns `true` for normal locations.
    pub fn is_normal(&self) -> bool {
        self.kind == LocationKind::Normal
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.kind == LocationKind::Depot
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
