//! Domain model types for mixed-priority routing.
//!
//! Provides the core data: typed locations, traffic-aware connections, a
//! validated city graph with edge-weight resolution, and the solver result
//! shared by every strategy.

mod connection;
mod graph;
mod location;
mod result;

pub use connection::{Connection, TrafficLevel, TrafficMultipliers};
pub use graph::{CityGraph, GraphError, Leg};
pub use location::{Location, LocationKind};
pub use result::SolverResult;
