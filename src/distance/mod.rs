//! Distance and travel time matrices.
//!
//! Provides a dense, traffic-aware travel matrix resolved from a city graph.

mod matrix;

pub use matrix::TravelMatrix;
