//! Seeded synthetic city graphs for experiments and tests.

mod city;

pub use city::{CityGenerator, GeneratorError, TrafficProfile, MAX_LOCATIONS, MIN_LOCATIONS};
