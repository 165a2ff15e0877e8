//! Penalty coefficients for the BQM encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected penalty coefficient.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("penalty {name} must be finite and non-negative, got {value}")]
pub struct PenaltyError {
    /// Coefficient name (`A`, `B`, `Bp` or `C`).
    pub name: &'static str,
    /// Offending value.
    pub value: f64,
}

/// Immutable penalty configuration.
///
/// - `A` — permutation (one-hot) penalty
/// - `B` — priority-ordering penalty
/// - `Bp` — priority-coverage penalty
/// - `C` — weight of the travel-cost objective
///
/// # Examples
///
/// ```
/// use priority_routing::qubo::PenaltyConfig;
///
/// let p = PenaltyConfig::default();
/// assert_eq!((p.a(), p.b(), p.bp(), p.c()), (100.0, 500.0, 1000.0, 1.0));
///
/// assert!(PenaltyConfig::new(-1.0, 0.0, 0.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPenalties", into = "RawPenalties")]
pub struct PenaltyConfig {
    a: f64,
    b: f64,
    bp: f64,
    c: f64,
}

impl PenaltyConfig {
    /// Validates and creates a configuration.
    pub fn new(a: f64, b: f64, bp: f64, c: f64) -> Result<Self, PenaltyError> {
        for (name, value) in [("A", a), ("B", b), ("Bp", bp), ("C", c)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PenaltyError { name, value });
            }
        }
        Ok(Self { a, b, bp, c })
    }

    /// Permutation penalty.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Priority-ordering penalty.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Priority-coverage penalty.
    pub fn bp(&self) -> f64 {
        self.bp
    }

    /// Objective weight.
    pub fn c(&self) -> f64 {
        self.c
    }
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            a: 100.0,
            b: 500.0,
            bp: 1000.0,
            c: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawPenalties {
    #[serde(rename = "A", default = "default_a")]
    a: f64,
    #[serde(rename = "B", default = "default_b")]
    b: f64,
    #[serde(rename = "Bp", default = "default_bp")]
    bp: f64,
    #[serde(rename = "C", default = "default_c")]
    c: f64,
}

fn default_a() -> f64 {
    PenaltyConfig::default().a
}

fn default_b() -> f64 {
    PenaltyConfig::default().b
}

fn default_bp() -> f64 {
    PenaltyConfig::default().bp
}

fn default_c() -> f64 {
    PenaltyConfig::default().c
}

impl TryFrom<RawPenalties> for PenaltyConfig {
    type Error = PenaltyError;

    fn try_from(raw: RawPenalties) -> Result<Self, Self::Error> {
        PenaltyConfig::new(raw.a, raw.b, raw.bp, raw.c)
    }
}

impl From<PenaltyConfig> for RawPenalties {
    fn from(p: PenaltyConfig) -> Self {
        Self {
            a: p.a,
            b: p.b,
            bp: p.bp,
            c: p.c,
        }
    }
}
