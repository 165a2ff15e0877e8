//! Solver configuration: defaults, JSON, and environment overrides.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CityGraph, GraphError, TrafficLevel, TrafficMultipliers};
use crate::qubo::{PenaltyConfig, PenaltyError};
use crate::sampler::{AnnealingSampler, SamplerKind};

/// Prefix shared by every environment variable read by [`SolverSettings::from_env`].
pub const ENV_PREFIX: &str = "PRIORITY_ROUTING_";

/// Default cap on graph size accepted by the BQM solver.
pub const DEFAULT_MAX_LOCATIONS: usize = 25;

/// Invalid configuration input.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An environment value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Full variable name.
        key: String,
        /// Raw value.
        value: String,
    },
    /// Unknown sampler name.
    #[error("unknown sampler {0:?}, expected greedy, first_fit or annealing")]
    UnknownSampler(String),
    /// Malformed JSON document.
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Negative or non-finite penalty.
    #[error(transparent)]
    Penalty(#[from] PenaltyError),
    /// Zero, negative, or non-finite traffic multiplier.
    #[error("traffic multiplier for {level:?} must be positive, got {multiplier}")]
    InvalidMultiplier {
        /// Level name.
        level: String,
        /// Offending multiplier.
        multiplier: f64,
    },
}

/// Immutable solver configuration.
///
/// # Examples
///
/// ```
/// use priority_routing::settings::SolverSettings;
/// use priority_routing::sampler::SamplerKind;
///
/// let s = SolverSettings::from_json(r#"{"penalties": {"A": 50.0}, "max_locations": null}"#).unwrap();
/// assert_eq!(s.penalties.a(), 50.0);
/// assert_eq!(s.penalties.b(), 500.0);
/// assert_eq!(s.sampler, SamplerKind::Greedy);
/// assert_eq!(s.max_locations, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// BQM penalty coefficients.
    pub penalties: PenaltyConfig,
    /// Traffic multipliers applied by [`apply_traffic`](Self::apply_traffic).
    pub traffic: TrafficMultipliers,
    /// Sampler used by the BQM solver.
    pub sampler: SamplerKind,
    /// Largest graph the BQM solver accepts; `None` for no limit.
    pub max_locations: Option<usize>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            penalties: PenaltyConfig::default(),
            traffic: TrafficMultipliers::default(),
            sampler: SamplerKind::default(),
            max_locations: Some(DEFAULT_MAX_LOCATIONS),
        }
    }
}

impl SolverSettings {
    /// Parses a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads overrides from the process environment.
    ///
    /// See [`from_lookup`](Self::from_lookup) for the variables read.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` on top of the defaults.
    ///
    /// Keys, all prefixed with [`ENV_PREFIX`]: `PENALTY_A`, `PENALTY_B`,
    /// `PENALTY_BP`, `PENALTY_C`, `TRAFFIC_LOW`, `TRAFFIC_MEDIUM`,
    /// `TRAFFIC_HIGH`, `SAMPLER` (`greedy`, `first_fit` or `annealing`),
    /// `ANNEALING_SEED`, `ANNEALING_SWEEPS`, `MAX_LOCATIONS` (0 disables the
    /// limit).
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_routing::settings::SolverSettings;
    /// use priority_routing::sampler::SamplerKind;
    ///
    /// let s = SolverSettings::from_lookup(|key| match key {
    ///     "PRIORITY_ROUTING_PENALTY_B" => Some("750".into()),
    ///     "PRIORITY_ROUTING_SAMPLER" => Some("annealing".into()),
    ///     "PRIORITY_ROUTING_ANNEALING_SEED" => Some("9".into()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(s.penalties.b(), 750.0);
    /// assert!(matches!(s.sampler, SamplerKind::Annealing { seed: 9, .. }));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let defaults = PenaltyConfig::default();

        settings.penalties = PenaltyConfig::new(
            parse_var(&lookup, "PENALTY_A")?.unwrap_or(defaults.a()),
            parse_var(&lookup, "PENALTY_B")?.unwrap_or(defaults.b()),
            parse_var(&lookup, "PENALTY_BP")?.unwrap_or(defaults.bp()),
            parse_var(&lookup, "PENALTY_C")?.unwrap_or(defaults.c()),
        )?;

        for (level, suffix) in [
            (TrafficLevel::Low, "TRAFFIC_LOW"),
            (TrafficLevel::Medium, "TRAFFIC_MEDIUM"),
            (TrafficLevel::High, "TRAFFIC_HIGH"),
        ] {
            if let Some(multiplier) = parse_var(&lookup, suffix)? {
                settings.traffic = settings.traffic.with_level(level, multiplier);
            }
        }

        if let Some(name) = lookup(&env_key("SAMPLER")) {
            settings.sampler = match name.trim().to_ascii_lowercase().as_str() {
                "greedy" => SamplerKind::Greedy,
                "first_fit" => SamplerKind::FirstFit,
                "annealing" => SamplerKind::Annealing {
                    seed: parse_var(&lookup, "ANNEALING_SEED")?.unwrap_or(0),
                    sweeps: parse_var(&lookup, "ANNEALING_SWEEPS")?
                        .unwrap_or(AnnealingSampler::DEFAULT_SWEEPS),
                },
                _ => return Err(SettingsError::UnknownSampler(name)),
            };
        }

        if let Some(max) = parse_var::<usize, _>(&lookup, "MAX_LOCATIONS")? {
            settings.max_locations = (max > 0).then_some(max);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Checks the traffic table; penalties are validated on construction.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (level, multiplier) in self.traffic.iter() {
            if !(multiplier.is_finite() && multiplier > 0.0) {
                return Err(SettingsError::InvalidMultiplier {
                    level: level.to_string(),
                    multiplier,
                });
            }
        }
        Ok(())
    }

    /// Rebuilds `graph` under these traffic multipliers.
    ///
    /// Solvers read multipliers from the graph, so apply this once and hand
    /// the same graph to every solver being compared.
    pub fn apply_traffic(&self, graph: CityGraph) -> Result<CityGraph, GraphError> {
        graph.with_traffic_multipliers(self.traffic.clone())
    }
}

fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

fn parse_var<T, F>(lookup: &F, suffix: &str) -> Result<Option<T>, SettingsError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let key = env_key(suffix);
    match lookup(&key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SettingsError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let s = SolverSettings::default();
        assert_eq!(s.penalties, PenaltyConfig::default());
        assert_eq!(s.traffic.multiplier(TrafficLevel::High), 2.0);
        assert_eq!(s.sampler, SamplerKind::Greedy);
        assert_eq!(s.max_locations, Some(25));
    }

    #[test]
    fn test_empty_lookup_is_default() {
        let s = SolverSettings::from_lookup(|_| None).expect("defaults");
        assert_eq!(s, SolverSettings::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let s = SolverSettings::from_lookup(lookup_from(&[
            ("PENALTY_A", "10"),
            ("PENALTY_C", " 2.5 "),
            ("TRAFFIC_HIGH", "3.0"),
            ("SAMPLER", "First_Fit"),
            ("MAX_LOCATIONS", "0"),
        ]))
        .expect("valid");
        assert_eq!(s.penalties.a(), 10.0);
        assert_eq!(s.penalties.c(), 2.5);
        assert_eq!(s.penalties.bp(), 1000.0);
        assert_eq!(s.traffic.multiplier(TrafficLevel::High), 3.0);
        assert_eq!(s.traffic.multiplier(TrafficLevel::Low), 1.0);
        assert_eq!(s.sampler, SamplerKind::FirstFit);
        assert_eq!(s.max_locations, None);
    }

    #[test]
    fn test_lookup_annealing_defaults() {
        let s = SolverSettings::from_lookup(lookup_from(&[("SAMPLER", "annealing")]))
            .expect("valid");
        assert_eq!(
            s.sampler,
            SamplerKind::Annealing {
                seed: 0,
                sweeps: AnnealingSampler::DEFAULT_SWEEPS
            }
        );
    }

    #[test]
    fn test_lookup_errors() {
        let bad_number = SolverSettings::from_lookup(lookup_from(&[("PENALTY_B", "lots")]));
        assert!(matches!(
            bad_number,
            Err(SettingsError::InvalidValue { ref key, .. }) if key == "PRIORITY_ROUTING_PENALTY_B"
        ));

        let negative = SolverSettings::from_lookup(lookup_from(&[("PENALTY_A", "-1")]));
        assert!(matches!(negative, Err(SettingsError::Penalty(_))));

        let sampler = SolverSettings::from_lookup(lookup_from(&[("SAMPLER", "qaoa")]));
        assert!(matches!(sampler, Err(SettingsError::UnknownSampler(_))));

        let traffic = SolverSettings::from_lookup(lookup_from(&[("TRAFFIC_LOW", "0")]));
        assert!(matches!(traffic, Err(SettingsError::InvalidMultiplier { .. })));
    }

    #[test]
    fn test_from_json() {
        let s = SolverSettings::from_json(
            r#"{
                "penalties": {"A": 1.0, "B": 2.0, "Bp": 3.0, "C": 4.0},
                "traffic": {"low": 1.0, "medium": 1.2, "high": 1.4},
                "sampler": {"kind": "annealing", "seed": 5, "sweeps": 10}
            }"#,
        )
        .expect("valid");
        assert_eq!(s.penalties, PenaltyConfig::new(1.0, 2.0, 3.0, 4.0).expect("valid"));
        assert_eq!(s.traffic.multiplier(TrafficLevel::Medium), 1.2);
        assert_eq!(s.sampler, SamplerKind::Annealing { seed: 5, sweeps: 10 });
        assert_eq!(s.max_locations, Some(DEFAULT_MAX_LOCATIONS));
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            SolverSettings::from_json(r#"{"penalties": {"A": -5.0}}"#),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            SolverSettings::from_json(r#"{"traffic": {"high": -2.0}}"#),
            Err(SettingsError::InvalidMultiplier { .. })
        ));
        assert!(SolverSettings::from_json("not json").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let s = SolverSettings::default();
        let json = serde_json::to_string(&s).expect("serializable");
        assert_eq!(SolverSettings::from_json(&json).expect("valid"), s);
    }

    #[test]
    fn test_apply_traffic_changes_costs() {
        use crate::constructive::solve_baseline;
        use crate::evaluation::route_cost;
        use crate::models::{Connection, Location};

        let graph = CityGraph::new(
            vec![Location::depot("D0", 0.0, 0.0), Location::normal("N1", 2.0, 0.0)],
            vec![Connection::new("D0", "N1", 2.0, TrafficLevel::High)],
            TrafficMultipliers::default(),
        )
        .expect("valid graph");
        let route = vec!["D0".to_string(), "N1".to_string()];
        assert_eq!(graph.edge_weight("D0", "N1"), Some(4.0));

        let settings = SolverSettings::from_lookup(lookup_from(&[("TRAFFIC_HIGH", "3")]))
            .expect("valid");
        let heavy = settings.apply_traffic(graph).expect("valid multipliers");
        assert_eq!(heavy.edge_weight("D0", "N1"), Some(6.0));

        let cost = route_cost(&route, &heavy);
        assert!((cost.distance - 2.0).abs() < 1e-10);
        assert!((cost.time - 6.0).abs() < 1e-10);
        let baseline = solve_baseline(&heavy);
        assert!((baseline.travel_time - 6.0).abs() < 1e-10);
        assert_eq!(baseline.traffic_time_ratio, Some(3.0));
    }
}
