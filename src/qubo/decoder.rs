//! Assignment → route decoding.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::bqm::Assignment;
use super::variable::{VariableName, VariableNameError};

/// A corrupt assignment: something the encoder could never have produced.
///
/// Well-formed but infeasible assignments (empty positions, a location used
/// twice) are not errors; they decode to routes that fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The variable name does not follow `x_<node_id>_<position>`.
    #[error("malformed variable {name:?}: {source}")]
    MalformedVariable {
        /// Offending name.
        name: String,
        /// Grammar violation.
        #[source]
        source: VariableNameError,
    },
    /// A value other than 0 or 1.
    #[error("variable {name:?} has non-binary value {value}")]
    NonBinaryValue {
        /// Offending name.
        name: String,
        /// Offending value.
        value: u8,
    },
    /// The node id is not one of the delivery locations.
    #[error("variable {name:?} refers to unknown location {node_id:?}")]
    UnknownLocation {
        /// Offending name.
        name: String,
        /// Parsed node id.
        node_id: String,
    },
    /// The position is outside `0..n`.
    #[error("variable {name:?} has position {position}, expected < {len}")]
    PositionOutOfRange {
        /// Offending name.
        name: String,
        /// Parsed position.
        position: usize,
        /// Number of delivery locations.
        len: usize,
    },
}

/// Decodes a binary assignment into an ordered route.
///
/// Every 1-valued variable places its location at its position. Positions
/// with no 1-valued variable are dropped, so an infeasible assignment may
/// decode to a route shorter than `delivery_ids`. Locations sharing a
/// position are all kept, in `delivery_ids` order. `depot_id`, when given,
/// is prepended unconditionally.
///
/// # Errors
///
/// Returns [`DecodeError`] if any variable is malformed, non-binary, refers
/// to a location outside `delivery_ids`, or has a position `>= n`.
///
/// # Examples
///
/// ```
/// use priority_routing::qubo::{decode, Assignment};
///
/// let mut x = Assignment::new();
/// x.insert("x_B_0".into(), 1);
/// x.insert("x_A_1".into(), 1);
/// x.insert("x_A_0".into(), 0);
/// x.insert("x_B_1".into(), 0);
///
/// let ids = vec!["A".to_string(), "B".to_string()];
/// assert_eq!(decode(&x, &ids, Some("D0")).unwrap(), vec!["D0", "B", "A"]);
/// ```
pub fn decode(
    assignment: &Assignment,
    delivery_ids: &[String],
    depot_id: Option<&str>,
) -> Result<Vec<String>, DecodeError> {
    let n = delivery_ids.len();
    let order: HashMap<&str, usize> = delivery_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut slots: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (name, &value) in assignment {
        let var = VariableName::parse(name).map_err(|source| DecodeError::MalformedVariable {
            name: name.clone(),
            source,
        })?;
        if value > 1 {
            return Err(DecodeError::NonBinaryValue {
                name: name.clone(),
                value,
            });
        }
        let node = order
            .get(var.node_id())
            .copied()
            .ok_or_else(|| DecodeError::UnknownLocation {
                name: name.clone(),
                node_id: var.node_id().to_string(),
            })?;
        if var.position() >= n {
            return Err(DecodeError::PositionOutOfRange {
                name: name.clone(),
                position: var.position(),
                len: n,
            });
        }
        if value == 1 {
            slots[var.position()].push(node);
        }
    }

    let mut route = Vec::with_capacity(n + 1);
    if let Some(depot) = depot_id {
        route.push(depot.to_string());
    }
    for slot in &mut slots {
        slot.sort_unstable();
        route.extend(slot.iter().map(|&i| delivery_ids[i].clone()));
    }

    let filled = slots.iter().filter(|s| !s.is_empty()).count();
    debug!(positions = n, filled, route_len = route.len(), "decoded assignment");
    Ok(route)
}
