//! Binary variable naming: `x_<node_id>_<position>`.
//!
//! Node ids may themselves contain `_`, so the position is always taken from
//! the text after the *last* underscore.

use std::fmt;

use thiserror::Error;

const PREFIX: &str = "x_";

/// Why a variable name does not follow the `x_<node_id>_<position>` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableNameError {
    /// Name does not start with `x_`.
    #[error("missing \"x_\" prefix")]
    MissingPrefix,
    /// No `_` separates the node id from the position.
    #[error("missing position suffix")]
    MissingPosition,
    /// The suffix is not a non-negative integer.
    #[error("position {0:?} is not a non-negative integer")]
    InvalidPosition(String),
    /// The node id part is empty.
    #[error("empty node id")]
    EmptyNodeId,
}

/// A parsed (node, position) variable.
///
/// # Examples
///
/// ```
/// use priority_routing::qubo::VariableName;
///
/// let v = VariableName::new("depot_north", 3);
/// assert_eq!(v.to_string(), "x_depot_north_3");
///
/// let parsed = VariableName::parse("x_depot_north_3").unwrap();
/// assert_eq!(parsed.node_id(), "depot_north");
/// assert_eq!(parsed.position(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableName {
    node_id: String,
    position: usize,
}

impl VariableName {
    /// Creates a variable for `node_id` at `position`.
    pub fn new(node_id: impl Into<String>, position: usize) -> Self {
        Self {
            node_id: node_id.into(),
            position,
        }
    }

    /// Parses a name, splitting on the last underscore.
    pub fn parse(name: &str) -> Result<Self, VariableNameError> {
        let rest = name
            .strip_prefix(PREFIX)
            .ok_or(VariableNameError::MissingPrefix)?;
        let (node_id, position) = rest
            .rsplit_once('_')
            .ok_or(VariableNameError::MissingPosition)?;
        if position.is_empty() || !position.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VariableNameError::InvalidPosition(position.to_string()));
        }
        let position = position
            .parse()
            .map_err(|_| VariableNameError::InvalidPosition(position.to_string()))?;
        if node_id.is_empty() {
            return Err(VariableNameError::EmptyNodeId);
        }
        Ok(Self::new(node_id, position))
    }

    /// Node id part.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Route position part.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}_{}", self.node_id, self.position)
    }
}

/// Formats the variable name for `node_id` at `position`.
pub fn variable_name(node_id: &str, position: usize) -> String {
    VariableName::new(node_id, position).to_string()
}
