//! Binary quadratic model encoding of the priority routing problem.
//!
//! - [`encode`] — graph + penalties → [`BinaryQuadraticModel`], O(n³)
//! - [`decode`] — binary assignment → ordered route
//! - [`VariableName`] — the `x_<node_id>_<position>` naming contract shared
//!   with every sampler

mod bqm;
mod decoder;
mod encoder;
mod penalty;
mod variable;

pub use bqm::{Assignment, BinaryQuadraticModel};
pub use decoder::{decode, DecodeError};
pub use encoder::encode;
pub use penalty::{PenaltyConfig, PenaltyError};
pub use variable::{variable_name, VariableName, VariableNameError};
