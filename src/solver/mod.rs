//! End-to-end BQM pipeline: encode → sample → decode → validate.
//!
//! - [`QuboSolver`] — owns penalties and a [`Sampler`](crate::sampler::Sampler)
//! - [`SolveError`] — corrupt sampler output or an oversized graph

mod pipeline;

pub use pipeline::{QuboSolver, SolveError};
