//! Unified error type for Y-bus assembly
//!
//! [`YBusError`] covers the failure modes of the core (a rejected request, or
//! a node, size or admittance the builder cannot place in the matrix) plus
//! the I/O and parsing errors raised while loading case files and
//! configuration.
//!
//! # Example
//!
//! ```ignore
//! use ybus_core::{Case, YBusResult};
//!
//! fn load_and_build(path: &str) -> YBusResult<()> {
//!     let case = Case::load(path)?;
//!     let ybus = build_checked(&case)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::NodeId;

/// Error type for all Y-bus operations.
#[derive(Error, Debug)]
pub enum YBusError {
    /// The validation gate rejected the request; carries every issue found
    #[error("Validation error: {}", .0.summary())]
    Validation(Diagnostics),

    /// A matrix needs at least one node
    #[error("No nodes in network")]
    NoNodes,

    /// A branch references a node outside `1..=n_nodes`
    #[error("Branch {branch} references {node}, outside 1..={n_nodes}")]
    NodeOutOfRange {
        branch: usize,
        node: NodeId,
        n_nodes: usize,
    },

    /// A branch touches ground under a policy that cannot represent it
    #[error("Branch {branch} connects to ground, which this stamping policy cannot represent")]
    GroundNotRepresentable { branch: usize },

    /// The dense matrix for this many nodes cannot be addressed in memory
    #[error("{n_nodes} nodes is too many for a dense Y-bus")]
    TooManyNodes { n_nodes: usize },

    /// Stamping produced a NaN or infinite entry
    #[error("Branch {branch} produced a non-finite admittance at ({row}, {col})")]
    NonFiniteAdmittance {
        branch: usize,
        row: usize,
        col: usize,
    },

    /// Case file or config parsing errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using YBusError.
pub type YBusResult<T> = Result<T, YBusError>;

impl From<serde_json::Error> for YBusError {
    fn from(err: serde_json::Error) -> Self {
        YBusError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for YBusError {
    fn from(err: toml::de::Error) -> Self {
        YBusError::Parse(err.to_string())
    }
}
