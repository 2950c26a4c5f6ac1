//! Error types for the decoding pipeline.

use alsvid_lattice::{LatticeError, NodeId};
use thiserror::Error;

/// Errors that can occur while decoding a syndrome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Lattice construction or lookup failed.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// The same defect identifier was supplied more than once.
    #[error("Duplicate defect {node} in syndrome")]
    DuplicateDefect {
        /// The repeated identifier.
        node: NodeId,
    },

    /// The caller-supplied weight bound does not dominate every edge.
    ///
    /// The inversion `max_edge_value - w` is only order-reversing when
    /// the bound is strictly above all weights; a violation would make
    /// the matching silently wrong, so it is rejected instead.
    #[error("max_edge_value {max_edge_value} does not exceed fault edge weight {weight}")]
    MaxEdgeValueTooSmall {
        /// The rejected bound.
        max_edge_value: f64,
        /// The first weight found at or above the bound.
        weight: f64,
    },

    /// No perfect matching exists on the fault graph.
    ///
    /// The dummy-node safeguard makes this unreachable for well-formed
    /// inputs; it is surfaced rather than swallowed if it ever occurs.
    #[error("Fault graph admits no perfect matching")]
    MatchingInfeasible,
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
