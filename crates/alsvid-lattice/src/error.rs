//! Error types for lattice construction and boundary resolution.

use crate::node::NodeId;
use thiserror::Error;

/// Errors that can occur while building or querying the volume lattice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// The noisy pipeline needs at least three measurement rounds.
    #[error("Invalid round count {cycles}: noisy decoding requires cycles > 2")]
    InvalidCycles {
        /// The rejected round count.
        cycles: u32,
    },

    /// The base single-round edge list was empty.
    #[error("Base lattice edge list is empty")]
    EmptyEdgeList,

    /// A node identifier falls outside the volume lattice range.
    #[error("Node {node} outside valid range 1..={total}")]
    NodeOutOfRange {
        /// The offending identifier.
        node: NodeId,
        /// Total node count of the volume lattice.
        total: u32,
    },

    /// No path exists between two nodes that must be connected.
    #[error("Lattice is disconnected between {from} and {to}")]
    Disconnected {
        /// Path source.
        from: NodeId,
        /// Path target.
        to: NodeId,
    },

    /// A defect's round has no boundary candidates to resolve against.
    #[error("Empty boundary candidate range for defect {defect}")]
    EmptyBoundaryRange {
        /// The defect whose round yielded no candidates.
        defect: NodeId,
    },
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;
