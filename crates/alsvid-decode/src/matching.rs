//! Minimum-weight pairing via inverted maximum-weight matching.
//!
//! The solver replaces every fault edge weight `w` with
//! `max_edge_value - w` and then finds a maximum-weight matching of
//! maximum cardinality. Because the transform is strictly decreasing,
//! the result is exactly the minimum-weight perfect matching under the
//! original weights.
//!
//! The matching primitive itself is a commodity subroutine: the
//! polynomial blossom algorithm in the crate-private `blossom` module.
//! Syndrome size is bounded only by the lattice, not by the solver.

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::blossom;
use crate::error::{DecodeError, DecodeResult};
use crate::fault_graph::FaultGraph;

/// Solve the minimum-weight pairing on a fault graph.
///
/// `max_edge_value` must be strictly greater than every edge weight;
/// anything else is rejected as a configuration error rather than
/// silently producing a wrong matching. Returned pairs cover every
/// node, ordered by their first endpoint; the solver is deterministic
/// for a given fault graph.
pub fn solve_matching(
    fault: &FaultGraph,
    max_edge_value: f64,
) -> DecodeResult<Vec<(NodeIndex, NodeIndex)>> {
    let n = fault.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n % 2 == 1 {
        // The dummy safeguard keeps the node count even; surface it if
        // a caller hands us a graph where it did not.
        return Err(DecodeError::MatchingInfeasible);
    }

    let mut inverted = Vec::new();
    for (a, b, w) in fault.edges() {
        if w >= max_edge_value {
            return Err(DecodeError::MaxEdgeValueTooSmall {
                max_edge_value,
                weight: w,
            });
        }
        inverted.push((a.index(), b.index(), max_edge_value - w));
    }

    let mates = blossom::maximum_weight_matching(n, &inverted);
    let mut pairs = Vec::with_capacity(n / 2);
    for (i, mate) in mates.iter().enumerate() {
        let Some(j) = *mate else {
            return Err(DecodeError::MatchingInfeasible);
        };
        if i < j {
            pairs.push((NodeIndex::new(i), NodeIndex::new(j)));
        }
    }
    debug!(pairs = pairs.len(), "matching solved");
    Ok(pairs)
}

/// Total original weight of a set of matched pairs.
///
/// Useful for asserting optimality. Returns `None` when any pair is
/// not an actual fault-graph edge, so a caller bug surfaces instead of
/// shrinking the total.
pub fn matching_weight(fault: &FaultGraph, pairs: &[(NodeIndex, NodeIndex)]) -> Option<f64> {
    pairs
        .iter()
        .try_fold(0.0, |acc, &(a, b)| Some(acc + fault.weight(a, b)?))
}
