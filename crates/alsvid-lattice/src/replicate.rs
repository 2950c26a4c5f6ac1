//! Replication of a single-round edge list across measurement rounds.

use crate::error::{LatticeError, LatticeResult};
use crate::node::{LatticeLayout, NodeId};

/// Expand a single-round edge list into the volume-lattice edge list.
///
/// The base edges are kept as-is for the first round; each interior round
/// index `j` in `1..=cycles-2` contributes a copy offset by
/// `j * layer_size`. Round-boundary connectivity (and the final round's
/// internal edges) must already be encoded by the base edge list; this
/// function only replicates.
pub fn replicate_edges(
    layout: &LatticeLayout,
    base_edges: &[(NodeId, NodeId)],
) -> LatticeResult<Vec<(NodeId, NodeId)>> {
    if layout.cycles <= 2 {
        return Err(LatticeError::InvalidCycles {
            cycles: layout.cycles,
        });
    }
    if base_edges.is_empty() {
        return Err(LatticeError::EmptyEdgeList);
    }

    let inc = layout.layer_size();
    let mut volume = base_edges.to_vec();
    for j in 1..=layout.cycles - 2 {
        for &(a, b) in base_edges {
            volume.push((NodeId(a.0 + j * inc), NodeId(b.0 + j * inc)));
        }
    }
    Ok(volume)
}
