//! Boundary ("ghost") resolution for defect nodes.
//!
//! A defect that has no companion defect is discharged into the code
//! boundary instead: either sideways, to the nearest boundary node of its
//! own round, or forward in time, to the node obtained by carrying its
//! in-round offset to the final round. Temporal discharge gets a small
//! fixed discount so that, at equal distance, the matching prefers it.

use tracing::debug;

use crate::error::{LatticeError, LatticeResult};
use crate::node::NodeId;
use crate::volume::VolumeLattice;

/// Discount applied to temporal boundary edges.
///
/// Strictly smaller than any hop-count difference, so it only ever breaks
/// ties between otherwise equal spatial and temporal discharge routes.
pub const TEMPORAL_BIAS: f64 = 0.1;

/// A resolved boundary proxy: the physical node and its edge weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Physical lattice node serving as the boundary proxy.
    pub node: NodeId,
    /// Weight of the defect-to-proxy edge in the fault graph.
    pub weight: f64,
}

/// Nearest spatial boundary node for `defect`, searched by distance.
///
/// Candidates are the non-real tail of the defect's round block,
/// `[round*layer + real + 1, (round+1)*layer]`. Ties resolve to the
/// lowest identifier. Any unreachable candidate means the lattice is
/// disconnected, which is a caller error and surfaced as such.
pub fn spatial_anchor(lattice: &VolumeLattice, defect: NodeId) -> LatticeResult<Anchor> {
    let layout = lattice.layout();
    let round = layout.coord_of(defect).round;
    let first = round * layout.layer_size() + layout.real_per_layer() + 1;
    let last = (round + 1) * layout.layer_size();
    if first > last {
        return Err(LatticeError::EmptyBoundaryRange { defect });
    }

    let dist = lattice.distances_from(defect)?;
    let mut best: Option<Anchor> = None;
    for candidate in first..=last {
        let candidate = NodeId(candidate);
        if !layout.contains(candidate) {
            return Err(LatticeError::NodeOutOfRange {
                node: candidate,
                total: layout.total_nodes(),
            });
        }
        let hops = dist[candidate.0 as usize - 1].ok_or(LatticeError::Disconnected {
            from: defect,
            to: candidate,
        })?;
        let closer = match best {
            Some(anchor) => f64::from(hops) < anchor.weight,
            None => true,
        };
        if closer {
            best = Some(Anchor {
                node: candidate,
                weight: f64::from(hops),
            });
        }
    }
    let anchor = best.ok_or(LatticeError::EmptyBoundaryRange { defect })?;
    debug!(%defect, proxy = %anchor.node, weight = anchor.weight, "spatial boundary resolved");
    Ok(anchor)
}

/// Temporal boundary node for `defect`, computed by index arithmetic.
///
/// The proxy is the defect's offset carried forward to the final round;
/// its edge weight is the hop distance minus [`TEMPORAL_BIAS`].
pub fn temporal_anchor(lattice: &VolumeLattice, defect: NodeId) -> LatticeResult<Anchor> {
    let layout = lattice.layout();
    let proxy = layout.coord_of(defect).at_final_round(layout);
    let hops = lattice.distance(defect, proxy)?;
    let anchor = Anchor {
        node: proxy,
        weight: f64::from(hops) - TEMPORAL_BIAS,
    };
    debug!(%defect, proxy = %anchor.node, weight = anchor.weight, "temporal boundary resolved");
    Ok(anchor)
}
