//! Minimum-weight matching decoder for surface-code syndromes.
//!
//! Given the defect locations detected across a space-time lattice of
//! stabilizer measurements, this crate computes the most likely physical
//! correction: defects are paired with each other or discharged into the
//! code boundary by a minimum-weight matching, and each matched pair is
//! reported with the physical chain connecting it.
//!
//! # Pipeline
//!
//! 1. Replicate the single-round adjacency list into the volume lattice
//!    and materialize it (`alsvid-lattice`).
//! 2. Resolve each defect's spatial and temporal boundary proxies.
//! 3. Build the [`FaultGraph`] over defects, ghosts, and an optional
//!    parity dummy.
//! 4. Invert weights and solve the matching ([`solve_matching`]).
//! 5. Translate matched pairs back to physical chains
//!    ([`extract_recoveries`]).
//!
//! # Example
//!
//! ```rust
//! use alsvid_decode::noisy_recovery;
//! use alsvid_lattice::NodeId;
//!
//! // A d=3 layer: real nodes 1..=6 as a grid, boundary nodes 7..=12 on
//! // the sides, plus round-boundary links for each real node.
//! let mut base = vec![
//!     (1, 2), (3, 4), (5, 6), (1, 3), (3, 5), (2, 4), (4, 6),
//!     (7, 1), (9, 3), (11, 5), (8, 2), (10, 4), (12, 6),
//! ];
//! for i in 1..=6 {
//!     base.push((i, i + 12));
//! }
//! let base: Vec<_> = base.into_iter().map(|(a, b)| (NodeId(a), NodeId(b))).collect();
//!
//! let recoveries = noisy_recovery(&base, 3, 3, &[NodeId(1), NodeId(2)], 36.0).unwrap();
//! assert!(recoveries.iter().any(|r| !r.involves_dummy()));
//! ```

mod blossom;
pub mod error;
pub mod fault_graph;
pub mod matching;
pub mod recovery;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{DecodeError, DecodeResult};
pub use fault_graph::{FaultGraph, FaultKey, FaultNode, GhostIdentity, GhostKind};
pub use matching::{matching_weight, solve_matching};
pub use recovery::{RecoveredPair, extract_recoveries};

use tracing::{info, instrument};

use alsvid_lattice::{LatticeLayout, NodeId, VolumeLattice, replicate_edges};

/// Decode a noisy multi-round syndrome.
///
/// Builds the full volume lattice from `base_edges` (replicated across
/// `cycles` rounds, `cycles > 2` required), attaches unique spatial and
/// temporal ghosts to every defect, and returns one [`RecoveredPair`]
/// per matched pair. `max_edge_value` must strictly exceed every fault
/// edge weight; the total lattice node count is always a safe choice.
#[instrument(skip(base_edges, fault_nodes), fields(defects = fault_nodes.len()))]
pub fn noisy_recovery(
    base_edges: &[(NodeId, NodeId)],
    distance: u32,
    cycles: u32,
    fault_nodes: &[NodeId],
    max_edge_value: f64,
) -> DecodeResult<Vec<RecoveredPair>> {
    let layout = LatticeLayout::new(distance, cycles);
    let edges = replicate_edges(&layout, base_edges)?;
    let lattice = VolumeLattice::build(layout, &edges)?;
    let fault = FaultGraph::build(&lattice, fault_nodes, GhostIdentity::Unique, true)?;
    let pairs = solve_matching(&fault, max_edge_value)?;
    let recoveries = extract_recoveries(&fault, &pairs)?;
    info!(pairs = recoveries.len(), "noisy syndrome decoded");
    Ok(recoveries)
}

/// Decode the final noiseless round against the prepared code space.
///
/// Uses a 2-round lattice built directly from `base_edges` (no
/// replication) and spatial ghosts only, since there is no future round
/// to discharge into.
#[instrument(skip(base_edges, fault_nodes), fields(defects = fault_nodes.len()))]
pub fn ideal_recovery(
    base_edges: &[(NodeId, NodeId)],
    distance: u32,
    fault_nodes: &[NodeId],
    max_edge_value: f64,
) -> DecodeResult<Vec<RecoveredPair>> {
    if base_edges.is_empty() {
        return Err(alsvid_lattice::LatticeError::EmptyEdgeList.into());
    }
    let layout = LatticeLayout::new(distance, 2);
    let lattice = VolumeLattice::build(layout, base_edges)?;
    let fault = FaultGraph::build(&lattice, fault_nodes, GhostIdentity::Unique, false)?;
    let pairs = solve_matching(&fault, max_edge_value)?;
    let recoveries = extract_recoveries(&fault, &pairs)?;
    info!(pairs = recoveries.len(), "ideal syndrome decoded");
    Ok(recoveries)
}
