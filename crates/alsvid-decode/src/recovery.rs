//! Translation of matched pairs into physical recovery chains.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use alsvid_lattice::NodeId;

use crate::error::DecodeResult;
use crate::fault_graph::FaultGraph;

/// One matched pair, resolved to physical lattice identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredPair {
    /// Physical value of the first endpoint.
    pub first: NodeId,
    /// Physical value of the second endpoint.
    pub second: NodeId,
    /// Physical values along the connecting path, endpoints included.
    pub chain: Vec<NodeId>,
}

impl RecoveredPair {
    /// Whether this pair involves the parity dummy.
    ///
    /// Such pairs mean "no correction needed" and must be excluded from
    /// applied corrections by the caller.
    pub fn involves_dummy(&self) -> bool {
        self.first.is_sentinel() || self.second.is_sentinel()
    }
}

/// Resolve every matched pair to its physical endpoints and chain.
///
/// The chain is the shortest fault-graph route between the endpoints,
/// node by node, translated to physical values.
pub fn extract_recoveries(
    fault: &FaultGraph,
    pairs: &[(NodeIndex, NodeIndex)],
) -> DecodeResult<Vec<RecoveredPair>> {
    let mut recoveries = Vec::with_capacity(pairs.len());
    for &(a, b) in pairs {
        let chain = fault
            .hop_path(a, b)?
            .into_iter()
            .map(|idx| fault.node(idx).physical)
            .collect();
        recoveries.push(RecoveredPair {
            first: fault.node(a).physical,
            second: fault.node(b).physical,
            chain,
        });
    }
    Ok(recoveries)
}
