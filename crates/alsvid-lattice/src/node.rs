//! Node addressing for the space-time lattice.
//!
//! Measurement locations are named by 1-based integer identifiers,
//! partitioned into contiguous blocks of `d*(d+1)` per round. The flat
//! identifier is the external currency; internally a [`LayerCoord`]
//! carries the `(round, offset)` decomposition so that boundary and
//! temporal-projection arithmetic stays in one place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a measurement location in the volume lattice.
///
/// Valid identifiers are positive; `NodeId(0)` is reserved as the
/// sentinel physical value of the dummy matching node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel physical value carried by the dummy matching node.
    pub const SENTINEL: NodeId = NodeId(0);

    /// Whether this is the dummy sentinel rather than a lattice location.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(u32::try_from(id).expect("NodeId overflow: exceeds u32::MAX"))
    }
}

/// Fixed geometry of a decoding run: code distance and round count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeLayout {
    /// Code distance `d` (odd, >= 3).
    pub distance: u32,
    /// Number of measurement rounds in the volume lattice.
    pub cycles: u32,
}

impl LatticeLayout {
    /// Create a layout for `distance` and `cycles`.
    pub fn new(distance: u32, cycles: u32) -> Self {
        Self { distance, cycles }
    }

    /// Nodes per measurement round: `d*(d+1)`.
    #[inline]
    pub fn layer_size(&self) -> u32 {
        self.distance * (self.distance + 1)
    }

    /// Real (non-boundary) nodes per round: `d*(d-1)`.
    #[inline]
    pub fn real_per_layer(&self) -> u32 {
        self.distance * (self.distance - 1)
    }

    /// Total node count of the volume lattice: `d*(d+1)*cycles`.
    #[inline]
    pub fn total_nodes(&self) -> u32 {
        self.layer_size() * self.cycles
    }

    /// Whether `node` falls inside the volume lattice identifier range.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 >= 1 && node.0 <= self.total_nodes()
    }

    /// Decompose a flat identifier into its layer coordinate.
    #[inline]
    pub fn coord_of(&self, node: NodeId) -> LayerCoord {
        LayerCoord {
            round: node.0 / self.layer_size(),
            offset: node.0 % self.layer_size(),
        }
    }
}

/// `(round, offset)` decomposition of a flat node identifier.
///
/// The round index is `floor(id / layer_size)` on the raw 1-based
/// identifier, so an identifier that is an exact layer multiple lands in
/// the following round with offset 0. This matches the lattice family's
/// numbering convention and is relied on by the boundary resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerCoord {
    /// Measurement round index, counted from 0.
    pub round: u32,
    /// Position within the round's identifier block.
    pub offset: u32,
}

impl LayerCoord {
    /// Recompose the flat identifier for this coordinate.
    #[inline]
    pub fn flatten(&self, layout: &LatticeLayout) -> NodeId {
        NodeId(self.round * layout.layer_size() + self.offset)
    }

    /// The same offset carried forward to the final round.
    ///
    /// This is the temporal boundary projection: the node this defect
    /// would occupy if its syndrome persisted until the last round.
    #[inline]
    pub fn at_final_round(&self, layout: &LatticeLayout) -> NodeId {
        LayerCoord {
            round: layout.cycles - 1,
            offset: self.offset,
        }
        .flatten(layout)
    }
}
