//! Shared test fixtures.

use alsvid_lattice::{LatticeLayout, NodeId, VolumeLattice, replicate_edges};

/// A d=3 single-round block: real nodes 1..=6 as a 3x2 grid, boundary
/// nodes 7..=12 attached left/right, plus the vertical edges linking
/// each real node to its successor-round copy.
pub fn base_edges() -> Vec<(NodeId, NodeId)> {
    let mut edges = vec![
        // Grid rows.
        (NodeId(1), NodeId(2)),
        (NodeId(3), NodeId(4)),
        (NodeId(5), NodeId(6)),
        // Grid columns.
        (NodeId(1), NodeId(3)),
        (NodeId(3), NodeId(5)),
        (NodeId(2), NodeId(4)),
        (NodeId(4), NodeId(6)),
        // Boundary attachments.
        (NodeId(7), NodeId(1)),
        (NodeId(9), NodeId(3)),
        (NodeId(11), NodeId(5)),
        (NodeId(8), NodeId(2)),
        (NodeId(10), NodeId(4)),
        (NodeId(12), NodeId(6)),
    ];
    for i in 1..=6 {
        edges.push((NodeId(i), NodeId(i + 12)));
    }
    edges
}

/// Replicated and materialized d=3 volume lattice.
pub fn volume(cycles: u32) -> VolumeLattice {
    let layout = LatticeLayout::new(3, cycles);
    let edges = replicate_edges(&layout, &base_edges()).unwrap();
    VolumeLattice::build(layout, &edges).unwrap()
}
