//! Structural properties of lattice replication and materialization.

use alsvid_lattice::{LatticeLayout, NodeId, VolumeLattice, replicate_edges};
use proptest::prelude::*;

proptest! {
    /// The volume lattice has exactly `d*(d+1)*cycles` nodes.
    #[test]
    fn node_count_formula(d in prop::sample::select(vec![3u32, 5, 7]), cycles in 3u32..=6) {
        let layout = LatticeLayout::new(d, cycles);
        let base = vec![(NodeId(1), NodeId(2))];
        let edges = replicate_edges(&layout, &base).unwrap();
        let lattice = VolumeLattice::build(layout, &edges).unwrap();
        prop_assert_eq!(lattice.node_count() as u32, d * (d + 1) * cycles);
    }

    /// One base copy plus one replica per interior round.
    #[test]
    fn replica_count(d in prop::sample::select(vec![3u32, 5]), cycles in 3u32..=8, base_len in 1usize..=12) {
        let layout = LatticeLayout::new(d, cycles);
        let base: Vec<_> = (0..base_len as u32)
            .map(|i| (NodeId(i + 1), NodeId(i + 2)))
            .collect();
        let edges = replicate_edges(&layout, &base).unwrap();
        prop_assert_eq!(edges.len(), base.len() * (cycles as usize - 1));
    }

    /// Replication shifts every interior-round copy by whole layers.
    #[test]
    fn replicas_preserve_offsets(cycles in 3u32..=6) {
        let layout = LatticeLayout::new(3, cycles);
        let base = vec![(NodeId(2), NodeId(8)), (NodeId(3), NodeId(15))];
        let edges = replicate_edges(&layout, &base).unwrap();
        for (j, chunk) in edges.chunks(base.len()).enumerate() {
            let shift = j as u32 * layout.layer_size();
            for (&(a, b), &(base_a, base_b)) in chunk.iter().zip(&base) {
                prop_assert_eq!(a, NodeId(base_a.0 + shift));
                prop_assert_eq!(b, NodeId(base_b.0 + shift));
            }
        }
    }
}
