//! End-to-end tests for the decoding pipeline.
//!
//! All scenarios run on a d=3 lattice whose single-round block has real
//! nodes 1..=6 in a 3x2 grid, boundary nodes 7..=12 on the sides, and a
//! vertical link from each real node to its successor-round copy. With
//! this encoding the final round receives no internal edges of its own,
//! so defects are only placed in earlier rounds.

use alsvid_decode::{DecodeError, ideal_recovery, noisy_recovery};
use alsvid_lattice::{LatticeError, NodeId};
use proptest::prelude::*;

fn base_edges() -> Vec<(NodeId, NodeId)> {
    let mut edges = vec![
        (NodeId(1), NodeId(2)),
        (NodeId(3), NodeId(4)),
        (NodeId(5), NodeId(6)),
        (NodeId(1), NodeId(3)),
        (NodeId(3), NodeId(5)),
        (NodeId(2), NodeId(4)),
        (NodeId(4), NodeId(6)),
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

// ============================================================================
// Concrete hand-checked scenario (ideal mode, single round of defects)
// ============================================================================

#[test]
fn ideal_adjacent_defects_pair_with_each_other() {
    // Defects 1 and 2 are one hop apart; discharging both to their
    // boundaries would cost 2, pairing them costs 1.
    let recoveries = ideal_recovery(&base_edges(), 3, &[NodeId(1), NodeId(2)], 24.0).unwrap();

    let correction = recoveries.iter().find(|r| !r.involves_dummy()).unwrap();
    let mut endpoints = [correction.first, correction.second];
    endpoints.sort();
    assert_eq!(endpoints, [NodeId(1), NodeId(2)]);
    assert_eq!(correction.chain.len(), 2);

    // The two leftover spatial ghosts pair with each other at weight 0.
    let ghost_pair = recoveries.iter().find(|r| *r != correction).unwrap();
    let mut ghosts = [ghost_pair.first, ghost_pair.second];
    ghosts.sort();
    assert_eq!(ghosts, [NodeId(7), NodeId(8)]);
}

#[test]
fn ideal_distant_defects_discharge_to_boundary() {
    // Defects 1 and 6 are 3 hops apart but each is adjacent to its own
    // boundary, so two boundary discharges (total 2) beat pairing (3).
    let recoveries = ideal_recovery(&base_edges(), 3, &[NodeId(1), NodeId(6)], 24.0).unwrap();
    for r in &recoveries {
        let mut endpoints = [r.first, r.second];
        endpoints.sort();
        assert!(
            endpoints == [NodeId(1), NodeId(7)] || endpoints == [NodeId(6), NodeId(12)],
            "unexpected pair {endpoints:?}"
        );
    }
}

// ============================================================================
// Noisy mode
// ============================================================================

#[test]
fn noisy_requires_more_than_two_cycles() {
    let err = noisy_recovery(&base_edges(), 3, 2, &[NodeId(1)], 100.0).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Lattice(LatticeError::InvalidCycles { cycles: 2 })
    ));
}

#[test]
fn noisy_single_defect_discharges() {
    let recoveries = noisy_recovery(&base_edges(), 3, 3, &[NodeId(1)], 36.0).unwrap();
    assert_eq!(recoveries.len(), 2);
    // Exactly one pair involves the dummy and it never carries a
    // physical correction.
    let dummies: Vec<_> = recoveries.iter().filter(|r| r.involves_dummy()).collect();
    assert_eq!(dummies.len(), 1);
    let correction = recoveries.iter().find(|r| !r.involves_dummy()).unwrap();
    assert!(!correction.chain.contains(&NodeId::SENTINEL));
    // Defect 1 discharges into adjacent boundary node 7.
    let mut endpoints = [correction.first, correction.second];
    endpoints.sort();
    assert_eq!(endpoints, [NodeId(1), NodeId(7)]);
}

#[test]
fn noisy_vertical_defect_pair_matches_through_time() {
    // Defects 1 and 13 are the same stabilizer flagged in consecutive
    // rounds, one vertical hop apart; they must pair with each other.
    let recoveries = noisy_recovery(&base_edges(), 3, 4, &[NodeId(1), NodeId(13)], 48.0).unwrap();
    let correction = recoveries.iter().find(|r| !r.involves_dummy()).unwrap();
    let mut endpoints = [correction.first, correction.second];
    endpoints.sort();
    assert_eq!(endpoints, [NodeId(1), NodeId(13)]);
    assert_eq!(correction.chain, vec![NodeId(1), NodeId(13)]);
}

#[test]
fn noisy_decoding_is_idempotent() {
    let defects = [NodeId(2), NodeId(5), NodeId(14), NodeId(15)];
    let first = noisy_recovery(&base_edges(), 3, 3, &defects, 36.0).unwrap();
    let second = noisy_recovery(&base_edges(), 3, 3, &defects, 36.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn max_edge_value_must_dominate() {
    // Defects 1 and 18 are far apart; a bound of 1.0 is below their
    // pairing weight and must be rejected, not silently mis-solved.
    let err = noisy_recovery(&base_edges(), 3, 3, &[NodeId(1), NodeId(18)], 1.0).unwrap_err();
    assert!(matches!(err, DecodeError::MaxEdgeValueTooSmall { .. }));
}

#[test]
fn noisy_decodes_crowded_syndrome() {
    // All six stabilizers flagged in round 0 plus two repeats in round
    // 1; realistic error rates produce syndromes this dense, and the
    // solver must pair every one of them.
    let defects: Vec<NodeId> = [1u32, 2, 3, 4, 5, 6, 14, 15].into_iter().map(NodeId).collect();
    let recoveries = noisy_recovery(&base_edges(), 3, 3, &defects, 36.0).unwrap();
    for &defect in &defects {
        let appearances = recoveries
            .iter()
            .filter(|r| r.first == defect || r.second == defect)
            .count();
        assert_eq!(appearances, 1, "defect {defect} matched {appearances} times");
    }
}

#[test]
fn defect_outside_lattice_is_rejected() {
    let err = noisy_recovery(&base_edges(), 3, 3, &[NodeId(37)], 36.0).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Lattice(LatticeError::NodeOutOfRange { .. })
    ));
}

// ============================================================================
// Structural properties over randomized syndromes
// ============================================================================

proptest! {
    /// Every defect appears as an endpoint of exactly one matched pair.
    #[test]
    fn defects_partition_across_pairs(
        defects in prop::collection::btree_set(
            prop::sample::select(
                (1u32..=6).chain(13..=18).map(NodeId).collect::<Vec<_>>()
            ),
            1..=5,
        )
    ) {
        let defects: Vec<NodeId> = defects.into_iter().collect();
        let recoveries = noisy_recovery(&base_edges(), 3, 3, &defects, 36.0).unwrap();
        for &defect in &defects {
            let appearances = recoveries
                .iter()
                .filter(|r| r.first == defect || r.second == defect)
                .count();
            prop_assert_eq!(appearances, 1, "defect {} matched {} times", defect, appearances);
        }
        // Pair count covers defects, ghosts, and at most one dummy.
        prop_assert!(recoveries.len() >= defects.len().div_ceil(2));
    }

    /// Rerunning the pipeline reproduces the identical result.
    #[test]
    fn pipeline_is_deterministic(
        defects in prop::collection::btree_set(
            prop::sample::select(
                (1u32..=6).chain(13..=18).map(NodeId).collect::<Vec<_>>()
            ),
            1..=5,
        )
    ) {
        let defects: Vec<NodeId> = defects.into_iter().collect();
        let first = noisy_recovery(&base_edges(), 3, 3, &defects, 36.0).unwrap();
        let second = noisy_recovery(&base_edges(), 3, 3, &defects, 36.0).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The dummy sentinel never shows up in an applied correction chain.
    #[test]
    fn sentinel_confined_to_dummy_pairs(
        defects in prop::collection::btree_set(
            prop::sample::select(
                (1u32..=6).chain(13..=18).map(NodeId).collect::<Vec<_>>()
            ),
            1..=5,
        )
    ) {
        let defects: Vec<NodeId> = defects.into_iter().collect();
        let recoveries = noisy_recovery(&base_edges(), 3, 3, &defects, 36.0).unwrap();
        for r in recoveries.iter().filter(|r| !r.involves_dummy()) {
            prop_assert!(!r.chain.contains(&NodeId::SENTINEL));
        }
    }
}
