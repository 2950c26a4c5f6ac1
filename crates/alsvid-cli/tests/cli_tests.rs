//! CLI-level tests: lattice file handling and end-to-end decoding of a
//! file-backed lattice.
//!
//! The binary's line parser has its own unit tests; here we exercise the
//! same flow a user triggers, via the underlying crates and a real file.

use alsvid_decode::{ideal_recovery, noisy_recovery};
use alsvid_lattice::NodeId;
use std::io::Write;

fn write_lattice(tuple_syntax: bool) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut edges = vec![
        (1, 2),
        (3, 4),
        (5, 6),
        (1, 3),
        (3, 5),
        (2, 4),
        (4, 6),
        (7, 1),
        (9, 3),
        (11, 5),
        (8, 2),
        (10, 4),
        (12, 6),
    ];
    for i in 1..=6 {
        edges.push((i, i + 12));
    }
    writeln!(file, "# d=3 layer").unwrap();
    for (a, b) in edges {
        if tuple_syntax {
            writeln!(file, "({a}, {b})").unwrap();
        } else {
            writeln!(file, "{a} {b}").unwrap();
        }
    }
    file
}

fn read_edges(path: &std::path::Path) -> Vec<(NodeId, NodeId)> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| {
            let cleaned = l
                .trim_start_matches('(')
                .trim_end_matches(')')
                .replace(',', " ");
            let mut parts = cleaned.split_whitespace();
            (
                NodeId(parts.next().unwrap().parse().unwrap()),
                NodeId(parts.next().unwrap().parse().unwrap()),
            )
        })
        .collect()
}

#[test]
fn decodes_file_backed_lattice_tuple_syntax() {
    let file = write_lattice(true);
    let base = read_edges(file.path());
    assert_eq!(base.len(), 19);

    let recoveries = noisy_recovery(&base, 3, 3, &[NodeId(1), NodeId(2)], 36.0).unwrap();
    let correction = recoveries.iter().find(|r| !r.involves_dummy()).unwrap();
    let mut endpoints = [correction.first, correction.second];
    endpoints.sort();
    assert_eq!(endpoints, [NodeId(1), NodeId(2)]);
}

#[test]
fn decodes_file_backed_lattice_bare_syntax() {
    let file = write_lattice(false);
    let base = read_edges(file.path());

    let recoveries = ideal_recovery(&base, 3, &[NodeId(1), NodeId(6)], 24.0).unwrap();
    assert!(recoveries.iter().all(|r| !r.involves_dummy()));
}

#[test]
fn json_output_round_trips() {
    let file = write_lattice(true);
    let base = read_edges(file.path());
    let recoveries = noisy_recovery(&base, 3, 3, &[NodeId(1)], 36.0).unwrap();

    let json = serde_json::to_string(&recoveries).unwrap();
    let parsed: Vec<alsvid_decode::RecoveredPair> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, recoveries);
}
