//! The `decode` and `ideal` commands: read a base lattice, run the
//! pipeline, print recovery chains.

use anyhow::{Context, Result, bail};
use console::style;
use std::fs;
use std::path::Path;
use tracing::info;

use alsvid_decode::{RecoveredPair, ideal_recovery, noisy_recovery};
use alsvid_lattice::{LatticeLayout, NodeId};

/// Run the noisy multi-round pipeline.
pub fn noisy(
    lattice_path: &str,
    distance: u32,
    cycles: u32,
    defects: &[u32],
    max_edge_value: Option<f64>,
    json: bool,
) -> Result<()> {
    let base = read_lattice_file(Path::new(lattice_path))?;
    let fault_nodes: Vec<NodeId> = defects.iter().copied().map(NodeId).collect();
    let layout = LatticeLayout::new(distance, cycles);
    let max_edge = max_edge_value.unwrap_or_else(|| f64::from(layout.total_nodes()));

    let recoveries = noisy_recovery(&base, distance, cycles, &fault_nodes, max_edge)
        .context("noisy decoding failed")?;
    report(&recoveries, json)
}

/// Run the single-round ideal pipeline.
pub fn ideal(
    lattice_path: &str,
    distance: u32,
    defects: &[u32],
    max_edge_value: Option<f64>,
    json: bool,
) -> Result<()> {
    let base = read_lattice_file(Path::new(lattice_path))?;
    let fault_nodes: Vec<NodeId> = defects.iter().copied().map(NodeId).collect();
    let layout = LatticeLayout::new(distance, 2);
    let max_edge = max_edge_value.unwrap_or_else(|| f64::from(layout.total_nodes()));

    let recoveries = ideal_recovery(&base, distance, &fault_nodes, max_edge)
        .context("ideal decoding failed")?;
    report(&recoveries, json)
}

/// Parse a base-lattice edge list: one edge per line, `(a, b)` tuple
/// syntax or bare `a b` / `a,b`. Blank lines and `#` comments skipped.
pub fn read_lattice_file(path: &Path) -> Result<Vec<(NodeId, NodeId)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read lattice file {}", path.display()))?;
    let mut edges = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        edges.push(
            parse_edge(line)
                .with_context(|| format!("{}:{}: bad edge '{line}'", path.display(), lineno + 1))?,
        );
    }
    if edges.is_empty() {
        bail!("lattice file {} contains no edges", path.display());
    }
    info!(edges = edges.len(), path = %path.display(), "base lattice loaded");
    Ok(edges)
}

fn parse_edge(line: &str) -> Result<(NodeId, NodeId)> {
    let inner = line
        .trim_start_matches('(')
        .trim_end_matches(')')
        .replace(',', " ");
    let mut parts = inner.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected two node identifiers");
    };
    let a: u32 = a.parse().context("first identifier is not an integer")?;
    let b: u32 = b.parse().context("second identifier is not an integer")?;
    if a == 0 || b == 0 {
        bail!("node identifiers are 1-based");
    }
    Ok((NodeId(a), NodeId(b)))
}

fn report(recoveries: &[RecoveredPair], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(recoveries)?);
        return Ok(());
    }

    let corrections: Vec<_> = recoveries.iter().filter(|r| !r.involves_dummy()).collect();
    println!(
        "{} {} matched pair(s), {} correction(s)",
        style("decoded:").green().bold(),
        recoveries.len(),
        corrections.len()
    );
    for r in recoveries {
        let chain = r
            .chain
            .iter()
            .map(|n| n.0.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        if r.involves_dummy() {
            println!(
                "  {} {} -- {}  (no correction)",
                style("dummy").dim(),
                r.first.0,
                r.second.0
            );
        } else {
            println!(
                "  {} {} -- {}  chain: {}",
                style("pair").cyan(),
                r.first.0,
                r.second.0,
                chain
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tuple_syntax() {
        assert_eq!(parse_edge("(1, 2)").unwrap(), (NodeId(1), NodeId(2)));
        assert_eq!(parse_edge("(13,25)").unwrap(), (NodeId(13), NodeId(25)));
    }

    #[test]
    fn parses_bare_syntax() {
        assert_eq!(parse_edge("1 2").unwrap(), (NodeId(1), NodeId(2)));
        assert_eq!(parse_edge("7,1").unwrap(), (NodeId(7), NodeId(1)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_edge("1").is_err());
        assert!(parse_edge("1 2 3").is_err());
        assert!(parse_edge("a b").is_err());
        assert!(parse_edge("0 2").is_err());
    }
}
