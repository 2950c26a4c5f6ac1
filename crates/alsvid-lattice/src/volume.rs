//! The materialized space-time lattice graph.

use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::VecDeque;
use tracing::debug;

use crate::error::{LatticeError, LatticeResult};
use crate::node::{LatticeLayout, NodeId};

/// Undirected graph over every node identifier of the volume lattice.
///
/// All identifiers `1..=total_nodes` are present, including isolated
/// ones. Edges are unweighted; every path-length query downstream is a
/// hop count. Built once per decoding call and discarded afterwards.
#[derive(Debug, Clone)]
pub struct VolumeLattice {
    layout: LatticeLayout,
    graph: UnGraph<NodeId, ()>,
}

impl VolumeLattice {
    /// Materialize the lattice from an edge list.
    ///
    /// Every endpoint must fall in `1..=layout.total_nodes()`.
    pub fn build(layout: LatticeLayout, edges: &[(NodeId, NodeId)]) -> LatticeResult<Self> {
        let total = layout.total_nodes();
        let mut graph = UnGraph::with_capacity(total as usize, edges.len());
        for id in 1..=total {
            graph.add_node(NodeId(id));
        }
        for &(a, b) in edges {
            let (ia, ib) = (index_of(&layout, a)?, index_of(&layout, b)?);
            graph.add_edge(ia, ib, ());
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "volume lattice materialized"
        );
        Ok(Self { layout, graph })
    }

    /// The geometry this lattice was built for.
    pub fn layout(&self) -> &LatticeLayout {
        &self.layout
    }

    /// Total node count, `d*(d+1)*cycles`.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Hop distances from `from` to every node, indexed by `id - 1`.
    ///
    /// Unreachable nodes are `None`; disconnection is only an error once
    /// a caller actually needs a path to one of them.
    pub fn distances_from(&self, from: NodeId) -> LatticeResult<Vec<Option<u32>>> {
        let source = index_of(&self.layout, from)?;
        let mut dist = vec![None; self.graph.node_count()];
        dist[source.index()] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            let d = dist[node.index()].unwrap_or(0);
            for next in self.graph.neighbors(node) {
                if dist[next.index()].is_none() {
                    dist[next.index()] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        Ok(dist)
    }

    /// Hop distance between two nodes.
    pub fn distance(&self, from: NodeId, to: NodeId) -> LatticeResult<u32> {
        let target = index_of(&self.layout, to)?;
        let dist = self.distances_from(from)?;
        dist[target.index()].ok_or(LatticeError::Disconnected { from, to })
    }

    /// Shortest path between two nodes, endpoints included.
    ///
    /// BFS with predecessor tracking; ties resolve to the first shortest
    /// route discovered, which is stable for a fixed edge insertion order.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> LatticeResult<Vec<NodeId>> {
        let source = index_of(&self.layout, from)?;
        let target = index_of(&self.layout, to)?;
        let mut pred: Vec<Option<NodeIndex>> = vec![None; self.graph.node_count()];
        let mut seen = vec![false; self.graph.node_count()];
        seen[source.index()] = true;
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            if node == target {
                break;
            }
            for next in self.graph.neighbors(node) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    pred[next.index()] = Some(node);
                    queue.push_back(next);
                }
            }
        }
        if !seen[target.index()] {
            return Err(LatticeError::Disconnected { from, to });
        }
        let mut path = vec![self.graph[target]];
        let mut cursor = target;
        while let Some(prev) = pred[cursor.index()] {
            path.push(self.graph[prev]);
            cursor = prev;
        }
        path.reverse();
        Ok(path)
    }
}

fn index_of(layout: &LatticeLayout, node: NodeId) -> LatticeResult<NodeIndex> {
    if !layout.contains(node) {
        return Err(LatticeError::NodeOutOfRange {
            node,
            total: layout.total_nodes(),
        });
    }
    Ok(NodeIndex::new(node.0 as usize - 1))
}
