//! The auxiliary fault graph handed to the matching solver.
//!
//! Nodes are the syndrome defects, their boundary ("ghost") proxies, and
//! at most one dummy node inserted to even out the node count. Every
//! node carries both a role key ([`FaultKey`]) and the physical lattice
//! identifier it stands for, so the recovery step can translate any
//! matched endpoint back to a location on the lattice.

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::debug;

use alsvid_lattice::{NodeId, VolumeLattice, spatial_anchor, temporal_anchor};

use crate::error::{DecodeError, DecodeResult};

/// Which boundary a ghost proxy discharges into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostKind {
    /// Nearest boundary node within the defect's own round.
    Spatial,
    /// The defect's offset carried forward to the final round.
    Temporal,
}

/// Identity of a fault-graph node.
///
/// A physical lattice node can be referenced under several logical roles
/// without collision: a defect and a shared ghost with the same physical
/// identifier remain distinct graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKey {
    /// A detected syndrome defect.
    Defect(NodeId),
    /// A boundary proxy identified by its physical node; reusable across
    /// defects.
    SharedGhost(NodeId),
    /// A boundary proxy private to one defect.
    UniqueGhost {
        /// The defect this proxy belongs to.
        defect: NodeId,
        /// Spatial or temporal discharge.
        kind: GhostKind,
    },
    /// Parity filler; carries the sentinel physical value.
    Dummy,
}

impl FaultKey {
    /// Whether this node is a boundary proxy.
    #[inline]
    pub fn is_ghost(&self) -> bool {
        matches!(self, FaultKey::SharedGhost(_) | FaultKey::UniqueGhost { .. })
    }
}

/// Ghost node identity mode, selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostIdentity {
    /// Ghosts are named by their physical node; one lattice node may
    /// serve several defects.
    Shared,
    /// Every defect gets freshly named proxies tagged with the physical
    /// node they represent.
    Unique,
}

/// A node of the fault graph: its role plus the physical value behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultNode {
    /// Role identity.
    pub key: FaultKey,
    /// Physical lattice node, or [`NodeId::SENTINEL`] for the dummy.
    pub physical: NodeId,
}

/// Weighted graph over defects, ghosts, and at most one dummy node.
#[derive(Debug, Clone)]
pub struct FaultGraph {
    graph: UnGraph<FaultNode, f64>,
    index: FxHashMap<FaultKey, NodeIndex>,
}

impl FaultGraph {
    /// Construct the fault graph for a syndrome.
    ///
    /// Adds one node per defect, distance-weighted edges between every
    /// defect pair, each defect's boundary proxies (temporal ones only
    /// when `temporal_ghosts` is set), zero-weight edges between all
    /// ghost pairs, and a dummy node when the node count ends up odd.
    pub fn build(
        lattice: &VolumeLattice,
        defects: &[NodeId],
        identity: GhostIdentity,
        temporal_ghosts: bool,
    ) -> DecodeResult<Self> {
        let mut fault = Self {
            graph: UnGraph::default(),
            index: FxHashMap::default(),
        };

        for &defect in defects {
            if fault.index.contains_key(&FaultKey::Defect(defect)) {
                return Err(DecodeError::DuplicateDefect { node: defect });
            }
            fault.insert(FaultKey::Defect(defect), defect);
        }

        for (i, &a) in defects.iter().enumerate() {
            for &b in &defects[i + 1..] {
                let w = f64::from(lattice.distance(a, b)?);
                fault.connect(FaultKey::Defect(a), FaultKey::Defect(b), w);
            }
        }

        let mut ghosts: Vec<FaultKey> = Vec::new();
        for &defect in defects {
            let anchor = spatial_anchor(lattice, defect)?;
            let key = match identity {
                GhostIdentity::Shared => FaultKey::SharedGhost(anchor.node),
                GhostIdentity::Unique => FaultKey::UniqueGhost {
                    defect,
                    kind: GhostKind::Spatial,
                },
            };
            if !fault.index.contains_key(&key) {
                fault.insert(key, anchor.node);
                ghosts.push(key);
            }
            fault.connect(FaultKey::Defect(defect), key, anchor.weight);

            if temporal_ghosts {
                let anchor = temporal_anchor(lattice, defect)?;
                let key = match identity {
                    GhostIdentity::Shared => FaultKey::SharedGhost(anchor.node),
                    GhostIdentity::Unique => FaultKey::UniqueGhost {
                        defect,
                        kind: GhostKind::Temporal,
                    },
                };
                if !fault.index.contains_key(&key) {
                    fault.insert(key, anchor.node);
                    ghosts.push(key);
                }
                fault.connect(FaultKey::Defect(defect), key, anchor.weight);
            }
        }

        for (i, &a) in ghosts.iter().enumerate() {
            for &b in &ghosts[i + 1..] {
                fault.connect(a, b, 0.0);
            }
        }

        if fault.graph.node_count() % 2 == 1 {
            fault.insert(FaultKey::Dummy, NodeId::SENTINEL);
            for &ghost in &ghosts {
                fault.connect(FaultKey::Dummy, ghost, 0.0);
            }
        }

        debug!(
            defects = defects.len(),
            nodes = fault.graph.node_count(),
            edges = fault.graph.edge_count(),
            dummy = fault.has_dummy(),
            "fault graph constructed"
        );
        Ok(fault)
    }

    fn insert(&mut self, key: FaultKey, physical: NodeId) -> NodeIndex {
        let idx = self.graph.add_node(FaultNode { key, physical });
        self.index.insert(key, idx);
        idx
    }

    fn connect(&mut self, a: FaultKey, b: FaultKey, weight: f64) {
        let (ia, ib) = (self.index[&a], self.index[&b]);
        self.graph.update_edge(ia, ib, weight);
    }

    /// Number of nodes, dummy included.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether a parity dummy was inserted.
    pub fn has_dummy(&self) -> bool {
        self.index.contains_key(&FaultKey::Dummy)
    }

    /// The node built for `key`, if present.
    pub fn find(&self, key: &FaultKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// Role and physical value of a node.
    pub fn node(&self, idx: NodeIndex) -> &FaultNode {
        &self.graph[idx]
    }

    /// All edges as `(a, b, weight)` triples, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.graph
            .edge_indices()
            .map(|e| {
                let (a, b) = self.graph.edge_endpoints(e).expect("edge endpoints");
                (a, b, self.graph[e])
            })
    }

    /// Edge weight between two nodes, if they are connected.
    pub fn weight(&self, a: NodeIndex, b: NodeIndex) -> Option<f64> {
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    /// Unweighted shortest path between two fault-graph nodes.
    ///
    /// Matched endpoints are always adjacent, but the recovery step asks
    /// for a path rather than assuming so.
    pub fn hop_path(&self, from: NodeIndex, to: NodeIndex) -> DecodeResult<Vec<NodeIndex>> {
        let mut pred: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
        let mut queue = VecDeque::from([from]);
        pred.insert(from, from);
        while let Some(node) = queue.pop_front() {
            if node == to {
                break;
            }
            for next in self.graph.neighbors(node) {
                pred.entry(next).or_insert_with(|| {
                    queue.push_back(next);
                    node
                });
            }
        }
        if !pred.contains_key(&to) {
            return Err(DecodeError::MatchingInfeasible);
        }
        let mut path = vec![to];
        let mut cursor = to;
        while pred[&cursor] != cursor {
            cursor = pred[&cursor];
            path.push(cursor);
        }
        path.reverse();
        Ok(path)
    }
}
