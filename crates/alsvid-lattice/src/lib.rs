//! Space-time lattice construction for surface-code syndrome decoding.
//!
//! This crate owns the geometric half of the decoder: it expands a
//! single-round stabilizer adjacency list into the multi-round "volume"
//! lattice, materializes it as a graph, and resolves the boundary proxy
//! nodes a defect can be discharged into.
//!
//! # Overview
//!
//! Measurement locations are flat 1-based identifiers partitioned into
//! blocks of `d*(d+1)` per round ([`LatticeLayout`]). The first `d*(d-1)`
//! identifiers of each block are real stabilizer measurements; the tail
//! holds boundary nodes. [`replicate_edges`] copies the base round's
//! edges across interior rounds, [`VolumeLattice`] materializes the
//! result, and [`spatial_anchor`] / [`temporal_anchor`] find each
//! defect's nearest boundary proxies.
//!
//! # Example
//!
//! ```rust
//! use alsvid_lattice::{LatticeLayout, NodeId, VolumeLattice, replicate_edges};
//!
//! let layout = LatticeLayout::new(3, 3);
//! let base = vec![(NodeId(1), NodeId(2)), (NodeId(1), NodeId(13))];
//! let edges = replicate_edges(&layout, &base).unwrap();
//! let lattice = VolumeLattice::build(layout, &edges).unwrap();
//! assert_eq!(lattice.node_count(), 36);
//! ```

pub mod boundary;
pub mod error;
pub mod node;
pub mod replicate;
pub mod volume;

pub use boundary::{Anchor, TEMPORAL_BIAS, spatial_anchor, temporal_anchor};
pub use error::{LatticeError, LatticeResult};
pub use node::{LatticeLayout, LayerCoord, NodeId};
pub use replicate::replicate_edges;
pub use volume::VolumeLattice;
