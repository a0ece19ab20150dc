//! Shortest-path routing core for labeled city maps.
//!
//! The crate loads a static, undirected, non-negatively weighted graph of
//! labeled locations from a simple `NODES`/`ARCS` text format and answers
//! single-source, single-destination shortest-path queries with full path
//! reconstruction.
//!
//! The three algorithmic pieces:
//! - [`graph::Graph`] - node registry with dense integer ids and per-node
//!   adjacency lists
//! - [`routing::heap::IndexedMinHeap`] - binary min-heap with an auxiliary
//!   position index for O(log n) decrease-key and O(1) membership tests
//! - [`routing::Router`] - Dijkstra traversal over both, producing a
//!   predecessor chain and the reconstructed path
//!
//! Everything is synchronous and single-threaded. A loaded [`graph::Graph`]
//! is immutable and can serve any number of sequential queries; each query
//! allocates its own search state.

pub mod errors;
pub mod geometry;
pub mod graph;
pub mod routing;

pub use graph::Graph;
pub use routing::Router;
