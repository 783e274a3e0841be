//! Routing graphs and shortest paths for highway placement.
//!
//! This crate turns a set of planar nodes (anchors followed by waypoints) into
//! routing graphs and answers shortest-path queries on them.
//!
//! # Overview
//!
//! - **Graphs** ([`graph::RoutingGraph`]): the two-layer water/highway graph
//!   used for costing, and the single-layer visibility graph used for display
//! - **Shortest paths** ([`dijkstra::shortest_path`],
//!   [`dijkstra::ShortestPathTree`]): Dijkstra with deterministic tie-breaking
//!
//! # Quick Start
//!
//! ```
//! use route_pathfind::{RoutingGraph, shortest_path};
//! use route_types::LayerCosts;
//! use cf_planar::Obstacle;
//! use nalgebra::Point2;
//!
//! // Two ports with an island between them and two waypoints to the north
//! let nodes = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(400.0, 0.0),
//!     Point2::new(100.0, 150.0),
//!     Point2::new(300.0, 150.0),
//! ];
//! let island = Obstacle::new(vec![
//!     Point2::new(150.0, -100.0),
//!     Point2::new(250.0, -100.0),
//!     Point2::new(250.0, 100.0),
//!     Point2::new(150.0, 100.0),
//! ]);
//!
//! let costs = LayerCosts::default().with_switch(10.0);
//! let graph = RoutingGraph::layered(&nodes, &[island], 500.0, &costs, 2);
//!
//! let route = shortest_path(&graph, 0, 1);
//! assert!(route.is_reachable());
//!
//! // The route leaves the water layer to ride the highway between waypoints
//! assert!(route.path.iter().any(|&i| i >= nodes.len()));
//! ```
//!
//! # Node Indexing
//!
//! For a node set of size `N`, layered graph index `i < N` is the water copy
//! of node `i` and `N + i` its highway copy. Use
//! [`graph::RoutingGraph::base_index`] to map a path back to node positions.

#![doc(html_root_url = "https://docs.rs/route-pathfind/0.3.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod dijkstra;
pub mod graph;

// Re-export main types for convenience
pub use dijkstra::{ShortestPath, ShortestPathTree, shortest_path};
pub use graph::{Layer, RoutingGraph};
