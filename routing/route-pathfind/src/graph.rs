//! Routing graphs over a set of planar nodes.
//!
//! A node set is the anchors followed by the candidate waypoints. Two nodes
//! can see each other when they are at most `radius` apart and the segment
//! between them does not properly cross an obstacle.
//!
//! Two graph shapes are built from that rule:
//!
//! - **Layered** ([`RoutingGraph::layered`]): `2N` nodes. Index `i < N` is the
//!   water copy of node `i`, index `N + i` its highway copy. Visible pairs get
//!   a water edge; visible waypoint pairs also get a cheaper highway edge.
//!   Every node has a mode-switch edge between its two copies.
//! - **Visibility** ([`RoutingGraph::visibility`]): `N` nodes, one edge per
//!   visible pair weighted by distance. Used for display.
//!
//! # Example
//!
//! ```
//! use route_pathfind::graph::{Layer, RoutingGraph};
//! use route_types::LayerCosts;
//! use nalgebra::Point2;
//!
//! // One anchor and two waypoints in a row, 100 units apart
//! let nodes = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(100.0, 0.0),
//!     Point2::new(200.0, 0.0),
//! ];
//! let graph = RoutingGraph::layered(&nodes, &[], 150.0, &LayerCosts::default(), 1);
//!
//! assert_eq!(graph.node_count(), 6);
//! assert_eq!(graph.weight(0, 1), Some(100.0));          // water
//! assert_eq!(graph.weight(4, 5), Some(60.0));           // highway between waypoints
//! assert_eq!(graph.weight(3, 4), None);                 // anchors have no highway edges
//! assert_eq!(graph.weight(0, 3), Some(200.0));          // mode switch
//! assert_eq!(graph.layer_of(4), Layer::Highway);
//! assert_eq!(graph.base_index(4), 1);
//! ```

use cf_planar::{Obstacle, segment_crosses_any_obstacle};
use hashbrown::HashMap;
use nalgebra::Point2;
use route_types::LayerCosts;

/// Which copy of a node an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Ordinary transit; present in both graph shapes.
    Water,
    /// Highway copy; only present in layered graphs.
    Highway,
}

/// An undirected weighted graph stored as adjacency lists plus a weight map.
///
/// Weights are stored for both orientations of every edge, so
/// `weight(u, v) == weight(v, u)`.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    adjacency: Vec<Vec<usize>>,
    weights: HashMap<(usize, usize), f64>,
    base_count: usize,
    layered: bool,
}

impl RoutingGraph {
    /// Creates a graph with `node_count` isolated single-layer nodes.
    #[must_use]
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            weights: HashMap::new(),
            base_count: node_count,
            layered: false,
        }
    }

    /// Builds the two-layer graph for one node set.
    ///
    /// The first `anchor_count` nodes are anchors; they get water edges and a
    /// mode switch, but never highway edges to each other or to waypoints.
    #[must_use]
    pub fn layered(
        nodes: &[Point2<f64>],
        obstacles: &[Obstacle],
        radius: f64,
        costs: &LayerCosts,
        anchor_count: usize,
    ) -> Self {
        let n = nodes.len();
        let mut graph = Self {
            adjacency: vec![Vec::new(); 2 * n],
            weights: HashMap::with_capacity(4 * n),
            base_count: n,
            layered: true,
        };

        for_each_visible_pair(nodes, obstacles, radius, |i, j, d| {
            graph.add_edge(i, j, costs.water() * d);
            if i >= anchor_count && j >= anchor_count {
                graph.add_edge(n + i, n + j, costs.highway() * d);
            }
        });
        for i in 0..n {
            graph.add_edge(i, n + i, costs.switch());
        }
        graph
    }

    /// Builds the single-layer visibility graph, weighted by distance.
    #[must_use]
    pub fn visibility(nodes: &[Point2<f64>], obstacles: &[Obstacle], radius: f64) -> Self {
        let mut graph = Self::with_nodes(nodes.len());
        for_each_visible_pair(nodes, obstacles, radius, |i, j, d| {
            graph.add_edge(i, j, d);
        });
        graph
    }

    /// Adds an undirected edge, replacing the weight if it already exists.
    ///
    /// Indices outside the graph are ignored.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) {
        if u >= self.adjacency.len() || v >= self.adjacency.len() {
            return;
        }
        if self.weights.insert((u, v), weight).is_none() {
            self.adjacency[u].push(v);
            if u != v {
                self.adjacency[v].push(u);
            }
        }
        self.weights.insert((v, u), weight);
    }

    /// Total number of graph nodes (`2N` for layered graphs).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of nodes in the underlying node set (`N`).
    #[must_use]
    pub const fn base_count(&self) -> usize {
        self.base_count
    }

    /// Returns `true` for two-layer graphs.
    #[must_use]
    pub const fn is_layered(&self) -> bool {
        self.layered
    }

    /// Maps a graph index back to its node-set index.
    #[must_use]
    pub const fn base_index(&self, index: usize) -> usize {
        if self.layered && index >= self.base_count {
            index - self.base_count
        } else {
            index
        }
    }

    /// Returns the layer a graph index belongs to.
    #[must_use]
    pub const fn layer_of(&self, index: usize) -> Layer {
        if self.layered && index >= self.base_count {
            Layer::Highway
        } else {
            Layer::Water
        }
    }

    /// Returns the neighbors of a node, or an empty slice if out of range.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns the weight of edge `u -> v`.
    #[must_use]
    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.weights.get(&(u, v)).copied()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(u, list)| list.iter().filter(|&&v| u <= v).count())
            .sum()
    }

    /// Lists every edge once as `(u, v)` with `u < v`, sorted.
    #[must_use]
    pub fn undirected_edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Appends a neighbor without recording a weight.
    #[cfg(test)]
    pub(crate) fn push_unweighted_neighbor(&mut self, u: usize, v: usize) {
        if let Some(list) = self.adjacency.get_mut(u) {
            list.push(v);
        }
    }
}

/// Calls `visit(i, j, distance)` for every visible pair `i < j`.
fn for_each_visible_pair(
    nodes: &[Point2<f64>],
    obstacles: &[Obstacle],
    radius: f64,
    mut visit: impl FnMut(usize, usize, f64),
) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let d = nalgebra::distance(&nodes[i], &nodes[j]);
            if d <= radius && !segment_crosses_any_obstacle(&nodes[i], &nodes[j], obstacles) {
                visit(i, j, d);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall() -> Obstacle {
        Obstacle::new(vec![
            Point2::new(45.0, -50.0),
            Point2::new(55.0, -50.0),
            Point2::new(55.0, 50.0),
            Point2::new(45.0, 50.0),
        ])
    }

    #[test]
    fn test_layered_topology() {
        // 2 anchors, 2 waypoints, all within reach
        let nodes = [
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(0.0, 40.0),
            Point2::new(30.0, 40.0),
        ];
        let costs = LayerCosts::default();
        let graph = RoutingGraph::layered(&nodes, &[], 1000.0, &costs, 2);

        assert!(graph.is_layered());
        assert_eq!(graph.node_count(), 8);
        assert_eq!(graph.base_count(), 4);

        for i in 0..4 {
            assert_relative_eq!(graph.weight(i, 4 + i).unwrap(), costs.switch());
            assert_relative_eq!(graph.weight(4 + i, i).unwrap(), costs.switch());
        }

        // No highway edge touches an anchor's highway copy except its switch
        assert_eq!(graph.neighbors(4), &[0]);
        assert_eq!(graph.neighbors(5), &[1]);
        assert!(graph.weight(4, 5).is_none());
        assert!(graph.weight(4, 6).is_none());

        // Waypoint highway edge is scaled by the highway cost
        assert_relative_eq!(graph.weight(6, 7).unwrap(), 0.6 * 30.0);
        assert_relative_eq!(graph.weight(2, 3).unwrap(), 30.0);
        assert_relative_eq!(graph.weight(0, 3).unwrap(), 50.0);

        // 6 water + 1 highway + 4 switches
        assert_eq!(graph.edge_count(), 11);
    }

    #[test]
    fn test_radius_limits_edges() {
        let nodes = [Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)];
        let graph = RoutingGraph::visibility(&nodes, &[], 99.0);
        assert_eq!(graph.edge_count(), 0);

        // Exactly at the radius still connects
        let graph = RoutingGraph::visibility(&nodes, &[], 100.0);
        assert_relative_eq!(graph.weight(0, 1).unwrap(), 100.0);
    }

    #[test]
    fn test_obstacle_blocks_edge() {
        let nodes = [
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(50.0, 80.0),
        ];
        let graph = RoutingGraph::visibility(&nodes, &[wall()], 500.0);
        assert!(graph.weight(0, 1).is_none());
        assert!(graph.weight(0, 2).is_some());
        assert!(graph.weight(1, 2).is_some());
    }

    #[test]
    fn test_isolated_node_keeps_switch_edge() {
        let nodes = [Point2::new(0.0, 0.0), Point2::new(1000.0, 0.0)];
        let graph = RoutingGraph::layered(&nodes, &[], 10.0, &LayerCosts::default(), 1);
        assert_eq!(graph.neighbors(1), &[3]);
        assert_eq!(graph.neighbors(3), &[1]);
    }

    #[test]
    fn test_index_mapping() {
        let nodes = [Point2::new(0.0, 0.0); 3];
        let graph = RoutingGraph::layered(&nodes, &[], 1.0, &LayerCosts::default(), 1);
        assert_eq!(graph.base_index(2), 2);
        assert_eq!(graph.base_index(5), 2);
        assert_eq!(graph.layer_of(2), Layer::Water);
        assert_eq!(graph.layer_of(3), Layer::Highway);

        let flat = RoutingGraph::visibility(&nodes, &[], 1.0);
        assert_eq!(flat.base_index(2), 2);
        assert_eq!(flat.layer_of(2), Layer::Water);
    }

    #[test]
    fn test_undirected_edges_sorted_and_unique() {
        let mut graph = RoutingGraph::with_nodes(4);
        graph.add_edge(3, 1, 1.0);
        graph.add_edge(0, 2, 1.0);
        graph.add_edge(1, 3, 2.0);
        assert_eq!(graph.undirected_edges(), vec![(0, 2), (1, 3)]);
        assert_relative_eq!(graph.weight(3, 1).unwrap(), 2.0);
        assert_eq!(graph.neighbors(1), &[3]);
    }

    #[test]
    fn test_add_edge_out_of_range_is_ignored() {
        let mut graph = RoutingGraph::with_nodes(2);
        graph.add_edge(0, 5, 1.0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(9).is_empty());
    }

    #[test]
    fn test_empty_node_set() {
        let graph = RoutingGraph::layered(&[], &[], 10.0, &LayerCosts::default(), 0);
        assert_eq!(graph.node_count(), 0);
        assert!(graph.undirected_edges().is_empty());
    }
}
