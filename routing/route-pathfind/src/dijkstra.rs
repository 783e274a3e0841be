//! Single-source shortest paths on a [`RoutingGraph`].
//!
//! Label-setting Dijkstra with a binary heap. Unreachable targets are not an
//! error: the result has infinite cost and an empty path. Heap entries are
//! ordered by `(cost, node)`, so ties resolve towards the lower node index and
//! repeated runs on the same graph return the same path.
//!
//! # Example
//!
//! ```
//! use route_pathfind::{dijkstra::shortest_path, graph::RoutingGraph};
//!
//! let mut graph = RoutingGraph::with_nodes(3);
//! graph.add_edge(0, 1, 2.0);
//! graph.add_edge(1, 2, 2.0);
//! graph.add_edge(0, 2, 5.0);
//!
//! let route = shortest_path(&graph, 0, 2);
//! assert_eq!(route.cost, 4.0);
//! assert_eq!(route.path, vec![0, 1, 2]);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::warn;

use crate::graph::RoutingGraph;

/// A heap entry: tentative distance to a node.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior; lower index wins ties
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Cost and node sequence of a shortest path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Total edge weight, `f64::INFINITY` if unreachable.
    pub cost: f64,
    /// Graph indices from source to target, empty if unreachable.
    pub path: Vec<usize>,
}

impl ShortestPath {
    /// The result for an unreachable target.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    /// Returns `true` if the target was reached.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite() && !self.path.is_empty()
    }

    /// Number of edges on the path.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Distances and predecessors from one source to every node.
///
/// Useful when several queries share an origin: one run answers them all.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: usize,
    dist: Vec<f64>,
    prev: Vec<Option<usize>>,
}

impl ShortestPathTree {
    /// Runs Dijkstra from `source` to exhaustion.
    ///
    /// An out-of-range source yields a tree in which nothing is reachable.
    #[must_use]
    pub fn build(graph: &RoutingGraph, source: usize) -> Self {
        let (dist, prev) = search(graph, source, None);
        Self { source, dist, prev }
    }

    /// Returns the source node.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Returns the distance to `target`, `f64::INFINITY` if unreachable.
    #[must_use]
    pub fn cost_to(&self, target: usize) -> f64 {
        self.dist.get(target).copied().unwrap_or(f64::INFINITY)
    }

    /// Reconstructs the path to `target`.
    #[must_use]
    pub fn path_to(&self, target: usize) -> ShortestPath {
        let cost = self.cost_to(target);
        if !cost.is_finite() {
            return ShortestPath::unreachable();
        }
        ShortestPath {
            cost,
            path: reconstruct(&self.prev, self.source, target),
        }
    }
}

/// Finds the cheapest path from `source` to `target`.
///
/// The search stops as soon as `target` is settled. Returns cost 0 and path
/// `[source]` when `source == target`, and [`ShortestPath::unreachable`] when
/// either index is out of range or no path exists.
#[must_use]
pub fn shortest_path(graph: &RoutingGraph, source: usize, target: usize) -> ShortestPath {
    let n = graph.node_count();
    if source >= n || target >= n {
        return ShortestPath::unreachable();
    }
    if source == target {
        return ShortestPath {
            cost: 0.0,
            path: vec![source],
        };
    }

    let (dist, prev) = search(graph, source, Some(target));
    if !dist[target].is_finite() {
        return ShortestPath::unreachable();
    }
    ShortestPath {
        cost: dist[target],
        path: reconstruct(&prev, source, target),
    }
}

/// Core label-setting loop shared by single queries and full trees.
fn search(
    graph: &RoutingGraph,
    source: usize,
    target: Option<usize>,
) -> (Vec<f64>, Vec<Option<usize>>) {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![None; n];
    if source >= n {
        return (dist, prev);
    }

    let mut heap = BinaryHeap::new();
    dist[source] = 0.0;
    heap.push(Frontier {
        cost: 0.0,
        node: source,
    });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if Some(node) == target {
            break;
        }
        // Stale entry
        if cost > dist[node] {
            continue;
        }
        for &next in graph.neighbors(node) {
            let Some(weight) = graph.weight(node, next) else {
                warn!(from = node, to = next, "missing edge weight, skipping");
                continue;
            };
            let candidate = cost + weight;
            if next < n && candidate < dist[next] {
                dist[next] = candidate;
                prev[next] = Some(node);
                heap.push(Frontier {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }
    (dist, prev)
}

/// Walks predecessors back from `target` to `source`.
fn reconstruct(prev: &[Option<usize>], source: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match prev[current] {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
