//! Route planning strategies.
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] so the orchestrator in
//! [`plan_route`](super::plan_route) can stay agnostic of how a path is found.

use crate::graph::Graph;
use crate::path::{find_route_bfs, find_route_dijkstra, SearchOptions};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search options the planner runs with. The narrator reuses them so edge
    /// lookups agree with the search.
    fn options(&self) -> SearchOptions;

    /// Execute the pathfinding algorithm on the given graph.
    ///
    /// Returns `Some(path)` if a route is found, `None` otherwise.
    fn find_path<'a>(&self, graph: &Graph<'a>, start: &str, goal: &str) -> Option<Vec<&'a str>>;
}

/// Breadth-first search planner. Finds the path with the fewest hops and
/// ignores distances and accessibility.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn options(&self) -> SearchOptions {
        SearchOptions::default()
    }

    fn find_path<'a>(&self, graph: &Graph<'a>, start: &str, goal: &str) -> Option<Vec<&'a str>> {
        find_route_bfs(graph, start, goal)
    }
}

/// Dijkstra planner over walking distance, optionally biased toward
/// accessible connections.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner {
    options: SearchOptions,
}

impl DijkstraPlanner {
    /// Plain shortest-distance planner.
    pub fn distance() -> Self {
        Self::default()
    }

    /// Planner preferring accessible connections with the given penalty.
    pub fn accessible(accessibility_penalty: f64) -> Self {
        Self {
            options: SearchOptions {
                prefer_accessible: true,
                accessibility_penalty,
            },
        }
    }

    /// Create a planner from a route request.
    pub fn from_request(request: &RouteRequest) -> Self {
        Self {
            options: SearchOptions {
                prefer_accessible: request.prefer_accessible,
                accessibility_penalty: request.accessibility_penalty,
            },
        }
    }
}

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn options(&self) -> SearchOptions {
        self.options
    }

    fn find_path<'a>(&self, graph: &Graph<'a>, start: &str, goal: &str) -> Option<Vec<&'a str>> {
        find_route_dijkstra(graph, start, goal, &self.options)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Bfs => {
            if request.prefer_accessible {
                tracing::warn!("accessible routing is ignored by the bfs planner");
            }
            Box::new(BfsPlanner)
        }
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner::from_request(request)),
    }
}
