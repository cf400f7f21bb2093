//! Route planning for campus navigation.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (Dijkstra, BFS)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result with narrated directions
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is encapsulated in its own [`RoutePlanner`] implementation,
//! so new algorithms can be added without modifying the orchestration logic.
//!
//! # Example
//!
//! ```ignore
//! use campusnav_lib::{load_campus, plan_route, RouteRequest};
//!
//! let campus = load_campus("campus.json".as_ref())?;
//! let request = RouteRequest::dijkstra("Main Entrance", "Physics Lab").with_accessible(true);
//! let plan = plan_route(&campus, &request)?;
//! for step in &plan.result.steps {
//!     println!("{}", step.instruction);
//! }
//! ```

mod planner;

pub use planner::{select_planner, BfsPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::campus::{Campus, Place, PlaceId};
use crate::error::{Error, Result};
use crate::narrate::{build_result, RouteResult};
use crate::path::ACCESSIBILITY_PENALTY;

/// Maximum number of suggestions attached to an unknown place error.
const MAX_SUGGESTIONS: usize = 3;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm over walking distance.
    #[default]
    Dijkstra,
    /// Breadth-first search (fewest hops).
    Bfs,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::Bfs => "bfs",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "bfs" => Ok(RouteAlgorithm::Bfs),
            other => Err(format!(
                "unknown algorithm '{other}'; expected 'dijkstra' or 'bfs'"
            )),
        }
    }
}

/// High-level route planning request. Endpoints may be place identifiers or
/// place names.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub algorithm: RouteAlgorithm,
    pub prefer_accessible: bool,
    /// Penalty added to non-accessible connections when `prefer_accessible`
    /// is set.
    pub accessibility_penalty: f64,
}

impl RouteRequest {
    /// Convenience constructor for shortest-distance routes.
    pub fn dijkstra(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm: RouteAlgorithm::Dijkstra,
            prefer_accessible: false,
            accessibility_penalty: ACCESSIBILITY_PENALTY,
        }
    }

    /// Convenience constructor for fewest-hop routes.
    pub fn bfs(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            algorithm: RouteAlgorithm::Bfs,
            ..Self::dijkstra(start, goal)
        }
    }

    pub fn with_accessible(mut self, prefer_accessible: bool) -> Self {
        self.prefer_accessible = prefer_accessible;
        self
    }

    pub fn with_accessibility_penalty(mut self, penalty: f64) -> Self {
        self.accessibility_penalty = penalty;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: PlaceId,
    pub goal: PlaceId,
    /// Raw node path, start and goal included.
    pub path: Vec<PlaceId>,
    pub result: RouteResult,
}

impl RoutePlan {
    /// Number of graph hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Resolve a place identifier or name, suggesting close names on failure.
fn resolve_place<'a>(campus: &'a Campus, query: &str) -> Result<&'a Place> {
    campus.resolve_place(query).ok_or_else(|| Error::UnknownPlace {
        name: query.to_string(),
        suggestions: campus.fuzzy_place_matches(query, MAX_SUGGESTIONS),
    })
}

/// Compute a route using the requested algorithm.
///
/// This is the main entry point for route planning. It:
/// 1. Resolves place identifiers or names
/// 2. Builds the navigation graph from the campus snapshot
/// 3. Selects the planner strategy and executes pathfinding
/// 4. Narrates the path into turn-by-turn directions
///
/// Identical start and goal are accepted and produce a two-step plan.
pub fn plan_route(campus: &Campus, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_place(campus, &request.start)?;
    let goal = resolve_place(campus, &request.goal)?;

    let graph = campus.graph();
    for place in [start, goal] {
        if !graph.contains(&place.id) {
            return Err(Error::PlaceNotRoutable {
                id: place.id.clone(),
            });
        }
    }

    let planner = select_planner(request);
    debug!(
        algorithm = %planner.algorithm(),
        start = %start.id,
        goal = %goal.id,
        prefer_accessible = request.prefer_accessible,
        "planning route"
    );

    let path = planner
        .find_path(&graph, &start.id, &goal.id)
        .ok_or_else(|| Error::RouteNotFound {
            start: start.name.clone(),
            goal: goal.name.clone(),
        })?;

    let result = build_result(&graph, &path, &planner.options());
    debug!(
        hops = path.len().saturating_sub(1),
        distance = result.total_distance,
        "route planned"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        start: start.id.clone(),
        goal: goal.id.clone(),
        path: path.iter().map(|id| id.to_string()).collect(),
        result,
    })
}
