//! Campus navigation library entry points.
//!
//! This crate exposes helpers to locate and load a campus snapshot, build the
//! multi-floor navigation graph, run pathfinding algorithms and narrate the
//! result as turn-by-turn directions. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod campus;
pub mod dataset;
pub mod db;
pub mod error;
pub mod format;
pub mod graph;
pub mod narrate;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;

pub use campus::{
    Building, Campus, College, Connection, ConnectionKind, Floor, Place, PlaceCategory, PlaceId,
    Position,
};
pub use dataset::{default_campus_path, load_campus, resolve_campus_path, DATA_PATH_ENV};
pub use db::load_campus_db;
pub use error::{Error, Result};
pub use format::{calculate_distance, format_distance, format_time, DEFAULT_METERS_PER_PIXEL};
pub use graph::{build_graph, Edge, Graph, GraphNode};
pub use narrate::{build_result, classify_turn, Direction, NavigationStep, RouteResult};
pub use output::{RouteEndpoint, RouteInstruction, RouteRenderMode, RouteSummary, RouteTotals};
pub use path::{
    find_path_bfs, find_route_bfs, find_route_dijkstra, find_shortest_path, SearchOptions,
    ACCESSIBILITY_PENALTY,
};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest};
pub use search::{search_places, SearchResult, DEFAULT_SEARCH_LIMIT};
