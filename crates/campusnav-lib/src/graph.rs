use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::campus::{Building, Connection, ConnectionKind, Floor, Place};

/// Graph node: a place together with its resolved floor and building.
#[derive(Debug, Clone, Copy)]
pub struct GraphNode<'a> {
    pub place: &'a Place,
    pub floor: &'a Floor,
    pub building: &'a Building,
}

impl<'a> GraphNode<'a> {
    pub fn id(&self) -> &'a str {
        self.place.id.as_str()
    }
}

/// One traversal direction derived from a connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<'a> {
    pub target: &'a str,
    pub distance: f64,
    pub kind: ConnectionKind,
    pub is_accessible: bool,
}

impl Edge<'_> {
    /// Cost used by weighted search. When an accessibility penalty is given,
    /// it is added to edges that are not accessible.
    pub fn weight(&self, accessibility_penalty: Option<f64>) -> f64 {
        match accessibility_penalty {
            Some(penalty) if !self.is_accessible => self.distance + penalty,
            _ => self.distance,
        }
    }
}

/// Multi-floor navigation graph borrowing a campus snapshot.
///
/// Adjacency is keyed independently of the node set: a connection touching a
/// place that is not a node still produces edge entries, so traversals must
/// check [`Graph::contains`] before stepping onto a target.
#[derive(Debug, Clone, Default)]
pub struct Graph<'a> {
    nodes: HashMap<&'a str, GraphNode<'a>>,
    adjacency: HashMap<&'a str, Vec<Edge<'a>>>,
}

impl<'a> Graph<'a> {
    pub fn node(&self, id: &str) -> Option<&GraphNode<'a>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Return the outgoing edges recorded for a place identifier.
    pub fn neighbours(&self, id: &str) -> &[Edge<'a>] {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (twice the number of connections).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Cheapest edge from `from` to `to` when several parallel connections
    /// exist, ranked by [`Edge::weight`].
    pub fn edge_between(
        &self,
        from: &str,
        to: &str,
        accessibility_penalty: Option<f64>,
    ) -> Option<&Edge<'a>> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .min_by(|a, b| {
                compare_weight(
                    a.weight(accessibility_penalty),
                    b.weight(accessibility_penalty),
                )
            })
    }
}

/// Build the navigation graph from flat campus collections.
///
/// Places whose floor or building cannot be resolved are left out of the node
/// set. Every connection yields two edges with identical attributes, one in
/// each direction.
pub fn build_graph<'a>(
    places: &'a [Place],
    connections: &'a [Connection],
    floors: &'a [Floor],
    buildings: &'a [Building],
) -> Graph<'a> {
    let floor_by_id: HashMap<&str, &Floor> = floors
        .iter()
        .map(|floor| (floor.id.as_str(), floor))
        .collect();
    let building_by_id: HashMap<&str, &Building> = buildings
        .iter()
        .map(|building| (building.id.as_str(), building))
        .collect();

    let mut nodes = HashMap::new();
    let mut adjacency: HashMap<&str, Vec<Edge<'_>>> = HashMap::new();
    let mut dropped_places = 0usize;

    for place in places {
        let floor = floor_by_id.get(place.floor_id.as_str()).copied();
        let building = building_by_id.get(place.building_id.as_str()).copied();
        match (floor, building) {
            (Some(floor), Some(building)) => {
                nodes.insert(
                    place.id.as_str(),
                    GraphNode {
                        place,
                        floor,
                        building,
                    },
                );
                adjacency.entry(place.id.as_str()).or_default();
            }
            _ => dropped_places += 1,
        }
    }

    for connection in connections {
        let distance = sanitize_distance(connection);
        let from = connection.from_place_id.as_str();
        let to = connection.to_place_id.as_str();

        adjacency.entry(from).or_default().push(Edge {
            target: to,
            distance,
            kind: connection.kind,
            is_accessible: connection.is_accessible,
        });
        adjacency.entry(to).or_default().push(Edge {
            target: from,
            distance,
            kind: connection.kind,
            is_accessible: connection.is_accessible,
        });
    }

    if dropped_places > 0 {
        debug!(
            dropped_places,
            "ignored places with unresolved floor or building"
        );
    }

    let graph = Graph { nodes, adjacency };
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built navigation graph"
    );
    graph
}

fn sanitize_distance(connection: &Connection) -> f64 {
    let distance = connection.distance;
    if distance.is_finite() && distance >= 0.0 {
        return distance;
    }
    warn!(
        connection = %connection.id,
        distance,
        "connection distance is not a non-negative number; treating as 0"
    );
    0.0
}

pub(crate) fn compare_weight(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}
