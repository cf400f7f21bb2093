use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::graph::Graph;
use crate::narrate::{build_result, RouteResult};

/// Extra cost added to non-accessible edges when accessible routes are
/// preferred. Large enough to dominate typical indoor distances.
pub const ACCESSIBILITY_PENALTY: f64 = 1000.0;

/// Options applied during weighted search and edge lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Bias the search toward accessible edges.
    pub prefer_accessible: bool,
    /// Penalty added to each non-accessible edge when `prefer_accessible` is set.
    pub accessibility_penalty: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            prefer_accessible: false,
            accessibility_penalty: ACCESSIBILITY_PENALTY,
        }
    }
}

impl SearchOptions {
    /// Options preferring accessible edges with the default penalty.
    pub fn accessible() -> Self {
        Self {
            prefer_accessible: true,
            ..Self::default()
        }
    }

    /// Penalty to apply to non-accessible edges, if any. Negative values
    /// count as zero and non-finite ones fall back to
    /// [`ACCESSIBILITY_PENALTY`].
    pub fn penalty(&self) -> Option<f64> {
        let penalty = if self.accessibility_penalty.is_finite() {
            self.accessibility_penalty.max(0.0)
        } else {
            ACCESSIBILITY_PENALTY
        };
        self.prefer_accessible.then_some(penalty)
    }
}

/// Weighted shortest route with turn-by-turn narration.
///
/// Returns `None` when either endpoint is not a graph node or when the two
/// are not connected.
pub fn find_shortest_path(
    graph: &Graph<'_>,
    start: &str,
    goal: &str,
    prefer_accessible: bool,
) -> Option<RouteResult> {
    let options = SearchOptions {
        prefer_accessible,
        ..SearchOptions::default()
    };
    let path = find_route_dijkstra(graph, start, goal, &options)?;
    Some(build_result(graph, &path, &options))
}

/// Fewest-hops route with turn-by-turn narration. Distances and times in the
/// result still come from the real edge weights.
pub fn find_path_bfs(graph: &Graph<'_>, start: &str, goal: &str) -> Option<RouteResult> {
    let path = find_route_bfs(graph, start, goal)?;
    Some(build_result(graph, &path, &SearchOptions::default()))
}

/// Run breadth-first search and return the node path from `start` to `goal`.
pub fn find_route_bfs<'a>(graph: &Graph<'a>, start: &str, goal: &str) -> Option<Vec<&'a str>> {
    let start = graph.node(start)?.id();
    let goal = graph.node(goal)?.id();

    let mut parents: HashMap<&'a str, &'a str> = HashMap::new();
    let mut visited: HashSet<&'a str> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return reconstruct_path(&parents, start, goal);
        }

        for edge in graph.neighbours(current) {
            let next = edge.target;
            if !graph.contains(next) || !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            queue.push_back(next);
        }
    }

    None
}

/// Run Dijkstra's algorithm and return the lowest-cost node path from `start`
/// to `goal`.
pub fn find_route_dijkstra<'a>(
    graph: &Graph<'a>,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Option<Vec<&'a str>> {
    let start = graph.node(start)?.id();
    let goal = graph.node(goal)?.id();
    let penalty = options.penalty();

    let mut distances: HashMap<&'a str, f64> = HashMap::new();
    let mut parents: HashMap<&'a str, &'a str> = HashMap::new();
    let mut settled: HashSet<&'a str> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }

        if entry.node == goal {
            return reconstruct_path(&parents, start, goal);
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if settled.contains(next) || !graph.contains(next) {
                continue;
            }

            let next_cost = entry.cost.0 + edge.weight(penalty);
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path<'a>(
    parents: &HashMap<&'a str, &'a str>,
    start: &'a str,
    goal: &'a str,
) -> Option<Vec<&'a str>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *parents.get(current)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_pops_lowest_cost_first() {
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry::new("far", 30.0));
        queue.push(QueueEntry::new("near", 5.0));
        queue.push(QueueEntry::new("mid", 12.5));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec!["near", "mid", "far"]);
    }

    #[test]
    fn equal_costs_break_ties_by_identifier() {
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry::new("b", 1.0));
        queue.push(QueueEntry::new("a", 1.0));
        assert_eq!(queue.pop().map(|e| e.node), Some("a"));
    }

    #[test]
    fn penalty_only_applies_when_preferring_accessible() {
        assert_eq!(SearchOptions::default().penalty(), None);
        assert_eq!(SearchOptions::accessible().penalty(), Some(ACCESSIBILITY_PENALTY));
    }

    #[test]
    fn unusable_penalties_are_normalised() {
        let with_penalty = |accessibility_penalty| SearchOptions {
            prefer_accessible: true,
            accessibility_penalty,
        };
        assert_eq!(with_penalty(-5.0).penalty(), Some(0.0));
        assert_eq!(with_penalty(f64::INFINITY).penalty(), Some(ACCESSIBILITY_PENALTY));
        assert_eq!(with_penalty(f64::NAN).penalty(), Some(ACCESSIBILITY_PENALTY));
    }

    #[test]
    fn reconstruct_path_fails_without_chain_to_start() {
        let parents = HashMap::from([("c", "b")]);
        assert_eq!(reconstruct_path(&parents, "a", "c"), None);
        assert_eq!(reconstruct_path(&parents, "c", "c"), Some(vec!["c"]));
    }
}
