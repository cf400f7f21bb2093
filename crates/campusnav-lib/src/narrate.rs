//! Turn-by-turn narration of a solved node path.
//!
//! The narrator works in two passes. The first pass walks the node path and
//! records, for every node, the distance to the next node and whether the next
//! node sits on another floor. The second pass folds those raw steps into a
//! short list of instructions: a new instruction is emitted at every floor
//! change and at every significant turn, and the distance walked since the
//! previous instruction is attached to it.

use std::fmt;

use serde::Serialize;

use crate::campus::{Building, Floor, Place, PlaceCategory, Position};
use crate::graph::{Graph, GraphNode};
use crate::path::SearchOptions;

/// Average stride length used to estimate footsteps.
pub const METERS_PER_FOOTSTEP: f64 = 0.75;

/// Average indoor walking speed.
pub const WALKING_SPEED_MPS: f64 = 1.2;

/// Heading changes smaller than this are narrated as going straight.
pub const TURN_THRESHOLD_DEGREES: f64 = 25.0;

/// Direction attached to a narrated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Straight,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Straight => "straight",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One consolidated instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationStep {
    pub instruction: String,
    pub place: Place,
    pub floor: Floor,
    pub building: Building,
    /// Meters walked since the previous instruction.
    pub distance: f64,
    pub direction: Direction,
    pub is_floor_change: bool,
}

/// Narrated route with aggregate totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub steps: Vec<NavigationStep>,
    /// Sum of edge distances along the path, rounded to whole meters.
    pub total_distance: u64,
    pub footsteps: u64,
    pub estimated_seconds: u64,
    /// Number of consecutive node pairs that sit on different floors.
    pub floors_traversed: usize,
}

impl RouteResult {
    /// Number of consolidated instructions, not graph hops.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct FloorChange<'a> {
    direction: Direction,
    next: GraphNode<'a>,
}

#[derive(Debug, Clone, Copy)]
struct RawStep<'a> {
    node: GraphNode<'a>,
    distance: f64,
    floor_change: Option<FloorChange<'a>>,
}

/// Convert an ordered node path into a narrated [`RouteResult`].
///
/// Identifiers that are not graph nodes are skipped. Edge distances are looked
/// up with the same accessibility preference that produced the path so that
/// parallel connections resolve to the edge the search actually used.
pub fn build_result(graph: &Graph<'_>, path: &[&str], options: &SearchOptions) -> RouteResult {
    let nodes: Vec<GraphNode<'_>> = path
        .iter()
        .filter_map(|id| graph.node(id).copied())
        .collect();

    let mut raw_steps = Vec::with_capacity(nodes.len());
    let mut total_distance = 0.0;
    let mut floors_traversed = 0usize;

    for (index, node) in nodes.iter().enumerate() {
        let mut distance = 0.0;
        let mut floor_change = None;

        if let Some(next) = nodes.get(index + 1) {
            let edge = graph.edge_between(node.id(), next.id(), options.penalty());
            distance = edge.map(|edge| edge.distance).unwrap_or(0.0);
            total_distance += distance;

            if next.floor.id != node.floor.id {
                floor_change = Some(FloorChange {
                    direction: vertical_direction(node.floor, next.floor),
                    next: *next,
                });
            }
        }

        if index > 0 && nodes[index - 1].floor.id != node.floor.id {
            floors_traversed += 1;
        }

        raw_steps.push(RawStep {
            node: *node,
            distance,
            floor_change,
        });
    }

    RouteResult {
        steps: consolidate(&raw_steps),
        total_distance: total_distance.round() as u64,
        footsteps: (total_distance / METERS_PER_FOOTSTEP).round() as u64,
        estimated_seconds: (total_distance / WALKING_SPEED_MPS).round() as u64,
        floors_traversed,
    }
}

fn consolidate(raw_steps: &[RawStep<'_>]) -> Vec<NavigationStep> {
    let (Some(first), Some(last)) = (raw_steps.first(), raw_steps.last()) else {
        return Vec::new();
    };

    let mut steps = vec![step(
        &first.node,
        format!("Start at {}", first.node.place.name),
        0.0,
        Direction::Straight,
        false,
    )];

    let mut segment_distance = 0.0;
    let last_segment = raw_steps.len().saturating_sub(2);

    for index in 0..raw_steps.len() - 1 {
        let current = &raw_steps[index];
        segment_distance += current.distance;

        if let Some(change) = &current.floor_change {
            steps.push(step(
                &current.node,
                floor_change_instruction(change),
                segment_distance,
                change.direction,
                true,
            ));
            segment_distance = 0.0;
            continue;
        }

        if index == 0 || index == last_segment {
            continue;
        }

        let turn = classify_turn(
            raw_steps[index - 1].node.place.position,
            current.node.place.position,
            raw_steps[index + 1].node.place.position,
        );
        if turn != Direction::Straight {
            steps.push(step(
                &current.node,
                format!(
                    "Go forward for {}m, then turn {}",
                    segment_distance.round() as u64,
                    turn
                ),
                segment_distance,
                turn,
                false,
            ));
            segment_distance = 0.0;
        }
    }

    if segment_distance > 0.0 {
        steps.push(step(
            &last.node,
            format!(
                "Go forward for {}m to arrive",
                segment_distance.round() as u64
            ),
            segment_distance,
            Direction::Straight,
            false,
        ));
    }

    steps.push(step(
        &last.node,
        format!("Arrived at {}", last.node.place.name),
        0.0,
        Direction::Straight,
        false,
    ));

    steps
}

/// Classify the heading change at `current` when walking
/// `previous → current → next`.
///
/// Angles are measured in floor-plan coordinates where `y` grows downward, so
/// a positive (clockwise) heading change is a right turn. A zero-length leg,
/// such as a lift landing stacked over the one below, has no heading and is
/// treated as straight.
pub fn classify_turn(previous: Position, current: Position, next: Position) -> Direction {
    if previous == current || current == next {
        return Direction::Straight;
    }

    let incoming = (current.y - previous.y).atan2(current.x - previous.x);
    let outgoing = (next.y - current.y).atan2(next.x - current.x);

    let mut delta = outgoing - incoming;
    while delta > std::f64::consts::PI {
        delta -= std::f64::consts::TAU;
    }
    while delta < -std::f64::consts::PI {
        delta += std::f64::consts::TAU;
    }

    let degrees = delta.to_degrees();
    if degrees.abs() < TURN_THRESHOLD_DEGREES {
        Direction::Straight
    } else if degrees > 0.0 {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Floors sharing a floor number (a bridge into another building, say) count
/// as going down.
fn vertical_direction(current: &Floor, next: &Floor) -> Direction {
    if next.floor_number > current.floor_number {
        Direction::Up
    } else {
        Direction::Down
    }
}

fn floor_change_instruction(change: &FloorChange<'_>) -> String {
    let verb = match change.direction {
        Direction::Up => "up",
        _ => "down",
    };
    format!(
        "Go {} to {} ({})",
        verb,
        change.next.floor.name,
        transfer_noun(change.next.place.category)
    )
}

/// Only a stairs landing is called stairs; every other transfer is an elevator.
fn transfer_noun(arrival: PlaceCategory) -> &'static str {
    match arrival {
        PlaceCategory::Stairs => "Stairs",
        _ => "Elevator",
    }
}

fn step(
    node: &GraphNode<'_>,
    instruction: String,
    distance: f64,
    direction: Direction,
    is_floor_change: bool,
) -> NavigationStep {
    NavigationStep {
        instruction,
        place: node.place.clone(),
        floor: node.floor.clone(),
        building: node.building.clone(),
        distance,
        direction,
        is_floor_change,
    }
}
