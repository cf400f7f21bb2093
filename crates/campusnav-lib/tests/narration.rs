mod common;

use campusnav_lib::{
    build_result, classify_turn, ConnectionKind, Direction, PlaceCategory, Position, SearchOptions,
};

use common::CampusBuilder;

fn instructions(result: &campusnav_lib::RouteResult) -> Vec<&str> {
    result
        .steps
        .iter()
        .map(|step| step.instruction.as_str())
        .collect()
}

#[test]
fn turn_threshold_boundary() {
    let p = Position::new;
    assert_eq!(
        classify_turn(p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0)),
        Direction::Straight
    );
    assert_eq!(
        classify_turn(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)),
        Direction::Right
    );
}

#[test]
fn interior_turns_are_narrated_except_on_the_last_segment() {
    let campus = CampusBuilder::new()
        .floor("f0", 0, "Ground Floor")
        .place("a", "f0", 0.0, 0.0)
        .place("b", "f0", 10.0, 0.0)
        .place("c", "f0", 10.0, 10.0)
        .place("d", "f0", 20.0, 10.0)
        .place("e", "f0", 30.0, 10.0)
        .connect("a", "b", 10.0)
        .connect("b", "c", 10.0)
        .connect("c", "d", 10.0)
        .connect("d", "e", 10.0)
        .build();
    let graph = campus.graph();

    let result = build_result(&graph, &["a", "b", "c", "d", "e"], &SearchOptions::default());
    assert_eq!(
        instructions(&result),
        vec![
            "Start at a",
            "Go forward for 20m, then turn right",
            "Go forward for 10m, then turn left",
            "Go forward for 10m to arrive",
            "Arrived at e",
        ]
    );
    assert_eq!(result.steps[1].direction, Direction::Right);
    assert_eq!(result.steps[2].direction, Direction::Left);
    assert_eq!(result.total_distance, 40);

    let narrated: f64 = result.steps.iter().map(|step| step.distance).sum();
    assert_eq!(narrated, 40.0);
}

#[test]
fn descending_and_same_level_floor_changes_go_down() {
    let campus = CampusBuilder::new()
        .floor("f1", 1, "First Floor")
        .floor("f0", 0, "Ground Floor")
        .floor("annex", 0, "Annex Ground")
        .place("p1", "f1", 0.0, 0.0)
        .place_with("p2", "f0", 0.0, 0.0, PlaceCategory::Stairs)
        .place("p3", "annex", 0.0, 0.0)
        .place("p4", "annex", 10.0, 0.0)
        .connect_with("p1", "p2", 4.0, ConnectionKind::Stairs, false)
        .connect("p2", "p3", 6.0)
        .connect("p3", "p4", 10.0)
        .build();
    let graph = campus.graph();

    let result = build_result(&graph, &["p1", "p2", "p3", "p4"], &SearchOptions::default());
    assert_eq!(
        instructions(&result),
        vec![
            "Start at p1",
            "Go down to Ground Floor (Stairs)",
            "Go down to Annex Ground (Elevator)",
            "Go forward for 10m to arrive",
            "Arrived at p4",
        ]
    );
    assert_eq!(result.steps[1].direction, Direction::Down);
    assert_eq!(result.steps[2].direction, Direction::Down);
    assert!(result.steps[2].is_floor_change);
    assert_eq!(result.floors_traversed, 2);
    assert_eq!(result.total_distance, 20);
}

#[test]
fn transfer_noun_follows_the_arrival_place() {
    let campus = CampusBuilder::new()
        .floor("f0", 0, "Ground Floor")
        .floor("f1", 1, "First Floor")
        .place("lobby", "f0", 0.0, 0.0)
        .place("landing", "f1", 0.0, 0.0)
        .connect_with("lobby", "landing", 5.0, ConnectionKind::Stairs, false)
        .build();
    let graph = campus.graph();

    let result = build_result(&graph, &["lobby", "landing"], &SearchOptions::default());
    assert_eq!(result.steps[1].instruction, "Go up to First Floor (Elevator)");
}

#[test]
fn lift_connections_are_called_elevators() {
    let campus = CampusBuilder::new()
        .floor("f0", 0, "Ground Floor")
        .floor("f3", 3, "Third Floor")
        .place("hall", "f0", 0.0, 0.0)
        .place("landing", "f3", 0.0, 0.0)
        .connect_with("hall", "landing", 12.0, ConnectionKind::Lift, true)
        .build();
    let graph = campus.graph();

    let result = build_result(&graph, &["hall", "landing"], &SearchOptions::default());
    assert_eq!(
        instructions(&result),
        vec![
            "Start at hall",
            "Go up to Third Floor (Elevator)",
            "Arrived at landing",
        ]
    );
    assert_eq!(result.estimated_seconds, 10);
    assert_eq!(result.footsteps, 16);
}

#[test]
fn unknown_identifiers_are_skipped() {
    let campus = CampusBuilder::new()
        .floor("f0", 0, "Ground Floor")
        .place("a", "f0", 0.0, 0.0)
        .place("b", "f0", 10.0, 0.0)
        .connect("a", "b", 10.0)
        .build();
    let graph = campus.graph();

    let result = build_result(&graph, &["a", "ghost", "b"], &SearchOptions::default());
    assert_eq!(result.total_distance, 10);
    assert_eq!(instructions(&result).first(), Some(&"Start at a"));
}
