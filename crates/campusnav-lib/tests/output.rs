mod common;

use campusnav_lib::{
    plan_route, RouteAlgorithm, RoutePlan, RouteRenderMode, RouteRequest, RouteResult,
    RouteSummary,
};

use common::{fixture_campus, stair_campus};

fn stair_plan() -> RoutePlan {
    plan_route(&stair_campus(), &RouteRequest::dijkstra("A", "D")).expect("route exists")
}

#[test]
fn summary_rejects_empty_plans() {
    let plan = RoutePlan {
        algorithm: RouteAlgorithm::Bfs,
        start: "A".to_string(),
        goal: "A".to_string(),
        path: Vec::new(),
        result: RouteResult::default(),
    };

    let err = RouteSummary::from_plan(&plan).expect_err("empty plans are rejected");
    assert_eq!(format!("{err}"), "route plan was empty");
}

#[test]
fn summary_from_plan_populates_endpoints_and_totals() {
    let summary = RouteSummary::from_plan(&stair_plan()).expect("summary builds");

    assert_eq!(summary.start.name, "A");
    assert_eq!(summary.start.floor, "Floor 1");
    assert_eq!(summary.goal.name, "D");
    assert_eq!(summary.goal.building, "Main Block");
    assert_eq!(summary.hops, 3);
    assert_eq!(summary.instructions.len(), 4);
    assert_eq!(summary.instructions[1].index, 2);
    assert_eq!(summary.instructions[1].distance, 15);
    assert_eq!(summary.totals.distance_label, "25 m");
    assert_eq!(summary.totals.time_label, "21 sec");
    assert_eq!(summary.totals.floors_traversed, 1);
}

#[test]
fn render_modes_include_expected_tokens() {
    let summary = RouteSummary::from_plan(&stair_plan()).expect("summary builds");

    let plain = summary.render(RouteRenderMode::PlainText);
    assert!(plain.starts_with("Route: A -> D (3 hops, algorithm: dijkstra)"));
    assert!(plain.contains("  2. Go up to Floor 2 (Stairs) [Main Block, Floor 1]"));
    assert!(plain.contains("Total: 25 m · 33 steps · 21 sec · 1 floor change"));

    let rich = summary.render(RouteRenderMode::RichText);
    assert!(rich.contains("**Route**"));
    assert!(rich.contains("2. **Go up to Floor 2 (Stairs)** (`B`)"));
    assert!(rich.contains("algorithm: `dijkstra`"));

    let spoken = summary.render(RouteRenderMode::Spoken);
    assert!(spoken.starts_with("Directions from A to D."));
    assert!(spoken.contains("Step 4. Arrived at D."));
    assert!(spoken.contains("Total distance 25 m, about 21 sec."));
}

#[test]
fn summary_serializes_to_camel_case_json() {
    let campus = fixture_campus();
    let plan = plan_route(&campus, &RouteRequest::bfs("Main Entrance", "Restroom"))
        .expect("route exists");
    let summary = RouteSummary::from_plan(&plan).expect("summary builds");

    let json = serde_json::to_value(&summary).expect("serializes");
    assert_eq!(json["algorithm"], "bfs");
    assert_eq!(json["totals"]["distanceLabel"], "50 m");
    assert_eq!(json["instructions"][0]["isFloorChange"], false);
    assert_eq!(json["start"]["building"], "Main Academic Block");
}
