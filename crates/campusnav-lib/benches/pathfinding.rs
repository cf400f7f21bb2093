use campusnav_lib::{
    load_campus, plan_route, Building, Campus, College, Connection, ConnectionKind, Floor, Place,
    PlaceCategory, Position, RouteRequest,
};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

const GRID_SIDE: usize = 30;
const GRID_FLOORS: usize = 4;
const GRID_SPACING: f64 = 40.0;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/campus.json")
}

fn grid_id(floor: usize, row: usize, col: usize) -> String {
    format!("g{floor}-{row}-{col}")
}

fn connect(campus: &mut Campus, from: String, to: String, kind: ConnectionKind) {
    let id = format!("k{}", campus.connections.len());
    campus.connections.push(Connection {
        id,
        from_place_id: from,
        to_place_id: to,
        distance: match kind {
            ConnectionKind::Corridor => GRID_SPACING * 0.1,
            _ => 5.0,
        },
        kind,
        is_accessible: kind != ConnectionKind::Stairs,
    });
}

/// Square corridor grids stacked on several floors, joined by a lift in one
/// corner and a flight of stairs in the opposite corner.
fn grid_campus() -> Campus {
    let mut campus = Campus {
        colleges: vec![College {
            id: "c1".to_string(),
            name: "Bench College".to_string(),
            address: None,
            description: None,
        }],
        buildings: vec![Building {
            id: "b1".to_string(),
            college_id: "c1".to_string(),
            name: "Grid Block".to_string(),
            code: "GB".to_string(),
        }],
        ..Campus::default()
    };

    for floor in 0..GRID_FLOORS {
        let floor_id = format!("f{floor}");
        campus.floors.push(Floor {
            id: floor_id.clone(),
            building_id: "b1".to_string(),
            floor_number: floor as i32,
            name: format!("Floor {floor}"),
            width: GRID_SIDE as f64 * GRID_SPACING,
            height: GRID_SIDE as f64 * GRID_SPACING,
        });

        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                let id = grid_id(floor, row, col);
                campus.places.push(Place {
                    id: id.clone(),
                    floor_id: floor_id.clone(),
                    building_id: "b1".to_string(),
                    name: format!("Junction {floor}-{row}-{col}"),
                    code: None,
                    description: None,
                    category: PlaceCategory::Corridor,
                    position: Position::new(col as f64 * GRID_SPACING, row as f64 * GRID_SPACING),
                    is_node: true,
                });
                if col + 1 < GRID_SIDE {
                    connect(
                        &mut campus,
                        id.clone(),
                        grid_id(floor, row, col + 1),
                        ConnectionKind::Corridor,
                    );
                }
                if row + 1 < GRID_SIDE {
                    connect(
                        &mut campus,
                        id,
                        grid_id(floor, row + 1, col),
                        ConnectionKind::Corridor,
                    );
                }
            }
        }

        if floor + 1 < GRID_FLOORS {
            connect(
                &mut campus,
                grid_id(floor, 0, 0),
                grid_id(floor + 1, 0, 0),
                ConnectionKind::Lift,
            );
            let last = GRID_SIDE - 1;
            connect(
                &mut campus,
                grid_id(floor, last, last),
                grid_id(floor + 1, last, last),
                ConnectionKind::Stairs,
            );
        }
    }

    campus
}

static FIXTURE: Lazy<Campus> = Lazy::new(|| load_campus(&fixture_path()).expect("fixture loads"));
static GRID: Lazy<Campus> = Lazy::new(grid_campus);
static FIXTURE_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::dijkstra("Main Entrance", "Seminar Hall"));
static GRID_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::dijkstra(
        grid_id(0, GRID_SIDE / 2, GRID_SIDE / 2),
        grid_id(GRID_FLOORS - 1, GRID_SIDE - 2, GRID_SIDE - 3),
    )
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let fixture = &*FIXTURE;
    let grid = &*GRID;

    c.bench_function("dijkstra_fixture_entrance_seminar", |b| {
        let request = &*FIXTURE_REQUEST;
        b.iter(|| {
            let plan = plan_route(fixture, request).expect("route exists");
            black_box(plan.result.total_distance)
        });
    });

    c.bench_function("dijkstra_grid_cross_floor", |b| {
        let request = &*GRID_REQUEST;
        b.iter(|| {
            let plan = plan_route(grid, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("dijkstra_grid_accessible", |b| {
        let request = (*GRID_REQUEST).clone().with_accessible(true);
        b.iter(|| {
            let plan = plan_route(grid, &request).expect("route exists");
            black_box(plan.result.floors_traversed)
        });
    });

    c.bench_function("bfs_grid_cross_floor", |b| {
        let request = RouteRequest {
            algorithm: campusnav_lib::RouteAlgorithm::Bfs,
            ..(*GRID_REQUEST).clone()
        };
        b.iter(|| {
            let plan = plan_route(grid, &request).expect("route exists");
            black_box(plan.hop_count())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
