//! Common test utilities and fixture helpers.
//!
//! Provides the path to the checked-in campus fixture and a small builder for
//! hand-made campuses used by graph and routing tests.

use std::path::PathBuf;

use campusnav_lib::{
    load_campus, Building, Campus, College, Connection, ConnectionKind, Floor, Place,
    PlaceCategory, Position,
};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The sample campus shipped with the repository.
#[allow(dead_code)]
pub fn fixture_campus() -> Campus {
    load_campus(&fixtures_dir().join("campus.json")).expect("fixture campus loads")
}

/// Builder for small single-building campuses.
#[allow(dead_code)]
pub struct CampusBuilder {
    campus: Campus,
}

#[allow(dead_code)]
impl CampusBuilder {
    pub fn new() -> Self {
        let campus = Campus {
            colleges: vec![College {
                id: "c1".to_string(),
                name: "Test College".to_string(),
                address: None,
                description: None,
            }],
            buildings: vec![Building {
                id: "b1".to_string(),
                college_id: "c1".to_string(),
                name: "Main Block".to_string(),
                code: "MB".to_string(),
            }],
            ..Campus::default()
        };
        Self { campus }
    }

    pub fn floor(mut self, id: &str, floor_number: i32, name: &str) -> Self {
        self.campus.floors.push(Floor {
            id: id.to_string(),
            building_id: "b1".to_string(),
            floor_number,
            name: name.to_string(),
            width: 800.0,
            height: 600.0,
        });
        self
    }

    pub fn place(self, id: &str, floor: &str, x: f64, y: f64) -> Self {
        self.place_with(id, floor, x, y, PlaceCategory::Corridor)
    }

    pub fn place_with(
        mut self,
        id: &str,
        floor: &str,
        x: f64,
        y: f64,
        category: PlaceCategory,
    ) -> Self {
        self.campus.places.push(Place {
            id: id.to_string(),
            floor_id: floor.to_string(),
            building_id: "b1".to_string(),
            name: id.to_string(),
            code: None,
            description: None,
            category,
            position: Position::new(x, y),
            is_node: true,
        });
        self
    }

    pub fn connect(self, from: &str, to: &str, distance: f64) -> Self {
        self.connect_with(from, to, distance, ConnectionKind::Corridor, true)
    }

    pub fn connect_with(
        mut self,
        from: &str,
        to: &str,
        distance: f64,
        kind: ConnectionKind,
        is_accessible: bool,
    ) -> Self {
        let id = format!("k{}", self.campus.connections.len() + 1);
        self.campus.connections.push(Connection {
            id,
            from_place_id: from.to_string(),
            to_place_id: to.to_string(),
            distance,
            kind,
            is_accessible,
        });
        self
    }

    pub fn build(self) -> Campus {
        self.campus
    }
}

/// Two floors with a stair landing: A(0,0) - B(10,0) on floor 1, C(10,0) -
/// D(20,0) on floor 2; B-C is a 5 m flight of stairs.
#[allow(dead_code)]
pub fn stair_campus() -> Campus {
    CampusBuilder::new()
        .floor("f1", 1, "Floor 1")
        .floor("f2", 2, "Floor 2")
        .place("A", "f1", 0.0, 0.0)
        .place_with("B", "f1", 10.0, 0.0, PlaceCategory::Stairs)
        .place_with("C", "f2", 10.0, 0.0, PlaceCategory::Stairs)
        .place("D", "f2", 20.0, 0.0)
        .connect("A", "B", 10.0)
        .connect_with("B", "C", 5.0, ConnectionKind::Stairs, false)
        .connect("C", "D", 10.0)
        .build()
}
