//! Campus data model.
//!
//! A [`Campus`] is an owned, immutable snapshot of everything the routing
//! engine needs: colleges, buildings, floors, places and the connections
//! between places. The data layer that produced the snapshot (a JSON export,
//! a SQLite database, a test fixture) is irrelevant to the engine; every route
//! computation borrows the snapshot for its duration and never mutates it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{build_graph, Graph};

/// Identifier for a place. Identifiers are opaque strings; integer keys from
/// relational stores are converted to their decimal form when loaded.
pub type PlaceId = String;

/// Similarity threshold for fuzzy place name suggestions.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Position of a place on its floor plan, in floor-plan pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position, in pixels.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Category of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Classroom,
    Laboratory,
    Office,
    Canteen,
    Auditorium,
    Library,
    Restroom,
    Stairs,
    Lift,
    Entrance,
    Exit,
    Corridor,
    Sports,
    Parking,
    #[default]
    Other,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 15] = [
        PlaceCategory::Classroom,
        PlaceCategory::Laboratory,
        PlaceCategory::Office,
        PlaceCategory::Canteen,
        PlaceCategory::Auditorium,
        PlaceCategory::Library,
        PlaceCategory::Restroom,
        PlaceCategory::Stairs,
        PlaceCategory::Lift,
        PlaceCategory::Entrance,
        PlaceCategory::Exit,
        PlaceCategory::Corridor,
        PlaceCategory::Sports,
        PlaceCategory::Parking,
        PlaceCategory::Other,
    ];

    /// Lowercase label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            PlaceCategory::Classroom => "classroom",
            PlaceCategory::Laboratory => "laboratory",
            PlaceCategory::Office => "office",
            PlaceCategory::Canteen => "canteen",
            PlaceCategory::Auditorium => "auditorium",
            PlaceCategory::Library => "library",
            PlaceCategory::Restroom => "restroom",
            PlaceCategory::Stairs => "stairs",
            PlaceCategory::Lift => "lift",
            PlaceCategory::Entrance => "entrance",
            PlaceCategory::Exit => "exit",
            PlaceCategory::Corridor => "corridor",
            PlaceCategory::Sports => "sports",
            PlaceCategory::Parking => "parking",
            PlaceCategory::Other => "other",
        }
    }

    /// Parse free-form category text written by hand into older databases.
    ///
    /// Matching is case-insensitive and accepts a few common synonyms; anything
    /// unrecognised becomes [`PlaceCategory::Other`].
    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        if let Ok(category) = normalized.parse() {
            return category;
        }
        match normalized.as_str() {
            "lab" => PlaceCategory::Laboratory,
            "elevator" => PlaceCategory::Lift,
            "stair" | "staircase" => PlaceCategory::Stairs,
            "toilet" | "washroom" => PlaceCategory::Restroom,
            "cafeteria" => PlaceCategory::Canteen,
            "hall" => PlaceCategory::Auditorium,
            _ => PlaceCategory::Other,
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PlaceCategory::ALL
            .iter()
            .copied()
            .find(|category| category.label() == s)
            .ok_or_else(|| format!("unknown place category '{s}'"))
    }
}

/// Kind of walkable link between two places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    #[default]
    Corridor,
    Stairs,
    Lift,
}

impl ConnectionKind {
    /// Parse stored connection kinds; unknown values fall back to a corridor.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "stairs" | "stair" | "staircase" => ConnectionKind::Stairs,
            "lift" | "elevator" => ConnectionKind::Lift,
            _ => ConnectionKind::Corridor,
        }
    }
}

/// A college or campus owning a set of buildings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A building on a campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    pub college_id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
}

/// A single floor of a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    pub building_id: String,
    /// Ordering key; not necessarily contiguous or zero-based.
    pub floor_number: i32,
    pub name: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// A point of interest or corridor waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub floor_id: String,
    pub building_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub category: PlaceCategory,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "default_true")]
    pub is_node: bool,
}

/// An authored walkable link between two places. Always traversable in both
/// directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from_place_id: PlaceId,
    pub to_place_id: PlaceId,
    /// Walking distance in meters. A missing value deserializes as zero.
    #[serde(default)]
    pub distance: f64,
    #[serde(rename = "type", default)]
    pub kind: ConnectionKind,
    #[serde(default = "default_true")]
    pub is_accessible: bool,
}

fn default_true() -> bool {
    true
}

/// Owned snapshot of a campus dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    #[serde(default)]
    pub colleges: Vec<College>,
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Campus {
    /// Build a routing graph borrowing this snapshot.
    pub fn graph(&self) -> Graph<'_> {
        build_graph(
            &self.places,
            &self.connections,
            &self.floors,
            &self.buildings,
        )
    }

    pub fn college(&self, id: &str) -> Option<&College> {
        self.colleges.iter().find(|college| college.id == id)
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|building| building.id == id)
    }

    pub fn floor(&self, id: &str) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.id == id)
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    /// Buildings belonging to a college, in input order.
    pub fn buildings_of(&self, college_id: &str) -> Vec<&Building> {
        self.buildings
            .iter()
            .filter(|building| building.college_id == college_id)
            .collect()
    }

    /// Floors of a building ordered by floor number.
    pub fn floors_of(&self, building_id: &str) -> Vec<&Floor> {
        let mut floors: Vec<&Floor> = self
            .floors
            .iter()
            .filter(|floor| floor.building_id == building_id)
            .collect();
        floors.sort_by_key(|floor| floor.floor_number);
        floors
    }

    /// Places located on a floor, in input order.
    pub fn places_on(&self, floor_id: &str) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|place| place.floor_id == floor_id)
            .collect()
    }

    /// Lookup the first place whose name matches case-insensitively.
    pub fn place_id_by_name(&self, name: &str) -> Option<&str> {
        let needle = name.trim();
        self.places
            .iter()
            .find(|place| place.name.eq_ignore_ascii_case(needle))
            .map(|place| place.id.as_str())
    }

    /// Resolve a place given either its identifier or its display name.
    pub fn resolve_place(&self, query: &str) -> Option<&Place> {
        self.place(query).or_else(|| {
            self.place_id_by_name(query)
                .and_then(|id| self.place(id))
        })
    }

    /// Suggest place names similar to `name`, best match first.
    pub fn fuzzy_place_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .places
            .iter()
            .map(|place| {
                let score = strsim::jaro_winkler(&needle, &place.name.to_lowercase());
                (score, place.name.as_str())
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut names: Vec<String> = Vec::new();
        for (_, candidate) in scored {
            if names.len() >= limit {
                break;
            }
            if !names.iter().any(|existing| existing == candidate) {
                names.push(candidate.to_string());
            }
        }
        names
    }
}
