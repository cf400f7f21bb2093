use std::fmt;
use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use tracing::{debug, warn};

use crate::campus::{
    Building, Campus, College, Connection as PlaceConnection, ConnectionKind, Floor, Place,
    PlaceCategory, Position,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaVariant {
    /// `Places` table with explicit building references and `x`/`y` columns.
    Native,
    /// `Rooms` table with `"x,y"` coordinate strings and buildings resolved
    /// through floors.
    Legacy,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SchemaVariant::Native => "native",
            SchemaVariant::Legacy => "legacy",
        };
        f.write_str(value)
    }
}

const NATIVE_PLACE_COLUMNS: &[&str] = &["id", "floorId", "buildingId", "name", "type", "x", "y"];
const LEGACY_ROOM_COLUMNS: &[&str] = &["id", "floorId", "name", "coordinates"];
const BUILDING_COLUMNS: &[&str] = &["id", "collegeId", "name"];
const FLOOR_COLUMNS: &[&str] = &["id", "buildingId", "floorNumber", "name"];
const CONNECTION_COLUMNS: &[&str] = &["id", "fromPlaceId", "toPlaceId"];

/// Load a campus snapshot from a SQLite database.
///
/// Two layouts are supported: the native layout with a `Places` table, and the
/// older layout where places live in a `Rooms` table with coordinates stored
/// as `"x,y"` text and no accessibility column on connections. Identifiers
/// are read as text; integer keys are converted to their decimal form.
pub fn load_campus_db(db_path: &Path) -> Result<Campus> {
    let connection = Connection::open(db_path)?;
    debug!(path = %db_path.display(), "loading campus database");
    load_from_connection(&connection)
}

fn load_from_connection(connection: &Connection) -> Result<Campus> {
    let variant = detect_schema(connection)?;
    debug!(schema = %variant, "detected campus schema");

    let colleges = load_colleges(connection)?;
    let buildings = load_buildings(connection)?;
    let floors = load_floors(connection)?;
    let places = match variant {
        SchemaVariant::Native => load_native_places(connection)?,
        SchemaVariant::Legacy => load_legacy_places(connection)?,
    };
    let connections = load_connections(connection)?;

    debug!(
        colleges = colleges.len(),
        buildings = buildings.len(),
        floors = floors.len(),
        places = places.len(),
        connections = connections.len(),
        "loaded campus snapshot"
    );

    Ok(Campus {
        colleges,
        buildings,
        floors,
        places,
        connections,
    })
}

fn detect_schema(connection: &Connection) -> Result<SchemaVariant> {
    for (table, columns) in [
        ("Buildings", BUILDING_COLUMNS),
        ("Floors", FLOOR_COLUMNS),
        ("Connections", CONNECTION_COLUMNS),
    ] {
        if !table_exists(connection, table)? || !table_has_columns(connection, table, columns)? {
            return Err(Error::UnsupportedSchema);
        }
    }

    if table_exists(connection, "Places")?
        && table_has_columns(connection, "Places", NATIVE_PLACE_COLUMNS)?
    {
        return Ok(SchemaVariant::Native);
    }
    if table_exists(connection, "Rooms")?
        && table_has_columns(connection, "Rooms", LEGACY_ROOM_COLUMNS)?
    {
        return Ok(SchemaVariant::Legacy);
    }

    Err(Error::UnsupportedSchema)
}

fn load_colleges(connection: &Connection) -> Result<Vec<College>> {
    if !table_exists(connection, "Colleges")? {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT id, name, {address}, {description} FROM Colleges ORDER BY id",
        address = optional_column(connection, "Colleges", "address")?,
        description = optional_column(connection, "Colleges", "description")?,
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(College {
            id: text_id(row, 0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            address: row.get(2)?,
            description: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn load_buildings(connection: &Connection) -> Result<Vec<Building>> {
    let sql = format!(
        "SELECT id, collegeId, name, {code} FROM Buildings ORDER BY id",
        code = optional_column(connection, "Buildings", "code")?,
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(Building {
            id: text_id(row, 0)?,
            college_id: text_id(row, 1)?,
            name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            code: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn load_floors(connection: &Connection) -> Result<Vec<Floor>> {
    let sql = format!(
        "SELECT id, buildingId, floorNumber, name, {width}, {height} FROM Floors ORDER BY id",
        width = optional_column(connection, "Floors", "width")?,
        height = optional_column(connection, "Floors", "height")?,
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(Floor {
            id: text_id(row, 0)?,
            building_id: text_id(row, 1)?,
            floor_number: row.get::<_, Option<i32>>(2)?.unwrap_or_default(),
            name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            width: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
            height: row.get::<_, Option<f64>>(5)?.unwrap_or_default(),
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn load_native_places(connection: &Connection) -> Result<Vec<Place>> {
    let sql = format!(
        "SELECT id, floorId, buildingId, name, {code}, {description}, type, x, y, {is_node} \
         FROM Places ORDER BY id",
        code = optional_column(connection, "Places", "code")?,
        description = optional_column(connection, "Places", "description")?,
        is_node = optional_column(connection, "Places", "isNode")?,
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(Place {
            id: text_id(row, 0)?,
            floor_id: text_id(row, 1)?,
            building_id: text_id(row, 2)?,
            name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            code: row.get(4)?,
            description: row.get(5)?,
            category: category(row, 6)?,
            position: Position::new(
                row.get::<_, Option<f64>>(7)?.unwrap_or_default(),
                row.get::<_, Option<f64>>(8)?.unwrap_or_default(),
            ),
            is_node: row.get::<_, Option<bool>>(9)?.unwrap_or(true),
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn load_legacy_places(connection: &Connection) -> Result<Vec<Place>> {
    let sql = format!(
        "SELECT r.id, r.floorId, f.buildingId, r.name, {category}, r.coordinates \
         FROM Rooms r LEFT JOIN Floors f ON f.id = r.floorId ORDER BY r.id",
        category = if table_has_columns(connection, "Rooms", &["type"])? {
            "r.type"
        } else {
            "NULL"
        },
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            text_id(row, 0)?,
            text_id(row, 1)?,
            text_id(row, 2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            category(row, 4)?,
            row.get::<_, Option<String>>(5)?,
        ))
    })?;

    let mut places = Vec::new();
    let mut skipped_rooms = 0usize;
    for row in rows {
        let (id, floor_id, building_id, name, category, coordinates) = row?;
        let position = match coordinates.as_deref() {
            Some(value) => match parse_coordinates(&id, value) {
                Ok(position) => position,
                Err(err) => {
                    warn!(error = %err, "skipping room");
                    skipped_rooms += 1;
                    continue;
                }
            },
            None => Position::default(),
        };
        places.push(Place {
            id,
            floor_id,
            building_id,
            name,
            code: None,
            description: None,
            category,
            position,
            is_node: true,
        });
    }

    if skipped_rooms > 0 {
        warn!(skipped_rooms, "ignored rooms with unreadable coordinates");
    }

    Ok(places)
}

/// Load connections. Older databases have no accessibility column; there,
/// stairs are treated as not accessible and everything else as accessible.
fn load_connections(connection: &Connection) -> Result<Vec<PlaceConnection>> {
    let has_accessibility = table_has_columns(connection, "Connections", &["isAccessible"])?;
    let sql = format!(
        "SELECT id, fromPlaceId, toPlaceId, {distance}, {kind}, {accessible} \
         FROM Connections ORDER BY id",
        distance = optional_column(connection, "Connections", "distance")?,
        kind = optional_column(connection, "Connections", "type")?,
        accessible = if has_accessibility {
            "isAccessible"
        } else {
            "NULL"
        },
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        let kind = row
            .get::<_, Option<String>>(4)?
            .map(|value| ConnectionKind::parse_lenient(&value))
            .unwrap_or_default();
        let is_accessible = row
            .get::<_, Option<bool>>(5)?
            .unwrap_or(kind != ConnectionKind::Stairs);
        Ok((
            text_id(row, 0)?,
            text_id(row, 1)?,
            text_id(row, 2)?,
            row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
            kind,
            is_accessible,
        ))
    })?;

    let mut connections = Vec::new();
    let mut skipped_connections = 0usize;
    for row in rows {
        let (id, from_place_id, to_place_id, distance, kind, is_accessible) = row?;
        if from_place_id.is_empty() || to_place_id.is_empty() {
            skipped_connections += 1;
            continue;
        }
        connections.push(PlaceConnection {
            id,
            from_place_id,
            to_place_id,
            distance,
            kind,
            is_accessible,
        });
    }

    if skipped_connections > 0 {
        warn!(
            skipped_connections,
            "ignored connections without both endpoints"
        );
    }

    Ok(connections)
}

/// Parse stored room coordinates, either `"x,y"` or `{"x": .., "y": ..}`.
fn parse_coordinates(place: &str, value: &str) -> Result<Position> {
    let invalid = || Error::InvalidCoordinates {
        place: place.to_string(),
        value: value.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.starts_with('{') {
        return serde_json::from_str::<Position>(trimmed).map_err(|_| invalid());
    }

    let (x, y) = trimmed.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Position::new(x, y))
}

fn category(row: &Row<'_>, index: usize) -> rusqlite::Result<PlaceCategory> {
    Ok(row
        .get::<_, Option<String>>(index)?
        .map(|value| PlaceCategory::parse_lenient(&value))
        .unwrap_or_default())
}

/// Read an identifier column as text. Integer keys become their decimal form
/// and NULL becomes an empty string, which never resolves to anything.
fn text_id(row: &Row<'_>, index: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(index)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => value.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    })
}

/// Column name when present, otherwise a `NULL` literal for the select list.
fn optional_column(
    connection: &Connection,
    table: &str,
    column: &'static str,
) -> Result<&'static str> {
    if table_has_columns(connection, table, &[column])? {
        Ok(column)
    } else {
        Ok("NULL")
    }
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_pairs_and_json() {
        assert_eq!(
            parse_coordinates("r1", " 120.5, 40 ").expect("pair parses"),
            Position::new(120.5, 40.0)
        );
        assert_eq!(
            parse_coordinates("r1", r#"{"x": 3, "y": 4}"#).expect("json parses"),
            Position::new(3.0, 4.0)
        );
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        let err = parse_coordinates("r9", "north wing").expect_err("not coordinates");
        assert_eq!(
            err.to_string(),
            "invalid coordinates 'north wing' for place r9"
        );
        assert!(parse_coordinates("r9", "1,abc").is_err());
    }

    #[test]
    fn empty_database_is_unsupported() {
        let connection = Connection::open_in_memory().expect("in-memory db");
        let err = load_from_connection(&connection).expect_err("no tables");
        assert!(matches!(err, Error::UnsupportedSchema));
    }

    #[test]
    fn integer_identifiers_become_text() {
        let connection = Connection::open_in_memory().expect("in-memory db");
        connection
            .execute_batch(
                "CREATE TABLE Buildings (id INTEGER PRIMARY KEY, collegeId INTEGER, name TEXT);
                 CREATE TABLE Floors (id INTEGER PRIMARY KEY, buildingId INTEGER,
                                      floorNumber INTEGER, name TEXT);
                 CREATE TABLE Rooms (id INTEGER PRIMARY KEY, name TEXT, floorId INTEGER,
                                     coordinates TEXT);
                 CREATE TABLE Connections (id INTEGER PRIMARY KEY, fromPlaceId INTEGER,
                                           toPlaceId INTEGER, distance REAL, type TEXT);
                 INSERT INTO Buildings VALUES (1, 1, 'Main Block');
                 INSERT INTO Floors VALUES (7, 1, 0, 'Ground Floor');
                 INSERT INTO Rooms VALUES (10, 'Room 101', 7, '10,20');
                 INSERT INTO Rooms VALUES (11, 'Stairwell', 7, NULL);
                 INSERT INTO Connections VALUES (1, 10, 11, 4.5, 'stairs');",
            )
            .expect("schema created");

        let campus = load_from_connection(&connection).expect("legacy schema loads");
        assert_eq!(campus.places[0].id, "10");
        assert_eq!(campus.places[0].building_id, "1");
        assert_eq!(campus.places[0].position, Position::new(10.0, 20.0));
        assert_eq!(campus.places[1].position, Position::default());
        assert_eq!(campus.connections[0].from_place_id, "10");
        assert!(!campus.connections[0].is_accessible);
    }
}
