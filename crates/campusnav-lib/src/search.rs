//! Case-insensitive place search.

use serde::Serialize;

use crate::campus::{Building, Campus, Floor, Place};

/// Number of results returned when the caller does not ask for a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A place matching a search query, with its floor and building resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub place: Place,
    pub floor: Floor,
    pub building: Building,
    /// Display string such as `Physics Lab (PL-1) · Science Block, First Floor`.
    pub full_name: String,
}

/// Search places by name, short code or category.
///
/// When `college` is given only places inside that college's buildings are
/// considered. Places whose floor or building cannot be resolved are skipped.
/// Results keep input order and are capped at `limit`.
pub fn search_places(
    campus: &Campus,
    query: &str,
    college: Option<&str>,
    limit: usize,
) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let scope: Option<Vec<&str>> = college.map(|college| {
        campus
            .buildings_of(college)
            .into_iter()
            .map(|building| building.id.as_str())
            .collect()
    });

    campus
        .places
        .iter()
        .filter(|place| matches_query(place, &needle))
        .filter_map(|place| {
            let building = campus.building(&place.building_id)?;
            if scope
                .as_ref()
                .is_some_and(|ids| !ids.contains(&building.id.as_str()))
            {
                return None;
            }
            let floor = campus.floor(&place.floor_id)?;
            Some(SearchResult {
                full_name: full_name(place, floor, building),
                place: place.clone(),
                floor: floor.clone(),
                building: building.clone(),
            })
        })
        .take(limit)
        .collect()
}

fn matches_query(place: &Place, needle: &str) -> bool {
    place.name.to_lowercase().contains(needle)
        || place
            .code
            .as_deref()
            .is_some_and(|code| code.to_lowercase().contains(needle))
        || place.category.label().contains(needle)
}

fn full_name(place: &Place, floor: &Floor, building: &Building) -> String {
    match place.code.as_deref().filter(|code| !code.is_empty()) {
        Some(code) => format!(
            "{} ({}) · {}, {}",
            place.name, code, building.name, floor.name
        ),
        None => format!("{} · {}, {}", place.name, building.name, floor.name),
    }
}
