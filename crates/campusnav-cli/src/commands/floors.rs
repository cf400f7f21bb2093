//! Floors command handler for listing the floors of a building.

use anyhow::{anyhow, Result};

use campusnav_lib::{Building, Campus};

use campusnav_cli::output::{FloorEntry, FloorListing, OutputFormat};
use campusnav_cli::terminal::ColorPalette;

/// Handle the floors subcommand.
pub fn handle_floors_command(
    campus: &Campus,
    format: OutputFormat,
    palette: &ColorPalette,
    building: &str,
) -> Result<()> {
    let building = find_building(campus, building)
        .ok_or_else(|| anyhow!("Unknown building '{building}'."))?;
    format.render_floors(&floor_listing(campus, building), palette)
}

/// Match a building by id, then by name or code ignoring case.
fn find_building<'a>(campus: &'a Campus, query: &str) -> Option<&'a Building> {
    let query = query.trim();
    campus.building(query).or_else(|| {
        campus.buildings.iter().find(|building| {
            building.name.eq_ignore_ascii_case(query)
                || (!building.code.is_empty() && building.code.eq_ignore_ascii_case(query))
        })
    })
}

fn floor_listing(campus: &Campus, building: &Building) -> FloorListing {
    let floors = campus
        .floors_of(&building.id)
        .into_iter()
        .map(|floor| FloorEntry {
            place_count: campus.places_on(&floor.id).len(),
            floor: floor.clone(),
        })
        .collect();
    FloorListing {
        building: building.clone(),
        floors,
    }
}
