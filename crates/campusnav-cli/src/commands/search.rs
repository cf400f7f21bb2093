//! Search command handler for finding places by name, code or category.

use anyhow::{bail, Result};

use campusnav_lib::{search_places, Campus};

use campusnav_cli::output::OutputFormat;
use campusnav_cli::terminal::ColorPalette;

/// Arguments for the search command.
#[derive(Debug, Clone)]
pub struct SearchCommandArgs {
    pub query: String,
    /// Restrict results to one college id.
    pub college: Option<String>,
    pub limit: usize,
}

/// Handle the search subcommand.
pub fn handle_search_command(
    campus: &Campus,
    format: OutputFormat,
    palette: &ColorPalette,
    args: &SearchCommandArgs,
) -> Result<()> {
    if let Some(college) = args.college.as_deref() {
        if campus.college(college).is_none() {
            bail!("Unknown college '{college}'.");
        }
    }

    let results = search_places(campus, &args.query, args.college.as_deref(), args.limit);
    format.render_search(&args.query, &results, palette)
}
