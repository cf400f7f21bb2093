// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments, loads the
// campus snapshot once and dispatches to these handlers.

pub mod floors;
pub mod route;
pub mod search;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use campusnav_lib::{load_campus, resolve_campus_path, Campus};

/// Resolve the campus data path and load the snapshot it points at.
pub fn load_campus_data(explicit: Option<&Path>) -> Result<Campus> {
    let path = resolve_campus_path(explicit).context("failed to resolve campus data path")?;
    debug!(path = %path.display(), "loading campus data");
    load_campus(&path)
        .with_context(|| format!("failed to load campus data from {}", path.display()))
}
