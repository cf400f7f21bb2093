use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::campus::Campus;
use crate::db::load_campus_db;
use crate::error::{Error, Result};

/// Environment variable overriding the campus data location.
pub const DATA_PATH_ENV: &str = "CAMPUSNAV_DATA";

/// Default filename for the campus database.
const CAMPUS_FILENAME: &str = "campus.db";

/// Resolve the default campus data location using platform-specific project directories.
pub fn default_campus_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "campusnav", "campusnav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(CAMPUS_FILENAME))
}

/// Pick the campus data path: an explicit path wins, then `CAMPUSNAV_DATA`,
/// then [`default_campus_path`].
pub fn resolve_campus_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env::var_os(DATA_PATH_ENV).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(env_path);
        debug!(path = %path.display(), "using campus data from environment");
        return Ok(path);
    }
    default_campus_path()
}

/// Load a campus snapshot. Files ending in `.json` are parsed as a JSON
/// document; anything else is opened as a SQLite database.
pub fn load_campus(path: &Path) -> Result<Campus> {
    if !path.exists() {
        return Err(Error::CampusDataNotFound {
            path: path.to_path_buf(),
        });
    }

    if is_json(path) {
        debug!(path = %path.display(), "loading campus snapshot from JSON");
        let contents = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&contents)?);
    }

    load_campus_db(path)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
