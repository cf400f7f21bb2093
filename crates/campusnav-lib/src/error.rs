use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the campus navigation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Campus data could not be located at the resolved path.
    #[error("campus data not found at {path}")]
    CampusDataNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for campus data")]
    ProjectDirsUnavailable,

    /// Raised when attempting to load a schema that is not supported.
    #[error("unsupported campus schema; expected Places/Connections or Rooms/Connections tables")]
    UnsupportedSchema,

    /// Raised when a stored place position cannot be parsed.
    #[error("invalid coordinates '{value}' for place {place}")]
    InvalidCoordinates { place: String, value: String },

    /// Raised when a place identifier or name could not be found in the campus.
    #[error("unknown place: {name}{}", format_suggestions(.suggestions))]
    UnknownPlace {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a place exists but its floor or building does not resolve,
    /// so it never becomes a graph node.
    #[error("place {id} is not routable; its floor or building is missing")]
    PlaceNotRoutable { id: String },

    /// Raised when no route could be found between two places.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any steps.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON snapshot parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_place_without_suggestions_is_terse() {
        let err = Error::UnknownPlace {
            name: "Room 999".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown place: Room 999");
    }

    #[test]
    fn unknown_place_lists_suggestions() {
        let err = Error::UnknownPlace {
            name: "Libary".to_string(),
            suggestions: vec!["Library".to_string(), "Central Library".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown place: Libary. Did you mean one of: 'Library', 'Central Library'?"
        );
    }
}
