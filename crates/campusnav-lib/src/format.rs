//! Human-readable formatting for route totals.

use crate::campus::Position;

/// Default floor-plan scale in meters per pixel.
pub const DEFAULT_METERS_PER_PIXEL: f64 = 0.1;

/// Format a duration in seconds, e.g. `45 sec`, `2 min`, `1 min 30 sec`.
pub fn format_time(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds} sec");
    }
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    if remaining == 0 {
        format!("{minutes} min")
    } else {
        format!("{minutes} min {remaining} sec")
    }
}

/// Format a distance in meters, switching to kilometres with one decimal
/// (rounded half up) from 1000 m.
pub fn format_distance(meters: u64) -> String {
    if meters < 1000 {
        return format!("{meters} m");
    }
    let tenths = (meters + 50) / 100;
    format!("{}.{} km", tenths / 10, tenths % 10)
}

/// Convert the pixel distance between two floor-plan positions into meters.
pub fn calculate_distance(from: Position, to: Position, meters_per_pixel: f64) -> f64 {
    from.distance_to(&to) * meters_per_pixel
}
