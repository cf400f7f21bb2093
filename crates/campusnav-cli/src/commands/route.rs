//! Route command handler for computing paths between places.

use anyhow::{Context, Result};

use campusnav_lib::{
    plan_route, Campus, Error as RouteError, RouteAlgorithm, RouteRequest, RouteSummary,
};

use campusnav_cli::output::OutputFormat;
use campusnav_cli::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting place id or name.
    pub from: String,
    /// Destination place id or name.
    pub to: String,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// Steer around stairs and other inaccessible connections.
    pub prefer_accessible: bool,
    /// Extra cost for inaccessible connections, in meters.
    pub accessibility_penalty: f64,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            start: self.from.clone(),
            goal: self.to.clone(),
            algorithm: self.algorithm,
            prefer_accessible: self.prefer_accessible,
            accessibility_penalty: self.accessibility_penalty,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    campus: &Campus,
    format: OutputFormat,
    palette: &ColorPalette,
    args: &RouteCommandArgs,
) -> Result<()> {
    let request = args.to_request();
    let plan = match plan_route(campus, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(&request, err)),
    };

    let summary =
        RouteSummary::from_plan(&plan).context("failed to build route summary for display")?;
    format.render_route(&summary, palette)
}

fn handle_route_failure(request: &RouteRequest, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownPlace { name, suggestions } => {
            anyhow::anyhow!(format_unknown_place_message(&name, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(&start, &goal, request))
        }
        RouteError::PlaceNotRoutable { id } => anyhow::anyhow!(
            "Place '{id}' cannot be routed because its floor or building is missing from the campus data."
        ),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_place_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown place '{}'.", name);
    match suggestions {
        [] => {}
        [only] => {
            message.push_str(&format!(" Did you mean '{only}'?"));
        }
        _ => {
            let joined = suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_route_not_found_message(start: &str, goal: &str, request: &RouteRequest) -> String {
    let mut message = format!("No route found between {} and {}.", start, goal);
    if request.prefer_accessible {
        message.push_str(
            " Accessible routing only penalises inaccessible connections, so the two places are not connected at all.",
        );
    }
    message.push_str(" Check that both places are linked to the corridor network.");
    message
}
