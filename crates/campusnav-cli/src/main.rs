mod commands;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campusnav_cli::output::{print_footer, OutputFormat};
use campusnav_cli::terminal::ColorPalette;
use campusnav_lib::{RouteAlgorithm, ACCESSIBILITY_PENALTY, DATA_PATH_ENV, DEFAULT_SEARCH_LIMIT};

use commands::route::{handle_route_command, RouteCommandArgs};
use commands::search::{handle_search_command, SearchCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor campus navigation")]
struct Cli {
    /// Campus data file: a JSON snapshot or a SQLite database.
    #[arg(long, global = true, env = DATA_PATH_ENV)]
    data: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors even when the terminal supports them.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a walking route between two places.
    Route {
        /// Starting place id or name.
        #[arg(long = "from")]
        from: String,
        /// Destination place id or name.
        #[arg(long = "to")]
        to: String,
        /// Path search algorithm (dijkstra or bfs).
        #[arg(long, default_value_t = RouteAlgorithm::Dijkstra)]
        algorithm: RouteAlgorithm,
        /// Prefer step-free connections such as lifts and ramps.
        #[arg(long)]
        prefer_accessible: bool,
        /// Extra cost in meters for inaccessible connections.
        #[arg(long, default_value_t = ACCESSIBILITY_PENALTY, value_parser = parse_penalty)]
        accessibility_penalty: f64,
    },
    /// Search places by name, code or category.
    Search {
        /// Text to look for.
        query: String,
        /// Only search inside this college.
        #[arg(long)]
        college: Option<String>,
        /// Maximum number of results.
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// List the floors of a building.
    Floors {
        /// Building id, name or code.
        #[arg(long)]
        building: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let palette = ColorPalette::from_env(cli.no_color);
    let started = Instant::now();

    let campus = commands::load_campus_data(cli.data.as_deref())?;

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
            prefer_accessible,
            accessibility_penalty,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm,
                prefer_accessible,
                accessibility_penalty,
            };
            handle_route_command(&campus, cli.format, &palette, &args)?;
        }
        Command::Search {
            query,
            college,
            limit,
        } => {
            let args = SearchCommandArgs {
                query,
                college,
                limit,
            };
            handle_search_command(&campus, cli.format, &palette, &args)?;
        }
        Command::Floors { building } => {
            commands::floors::handle_floors_command(&campus, cli.format, &palette, &building)?;
        }
    }

    if cli.format.shows_footer() {
        print_footer(started.elapsed(), &palette);
    }
    Ok(())
}

/// Parse `--accessibility-penalty`, rejecting negative and non-finite values.
fn parse_penalty(value: &str) -> std::result::Result<f64, String> {
    let penalty: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !penalty.is_finite() || penalty < 0.0 {
        return Err(format!(
            "penalty must be a finite, non-negative number of meters, got '{value}'"
        ));
    }
    Ok(penalty)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
