//! Output rendering for CLI commands.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use campusnav_lib::{Building, Floor, RouteRenderMode, RouteSummary, SearchResult};

use crate::terminal::{ColorPalette, StepTag, Style};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tagged, optionally colored lines for a terminal.
    #[default]
    Text,
    /// Numbered, uncolored lines for logs and pipes.
    Plain,
    /// Markdown suitable for chat clients and notes.
    Rich,
    /// Short sentences for a text-to-speech engine.
    Spoken,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Whether the elapsed-time footer should follow the output.
    pub fn shows_footer(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Rich)
    }

    /// Print a route summary in this format.
    pub fn render_route(self, summary: &RouteSummary, palette: &ColorPalette) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", format_route_text(summary, palette)),
            OutputFormat::Plain => print!("{}", summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Rich => println!("{}", summary.render(RouteRenderMode::RichText)),
            OutputFormat::Spoken => println!("{}", summary.render(RouteRenderMode::Spoken)),
            OutputFormat::Json => render_json(summary)?,
        }
        Ok(())
    }

    /// Print place search results in this format.
    pub fn render_search(
        self,
        query: &str,
        results: &[SearchResult],
        palette: &ColorPalette,
    ) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(&results)?,
            OutputFormat::Rich => print!("{}", format_search_rich(query, results)),
            OutputFormat::Spoken => println!("{}", format_search_spoken(query, results)),
            OutputFormat::Text => print!("{}", format_search_text(query, results, palette)),
            OutputFormat::Plain => print!(
                "{}",
                format_search_text(query, results, &ColorPalette::plain())
            ),
        }
        Ok(())
    }

    /// Print the floors of a building in this format.
    pub fn render_floors(self, listing: &FloorListing, palette: &ColorPalette) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(listing)?,
            OutputFormat::Plain => print!(
                "{}",
                format_floors_text(listing, &ColorPalette::plain())
            ),
            _ => print!("{}", format_floors_text(listing, palette)),
        }
        Ok(())
    }
}

/// Floors of one building with the number of places on each.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorListing {
    pub building: Building,
    pub floors: Vec<FloorEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorEntry {
    #[serde(flatten)]
    pub floor: Floor,
    pub place_count: usize,
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    handle.write_all(b"\n")?;
    Ok(())
}

/// Print the trailing "Completed in" line.
pub fn print_footer(elapsed: Duration, palette: &ColorPalette) {
    let line = format!("Completed in {}ms", elapsed.as_millis());
    println!("{}", palette.paint(Style::Muted, &line));
}

/// Tagged terminal rendering of a route summary.
pub fn format_route_text(summary: &RouteSummary, palette: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Route from {} to {} ({} hops, {}):",
        palette.paint(Style::Name, &summary.start.name),
        palette.paint(Style::Name, &summary.goal.name),
        summary.hops,
        summary.algorithm
    );

    let last = summary.instructions.len().saturating_sub(1);
    for (position, instruction) in summary.instructions.iter().enumerate() {
        let tag = StepTag::for_instruction(instruction, position == last);
        let location = format!("· {}, {}", instruction.building, instruction.floor);
        let _ = writeln!(
            out,
            " {} {} {}",
            palette.tag(tag),
            instruction.text,
            palette.paint(Style::Muted, &location)
        );
    }

    let totals = &summary.totals;
    let _ = writeln!(
        out,
        "\nDistance: {} · Steps: {} · Time: {} · Floor changes: {}",
        palette.paint(Style::Figure, &totals.distance_label),
        palette.paint(Style::Figure, &totals.footsteps.to_string()),
        palette.paint(Style::Figure, &totals.time_label),
        totals.floors_traversed,
    );
    out
}

fn format_search_text(query: &str, results: &[SearchResult], palette: &ColorPalette) -> String {
    if results.is_empty() {
        return format!("No places match '{query}'.\n");
    }
    let mut out = String::new();
    for result in results {
        let code = result
            .place
            .code
            .as_deref()
            .map(|code| format!(" {}", palette.paint(Style::Code, &format!("[{code}]"))))
            .unwrap_or_default();
        let location = format!(
            "· {}, {} ({})",
            result.building.name, result.floor.name, result.place.id
        );
        let _ = writeln!(
            out,
            "{}{} {}",
            palette.paint(Style::Name, &result.place.name),
            code,
            palette.paint(Style::Muted, &location)
        );
    }
    out
}

fn format_search_rich(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("_No places match '{query}'._\n");
    }
    let mut out = format!("**Places matching** _{query}_\n\n");
    for result in results {
        let _ = writeln!(out, "- {} (`{}`)", result.full_name, result.place.id);
    }
    out
}

fn format_search_spoken(query: &str, results: &[SearchResult]) -> String {
    match results {
        [] => format!("No places match {query}."),
        [only] => format!(
            "Found {} in {}, {}.",
            only.place.name, only.building.name, only.floor.name
        ),
        _ => {
            let names: Vec<_> = results.iter().map(|r| r.place.name.as_str()).collect();
            format!("Found {} places: {}.", results.len(), names.join(", "))
        }
    }
}

fn format_floors_text(listing: &FloorListing, palette: &ColorPalette) -> String {
    let mut out = String::new();
    let building = &listing.building;
    let name = palette.paint(Style::Name, &building.name);
    if building.code.is_empty() {
        let _ = writeln!(out, "{name}");
    } else {
        let code = palette.paint(Style::Code, &format!("[{}]", building.code));
        let _ = writeln!(out, "{name} {code}");
    }
    if listing.floors.is_empty() {
        out.push_str("  (no floors)\n");
        return out;
    }
    for entry in &listing.floors {
        let noun = if entry.place_count == 1 { "place" } else { "places" };
        let count = format!("({} {noun})", entry.place_count);
        let _ = writeln!(
            out,
            "  {:>3}  {} {}",
            entry.floor.floor_number,
            entry.floor.name,
            palette.paint(Style::Muted, &count)
        );
    }
    out
}
