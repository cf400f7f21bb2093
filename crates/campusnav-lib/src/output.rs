use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::format::{format_distance, format_time};
use crate::narrate::{Direction, NavigationStep};
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
    /// Short sentences suitable for a text-to-speech engine.
    Spoken,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteEndpoint {
    pub id: String,
    pub name: String,
    pub floor: String,
    pub building: String,
}

impl RouteEndpoint {
    fn from_step(step: &NavigationStep) -> Self {
        Self {
            id: step.place.id.clone(),
            name: step.place.name.clone(),
            floor: step.floor.name.clone(),
            building: step.building.name.clone(),
        }
    }

    fn location(&self) -> String {
        format!("{}, {}", self.building, self.floor)
    }
}

/// One narrated instruction of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteInstruction {
    pub index: usize,
    pub text: String,
    pub direction: Direction,
    /// Meters walked since the previous instruction, rounded.
    pub distance: u64,
    pub is_floor_change: bool,
    pub place: String,
    pub floor: String,
    pub building: String,
}

/// Aggregate totals with pre-formatted labels.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteTotals {
    pub distance: u64,
    pub distance_label: String,
    pub footsteps: u64,
    pub estimated_seconds: u64,
    pub time_label: String,
    pub floors_traversed: usize,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub instructions: Vec<RouteInstruction>,
    pub totals: RouteTotals,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary.
    pub fn from_plan(plan: &RoutePlan) -> Result<Self> {
        let steps = &plan.result.steps;
        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };

        let instructions = steps
            .iter()
            .enumerate()
            .map(|(index, step)| RouteInstruction {
                index: index + 1,
                text: step.instruction.clone(),
                direction: step.direction,
                distance: step.distance.round() as u64,
                is_floor_change: step.is_floor_change,
                place: step.place.name.clone(),
                floor: step.floor.name.clone(),
                building: step.building.name.clone(),
            })
            .collect();

        let result = &plan.result;
        Ok(Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            start: RouteEndpoint::from_step(first),
            goal: RouteEndpoint::from_step(last),
            instructions,
            totals: RouteTotals {
                distance: result.total_distance,
                distance_label: format_distance(result.total_distance),
                footsteps: result.footsteps,
                estimated_seconds: result.estimated_seconds,
                time_label: format_time(result.estimated_seconds),
                floors_traversed: result.floors_traversed,
            },
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
            RouteRenderMode::Spoken => self.render_spoken(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {})",
            self.start.name, self.goal.name, self.hops, self.algorithm
        );
        for instruction in &self.instructions {
            let _ = writeln!(
                buffer,
                "{:>3}. {} [{}, {}]",
                instruction.index, instruction.text, instruction.building, instruction.floor
            );
        }
        let _ = writeln!(buffer, "{}", self.totals_line());
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} ({}) → {} ({})_ ({} hops, algorithm: `{}`)",
            self.start.name,
            self.start.location(),
            self.goal.name,
            self.goal.location(),
            self.hops,
            self.algorithm
        );
        for instruction in &self.instructions {
            if instruction.is_floor_change {
                let _ = writeln!(
                    buffer,
                    "{}. **{}** (`{}`)",
                    instruction.index, instruction.text, instruction.place
                );
            } else {
                let _ = writeln!(
                    buffer,
                    "{}. {} (`{}`)",
                    instruction.index, instruction.text, instruction.place
                );
            }
        }
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "_{}_", self.totals_line());
        buffer
    }

    fn render_spoken(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Directions from {} to {}.",
            self.start.name, self.goal.name
        );
        for instruction in &self.instructions {
            let _ = writeln!(buffer, "Step {}. {}.", instruction.index, instruction.text);
        }
        let _ = writeln!(
            buffer,
            "Total distance {}, about {}.",
            self.totals.distance_label, self.totals.time_label
        );
        buffer
    }

    fn totals_line(&self) -> String {
        let floors = match self.totals.floors_traversed {
            1 => "1 floor change".to_string(),
            count => format!("{count} floor changes"),
        };
        format!(
            "Total: {} · {} steps · {} · {}",
            self.totals.distance_label, self.totals.footsteps, self.totals.time_label, floors
        )
    }
}
