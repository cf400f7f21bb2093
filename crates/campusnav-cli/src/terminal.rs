//! Terminal styling for route, search and floor output.

use std::ffi::OsStr;

use campusnav_lib::{Direction, RouteInstruction};

const RESET: &str = "\x1b[0m";

/// Badge printed in front of each route instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTag {
    Start,
    Walk,
    Turn,
    Up,
    Down,
    Goal,
}

impl StepTag {
    /// Pick the badge for an instruction. The first and last instructions are
    /// always the start and goal markers.
    pub fn for_instruction(instruction: &RouteInstruction, is_last: bool) -> Self {
        if instruction.index == 1 {
            return StepTag::Start;
        }
        if is_last {
            return StepTag::Goal;
        }
        match instruction.direction {
            Direction::Up => StepTag::Up,
            Direction::Down => StepTag::Down,
            Direction::Left | Direction::Right => StepTag::Turn,
            Direction::Straight => StepTag::Walk,
        }
    }

    /// Four-column label so instruction text lines up.
    pub fn label(self) -> &'static str {
        match self {
            StepTag::Start => "STRT",
            StepTag::Walk => " GO ",
            StepTag::Turn => "TURN",
            StepTag::Up => " UP ",
            StepTag::Down => "DOWN",
            StepTag::Goal => "GOAL",
        }
    }

    // Bold reverse video badges.
    fn ansi(self) -> &'static str {
        match self {
            StepTag::Start => "\x1b[1;7;32m",
            StepTag::Walk | StepTag::Turn => "\x1b[1;7;36m",
            StepTag::Up | StepTag::Down => "\x1b[1;7;33m",
            StepTag::Goal => "\x1b[1;7;35m",
        }
    }
}

/// Text roles styled by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Place and building names.
    Name,
    /// Short codes such as `PL-1`.
    Code,
    /// Locations, identifiers and the footer.
    Muted,
    /// Distances, step counts and times.
    Figure,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Name => "\x1b[1;97m",
            Style::Code => "\x1b[36m",
            Style::Muted => "\x1b[90m",
            Style::Figure => "\x1b[32m",
        }
    }
}

/// Decides whether output carries ANSI escapes and applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    enabled: bool,
}

impl ColorPalette {
    /// Palette for the current process: `--no-color`, then `NO_COLOR`, then
    /// `TERM=dumb` turn colors off.
    pub fn from_env(no_color_flag: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR");
        let term = std::env::var("TERM").ok();
        Self {
            enabled: color_enabled(no_color_flag, no_color.as_deref(), term.as_deref()),
        }
    }

    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    pub const fn colored() -> Self {
        Self { enabled: true }
    }

    /// Wrap `text` in the escape codes for `style`.
    pub fn paint(self, style: Style, text: &str) -> String {
        self.wrap(style.ansi(), text)
    }

    /// Bracketed badge for a route instruction, e.g. `[GOAL]`.
    pub fn tag(self, tag: StepTag) -> String {
        self.wrap(tag.ansi(), &format!("[{}]", tag.label()))
    }

    fn wrap(self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn color_enabled(no_color_flag: bool, no_color_env: Option<&OsStr>, term: Option<&str>) -> bool {
    if no_color_flag || no_color_env.is_some() {
        return false;
    }
    !term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"))
}
