//! Text and styles shared by the browser components.

use ratatui::style::{Color, Modifier, Style};

pub const ICON_DIRECTORY: &str = "📁";
pub const ICON_FILE: &str = "📄";
pub const ICON_EXCLUDED: &str = "🚫";
pub const CURSOR: &str = "❯";
pub const SELECTED_PREFIX: &str = "✔ ";
pub const UNSELECTED_PREFIX: &str = "  ";

pub const HELP_NORMAL: (&str, &str) = (
    "Select files ",
    "(space: select, a: select all, ctrl+p: find path, /: filter, q: save, ctrl+c: quit)",
);
pub const HELP_PATH_INPUT: (&str, &str) = (
    "Enter path ",
    "(enter: confirm, esc: cancel, tab: autocomplete)",
);
pub const HELP_FILTER: (&str, &str) = (
    "Filter ",
    "(type to filter, enter: confirm, esc: cancel)",
);

pub const PATH_PREFIX: &str = "Current path: ";
pub const INPUT_PROMPT: &str = "> ";
pub const EMPTY_DIRECTORY: &str = "[ This directory is empty ]";
pub const NO_MATCHES: &str = "[ No matching files or directories found ]";

pub fn filter_indicator(query: &str) -> Option<String> {
    (!query.is_empty()).then(|| format!(" [Filtering by: \"{query}\"]"))
}

pub fn status_footer(selected: usize) -> String {
    format!("Selected {selected} items. Press 'q' to save and exit.")
}

pub fn hint() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn selected() -> Style {
    Style::default().fg(Color::Green)
}

pub fn cursor() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn faint() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}
