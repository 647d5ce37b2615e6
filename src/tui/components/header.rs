//! # Header Component
//!
//! Top block of the screen. Its content follows the browser mode:
//!
//! ```text
//! Normal                          PathInput / Filter
//! ─────────────────────────────   ─────────────────────────────
//! Select files (space: ...)       Enter path (enter: ...)
//! Current path: /proj [Filter..]  > /proj/sr█
//! Error reading directory: ...    Error: Path not found ...
//! ```
//!
//! The error line is only present while `last_error` is set.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::state::{BrowserState, Mode};
use crate::tui::component::Component;
use crate::tui::theme;

pub struct Header<'a> {
    pub state: &'a BrowserState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a BrowserState) -> Self {
        Self { state }
    }

    /// Rows the header needs before wrapping.
    pub fn height(&self) -> u16 {
        if self.state.last_error.is_some() { 3 } else { 2 }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let state = self.state;
        let (title, hint) = match state.mode {
            Mode::Normal => theme::HELP_NORMAL,
            Mode::PathInput => theme::HELP_PATH_INPUT,
            Mode::Filter => theme::HELP_FILTER,
        };
        let mut lines = vec![Line::from(vec![
            Span::raw(title),
            Span::styled(hint, theme::hint()),
        ])];

        match state.mode {
            Mode::Normal => {
                let mut path_line = vec![
                    Span::raw(theme::PATH_PREFIX),
                    Span::raw(state.current_path.display().to_string()),
                ];
                if let Some(indicator) = theme::filter_indicator(&state.filter_query) {
                    path_line.push(Span::styled(indicator, theme::hint()));
                }
                lines.push(Line::from(path_line));
            }
            Mode::PathInput => lines.push(input_line(&state.input_buffer)),
            Mode::Filter => lines.push(input_line(&state.filter_query)),
        }

        if let Some(error) = &state.last_error {
            lines.push(Line::from(Span::styled(error.as_str(), theme::error())));
        }
        lines
    }

    /// Where the terminal cursor belongs while typing.
    fn cursor_position(&self, area: Rect) -> Option<Position> {
        let text = match self.state.mode {
            Mode::Normal => return None,
            Mode::PathInput => &self.state.input_buffer,
            Mode::Filter => &self.state.filter_query,
        };
        let offset = (theme::INPUT_PROMPT.width() + text.width()) as u16;
        let x = area.x.saturating_add(offset).min(area.right().saturating_sub(1));
        Some(Position::new(x, area.y + 1))
    }
}

fn input_line(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled(theme::INPUT_PROMPT, theme::hint()), Span::raw(text)])
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines()).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        if let Some(position) = self.cursor_position(area) {
            frame.set_cursor_position(position);
        }
    }
}
