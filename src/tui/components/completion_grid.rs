//! # Completion Grid Component
//!
//! Shows path suggestions while typing a path, laid out like `ls`:
//! sorted, filled column by column, using as many columns (up to
//! [`MAX_COLUMNS`]) as fit the width.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::theme;

pub const MAX_COLUMNS: usize = 7;
pub const COLUMN_PADDING: usize = 2;

pub struct CompletionGrid<'a> {
    pub suggestions: &'a [String],
}

impl<'a> CompletionGrid<'a> {
    pub fn new(suggestions: &'a [String]) -> Self {
        Self { suggestions }
    }
}

/// Lay `items` out in rows no wider than `width` where possible.
///
/// Tries the widest layout first. If even one column does not fit, a
/// single column is used anyway.
pub fn grid_rows(items: &[String], width: usize) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut sorted: Vec<&str> = items.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut columns = 1;
    let mut column_widths = vec![sorted.iter().map(|s| s.width()).max().unwrap_or(0)];
    for candidate in (1..=MAX_COLUMNS.min(sorted.len())).rev() {
        let rows = sorted.len().div_ceil(candidate);
        let widths: Vec<usize> = sorted
            .chunks(rows)
            .map(|column| column.iter().map(|s| s.width()).max().unwrap_or(0))
            .collect();
        let total = widths.iter().sum::<usize>() + (widths.len() - 1) * COLUMN_PADDING;
        if total <= width {
            columns = widths.len();
            column_widths = widths;
            break;
        }
    }

    let rows = sorted.len().div_ceil(columns);
    (0..rows)
        .map(|row| {
            let mut line = String::new();
            for (column, column_width) in column_widths.iter().enumerate() {
                let Some(item) = sorted.get(column * rows + row) else {
                    break;
                };
                line.push_str(item);
                if column + 1 < columns {
                    let pad = column_width - item.width() + COLUMN_PADDING;
                    line.extend(std::iter::repeat_n(' ', pad));
                }
            }
            line.truncate(line.trim_end().len());
            line
        })
        .collect()
}

impl Component for CompletionGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.suggestions.is_empty() {
            let mut lines = vec![Line::raw(""); (area.height / 2) as usize];
            lines.push(Line::raw(theme::NO_MATCHES));
            let paragraph = Paragraph::new(lines)
                .style(theme::faint())
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let lines: Vec<Line> = grid_rows(self.suggestions, area.width as usize)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}
