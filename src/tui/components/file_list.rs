//! # File List Component
//!
//! The directory listing: one row per visible entry with the cursor marker,
//! a selection check, an icon, and the name (directories get a trailing `/`).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FileListState` lives in `TuiState` and keeps the scroll offset
//! - `FileList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::core::state::{BrowserState, Entry};
use crate::tui::component::Component;
use crate::tui::theme;

/// Persistent state for the file list.
#[derive(Default)]
pub struct FileListState {
    pub list_state: ListState,
}

/// Transient render wrapper for the file list.
pub struct FileList<'a> {
    state: &'a mut FileListState,
    browser: &'a BrowserState,
}

impl<'a> FileList<'a> {
    pub fn new(state: &'a mut FileListState, browser: &'a BrowserState) -> Self {
        Self { state, browser }
    }

    fn item(&self, entry: &Entry, under_cursor: bool) -> ListItem<'static> {
        let is_selected = self.browser.is_selected(entry);

        let mut name_style = if under_cursor {
            theme::cursor()
        } else {
            ratatui::style::Style::default()
        };
        if entry.is_excluded {
            name_style = name_style.patch(theme::faint());
        } else if is_selected {
            name_style = name_style.patch(theme::selected());
        }

        let prefix = if is_selected && !entry.is_excluded {
            theme::SELECTED_PREFIX
        } else {
            theme::UNSELECTED_PREFIX
        };
        let icon = if entry.is_excluded {
            theme::ICON_EXCLUDED
        } else if entry.is_dir {
            theme::ICON_DIRECTORY
        } else {
            theme::ICON_FILE
        };
        let cursor = if under_cursor { theme::CURSOR } else { " " };
        let name = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };

        ListItem::new(Line::from(vec![
            Span::styled(cursor, theme::cursor()),
            Span::styled(format!(" {prefix}{icon} "), name_style),
            Span::styled(name, name_style),
        ]))
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let message = if self.browser.entries.is_empty() {
            theme::EMPTY_DIRECTORY
        } else {
            theme::NO_MATCHES
        };
        let padding = area.height / 2;
        let mut lines = vec![Line::raw(""); padding as usize];
        lines.push(Line::raw(message));
        let paragraph = Paragraph::new(lines)
            .style(theme::faint())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

impl Component for FileList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = self.browser.visible_entries();
        if visible.is_empty() {
            self.state.list_state.select(None);
            self.render_empty(frame, area);
            return;
        }

        let cursor = self.browser.cursor;
        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(i, entry)| self.item(entry, i == cursor))
            .collect();

        // ListState scrolls just enough to keep the selection on screen.
        self.state.list_state.select(Some(cursor));
        frame.render_stateful_widget(List::new(items), area, &mut self.state.list_state);
    }
}
