//! # StatusBar Component
//!
//! Bottom line with the selection count. Stateless: the count is a prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;
use crate::tui::theme;

pub struct StatusBar {
    pub selected: usize,
}

impl StatusBar {
    pub fn new(selected: usize) -> Self {
        Self { selected }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(theme::status_footer(self.selected)), area);
    }
}
