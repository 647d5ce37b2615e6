use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields, usually a borrowed
/// `BrowserState`) and render to a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so stateful components can update their
/// presentation state (list scroll offsets) during the render pass. This
/// aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
