use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{BrowserState, Mode};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CompletionGrid, FileList, Header, StatusBar};

pub fn draw_ui(frame: &mut Frame, state: &BrowserState, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let mut header = Header::new(state);
    let layout = Layout::vertical([Length(header.height()), Min(0), Length(1)]);
    let [header_area, main_area, status_area] = layout.areas(frame.area());

    header.render(frame, header_area);

    if state.mode == Mode::PathInput {
        CompletionGrid::new(&state.completion_suggestions).render(frame, main_area);
    } else {
        FileList::new(&mut tui.file_list, state).render(frame, main_area);
    }

    StatusBar::new(state.selection.len()).render(frame, status_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{MemoryFs, test_browser};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(state: &BrowserState) -> Vec<String> {
        let backend = TestBackend::new(100, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::default();
        terminal
            .draw(|f| draw_ui(f, state, &mut tui))
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn proj() -> MemoryFs {
        MemoryFs::new()
            .file("/proj/a.txt", "hello")
            .file("/proj/apricot.txt", "")
            .dir("/proj/apple")
    }

    #[test]
    fn test_normal_screen() {
        let mut browser = test_browser(proj(), "/proj");
        update(&mut browser, Action::CursorDown);
        update(&mut browser, Action::ToggleSelection);

        let lines = screen(&browser.state);

        assert_eq!(lines[1], "Current path: /proj");
        assert!(lines[3].contains("✔") && lines[3].contains("apple/"));
        assert_eq!(lines[7], "Selected 1 items. Press 'q' to save and exit.");
    }

    #[test]
    fn test_path_input_shows_completion_grid() {
        let mut browser = test_browser(proj(), "/proj");
        update(&mut browser, Action::StartPathInput);
        update(&mut browser, Action::InputChar('a'));
        update(&mut browser, Action::InputChar('p'));

        let lines = screen(&browser.state);

        assert_eq!(lines[1], "> /proj/ap");
        assert_eq!(lines[2], "apple/  apricot.txt");
    }
}
