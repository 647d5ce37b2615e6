//! # Key Map
//!
//! Translates a `TuiEvent` into a core `Action`, depending on the browser
//! mode. Returns `None` for keys that mean nothing in that mode.
//!
//! | Key              | Normal          | PathInput     | Filter        |
//! |------------------|-----------------|---------------|---------------|
//! | ↑ / k            | CursorUp        | (char)        | (char)        |
//! | ↓ / j            | CursorDown      | (char)        | (char)        |
//! | Ctrl+Home / g    | CursorTop       | (char)        | (char)        |
//! | Ctrl+End / G     | CursorBottom    | (char)        | (char)        |
//! | Enter            | EnterDirectory  | Submit        | Submit        |
//! | Backspace        | GoToParent      | InputBackspace| InputBackspace|
//! | Space            | ToggleSelection | (char)        | (char)        |
//! | a / Ctrl+A       | ToggleSelectAll | (char)        | (char)        |
//! | /                | StartFilter     | (char)        | (char)        |
//! | p / Ctrl+P       | StartPathInput  | (char)        | (char)        |
//! | Tab              |                 | Autocomplete  |               |
//! | Esc              | ClearFilter     | Cancel        | Cancel        |
//! | q                | Confirm         | (char)        | (char)        |
//! | Ctrl+C           | Abort           | Cancel        | Cancel        |

use crate::core::action::Action;
use crate::core::state::Mode;
use crate::tui::event::TuiEvent;

pub fn action_for(mode: Mode, event: &TuiEvent) -> Option<Action> {
    match mode {
        Mode::Normal => normal_action(event),
        Mode::PathInput | Mode::Filter => input_action(mode, event),
    }
}

fn normal_action(event: &TuiEvent) -> Option<Action> {
    let action = match event {
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => Action::CursorUp,
        TuiEvent::CursorDown | TuiEvent::InputChar('j') => Action::CursorDown,
        TuiEvent::Home | TuiEvent::InputChar('g') => Action::CursorTop,
        TuiEvent::End | TuiEvent::InputChar('G') => Action::CursorBottom,
        TuiEvent::Submit => Action::EnterDirectory,
        TuiEvent::Backspace => Action::GoToParent,
        TuiEvent::InputChar(' ') => Action::ToggleSelection,
        TuiEvent::InputChar('a') | TuiEvent::Ctrl('a') => Action::ToggleSelectAll,
        TuiEvent::InputChar('/') => Action::StartFilter,
        TuiEvent::InputChar('p') | TuiEvent::Ctrl('p') => Action::StartPathInput,
        TuiEvent::Escape => Action::ClearFilter,
        TuiEvent::InputChar('q') => Action::Confirm,
        TuiEvent::Ctrl('c') => Action::Abort,
        _ => return None,
    };
    Some(action)
}

fn input_action(mode: Mode, event: &TuiEvent) -> Option<Action> {
    let action = match event {
        TuiEvent::InputChar(c) => Action::InputChar(*c),
        TuiEvent::Paste(text) => Action::InputText(text.clone()),
        TuiEvent::Backspace => Action::InputBackspace,
        TuiEvent::Tab if mode == Mode::PathInput => Action::Autocomplete,
        TuiEvent::Submit => Action::Submit,
        TuiEvent::Escape | TuiEvent::Ctrl('c') => Action::Cancel,
        _ => return None,
    };
    Some(action)
}
