use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    CursorUp,
    CursorDown,
    Home,
    End,
    Submit,
    Backspace,
    Tab,
    Escape,
    /// A printable character with no control modifier.
    InputChar(char),
    /// Ctrl + letter.
    Ctrl(char),
    Paste(String), // Bracketed paste
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            translate_key(key_event)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    })
}

/// Map a crossterm key press to a `TuiEvent`. Releases and repeats
/// reported by the keyboard enhancement protocol are dropped.
pub fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char(c) if ctrl => Some(TuiEvent::Ctrl(c.to_ascii_lowercase())),
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home if ctrl => Some(TuiEvent::Home),
        KeyCode::End if ctrl => Some(TuiEvent::End),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Tab => Some(TuiEvent::Tab),
        KeyCode::Esc => Some(TuiEvent::Escape),
        _ => None,
    }
}
