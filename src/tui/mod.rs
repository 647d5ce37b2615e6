//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the browser,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws after an event changed
//! something (or the terminal was resized). Between events it sleeps in
//! `poll` for up to 500ms. All pending events are drained before the next
//! draw so fast typing or a paste doesn't redraw once per key.

mod component;
mod components;
mod event;
mod keymap;
mod theme;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Effect, update};
use crate::core::state::Browser;
use crate::tui::components::FileListState;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    pub file_list: FileListState,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Visible while typing a path or filter
            SetCursorStyle::SteadyBlock, // Non-blinking: draw() resets the blink timer
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, SetCursorStyle::DefaultUserShape, Hide);
    }
}

/// Run the interactive browser until the user confirms or aborts, then
/// hand the browser back so the caller can read the selection.
pub fn run(mut browser: Browser) -> std::io::Result<Browser> {
    let mut terminal = ratatui::init();
    let result = {
        let _terminal_mode_guard = TerminalModeGuard::new()?;
        event_loop(&mut terminal, &mut browser)
    };
    ratatui::restore();
    result.map(|()| browser)
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, browser: &mut Browser) -> std::io::Result<()> {
    let mut tui = TuiState::default();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &browser.state, &mut tui))?;
            needs_redraw = false;
        }

        let Some(first_event) = poll_event_timeout(IDLE_POLL)? else {
            continue;
        };
        needs_redraw = true;

        // Process first event + drain ALL pending events before next draw
        let mut pending = Some(first_event);
        while let Some(event) = pending {
            if let Some(action) = keymap::action_for(browser.state.mode, &event) {
                if update(browser, action) == Effect::Exit {
                    info!(
                        "Browser exited (aborted={}, selected={})",
                        browser.state.aborted,
                        browser.state.selection.len()
                    );
                    return Ok(());
                }
            } else {
                debug!("Unmapped event in {:?} mode: {:?}", browser.state.mode, event);
            }
            pending = poll_event_immediate()?;
        }
    }
}
