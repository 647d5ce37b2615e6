//! # Actions
//!
//! Every input the browser reacts to becomes an `Action`.
//! User presses Space? That's `Action::ToggleSelection`.
//! User presses Tab while typing a path? That's `Action::Autocomplete`.
//!
//! `update()` takes the browser and an action, mutates the state, and
//! returns an `Effect` telling the event loop what to do next.
//!
//! ```text
//! Browser + Action  →  update()  →  Browser' + Effect
//! ```
//!
//! Transition table:
//!
//! ```text
//!            StartFilter            StartPathInput
//!   Filter ◀─────────────  Normal ─────────────────▶ PathInput
//!          ─────────────▶        ◀─────────────────
//!          Submit | Cancel         Submit (valid dir) | Cancel
//! ```
//!
//! Actions that mean nothing in the current mode are ignored.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::core::completion::{PathCompleter, expand_home};
use crate::core::state::{Browser, Mode};
use crate::fs::{clean, with_trailing_separator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Normal mode
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    EnterDirectory,
    GoToParent,
    ToggleSelection,
    ToggleSelectAll,
    StartFilter,
    StartPathInput,
    ClearFilter,
    Confirm,
    Abort,

    // PathInput and Filter modes
    InputChar(char),
    InputText(String),
    InputBackspace,
    Autocomplete,
    Submit,
    Cancel,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Leave the browser. `state.aborted` says whether to build.
    Exit,
}

pub fn update(browser: &mut Browser, action: Action) -> Effect {
    browser.log.debug(
        "update",
        json!({ "mode": format!("{:?}", browser.state.mode), "action": format!("{action:?}") }),
    );

    match browser.state.mode {
        Mode::Normal => update_normal(browser, action),
        Mode::PathInput => {
            update_path_input(browser, action);
            Effect::None
        }
        Mode::Filter => {
            update_filter(browser, action);
            Effect::None
        }
    }
}

fn update_normal(browser: &mut Browser, action: Action) -> Effect {
    let state = &mut browser.state;
    match action {
        Action::CursorUp => {
            state.cursor = state.cursor.saturating_sub(1);
        }
        Action::CursorDown => {
            if state.cursor < state.max_cursor() {
                state.cursor += 1;
            }
        }
        Action::CursorTop => state.cursor = 0,
        Action::CursorBottom => state.cursor = state.max_cursor(),
        Action::EnterDirectory => {
            let target = state
                .entry_under_cursor()
                .filter(|entry| entry.is_dir && !entry.is_excluded)
                .map(|entry| state.path_of(entry));
            if let Some(target) = target {
                browser.reload(target);
            }
        }
        Action::GoToParent => {
            let parent = state.current_path.parent().map(Path::to_path_buf);
            if let Some(parent) = parent
                && parent != state.current_path
            {
                browser.reload(parent);
            }
        }
        Action::ToggleSelection => {
            if let Some(entry) = state.entry_under_cursor().cloned() {
                let path = state.path_of(&entry);
                if !state.selection.remove(&path) {
                    state.selection.insert_entry(&state.current_path, &entry);
                }
            }
        }
        Action::ToggleSelectAll => toggle_select_all(browser),
        Action::StartFilter => {
            state.mode = Mode::Filter;
            state.input_buffer = state.filter_query.clone();
        }
        Action::StartPathInput => {
            state.mode = Mode::PathInput;
            state.last_error = None;
            state.input_buffer =
                with_trailing_separator(state.current_path.to_string_lossy().into_owned());
            refresh_suggestions(browser);
        }
        Action::ClearFilter => {
            if !state.filter_query.is_empty() {
                state.filter_query.clear();
                state.clamp_cursor();
            }
        }
        Action::Confirm => {
            browser.log.info(
                "update.confirm",
                json!({ "selected": state.selection.len() }),
            );
            return Effect::Exit;
        }
        Action::Abort => {
            state.aborted = true;
            state.selection.clear();
            browser.log.info("update.abort", json!("user aborted the selection"));
            return Effect::Exit;
        }
        _ => {}
    }
    Effect::None
}

/// Select every selectable visible entry, or deselect them all if they are
/// all selected already.
fn toggle_select_all(browser: &mut Browser) {
    let state = &mut browser.state;
    let selectable: Vec<_> = state
        .visible_entries()
        .into_iter()
        .filter(|entry| !entry.is_excluded)
        .cloned()
        .collect();
    if selectable.is_empty() {
        return;
    }

    let all_selected = selectable.iter().all(|entry| state.is_selected(entry));
    for entry in &selectable {
        if all_selected {
            let path = state.path_of(entry);
            state.selection.remove(&path);
        } else {
            state.selection.insert_entry(&state.current_path, entry);
        }
    }
}

fn update_path_input(browser: &mut Browser, action: Action) {
    let before = browser.state.input_buffer.clone();
    match action {
        Action::InputChar(c) => browser.state.input_buffer.push(c),
        Action::InputText(text) => browser.state.input_buffer.push_str(&text),
        Action::InputBackspace => {
            browser.state.input_buffer.pop();
        }
        Action::Autocomplete => {
            autocomplete(browser);
            return;
        }
        Action::Submit => {
            submit_path(browser);
            return;
        }
        Action::Cancel | Action::Abort => {
            leave_path_input(browser);
            return;
        }
        _ => return,
    }
    if browser.state.input_buffer != before {
        refresh_suggestions(browser);
    }
}

fn refresh_suggestions(browser: &mut Browser) {
    let completer = PathCompleter::new(browser.fs.as_ref(), &browser.state.current_path);
    browser.state.completion_suggestions = completer.suggest(&browser.state.input_buffer);
}

fn autocomplete(browser: &mut Browser) {
    let completer = PathCompleter::new(browser.fs.as_ref(), &browser.state.current_path);
    let completed = completer.complete(
        &browser.state.input_buffer,
        &browser.state.completion_suggestions,
    );
    if let Some(completed) = completed {
        browser.state.input_buffer = completed;
        refresh_suggestions(browser);
    }
}

fn submit_path(browser: &mut Browser) {
    let target = match resolve_input(browser) {
        Ok(target) => target,
        Err(message) => {
            browser.state.last_error = Some(message);
            return;
        }
    };

    match browser.fs.stat(&target) {
        Err(e) => {
            browser.log.debug(
                "update.submit_path",
                json!({ "path": target.display().to_string(), "error": e.to_string() }),
            );
            browser.state.last_error = Some("Error: Path not found or is inaccessible.".into());
        }
        Ok(stat) if !stat.is_dir => {
            browser.state.last_error = Some("Error: Path is a file, not a directory.".into());
        }
        Ok(_) => {
            if browser.reload(target) {
                leave_path_input(browser);
            }
        }
    }
}

/// Expand `~`, anchor relative input at the current directory, and clean.
fn resolve_input(browser: &Browser) -> Result<PathBuf, String> {
    let input = browser.state.input_buffer.trim();
    if input.is_empty() {
        return Err("Error: Path is empty.".to_string());
    }
    let expanded = expand_home(browser.fs.as_ref(), input)
        .map_err(|e| format!("Error: Could not expand '~': {e}"))?;
    let path = Path::new(expanded.as_ref());
    if path.is_absolute() {
        Ok(clean(path))
    } else {
        Ok(clean(&browser.state.current_path.join(path)))
    }
}

fn leave_path_input(browser: &mut Browser) {
    let state = &mut browser.state;
    state.mode = Mode::Normal;
    state.input_buffer.clear();
    state.completion_suggestions.clear();
    state.last_error = None;
    state.clamp_cursor();
}

fn update_filter(browser: &mut Browser, action: Action) {
    let state = &mut browser.state;
    match action {
        Action::InputChar(c) => state.filter_query.push(c),
        Action::InputText(text) => state.filter_query.push_str(&text),
        Action::InputBackspace => {
            state.filter_query.pop();
        }
        Action::Submit => {
            state.mode = Mode::Normal;
            state.input_buffer.clear();
        }
        Action::Cancel | Action::Abort => {
            state.filter_query.clear();
            state.input_buffer.clear();
            state.mode = Mode::Normal;
        }
        _ => return,
    }
    if state.mode == Mode::Filter {
        state.input_buffer = state.filter_query.clone();
    }
    state.clamp_cursor();
}
