//! # Browser State
//!
//! Everything the interactive browser knows, in one place. Presentation
//! lives in `tui`; this module holds domain state only.
//!
//! ```text
//! Browser
//! ├── state: BrowserState
//! │   ├── current_path: PathBuf          // absolute, cleaned
//! │   ├── entries: Vec<Entry>            // listing of current_path
//! │   ├── cursor: usize                  // index into visible entries
//! │   ├── selection: Selection           // absolute paths to bundle
//! │   ├── mode: Mode                     // Normal | PathInput | Filter
//! │   ├── filter_query: String           // live in Normal/Filter
//! │   ├── input_buffer: String           // live in PathInput/Filter
//! │   ├── completion_suggestions: Vec    // PathInput only
//! │   ├── last_error: Option<String>     // transient error text
//! │   └── aborted: bool
//! ├── fs: Arc<dyn FileSystem>
//! ├── policy: Arc<ExclusionPolicy>
//! └── log: Arc<dyn LogPort>
//! ```
//!
//! State changes only happen through `update(browser, action)` in action.rs.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::core::exclusion::ExclusionPolicy;
use crate::core::logging::LogPort;
use crate::fs::FileSystem;

/// One listed child of the current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    pub is_excluded: bool,
}

/// Modal input state: determines how key events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing a path to jump to, with completion suggestions.
    PathInput,
    /// Typing a case-insensitive substring filter over entry names.
    Filter,
}

/// Set of absolute paths chosen for the bundle.
///
/// Insertion goes through [`Selection::insert_entry`], which refuses
/// excluded entries, so the set can never hold one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: BTreeSet<PathBuf>,
}

impl Selection {
    /// Insert `dir/entry.name`. Returns false if the entry is excluded or
    /// already selected.
    pub fn insert_entry(&mut self, dir: &Path, entry: &Entry) -> bool {
        if entry.is_excluded {
            return false;
        }
        self.paths.insert(dir.join(&entry.name))
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        self.paths.remove(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Selected paths in sorted order.
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.paths.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserState {
    pub current_path: PathBuf,
    pub entries: Vec<Entry>,
    pub cursor: usize,
    pub selection: Selection,
    pub mode: Mode,
    pub filter_query: String,
    pub input_buffer: String,
    pub completion_suggestions: Vec<String>,
    pub last_error: Option<String>,
    pub aborted: bool,
}

impl BrowserState {
    /// Entries passing the filter. The filter is ignored while a path is
    /// being typed.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        if self.mode == Mode::PathInput || self.filter_query.is_empty() {
            return self.entries.iter().collect();
        }
        let query = self.filter_query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn entry_under_cursor(&self) -> Option<&Entry> {
        self.visible_entries().get(self.cursor).copied()
    }

    pub fn max_cursor(&self) -> usize {
        self.visible_entries().len().saturating_sub(1)
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.max_cursor());
    }

    pub fn path_of(&self, entry: &Entry) -> PathBuf {
        self.current_path.join(&entry.name)
    }

    pub fn is_selected(&self, entry: &Entry) -> bool {
        self.selection.contains(&self.path_of(entry))
    }
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("could not get absolute path for '{path}': {source}")]
    Resolve { path: PathBuf, source: io::Error },
    #[error("could not read directory '{path}': {source}")]
    Listing { path: PathBuf, source: io::Error },
}

/// The browser state plus the ports it needs to act on it.
pub struct Browser {
    pub state: BrowserState,
    pub(crate) fs: Arc<dyn FileSystem>,
    pub(crate) policy: Arc<ExclusionPolicy>,
    pub(crate) log: Arc<dyn LogPort>,
}

impl Browser {
    /// Resolve `start_path` and list it. Unlike later reloads, a failure
    /// here is returned to the caller since there is no prior state to keep.
    pub fn new(
        start_path: &Path,
        fs: Arc<dyn FileSystem>,
        policy: Arc<ExclusionPolicy>,
        log: Arc<dyn LogPort>,
    ) -> Result<Self, BrowserError> {
        let current_path =
            fs.resolve_absolute(start_path)
                .map_err(|source| BrowserError::Resolve {
                    path: start_path.to_path_buf(),
                    source,
                })?;
        let entries = load_entries(fs.as_ref(), &policy, &current_path).map_err(|source| {
            BrowserError::Listing {
                path: current_path.clone(),
                source,
            }
        })?;

        log.info(
            "Browser.new",
            json!({ "path": current_path.display().to_string(), "entries": entries.len() }),
        );

        Ok(Self {
            state: BrowserState {
                current_path,
                entries,
                ..BrowserState::default()
            },
            fs,
            policy,
            log,
        })
    }

    /// Replace the listing with `target`'s children. Either everything
    /// changes (path, entries, cursor, filter, error line cleared) or, on a
    /// listing error, nothing does except `last_error`.
    pub fn reload(&mut self, target: PathBuf) -> bool {
        match load_entries(self.fs.as_ref(), &self.policy, &target) {
            Ok(entries) => {
                self.log.debug(
                    "Browser.reload",
                    json!({ "path": target.display().to_string(), "entries": entries.len() }),
                );
                self.state.current_path = target;
                self.state.entries = entries;
                self.state.cursor = 0;
                self.state.filter_query.clear();
                self.state.last_error = None;
                true
            }
            Err(e) => {
                self.log.warn(
                    "Browser.reload",
                    json!({ "path": target.display().to_string(), "error": e.to_string() }),
                );
                self.state.last_error = Some(format!("Error reading directory: {e}"));
                false
            }
        }
    }

    /// Paths to hand to the builder; empty after an abort.
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.state.selection.to_vec()
    }
}

fn load_entries(
    fs: &dyn FileSystem,
    policy: &ExclusionPolicy,
    path: &Path,
) -> io::Result<Vec<Entry>> {
    Ok(fs
        .read_dir(path)?
        .into_iter()
        .map(|child| Entry {
            is_excluded: policy.is_excluded(&child.name),
            name: child.name,
            is_dir: child.is_dir,
        })
        .collect())
}
