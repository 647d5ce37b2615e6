//! # TUI Components
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Header        help, path or input, error │
//! ├──────────────────────────────────────────┤
//! │ FileList      (Normal, Filter)           │
//! │   or                                     │
//! │ CompletionGrid (PathInput)               │
//! ├──────────────────────────────────────────┤
//! │ StatusBar     selection count            │
//! └──────────────────────────────────────────┘
//! ```
//!
//! `Header`, `CompletionGrid` and `StatusBar` are stateless: everything they
//! show comes in as props. `FileList` keeps its scroll offset in a
//! persistent `FileListState` owned by `TuiState` and is rebuilt each frame
//! around a borrow of it.

mod completion_grid;
mod file_list;
mod header;
mod status_bar;

pub use completion_grid::CompletionGrid;
pub use file_list::{FileList, FileListState};
pub use header::Header;
pub use status_bar::StatusBar;
