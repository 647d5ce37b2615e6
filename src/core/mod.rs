//! # Core Application Logic
//!
//! This module contains getctx's browser logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Browser (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  I/O only via ports     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ FileSystem │      │  LogPort   │
//!     │  Adapter   │      │    port    │      │            │
//!     │ (ratatui)  │      │ (crate::fs)│      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `Browser` and `BrowserState`, everything the screen shows
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`completion`]: path completion for the path-jump input
//! - [`exclusion`]: names and extensions that are never selectable
//! - [`config`]: `~/.getctx/config.toml` and override resolution
//! - [`logging`]: the injected logging port

pub mod action;
pub mod completion;
pub mod config;
pub mod exclusion;
pub mod logging;
pub mod state;
