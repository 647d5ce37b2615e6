//! # Build Pipeline
//!
//! Turns the browser's final selection into the context artifact.
//!
//! ```text
//! selection ──▶ discover() ──▶ is_text_file() ──▶ ContextBuilder ──▶ context.txt
//!  (paths)      (flat files,    (sniff first       (sorted header/     + BuildResult
//!                warnings)       512 bytes)         content/footer)
//! ```
//!
//! Only failing to create the output file stops a build. Every other
//! problem is recorded in `BuildResult::paths_with_error` and the build
//! moves on to the next path.

pub mod assemble;
pub mod classify;
pub mod discover;

pub use assemble::{BuildError, BuildResult, ContextBuilder};
pub use classify::{is_text_file, sniff_content_type};
pub use discover::{Discovered, discover};
