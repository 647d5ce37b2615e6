//! getctx library exports for the binary and for testing

pub mod build;
pub mod core;
pub mod fs;
pub mod tui;

#[cfg(test)]
pub mod test_support;
