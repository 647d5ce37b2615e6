//! # Logging Port
//!
//! Components log through an injected [`LogPort`] instead of a process-wide
//! singleton. Each record is `(level, name, data)` where `name` identifies
//! the call site (`"ContextBuilder.build"`) and `data` is a structured JSON
//! payload.
//!
//! [`FacadeLogger`] forwards records to the `log` crate, so whatever backend
//! the binary installs (a `simplelog::WriteLogger` under `--debug`) receives
//! them. With no backend installed it is a no-op.

use log::Level;
use serde_json::Value;

pub trait LogPort: Send + Sync {
    fn log(&self, level: Level, name: &str, data: Value);

    fn debug(&self, name: &str, data: Value) {
        self.log(Level::Debug, name, data);
    }

    fn info(&self, name: &str, data: Value) {
        self.log(Level::Info, name, data);
    }

    fn warn(&self, name: &str, data: Value) {
        self.log(Level::Warn, name, data);
    }

    fn error(&self, name: &str, data: Value) {
        self.log(Level::Error, name, data);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeLogger;

impl LogPort for FacadeLogger {
    fn log(&self, level: Level, name: &str, data: Value) {
        log::log!(target: "getctx", level, "{name} {data}");
    }
}
