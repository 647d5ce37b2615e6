//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.getctx/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::exclusion::ExclusionPolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetctxConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub exclusions: ExclusionsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub output: Option<String>,
    pub debug: Option<bool>,
}

/// Added on top of the built-in exclusion set, never replacing it.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExclusionsConfig {
    #[serde(default)]
    pub extra_names: Vec<String>,
    #[serde(default)]
    pub extra_extensions: Vec<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_OUTPUT: &str = "context.txt";

pub const ENV_OUTPUT: &str = "GETCTX_OUTPUT";
pub const ENV_DEBUG: &str = "GETCTX_DEBUG";

const DEFAULT_CONFIG: &str = r#"# getctx configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# output = "context.txt"             # Or set GETCTX_OUTPUT, or pass -o
# debug = false                      # Or set GETCTX_DEBUG=1, or pass --debug

# [exclusions]
# Added to the built-in list (.git, node_modules, target, images, archives...)
# extra_names = ["coverage", "tmp"]
# extra_extensions = [".log", "csv"]
"#;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub output: PathBuf,
    pub debug: bool,
    pub policy: ExclusionPolicy,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.getctx/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".getctx").join("config.toml"))
}

/// Load config from `~/.getctx/config.toml`.
pub fn load_config() -> Result<GetctxConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(GetctxConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GetctxConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<GetctxConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GetctxConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: GetctxConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// The `GETCTX_*` environment, read once so resolution itself stays pure.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub output: Option<String>,
    pub debug: Option<bool>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            output: std::env::var(ENV_OUTPUT).ok().filter(|s| !s.is_empty()),
            debug: std::env::var(ENV_DEBUG).ok().as_deref().map(parse_flag),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_output` is the `-o` flag (None = not specified). `cli_debug` can
/// only turn debug logging on.
pub fn resolve(
    config: &GetctxConfig,
    env: &EnvOverrides,
    cli_output: Option<&Path>,
    cli_debug: bool,
) -> ResolvedConfig {
    // Output: CLI → env → config → default
    let output = cli_output
        .map(Path::to_path_buf)
        .or_else(|| env.output.as_ref().map(PathBuf::from))
        .or_else(|| config.general.output.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let debug = cli_debug
        || env
            .debug
            .or(config.general.debug)
            .unwrap_or(false);

    let policy = ExclusionPolicy::default().with_extras(
        config.exclusions.extra_names.iter().cloned(),
        &config.exclusions.extra_extensions,
    );

    ResolvedConfig {
        output,
        debug,
        policy,
    }
}
