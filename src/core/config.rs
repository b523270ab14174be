//! # Configuration
//!
//! Centralizes the demo playground's settings with a clear override
//! hierarchy: defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tiller/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! None of this reaches the navigation core — the core is configured by its
//! callers, not by files.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TillerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default `animated` flag for opens/closes issued by the playground.
    pub animated: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    pub root_title: Option<String>,
    /// Tab identifiers offered by the tab-placement key.
    pub tabs: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ROOT_TITLE: &str = "Home";
pub const DEFAULT_LOG_LEVEL: &str = "debug";

fn default_tabs() -> Vec<String> {
    vec!["library".to_string(), "settings".to_string()]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub animated: bool,
    pub log_level: String,
    pub root_title: String,
    pub tabs: Vec<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tiller/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tiller").join("config.toml"))
}

/// Load config from `~/.tiller/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TillerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TillerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TillerConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TillerConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TillerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Tiller Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# animated = true          # Animate pushes/presents issued by the playground
# log_level = "debug"      # "error", "warn", "info", "debug", "trace"

# [demo]
# root_title = "Home"
# tabs = ["library", "settings"]
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI flags. CLI values are `None` when the flag was not given.
pub fn resolve(
    config: &TillerConfig,
    cli_animated: Option<bool>,
    cli_log_level: Option<&str>,
) -> ResolvedConfig {
    // Animated: CLI → env → config → default
    let animated = cli_animated
        .or_else(|| std::env::var("TILLER_ANIMATED").ok().and_then(|v| v.parse().ok()))
        .or(config.general.animated)
        .unwrap_or(true);

    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TILLER_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    ResolvedConfig {
        animated,
        log_level,
        root_title: config
            .demo
            .root_title
            .clone()
            .unwrap_or_else(|| DEFAULT_ROOT_TITLE.to_string()),
        tabs: config.demo.tabs.clone().unwrap_or_else(default_tabs),
    }
}
