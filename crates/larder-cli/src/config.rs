//! Configuration file management for larder.
//!
//! Provides a TOML-based config file at `~/.config/larder/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use larder_core::diet::{GenerationLimits, MAX_ATTEMPTS_PER_DAY};
use larder_store::StoreConfig;

/// Default bind address for `larder serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1";
/// Default port for `larder serve`.
pub const DEFAULT_PORT: u16 = 8000;
/// Origin allowed by CORS when none is configured.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub catalog: CatalogSection,
    pub server: ServerSection,
    pub generation: GenerationSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Path to the JSON recipe catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Origins allowed by CORS. `["*"]` allows any origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_per_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_total_attempts: Option<u32>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the larder config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/larder` or `~/.config/larder`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("larder");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("larder")
}

/// Return the path to the larder config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Parse a config file. Returns an error if it does not exist.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values supplied on the command line. `None` defers to the next source.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides<'a> {
    pub recipes: Option<&'a Path>,
    pub bind: Option<&'a str>,
    pub port: Option<u16>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct LarderConfig {
    pub store: StoreConfig,
    pub bind: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub limits: GenerationLimits,
}

impl LarderConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Catalog: `--recipes` > `LARDER_RECIPES_PATH` > `[catalog].path` > `data/recipes.json`
    /// - Bind: `--bind` > `LARDER_BIND` > `[server].bind` > `127.0.0.1`
    /// - Port: `--port` > `LARDER_PORT` > `[server].port` > `8000`
    ///
    /// A missing config file is not an error; an unreadable or invalid one is.
    pub fn resolve(overrides: Overrides<'_>) -> Result<Self> {
        let path = config_path();
        let file_config = if path.exists() {
            load_config_from(&path)?
        } else {
            ConfigFile::default()
        };
        Self::resolve_with(overrides, file_config)
    }

    /// Resolve against an already-loaded config file.
    pub fn resolve_with(overrides: Overrides<'_>, file: ConfigFile) -> Result<Self> {
        let recipes_path = if let Some(path) = overrides.recipes {
            path.to_path_buf()
        } else if let Some(path) = StoreConfig::recipes_path_from_env() {
            path
        } else if let Some(path) = file.catalog.path {
            path
        } else {
            PathBuf::from(StoreConfig::DEFAULT_RECIPES_PATH)
        };

        let bind = if let Some(bind) = overrides.bind {
            bind.to_string()
        } else if let Ok(bind) = std::env::var("LARDER_BIND") {
            bind
        } else {
            file.server.bind.unwrap_or_else(|| DEFAULT_BIND.to_string())
        };

        let port = if let Some(port) = overrides.port {
            port
        } else if let Ok(port) = std::env::var("LARDER_PORT") {
            port.parse()
                .with_context(|| format!("LARDER_PORT env var is not a valid port: {port:?}"))?
        } else {
            file.server.port.unwrap_or(DEFAULT_PORT)
        };

        let allowed_origins = file
            .server
            .allowed_origins
            .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()]);

        let limits = GenerationLimits {
            attempts_per_day: file
                .generation
                .attempts_per_day
                .unwrap_or(MAX_ATTEMPTS_PER_DAY),
            max_total_attempts: file.generation.max_total_attempts,
        };

        Ok(Self {
            store: StoreConfig::new(recipes_path),
            bind,
            port,
            allowed_origins,
            limits,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
