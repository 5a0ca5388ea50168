//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-shelf\config.toml
//! - macOS: ~/Library/Application Support/music-shelf/config.toml
//! - Linux: ~/.config/music-shelf/config.toml
//!
//! The config file is human-readable and editable. Settings are
//! loaded at startup; a missing or broken file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::search::DisplayMode;
use crate::sort::SortMode;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where raw rows come from
    pub library: LibraryConfig,

    /// Search settings
    pub search: SearchConfig,

    /// Default sort mode of each list
    pub sort: SortConfig,

    /// Fallback names and count phrases
    pub strings: StringsConfig,
}

/// Library source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Music directories or JSON row files
    pub sources: Vec<PathBuf>,

    /// Descend into subdirectories when scanning
    pub recursive: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            recursive: true,
        }
    }
}

/// Search settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Kind filter applied to searches (absent = every kind)
    pub filter: Option<DisplayMode>,
}

/// Sort settings, one mode per list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub songs: SortMode,
    pub albums: SortMode,
    pub artists: SortMode,
    pub genres: SortMode,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            songs: SortMode::NumericAscending,
            albums: SortMode::AlphaAscending,
            artists: SortMode::AlphaAscending,
            genres: SortMode::AlphaAscending,
        }
    }
}

/// Display strings. `{}` in a count template stands for the number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringsConfig {
    pub unknown_artist: String,
    pub unknown_genre: String,
    pub song_one: String,
    pub song_other: String,
    pub album_one: String,
    pub album_other: String,
    pub artist_one: String,
    pub artist_other: String,
    pub genre_one: String,
    pub genre_other: String,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self {
            unknown_artist: "Unknown Artist".to_string(),
            unknown_genre: "Unknown Genre".to_string(),
            song_one: "{} song".to_string(),
            song_other: "{} songs".to_string(),
            album_one: "{} album".to_string(),
            album_other: "{} albums".to_string(),
            artist_one: "{} artist".to_string(),
            artist_other: "{} artists".to_string(),
            genre_one: "{} genre".to_string(),
            genre_other: "{} genres".to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-shelf"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from an explicit path, with the same fallbacks as [`load`]
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to an explicit path
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Save configuration on the blocking pool
pub async fn save_async(config: Config) -> Result<(), ConfigError> {
    tokio::task::spawn_blocking(move || save(&config))
        .await
        .map_err(|e| ConfigError::TaskJoin(e.to_string()))?
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(String),
}

// ============================================================================
// Tests
// ============================================================================
