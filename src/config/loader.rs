//! Config resolution: defaults, then `config.toml`, then `MOSAIC_*`
//! environment variables, then command-line flags.

use super::gallery::GalleryConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "MOSAIC_CONFIG";
/// Environment override for `batch_size`.
pub const BATCH_SIZE_ENV: &str = "MOSAIC_BATCH_SIZE";
/// Environment override for `max_columns`.
pub const MAX_COLUMNS_ENV: &str = "MOSAIC_MAX_COLUMNS";
/// Environment override for `column_width`.
pub const COLUMN_WIDTH_ENV: &str = "MOSAIC_COLUMN_WIDTH";

/// Failure to load the config file or read an override from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Cannot read {path}: {reason}")]
    Unreadable {
        /// Config file path.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },

    /// The config file is not valid TOML, or has unknown or mistyped keys.
    #[error("Malformed config {path}: {reason}")]
    Malformed {
        /// Config file path.
        path: PathBuf,
        /// Deserializer error text.
        reason: String,
    },

    /// An override environment variable holds something that is not a number.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value found in the environment.
        value: String,
    },
}

/// Contents of `config.toml`. Every key is optional; absent keys keep the
/// engine default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Items added per pagination step.
    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Upper bound on the column count.
    #[serde(default)]
    pub max_columns: Option<usize>,

    /// Preferred column width in pixels.
    #[serde(default)]
    pub column_width: Option<u32>,

    /// Keep caller order (column `i mod columns`).
    #[serde(default)]
    pub strict_order: Option<bool>,

    /// Spacing between columns and above items, in pixels.
    #[serde(default)]
    pub gutter: Option<u32>,

    /// Placeholder height for unmeasured items.
    #[serde(default)]
    pub estimated_item_height: Option<u32>,

    /// Resize quiet period in milliseconds.
    #[serde(default)]
    pub resize_debounce_ms: Option<u64>,

    /// Rescale scroll offset after resize relayouts.
    #[serde(default)]
    pub preserve_scroll: Option<bool>,

    /// Wait for fresh height reports after a resize.
    #[serde(default)]
    pub remeasure_on_resize: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Settings after every layer has been applied, before engine validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Engine settings (not yet validated).
    pub gallery: GalleryConfig,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            gallery: GalleryConfig::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Settings given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--batch-size`
    pub batch_size: Option<usize>,
    /// `--max-columns`
    pub max_columns: Option<usize>,
    /// `--column-width`
    pub column_width: Option<u32>,
    /// `--strict`
    pub strict_order: Option<bool>,
}

/// `<state dir>/mosaic/mosaic.log`, or `mosaic.log` in the working directory
/// on platforms without a state directory.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .map(|dir| dir.join("mosaic").join("mosaic.log"))
        .unwrap_or_else(|| PathBuf::from("mosaic.log"))
}

/// Read and parse the config file at `path`. A missing file yields `Ok(None)`.
///
/// # Errors
///
/// `ConfigError::Unreadable` or `ConfigError::Malformed` when the file exists
/// but cannot be used.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::Unreadable {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    toml::from_str(&raw)
        .map(Some)
        .map_err(|e| ConfigError::Malformed {
            path,
            reason: e.to_string(),
        })
}

/// `<config dir>/mosaic/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mosaic").join("config.toml"))
}

/// Find and load the config file: `--config`, then `MOSAIC_CONFIG`, then
/// [`default_config_path`]. Only the first candidate is tried.
///
/// # Errors
///
/// Propagates [`load_config_file`] errors for the chosen path.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    let chosen = config_path
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        .or_else(default_config_path);
    match chosen {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Layer the config file over the engine defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let gallery = defaults.gallery;
    ResolvedConfig {
        gallery: GalleryConfig {
            batch_size: config.batch_size.unwrap_or(gallery.batch_size),
            max_columns: config.max_columns.unwrap_or(gallery.max_columns),
            column_width: config.column_width.unwrap_or(gallery.column_width),
            strict_order: config.strict_order.unwrap_or(gallery.strict_order),
            gutter: config.gutter.unwrap_or(gallery.gutter),
            estimated_item_height: config
                .estimated_item_height
                .unwrap_or(gallery.estimated_item_height),
            resize_debounce: config
                .resize_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(gallery.resize_debounce),
            preserve_scroll: config.preserve_scroll.unwrap_or(gallery.preserve_scroll),
            remeasure_on_resize: config
                .remeasure_on_resize
                .unwrap_or(gallery.remeasure_on_resize),
            ..gallery
        },
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for `MOSAIC_BATCH_SIZE`, `MOSAIC_MAX_COLUMNS` and `MOSAIC_COLUMN_WIDTH`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnv` if a set variable is not a non-negative integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(batch_size) = env_number(BATCH_SIZE_ENV)? {
        config.gallery.batch_size = batch_size;
    }
    if let Some(max_columns) = env_number(MAX_COLUMNS_ENV)? {
        config.gallery.max_columns = max_columns;
    }
    if let Some(column_width) = env_number(COLUMN_WIDTH_ENV)? {
        config.gallery.column_width = column_width;
    }
    Ok(config)
}

fn env_number<N: std::str::FromStr>(var: &'static str) -> Result<Option<N>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => match value.trim().parse() {
            Ok(number) => Ok(Some(number)),
            Err(_) => Err(ConfigError::InvalidEnv { var, value }),
        },
        Err(_) => Ok(None),
    }
}

/// Apply command-line settings, the last and strongest layer.
///
/// Only flags the user actually passed are applied.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(batch_size) = cli.batch_size {
        config.gallery.batch_size = batch_size;
    }
    if let Some(max_columns) = cli.max_columns {
        config.gallery.max_columns = max_columns;
    }
    if let Some(column_width) = cli.column_width {
        config.gallery.column_width = column_width;
    }
    if let Some(strict_order) = cli.strict_order {
        config.gallery.strict_order = strict_order;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
