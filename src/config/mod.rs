//! Configuration module.
//!
//! - `gallery`: GalleryConfig - validated engine settings
//! - `loader`: TOML file loading and the defaults → file → env → CLI precedence chain

pub mod gallery;
pub mod loader;

pub use gallery::GalleryConfig;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};
