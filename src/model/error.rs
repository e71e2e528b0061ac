//! Error types for the mosaic layout engine.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level binary error wrapping every failure the CLI can hit
//!   - [`ConfigurationError`] - Invalid engine configuration (fatal at construction)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file / environment failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup failures
//!   - [`InputError`] - Reading or decoding the item list
//!
//! # Error Recovery Strategy
//!
//! Configuration problems fail fast: an engine is never built from a config that
//! would need silent clamping. Everything that happens after construction is
//! infallible. Late or duplicate height reports, visibility notifications for
//! unknown items and similar noise are logged and ignored, never surfaced as errors,
//! so a relayout can never fail halfway through.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid engine configuration.
///
/// Returned by [`GalleryConfig::validate`](crate::config::GalleryConfig::validate) and by
/// [`Gallery::initialize`](crate::engine::Gallery::initialize). Values are never clamped
/// into range; the caller must fix the configuration.
///
/// # Examples
///
/// ```
/// use mosaic::model::error::ConfigurationError;
///
/// let err = ConfigurationError::InvalidBatchSize(0);
/// assert!(err.to_string().contains("batch_size"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `batch_size` must be a positive integer.
    ///
    /// A zero batch would never grow the data set, so pagination could not make
    /// progress.
    #[error("batch_size must be a positive integer (got {0})")]
    InvalidBatchSize(usize),

    /// `max_columns` must be a positive integer.
    ///
    /// The column count is clamped to `[1, max_columns]`; a zero cap leaves that
    /// range empty.
    #[error("max_columns must be a positive integer (got {0})")]
    InvalidMaxColumns(usize),

    /// `column_width` must be a positive number of pixels.
    ///
    /// The column count is derived by dividing the container width by this hint.
    #[error("column_width must be a positive number of pixels (got {0})")]
    InvalidColumnWidth(u32),

    /// Stream mode was enabled without a data source collaborator.
    ///
    /// In stream mode the engine asks the caller for more data once every known
    /// item has been viewed. Without a [`DataSource`](crate::engine::DataSource)
    /// there is nobody to ask.
    #[error("stream mode requires a data source collaborator")]
    MissingDataSource,
}

/// Errors encountered when reading the item list for the simulator.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified input file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use mosaic::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The input was read but is not a JSON array of heights.
    #[error("Invalid item list: {0}")]
    Decode(#[from] serde_json::Error),

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level application error for the `mosaic` binary.
///
/// All domain-specific error types convert into `AppError` via `From`, so `main`
/// can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Engine configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Config file or environment overrides could not be loaded.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialised.
    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] LoggingError),

    /// The item list could not be read.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Writing the rendered layout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
