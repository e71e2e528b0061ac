//! Engine configuration.

use crate::model::{ConfigurationError, StreamIdentity};
use std::time::Duration;

/// Default number of items added per pagination step.
pub const DEFAULT_BATCH_SIZE: usize = 15;
/// Default cap on the column count.
pub const DEFAULT_MAX_COLUMNS: usize = 8;
/// Default column width hint in pixels.
pub const DEFAULT_COLUMN_WIDTH: u32 = 300;
/// Default spacing between columns and above each item, in pixels.
pub const DEFAULT_GUTTER: u32 = 5;
/// Default placeholder height for items that have not reported yet.
///
/// Only used to advance columns during the provisional pass. Large enough
/// that unmeasured items never visibly stack on top of each other.
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: u32 = 1000;
/// Default quiet period before a container resize is acted on.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(5);

/// Configuration for one gallery engine. Immutable for the lifetime of an epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Items added per pagination step. Must be positive.
    pub batch_size: usize,
    /// Upper bound on the column count. Must be positive.
    pub max_columns: usize,
    /// Preferred column width in pixels; the column count is derived from it.
    pub column_width: u32,
    /// Place item `i` in column `i mod columns` instead of the shortest column.
    pub strict_order: bool,
    /// Data is pushed by an external source that must be asked for more.
    pub stream_mode: bool,
    /// Token naming the current stream.
    pub stream_identity: Option<StreamIdentity>,
    /// Pixel inset between columns and above each item.
    pub gutter: u32,
    /// Placeholder height used for unmeasured items during the provisional pass.
    pub estimated_item_height: u32,
    /// Quiet period for coalescing container resize notifications.
    pub resize_debounce: Duration,
    /// Rescale the host scroll offset after a resize relayout.
    pub preserve_scroll: bool,
    /// After a resize relayout, wait for every item to report its height again.
    pub remeasure_on_resize: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_columns: DEFAULT_MAX_COLUMNS,
            column_width: DEFAULT_COLUMN_WIDTH,
            strict_order: false,
            stream_mode: false,
            stream_identity: None,
            gutter: DEFAULT_GUTTER,
            estimated_item_height: DEFAULT_ESTIMATED_ITEM_HEIGHT,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            preserve_scroll: true,
            remeasure_on_resize: false,
        }
    }
}

impl GalleryConfig {
    /// Reject values that would need clamping to make sense.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.batch_size == 0 {
            return Err(ConfigurationError::InvalidBatchSize(self.batch_size));
        }
        if self.max_columns == 0 {
            return Err(ConfigurationError::InvalidMaxColumns(self.max_columns));
        }
        if self.column_width == 0 {
            return Err(ConfigurationError::InvalidColumnWidth(self.column_width));
        }
        Ok(())
    }
}
