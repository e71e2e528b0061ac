//! Per-item placement records and committed layout snapshots.

use serde::Serialize;

/// Whether an item should be shown.
///
/// Provisional placements are `Hidden` so the renderer can measure an item
/// without it flashing at a guessed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Placed provisionally; awaiting a measured height.
    Hidden,
    /// Placed by a final pass using measured heights.
    Visible,
}

/// Computed position and size of one item within the grid.
///
/// # Invariants
/// - `height` is `None` until the item has reported a measured height.
/// - `Visible` placements always carry a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    /// Hidden (provisional) or visible (final).
    pub visibility: Visibility,
    /// Rendered width in pixels (column width minus gutter, except the last column).
    pub width: u32,
    /// Measured height in pixels, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Offset from the top of the container in pixels.
    pub top: u32,
    /// Offset from the left of the container in pixels.
    pub left: u32,
    /// Column the item was assigned to.
    #[serde(skip)]
    pub column: usize,
}

impl Placement {
    /// Bottom edge of a measured placement.
    ///
    /// Returns `None` for placeholders, which never contribute to container height.
    pub fn bottom(&self) -> Option<u32> {
        self.height.map(|height| self.top + height)
    }

    /// Check whether this placement came from a final pass.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// The payload delivered to layout observers after a committed relayout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSnapshot {
    /// Total container height: max over items of `top + height`.
    pub height: u32,
    /// Container width the layout was computed for.
    pub width: u32,
    /// Final placements, in item order.
    pub placements: Vec<Placement>,
}
