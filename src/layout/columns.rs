//! ColumnBalancer - online column assignment for a masonry grid
//!
//! Items are assigned to columns one at a time, in index order, without
//! knowing anything about later items.
//!
//! # Placement rules
//!
//! - [`PlacementRule::ShortestColumn`]: the column with the smallest cumulative
//!   height wins; ties go to the lowest column index. Greedy, not globally
//!   optimal, O(columns) per item.
//! - [`PlacementRule::Strict`]: item `i` goes to column `i mod count`, keeping
//!   the caller's visual order at the cost of balance.
//!
//! # Geometry
//!
//! Every item sits `gutter` pixels below whatever precedes it in its column.
//! Every column except the last is `gutter` pixels narrower than the column
//! stride, which leaves a visible gap between columns.
//!
//! # Passes
//!
//! - Provisional: `place_next` advances a column by the estimated item height
//!   so later items can be positioned before anything is measured.
//! - Final: `relayout` recomputes every position from scratch with measured
//!   heights and returns the container height.

use crate::config::GalleryConfig;
use crate::model::{ItemIndex, Placement, Visibility};

/// Compute the column count for a container.
///
/// `clamp(round(container_width / column_width_hint), 1, max_columns)`.
///
/// A zero hint or zero cap is rejected at configuration time; here they
/// degrade to a single column.
///
/// # Examples
///
/// ```
/// # use mosaic::layout::column_count;
/// assert_eq!(column_count(900, 300, 8), 3);
/// assert_eq!(column_count(450, 300, 8), 2); // 1.5 rounds up
/// assert_eq!(column_count(100, 300, 8), 1);
/// assert_eq!(column_count(5000, 300, 8), 8);
/// ```
pub fn column_count(container_width: u32, column_width_hint: u32, max_columns: usize) -> usize {
    if column_width_hint == 0 {
        return 1;
    }
    let raw = (f64::from(container_width) / f64::from(column_width_hint)).round() as usize;
    raw.clamp(1, max_columns.max(1))
}

/// Column count and horizontal stride for one container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnGeometry {
    /// Number of columns. Always >= 1.
    pub count: usize,
    /// Horizontal distance between column starts: `round(container_width / count)`.
    pub stride: u32,
}

impl ColumnGeometry {
    /// Derive geometry for a container width.
    pub fn compute(container_width: u32, column_width_hint: u32, max_columns: usize) -> Self {
        let count = column_count(container_width, column_width_hint, max_columns);
        let stride = (f64::from(container_width) / count as f64).round() as u32;
        Self { count, stride }
    }

    /// Whether `column` is the last (full-width) column.
    pub fn is_last(&self, column: usize) -> bool {
        column + 1 == self.count
    }
}

/// Per-column cumulative heights.
///
/// # Invariants
/// - `len()` equals the current column count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnState {
    heights: Vec<u32>,
}

impl ColumnState {
    /// All-zero state for `count` columns.
    pub fn new(count: usize) -> Self {
        Self {
            heights: vec![0; count.max(1)],
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Always false; a column state has at least one column.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Cumulative heights, one per column.
    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    /// Lowest-index column with the minimum cumulative height.
    pub fn shortest(&self) -> usize {
        self.heights
            .iter()
            .enumerate()
            .min_by_key(|(_, height)| **height)
            .map(|(column, _)| column)
            .unwrap_or(0)
    }

    /// Tallest cumulative height.
    pub fn tallest(&self) -> u32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    fn set(&mut self, column: usize, height: u32) {
        self.heights[column] = height;
    }
}

/// How an item's column is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementRule {
    /// Shortest column first, lowest index on ties.
    #[default]
    ShortestColumn,
    /// Column `index mod count`.
    Strict,
}

impl PlacementRule {
    /// Rule selected by the strict-order flag.
    pub fn from_strict(strict_order: bool) -> Self {
        if strict_order {
            Self::Strict
        } else {
            Self::ShortestColumn
        }
    }
}

/// Assigns items to columns and tracks column heights.
#[derive(Debug, Clone)]
pub struct ColumnBalancer {
    rule: PlacementRule,
    column_width_hint: u32,
    max_columns: usize,
    gutter: u32,
    estimated_item_height: u32,
    container_width: u32,
    geometry: ColumnGeometry,
    state: ColumnState,
}

impl ColumnBalancer {
    /// Create a balancer for a container of the given width.
    pub fn new(config: &GalleryConfig, container_width: u32) -> Self {
        let geometry =
            ColumnGeometry::compute(container_width, config.column_width, config.max_columns);
        Self {
            rule: PlacementRule::from_strict(config.strict_order),
            column_width_hint: config.column_width,
            max_columns: config.max_columns,
            gutter: config.gutter,
            estimated_item_height: config.estimated_item_height,
            container_width,
            geometry,
            state: ColumnState::new(geometry.count),
        }
    }

    /// Current column geometry.
    pub fn geometry(&self) -> ColumnGeometry {
        self.geometry
    }

    /// Current column count.
    pub fn column_count(&self) -> usize {
        self.geometry.count
    }

    /// Container width the geometry was computed for.
    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    /// Cumulative per-column heights, including provisional advances.
    pub fn column_heights(&self) -> &[u32] {
        self.state.heights()
    }

    /// Active placement rule.
    pub fn rule(&self) -> PlacementRule {
        self.rule
    }

    /// Recompute geometry for a new container width.
    ///
    /// Column heights are reset; the caller is expected to re-place every
    /// item afterwards. Returns whether the geometry changed.
    pub fn set_container_width(&mut self, container_width: u32) -> bool {
        let geometry =
            ColumnGeometry::compute(container_width, self.column_width_hint, self.max_columns);
        let changed = geometry != self.geometry;
        self.container_width = container_width;
        self.geometry = geometry;
        self.state = ColumnState::new(geometry.count);
        changed
    }

    /// Forget all column heights (start of a new epoch).
    pub fn reset(&mut self) {
        self.state = ColumnState::new(self.geometry.count);
    }

    /// Provisionally place a newly added, unmeasured item.
    ///
    /// The item is hidden and its column advances by the estimated item height.
    /// Hidden placements use the final-pass geometry (gutter above, no left
    /// inset) so an item does not shift sideways when it becomes visible.
    pub fn place_next(&mut self, index: ItemIndex) -> Placement {
        self.place(index, None, Visibility::Hidden)
    }

    /// Provisionally re-place items `0..` from scratch in the current geometry.
    ///
    /// Known heights advance their columns; unknown ones use the estimate.
    /// Every placement is hidden.
    pub fn reprovision<I>(&mut self, heights: I) -> Vec<Placement>
    where
        I: IntoIterator<Item = Option<u32>>,
    {
        self.reset();
        heights
            .into_iter()
            .enumerate()
            .map(|(index, height)| self.place(ItemIndex::new(index), height, Visibility::Hidden))
            .collect()
    }

    /// Final pass: place items `0..` with measured heights.
    ///
    /// Returns the visible placements and the container height, which is the
    /// maximum of `top + height` over all items (0 when there are none).
    /// Deterministic: identical heights and geometry give identical output.
    pub fn relayout<I>(&mut self, heights: I) -> (Vec<Placement>, u32)
    where
        I: IntoIterator<Item = u32>,
    {
        self.reset();
        let placements: Vec<Placement> = heights
            .into_iter()
            .enumerate()
            .map(|(index, height)| {
                self.place(ItemIndex::new(index), Some(height), Visibility::Visible)
            })
            .collect();

        let total_height = placements
            .iter()
            .filter_map(Placement::bottom)
            .max()
            .unwrap_or(0);

        (placements, total_height)
    }

    fn choose_column(&self, index: ItemIndex) -> usize {
        match self.rule {
            PlacementRule::ShortestColumn => self.state.shortest(),
            PlacementRule::Strict => index.get() % self.geometry.count,
        }
    }

    fn place(&mut self, index: ItemIndex, height: Option<u32>, visibility: Visibility) -> Placement {
        let column = self.choose_column(index);
        let stride = self.geometry.stride;

        let width = if self.geometry.is_last(column) {
            stride
        } else {
            stride.saturating_sub(self.gutter)
        };
        let top = self.state.heights()[column].saturating_add(self.gutter);
        let advance = height.unwrap_or(self.estimated_item_height);
        self.state.set(column, top.saturating_add(advance));

        Placement {
            visibility,
            width,
            height,
            top,
            left: column as u32 * stride,
            column,
        }
    }
}

#[cfg(test)]
#[path = "columns_tests.rs"]
mod tests;
