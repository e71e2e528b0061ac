//! HeightReconciler - turns asynchronous height reports into relayout decisions
//!
//! Items report their measured heights one at a time, in any order, possibly
//! more than once. A final relayout is worth running only when every placed
//! item has reported and at least one height differs from the heights the
//! last committed layout used.
//!
//! Instead of comparing whole maps on every report, the map keeps two
//! counters: how many items have reported in the current measurement
//! generation, and how many items currently differ from the committed layout.
//! Both are maintained in O(1) per report.

use crate::model::ItemIndex;

/// Measured heights for the placed items of one epoch.
///
/// # Invariants
/// - `reported == fresh.iter().filter(|f| **f).count()`
/// - `stale == (0..len).filter(|i| current[i] != committed[i]).count()`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightMap {
    /// Latest reported height per item.
    current: Vec<Option<u32>>,
    /// Heights used by the last committed relayout.
    committed: Vec<Option<u32>>,
    /// Whether the item has reported in the current generation.
    fresh: Vec<bool>,
    reported: usize,
    stale: usize,
}

impl HeightMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether no items are tracked.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Start tracking items up to `len`. Never shrinks.
    pub fn extend_to(&mut self, len: usize) {
        if len > self.current.len() {
            self.current.resize(len, None);
            self.committed.resize(len, None);
            self.fresh.resize(len, false);
        }
    }

    /// Latest height reported for `index`.
    pub fn get(&self, index: ItemIndex) -> Option<u32> {
        self.current.get(index.get()).copied().flatten()
    }

    /// Latest heights in index order.
    pub fn iter(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        self.current.iter().copied()
    }

    /// Record a height. Returns whether the stored value changed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn record(&mut self, index: ItemIndex, height: u32) -> bool {
        let i = index.get();
        assert!(
            i < self.current.len(),
            "index {} out of bounds (len: {})",
            i,
            self.current.len()
        );

        if !self.fresh[i] {
            self.fresh[i] = true;
            self.reported += 1;
        }

        let previous = self.current[i];
        if previous == Some(height) {
            return false;
        }

        let was_stale = previous != self.committed[i];
        self.current[i] = Some(height);
        let is_stale = self.current[i] != self.committed[i];

        match (was_stale, is_stale) {
            (false, true) => self.stale += 1,
            (true, false) => self.stale -= 1,
            _ => {}
        }
        true
    }

    /// Every tracked item has reported in the current generation.
    pub fn is_complete(&self) -> bool {
        self.reported == self.current.len()
    }

    /// Some height differs from the last committed layout.
    pub fn is_stale(&self) -> bool {
        self.stale > 0
    }

    /// Number of items that reported in the current generation.
    pub fn reported(&self) -> usize {
        self.reported
    }

    /// Measured heights in index order, if every item has one.
    pub fn measured(&self) -> Option<Vec<u32>> {
        self.current.iter().copied().collect()
    }

    /// Mark the current heights as the ones the layout now reflects.
    pub fn commit(&mut self) {
        self.committed.clone_from(&self.current);
        self.stale = 0;
    }

    /// Require every item to report again, keeping the stored heights.
    pub fn begin_generation(&mut self) {
        self.fresh.iter_mut().for_each(|fresh| *fresh = false);
        self.reported = 0;
    }

    /// Forget everything (new epoch).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What a height report led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The report was dropped without touching the map.
    Ignored(IgnoreReason),
    /// Recorded; other items have yet to report.
    Pending,
    /// Every item reported and nothing differs from the committed layout.
    Unchanged,
    /// Every item reported and the heights changed: run the final pass.
    Relayout,
}

/// Why a height report was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The layout is settled; late reports would only perturb it.
    NotLoading,
    /// The index is not a placed item.
    UnknownIndex,
}

/// Collects height reports and decides when the final pass should run.
#[derive(Debug, Clone, Default)]
pub struct HeightReconciler {
    map: HeightMap,
    reconciled_once: bool,
}

impl HeightReconciler {
    /// Fresh reconciler with no tracked items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying height map.
    pub fn map(&self) -> &HeightMap {
        &self.map
    }

    /// Whether a final pass has been committed since construction or reset.
    pub fn has_reconciled(&self) -> bool {
        self.reconciled_once
    }

    /// Track placed items up to `len`.
    pub fn track(&mut self, len: usize) {
        self.map.extend_to(len);
    }

    /// Handle a report from the item renderer.
    ///
    /// Reports are ignored while the engine is not loading, except before
    /// the first reconciliation.
    pub fn report(&mut self, index: ItemIndex, height: u32, loading: bool) -> ReportOutcome {
        if index.get() >= self.map.len() {
            return ReportOutcome::Ignored(IgnoreReason::UnknownIndex);
        }
        if !loading && self.reconciled_once {
            return ReportOutcome::Ignored(IgnoreReason::NotLoading);
        }

        self.map.record(index, height);

        if !self.map.is_complete() {
            ReportOutcome::Pending
        } else if self.map.is_stale() {
            ReportOutcome::Relayout
        } else {
            ReportOutcome::Unchanged
        }
    }

    /// Measured heights for the final pass, if every item has one.
    pub fn measured(&self) -> Option<Vec<u32>> {
        self.map.measured()
    }

    /// Record that a final pass using the current heights was committed.
    pub fn commit(&mut self) {
        self.map.commit();
        self.reconciled_once = true;
    }

    /// Start a new measurement generation for every tracked item.
    pub fn begin_generation(&mut self) {
        self.map.begin_generation();
    }

    /// Forget all heights (new epoch).
    pub fn reset(&mut self) {
        self.map.clear();
        self.reconciled_once = false;
    }
}
