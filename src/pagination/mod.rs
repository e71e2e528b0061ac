//! PaginationController - grows the data set as the viewport reaches its end
//!
//! Every placed item is subscribed for a one-shot visibility notification.
//! When the last outstanding item has been seen, the controller either asks
//! for the next batch (cumulative: `placed + batch_size`) or declares the
//! epoch exhausted.
//!
//! The controller owns only bookkeeping. Calling the viewport collaborator,
//! placing items and flipping load flags are left to the engine.

pub mod stream;

pub use stream::{MoreData, StreamIngestController};

use crate::model::{ItemIndex, Phase};
use std::collections::BTreeSet;
use std::ops::Range;

/// What should happen after an item was marked viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Some placed items have not been seen yet.
    Wait,
    /// Every placed item was seen and more data is known: place up to `end`.
    LoadThrough {
        /// Exclusive end of the cumulative slice to place.
        end: usize,
    },
    /// Every placed item was seen and no more data is known.
    Exhausted,
}

/// One-shot visibility bookkeeping plus the pagination phase.
#[derive(Debug, Clone)]
pub struct PaginationController {
    batch_size: usize,
    phase: Phase,
    viewed: Vec<bool>,
    viewed_count: usize,
    subscribed: BTreeSet<ItemIndex>,
}

impl PaginationController {
    /// Controller for the given batch size.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            phase: Phase::Idle,
            viewed: Vec::new(),
            viewed_count: 0,
            subscribed: BTreeSet::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Items added per step.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Exclusive end of the first slice of an epoch.
    pub fn first_batch_end(&self, available: usize) -> usize {
        self.batch_size.min(available)
    }

    /// Exclusive end of the next cumulative slice.
    pub fn next_slice_end(&self, placed: usize) -> usize {
        placed + self.batch_size
    }

    /// Number of placed items seen so far.
    pub fn viewed_count(&self) -> usize {
        self.viewed_count
    }

    /// Indices still waiting for their visibility notification.
    pub fn subscribed(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.subscribed.iter().copied()
    }

    /// Every placed item has been seen.
    pub fn all_viewed(&self) -> bool {
        self.viewed_count == self.viewed.len()
    }

    /// Start tracking newly placed items and enter `Loading`.
    ///
    /// Returns the indices that now need a viewport subscription.
    pub fn track(&mut self, range: Range<usize>) -> Vec<ItemIndex> {
        if range.end > self.viewed.len() {
            self.viewed.resize(range.end, false);
        }
        self.phase = Phase::Loading;

        let viewed = &self.viewed;
        let subscribed = &mut self.subscribed;
        range
            .filter(|i| !viewed[*i])
            .map(ItemIndex::new)
            .filter(|index| subscribed.insert(*index))
            .collect()
    }

    /// Record a visibility notification.
    ///
    /// Returns `None` when `index` is not subscribed (unknown, or already seen):
    /// notifications fire once per item. Otherwise the item is unsubscribed and
    /// the returned action says what to do next, given `available` known items.
    pub fn mark_viewed(&mut self, index: ItemIndex, available: usize) -> Option<PageAction> {
        if !self.subscribed.remove(&index) {
            return None;
        }
        self.viewed[index.get()] = true;
        self.viewed_count += 1;

        Some(self.next_action(available))
    }

    /// Decide the next step from the current viewed state.
    pub fn next_action(&self, available: usize) -> PageAction {
        let placed = self.viewed.len();
        if !self.all_viewed() {
            PageAction::Wait
        } else if placed < available {
            PageAction::LoadThrough {
                end: self.next_slice_end(placed),
            }
        } else {
            PageAction::Exhausted
        }
    }

    /// A final relayout was committed.
    pub fn settle(&mut self) {
        if self.phase == Phase::Loading {
            self.phase = Phase::AwaitingViewport;
        }
    }

    /// No more items are known. Drops all remaining subscriptions.
    pub fn exhaust(&mut self) {
        self.phase = Phase::Exhausted;
        self.subscribed.clear();
    }

    /// Drop every outstanding subscription, returning the dropped indices.
    pub fn unsubscribe_all(&mut self) -> Vec<ItemIndex> {
        std::mem::take(&mut self.subscribed).into_iter().collect()
    }

    /// Forget everything (new epoch). Returns the indices that were still subscribed.
    pub fn reset(&mut self) -> Vec<ItemIndex> {
        let dropped = self.unsubscribe_all();
        self.phase = Phase::Idle;
        self.viewed.clear();
        self.viewed_count = 0;
        dropped
    }
}
