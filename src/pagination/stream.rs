//! StreamIngestController - pagination over an externally growing source
//!
//! In stream mode the caller owns an accumulating sequence and pushes the
//! whole of it on every change. The controller works out which slice to place
//! without ever re-requesting placed items, asks for more data once every
//! known item has been seen, and resets when the stream identity changes.

use crate::model::StreamIdentity;
use std::ops::Range;

/// Answer from a data source asked for more items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoreData {
    /// More items may arrive later through `supply_data`.
    MayExist,
    /// The source has nothing further for this stream.
    Exhausted,
}

/// Offset and exhaustion bookkeeping for stream mode.
#[derive(Debug, Clone, Default)]
pub struct StreamIngestController {
    identity: Option<StreamIdentity>,
    max_data_reached: bool,
    requests_issued: usize,
}

impl StreamIngestController {
    /// Controller for an initial stream identity.
    pub fn new(identity: Option<StreamIdentity>) -> Self {
        Self {
            identity,
            max_data_reached: false,
            requests_issued: 0,
        }
    }

    /// Exclusive end of the slice to request next: `batch_size + placed`.
    ///
    /// Independent of how much the source grew in one step.
    pub fn next_slice_end(batch_size: usize, placed: usize) -> usize {
        batch_size + placed
    }

    /// Items to place after the source grew to `available` items.
    ///
    /// Returns `None` when nothing new fits in the next slice.
    pub fn ingest_range(batch_size: usize, placed: usize, available: usize) -> Option<Range<usize>> {
        let end = Self::next_slice_end(batch_size, placed).min(available);
        (end > placed).then_some(placed..end)
    }

    /// Current stream identity.
    pub fn identity(&self) -> Option<&StreamIdentity> {
        self.identity.as_ref()
    }

    /// The source said no further data exists for this identity.
    pub fn max_data_reached(&self) -> bool {
        self.max_data_reached
    }

    /// Number of `request_more` calls issued for this identity.
    pub fn requests_issued(&self) -> usize {
        self.requests_issued
    }

    /// Whether to ask the source for more, given the elements flag.
    pub fn should_request(&self, max_elements_reached: bool) -> bool {
        max_elements_reached && !self.max_data_reached
    }

    /// Record the source's answer to a request.
    pub fn record_response(&mut self, response: MoreData) {
        self.requests_issued += 1;
        if response == MoreData::Exhausted {
            self.max_data_reached = true;
        }
    }

    /// Switch to `identity`. Returns `true` if it differs from the current one,
    /// in which case all stream bookkeeping has been reset.
    pub fn change_identity(&mut self, identity: StreamIdentity) -> bool {
        if self.identity.as_ref() == Some(&identity) {
            return false;
        }
        *self = Self::new(Some(identity));
        true
    }
}
