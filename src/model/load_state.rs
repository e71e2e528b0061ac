//! Load progress flags and the pagination phase.

use serde::Serialize;

/// Progress flags exposed to the host (spinner, footer, "end of feed").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadState {
    /// Provisional placements exist without final heights.
    pub loading: bool,
    /// Every currently-known item has been placed and seen in the viewport.
    pub max_elements_reached: bool,
    /// Stream mode only: the upstream source reported no further data.
    pub max_data_reached: bool,
}

impl LoadState {
    /// State of an engine waiting for its first data.
    pub fn awaiting_data() -> Self {
        Self {
            loading: true,
            max_elements_reached: false,
            max_data_reached: false,
        }
    }

    /// Whether the host should show trailing content (footer, children).
    ///
    /// Mirrors the gallery rendering rule: trailing content appears once
    /// every item is viewed and nothing is still being measured.
    pub fn is_settled_at_end(&self) -> bool {
        self.max_elements_reached && !self.loading
    }
}

/// Pagination phase of the current data epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    /// No data has been placed in this epoch.
    #[default]
    Idle,
    /// A batch has been placed and is being measured.
    Loading,
    /// The batch is laid out; waiting for the viewport to reach its end.
    AwaitingViewport,
    /// Every known item is placed and viewed. Terminal until new data arrives.
    Exhausted,
}
