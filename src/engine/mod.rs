//! Gallery engine - orchestrates placement, measurement, pagination and reflow.
//!
//! The engine is a single-threaded state machine driven by host events:
//! data pushes, height reports, viewport visibility and container resizes.
//! Each public method runs to completion before returning, and collaborators
//! are called synchronously from inside it. Time is injected: the host feeds
//! resize notifications with a timestamp and calls [`Gallery::tick`] when
//! [`Gallery::next_deadline`] passes.
//!
//! # Epoch lifecycle
//!
//! ```text
//! initialize / replace data / identity change
//!        │
//!        ▼
//!   place first batch (hidden) ──► heights reported ──► final pass (visible)
//!        ▲                                                   │
//!        │                                                   ▼
//!   next batch ◄───────── every placed item viewed ◄── awaiting viewport
//!                                   │
//!                                   ▼ (nothing left)
//!                              exhausted ──► stream: request more
//! ```

pub mod collaborators;

pub use collaborators::{
    Collaborators, DataSource, ResizeSubscription, ScrollHost, ViewportObserver,
};

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::config::GalleryConfig;
use crate::layout::heights::IgnoreReason;
use crate::layout::{ColumnBalancer, HeightReconciler, ReportOutcome};
use crate::model::{
    ConfigurationError, ContainerSize, ItemIndex, LayoutSnapshot, LoadState, Phase, Placement,
    SequenceChange, StreamIdentity,
};
use crate::pagination::{PageAction, PaginationController, StreamIngestController};
use crate::reflow::{ResizeReflowController, Settled};

type LayoutObserver = Box<dyn FnMut(&LayoutSnapshot)>;

/// One placed item as the host should render it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem<'a, T> {
    /// Position of the item in the supplied sequence.
    pub index: ItemIndex,
    /// Where and how to draw it.
    pub style: &'a Placement,
    /// The caller's datum.
    pub data: &'a T,
}

/// Masonry gallery engine over items of type `T`.
///
/// # Examples
///
/// ```
/// use mosaic::config::GalleryConfig;
/// use mosaic::engine::{Collaborators, Gallery};
/// use mosaic::model::{ContainerSize, ItemIndex};
///
/// let mut gallery = Gallery::initialize(
///     GalleryConfig::default(),
///     ContainerSize::new(900, 600),
///     vec![100_u32, 200, 150, 50],
///     Collaborators::new(),
/// )
/// .unwrap();
///
/// assert!(gallery.load_state().loading);
/// for (i, height) in [100, 200, 150, 50].into_iter().enumerate() {
///     gallery.report_item_height(ItemIndex::new(i), height);
/// }
///
/// assert!(!gallery.load_state().loading);
/// assert_eq!(gallery.total_height(), 205);
/// assert_eq!(gallery.placements()[3].top, 110);
/// ```
pub struct Gallery<T> {
    config: GalleryConfig,
    container: ContainerSize,
    source: Vec<T>,
    placed: usize,
    placements: Vec<Placement>,
    total_height: u32,
    load: LoadState,
    balancer: ColumnBalancer,
    heights: HeightReconciler,
    pagination: PaginationController,
    stream: StreamIngestController,
    reflow: ResizeReflowController,
    collaborators: Collaborators,
    layout_observers: Vec<LayoutObserver>,
    relayouts: usize,
    destroyed: bool,
}

impl<T> Gallery<T> {
    /// Validate `config`, wire collaborators and place the first batch.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the configuration is invalid or
    /// stream mode is enabled without a data source.
    pub fn initialize(
        config: GalleryConfig,
        container: ContainerSize,
        initial_items: Vec<T>,
        collaborators: Collaborators,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        if config.stream_mode && !collaborators.has_data_source() {
            return Err(ConfigurationError::MissingDataSource);
        }

        let mut gallery = Self {
            container,
            source: Vec::new(),
            placed: 0,
            placements: Vec::new(),
            total_height: 0,
            load: LoadState::awaiting_data(),
            balancer: ColumnBalancer::new(&config, container.width),
            heights: HeightReconciler::new(),
            pagination: PaginationController::new(config.batch_size),
            stream: StreamIngestController::new(config.stream_identity.clone()),
            reflow: ResizeReflowController::new(
                config.resize_debounce,
                container.width,
                config.preserve_scroll,
            ),
            collaborators,
            layout_observers: Vec::new(),
            relayouts: 0,
            destroyed: false,
            config,
        };

        info!(
            width = container.width,
            columns = gallery.balancer.column_count(),
            batch_size = gallery.config.batch_size,
            stream_mode = gallery.config.stream_mode,
            items = initial_items.len(),
            "Gallery initialized"
        );

        if gallery.config.stream_mode {
            gallery.ingest_stream(initial_items);
        } else {
            gallery.start_epoch(initial_items);
        }
        Ok(gallery)
    }

    // ===== Accessors =====

    /// Current load flags.
    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Pagination phase of the current epoch.
    pub fn phase(&self) -> Phase {
        self.pagination.phase()
    }

    /// Placements for every placed item, by index.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The placed prefix of the supplied items.
    pub fn items(&self) -> &[T] {
        &self.source[..self.placed]
    }

    /// Number of items supplied, placed or not.
    pub fn available(&self) -> usize {
        self.source.len()
    }

    /// Placed items paired with their placements, in index order.
    pub fn render_items(&self) -> impl Iterator<Item = RenderItem<'_, T>> + '_ {
        self.placements
            .iter()
            .zip(self.items())
            .enumerate()
            .map(|(i, (style, data))| RenderItem {
                index: ItemIndex::new(i),
                style,
                data,
            })
    }

    /// Container height from the last committed final pass.
    pub fn total_height(&self) -> u32 {
        self.total_height
    }

    /// Number of columns for the applied container width.
    ///
    /// An empty gallery has a single column until items are placed.
    pub fn column_count(&self) -> usize {
        if self.placed == 0 {
            return 1;
        }
        self.balancer.column_count()
    }

    /// Last applied container size.
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// Effective configuration.
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Items still subscribed for visibility.
    pub fn awaiting_visibility(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.pagination.subscribed()
    }

    /// Number of committed final passes since initialization.
    pub fn relayout_count(&self) -> usize {
        self.relayouts
    }

    /// Number of `request_more` calls issued to the data source.
    pub fn requests_issued(&self) -> usize {
        self.stream.requests_issued()
    }

    /// Whether [`Gallery::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Snapshot of the current layout, as delivered to observers.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            height: self.total_height,
            width: self.container.width,
            placements: self.placements.clone(),
        }
    }

    // ===== Host events =====

    /// Register an observer called after each committed final pass.
    pub fn on_layout_complete(&mut self, observer: impl FnMut(&LayoutSnapshot) + 'static) {
        if self.destroyed {
            return;
        }
        self.layout_observers.push(Box::new(observer));
    }

    /// A placed item reported its rendered height.
    pub fn report_item_height(&mut self, index: ItemIndex, height: u32) {
        if self.destroyed {
            return;
        }

        match self.heights.report(index, height, self.load.loading) {
            ReportOutcome::Ignored(IgnoreReason::UnknownIndex) => {
                warn!(%index, height, placed = self.placed, "Height report for unplaced item ignored");
            }
            ReportOutcome::Ignored(IgnoreReason::NotLoading) => {
                trace!(%index, height, "Late height report ignored");
            }
            ReportOutcome::Pending => {
                trace!(
                    %index,
                    height,
                    reported = self.heights.map().reported(),
                    placed = self.placed,
                    "Height recorded"
                );
            }
            ReportOutcome::Unchanged if self.placements.iter().all(Placement::is_visible) => {
                self.load.loading = false;
                self.pagination.settle();
                debug!(placed = self.placed, "Heights confirmed; layout unchanged");
            }
            ReportOutcome::Unchanged | ReportOutcome::Relayout => self.reconcile(),
        }
    }

    /// A subscribed item entered the viewport.
    pub fn notify_viewport_visible(&mut self, index: ItemIndex) {
        if self.destroyed {
            return;
        }

        let Some(action) = self.pagination.mark_viewed(index, self.source.len()) else {
            trace!(%index, "Visibility for unsubscribed item ignored");
            return;
        };
        if let Some(viewport) = self.collaborators.viewport.as_mut() {
            viewport.unobserve(index);
        }
        self.apply_page_action(action);
    }

    /// The container was resized. Applied after the debounce quiet period,
    /// on the first [`Gallery::tick`] at or past [`Gallery::next_deadline`].
    pub fn notify_container_resized(&mut self, size: ContainerSize, now: Instant) {
        if self.destroyed {
            return;
        }
        trace!(width = size.width, height = size.height, "Resize scheduled");
        self.reflow.notify(size, now);
    }

    /// Deliver any debounced work that is due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        match self.reflow.poll(now) {
            Some(Settled::Reflow(size)) => self.apply_resize(size),
            Some(Settled::HeightOnly(size)) => {
                self.container.height = size.height;
                trace!(height = size.height, "Container height changed; no reflow");
            }
            None => {}
        }
    }

    /// When the host should next call [`Gallery::tick`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.reflow.deadline()
    }

    /// Switch to a different stream. Discards every item, placement and
    /// height when the identity differs from the current one.
    pub fn set_stream_identity(&mut self, identity: StreamIdentity) {
        if self.destroyed {
            return;
        }
        if !self.stream.change_identity(identity.clone()) {
            trace!(%identity, "Stream identity unchanged");
            return;
        }

        info!(%identity, discarded = self.source.len(), "Stream identity changed; resetting");
        self.config.stream_identity = Some(identity);
        self.clear_epoch();
        self.source.clear();
        self.load = LoadState::awaiting_data();
    }

    /// Ask every placed item to report its height again.
    ///
    /// The next final pass runs only if some height actually changed.
    pub fn request_remeasure(&mut self) {
        if self.destroyed || self.placed == 0 {
            return;
        }
        self.heights.begin_generation();
        self.load.loading = true;
        debug!(placed = self.placed, "Remeasure requested");
    }

    /// Release every collaborator and stop reacting to events. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        let dropped_resize = self.reflow.cancel();
        self.pagination.unsubscribe_all();
        if let Some(viewport) = self.collaborators.viewport.as_mut() {
            viewport.disconnect();
        }
        if let Some(resize) = self.collaborators.resize.as_mut() {
            resize.unsubscribe();
        }
        self.collaborators = Collaborators::default();
        self.layout_observers.clear();

        info!(dropped_resize, "Gallery destroyed");
    }

    // ===== Internals =====

    /// Begin a new data epoch with `items` (non-stream mode).
    fn start_epoch(&mut self, items: Vec<T>) {
        self.clear_epoch();
        self.source = items;

        if self.source.is_empty() {
            self.load = LoadState {
                loading: false,
                max_elements_reached: true,
                max_data_reached: false,
            };
            self.pagination.exhaust();
            debug!("Empty data; nothing to place");
            return;
        }

        self.load = LoadState::awaiting_data();
        let end = self.pagination.first_batch_end(self.source.len());
        self.place_through(end);
    }

    /// Drop placements, heights and subscriptions of the current epoch.
    fn clear_epoch(&mut self) {
        let outstanding = self.pagination.reset();
        if let Some(viewport) = self.collaborators.viewport.as_mut() {
            for index in outstanding {
                viewport.unobserve(index);
            }
        }
        self.heights.reset();
        self.balancer.reset();
        self.placements.clear();
        self.placed = 0;
        self.total_height = 0;
    }

    /// Append stream items and place the next slice of them.
    fn ingest_stream(&mut self, items: Vec<T>) {
        if items.len() < self.source.len() {
            warn!(
                previous = self.source.len(),
                supplied = items.len(),
                "Stream push shrank the sequence; ignored"
            );
            return;
        }
        self.source = items;

        match StreamIngestController::ingest_range(
            self.config.batch_size,
            self.placed,
            self.source.len(),
        ) {
            Some(range) => self.place_through(range.end),
            None => trace!(available = self.source.len(), "Stream push placed nothing"),
        }
    }

    /// Provisionally place items `placed..end` and subscribe them.
    fn place_through(&mut self, end: usize) {
        let end = end.min(self.source.len());
        if end <= self.placed {
            return;
        }
        let range = self.placed..end;

        self.heights.track(end);
        for i in range.clone() {
            let placement = self.balancer.place_next(ItemIndex::new(i));
            self.placements.push(placement);
        }
        let subscribe = self.pagination.track(range.clone());
        if let Some(viewport) = self.collaborators.viewport.as_mut() {
            for index in subscribe {
                viewport.observe(index);
            }
        }

        self.placed = end;
        self.load.loading = true;
        self.load.max_elements_reached = false;
        debug!(
            from = range.start,
            to = end,
            available = self.source.len(),
            "Placed provisional batch"
        );
    }

    fn apply_page_action(&mut self, action: PageAction) {
        match action {
            PageAction::Wait => {}
            PageAction::LoadThrough { end } => {
                debug!(placed = self.placed, end, "All placed items viewed; loading next batch");
                self.place_through(end);
            }
            PageAction::Exhausted => self.exhaust(),
        }
    }

    fn exhaust(&mut self) {
        self.load.max_elements_reached = true;
        self.pagination.exhaust();
        if let Some(viewport) = self.collaborators.viewport.as_mut() {
            viewport.disconnect();
        }
        debug!(placed = self.placed, "Every known item placed and viewed");

        if self.config.stream_mode {
            self.request_more_data();
        }
    }

    fn request_more_data(&mut self) {
        if !self.stream.should_request(self.load.max_elements_reached) {
            return;
        }
        let Some(source) = self.collaborators.data_source.as_mut() else {
            return;
        };

        let response = source.request_more();
        self.stream.record_response(response);
        self.load.max_data_reached = self.stream.max_data_reached();
        debug!(
            ?response,
            requests = self.stream.requests_issued(),
            "Requested more stream data"
        );
    }

    /// Final pass with measured heights, then notify observers.
    fn reconcile(&mut self) {
        let Some(heights) = self.heights.measured() else {
            warn!(placed = self.placed, "Final pass requested with unmeasured items");
            return;
        };
        self.commit_layout(heights);
        self.load.loading = false;
        self.pagination.settle();
        self.notify_layout();
    }

    fn commit_layout(&mut self, heights: Vec<u32>) {
        let (placements, total_height) = self.balancer.relayout(heights);
        self.placements = placements;
        self.total_height = total_height;
        self.heights.commit();
        self.relayouts += 1;
        debug!(
            items = self.placed,
            columns = self.balancer.column_count(),
            total_height,
            "Committed final layout"
        );
    }

    fn notify_layout(&mut self) {
        if self.layout_observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.layout_observers {
            observer(&snapshot);
        }
    }

    fn apply_resize(&mut self, size: ContainerSize) {
        let old_total = self.total_height;
        self.container = size;
        let geometry_changed = self.balancer.set_container_width(size.width);
        debug!(
            width = size.width,
            columns = self.balancer.column_count(),
            geometry_changed,
            "Applying container resize"
        );

        if self.placed == 0 {
            return;
        }

        match self.heights.measured() {
            Some(heights) => {
                self.commit_layout(heights);
                if self.config.remeasure_on_resize {
                    self.heights.begin_generation();
                    self.load.loading = true;
                } else if self.heights.map().is_complete() {
                    self.load.loading = false;
                    self.pagination.settle();
                }
                self.notify_layout();
                self.preserve_scroll(old_total);
            }
            None => {
                self.placements = self.balancer.reprovision(self.heights.map().iter());
                trace!(placed = self.placed, "Reprovisioned while measuring");
            }
        }
    }

    fn preserve_scroll(&mut self, old_total: u32) {
        if !self.reflow.preserves_scroll() {
            return;
        }
        if let Some(scroll) = self.collaborators.scroll.as_mut() {
            let offset = scroll.scroll_offset();
            let rescaled =
                ResizeReflowController::rescale_scroll(offset, old_total, self.total_height);
            scroll.scroll_to(rescaled);
            trace!(offset, rescaled, "Scroll position rescaled");
        }
    }
}

impl<T: PartialEq> Gallery<T> {
    /// Supply the current item sequence.
    ///
    /// In stream mode this is an append-only push. Otherwise the sequence is
    /// compared with the previous one: identical input is a no-op, a pure
    /// extension keeps the existing layout, anything else starts over.
    pub fn supply_data(&mut self, items: Vec<T>) {
        if self.destroyed {
            return;
        }
        if self.config.stream_mode {
            self.ingest_stream(items);
            return;
        }

        match SequenceChange::classify(&self.source, &items) {
            SequenceChange::Unchanged => trace!(len = items.len(), "Supplied data unchanged"),
            SequenceChange::Extended { from, to } => {
                self.source = items;
                debug!(from, to, "Data sequence extended");
                if self.pagination.phase() == Phase::Exhausted {
                    let action = self.pagination.next_action(self.source.len());
                    self.apply_page_action(action);
                }
            }
            SequenceChange::Replaced => {
                info!(len = items.len(), "Data sequence replaced; starting new epoch");
                self.start_epoch(items);
            }
        }
    }
}

impl<T> Drop for Gallery<T> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<T> fmt::Debug for Gallery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("container", &self.container)
            .field("available", &self.source.len())
            .field("placed", &self.placed)
            .field("total_height", &self.total_height)
            .field("load", &self.load)
            .field("phase", &self.pagination.phase())
            .field("collaborators", &self.collaborators)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
