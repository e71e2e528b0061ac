//! Headless simulator - drives a gallery to completion without a renderer.
//!
//! Items are their own measured heights. The simulator reports every placed
//! item's height, scrolls through each batch until nothing is left, and can
//! apply one resize at the end. In stream mode the input is revealed chunk by
//! chunk through a [`DataSource`](crate::engine::DataSource).

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::GalleryConfig;
use crate::engine::{Collaborators, Gallery};
use crate::model::{ConfigurationError, ContainerSize, ItemIndex, LayoutSnapshot, LoadState};
use crate::pagination::MoreData;

/// Optional behaviour for a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Items revealed per data request in stream mode (defaults to the batch size).
    pub stream_chunk: Option<usize>,
    /// Container width to resize to once every item is laid out.
    pub resize_to: Option<u32>,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// The last committed layout.
    pub layout: LayoutSnapshot,
    /// Column count of the final layout.
    pub columns: usize,
    /// Load flags at the end of the run.
    pub load_state: LoadState,
    /// Number of batches placed.
    pub batches: usize,
    /// Number of committed final passes.
    pub relayouts: usize,
    /// Number of data requests issued (stream mode).
    pub data_requests: usize,
}

/// Reveals the input a chunk at a time when the engine asks for more.
#[derive(Debug)]
struct ChunkFeed {
    heights: Vec<u32>,
    chunk: usize,
    revealed: usize,
    requested: bool,
}

impl ChunkFeed {
    fn new(heights: &[u32], chunk: usize) -> Self {
        Self {
            heights: heights.to_vec(),
            chunk: chunk.max(1),
            revealed: 0,
            requested: false,
        }
    }

    fn reveal_next(&mut self) -> Vec<u32> {
        self.revealed = (self.revealed + self.chunk).min(self.heights.len());
        self.heights[..self.revealed].to_vec()
    }

    fn request(&mut self) -> MoreData {
        if self.revealed >= self.heights.len() {
            return MoreData::Exhausted;
        }
        self.requested = true;
        MoreData::MayExist
    }

    fn take_requested(&mut self) -> Option<Vec<u32>> {
        std::mem::take(&mut self.requested).then(|| self.reveal_next())
    }
}

/// Run a gallery over `heights` in a container `width` pixels wide.
///
/// # Errors
///
/// Returns the engine's [`ConfigurationError`] if `config` is rejected.
pub fn simulate(
    config: GalleryConfig,
    width: u32,
    heights: &[u32],
    options: SimulationOptions,
) -> Result<SimulationReport, ConfigurationError> {
    let stream_mode = config.stream_mode;
    let chunk = options.stream_chunk.unwrap_or(config.batch_size);
    let feed = Rc::new(RefCell::new(ChunkFeed::new(heights, chunk)));

    let (initial, collaborators) = if stream_mode {
        let source = Rc::clone(&feed);
        let initial = feed.borrow_mut().reveal_next();
        let collaborators =
            Collaborators::new().with_data_source(move || source.borrow_mut().request());
        (initial, collaborators)
    } else {
        (heights.to_vec(), Collaborators::new())
    };

    let mut gallery =
        Gallery::initialize(config, ContainerSize::new(width, 0), initial, collaborators)?;
    let mut batches = usize::from(!gallery.placements().is_empty());

    loop {
        let placed = gallery.placements().len();
        measure(&mut gallery);

        let pending: Vec<ItemIndex> = gallery.awaiting_visibility().collect();
        for index in pending {
            gallery.notify_viewport_visible(index);
        }

        let revealed = feed.borrow_mut().take_requested();
        if let Some(items) = revealed {
            debug!(available = items.len(), "Revealing next stream chunk");
            gallery.supply_data(items);
        }

        if gallery.placements().len() == placed {
            break;
        }
        batches += 1;
    }

    if let Some(target) = options.resize_to {
        let now = Instant::now();
        gallery.notify_container_resized(ContainerSize::new(target, 0), now);
        if let Some(deadline) = gallery.next_deadline() {
            gallery.tick(deadline);
        }
        measure(&mut gallery);
    }

    let report = SimulationReport {
        layout: gallery.snapshot(),
        columns: gallery.column_count(),
        load_state: gallery.load_state(),
        batches,
        relayouts: gallery.relayout_count(),
        data_requests: gallery.requests_issued(),
    };
    info!(
        items = report.layout.placements.len(),
        height = report.layout.height,
        batches = report.batches,
        relayouts = report.relayouts,
        "Simulation finished"
    );
    Ok(report)
}

fn measure(gallery: &mut Gallery<u32>) {
    let items = gallery.items().to_vec();
    for (i, height) in items.into_iter().enumerate() {
        gallery.report_item_height(ItemIndex::new(i), height);
    }
}

/// Format a layout as an aligned text table, one row per item.
pub fn render_table(snapshot: &LayoutSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5} {:>4} {:>6} {:>6} {:>6} {:>7}  {}",
        "item", "col", "left", "top", "width", "height", "state"
    );
    for (i, placement) in snapshot.placements.iter().enumerate() {
        let height = placement
            .height
            .map_or_else(|| "-".to_string(), |h| h.to_string());
        let state = if placement.is_visible() {
            "visible"
        } else {
            "hidden"
        };
        let _ = writeln!(
            out,
            "{:>5} {:>4} {:>6} {:>6} {:>6} {:>7}  {}",
            i, placement.column, placement.left, placement.top, placement.width, height, state
        );
    }
    let _ = writeln!(
        out,
        "height {}px at width {}px",
        snapshot.height, snapshot.width
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_placement() {
        let report = simulate(
            GalleryConfig::default(),
            900,
            &[100, 200, 150, 50],
            SimulationOptions::default(),
        )
        .unwrap();

        insta::assert_snapshot!(render_table(&report.layout), @r"
         item  col   left    top  width  height  state
            0    0      0      5    295     100  visible
            1    1    300      5    295     200  visible
            2    2    600      5    300     150  visible
            3    0      0    110    295      50  visible
        height 205px at width 900px
        ");
    }

    #[test]
    fn pages_through_every_batch() {
        let heights: Vec<u32> = (0..40).map(|i| 80 + (i % 5) * 30).collect();
        let report = simulate(
            GalleryConfig::default(),
            1200,
            &heights,
            SimulationOptions::default(),
        )
        .unwrap();

        assert_eq!(report.layout.placements.len(), 40);
        assert!(report.layout.placements.iter().all(|p| p.is_visible()));
        assert_eq!(report.batches, 3);
        assert_eq!(report.relayouts, 3);
        assert_eq!(report.columns, 4);
        assert!(report.load_state.is_settled_at_end());
        assert_eq!(report.data_requests, 0);
    }

    #[test]
    fn stream_mode_reveals_chunks_on_request() {
        let config = GalleryConfig {
            stream_mode: true,
            ..GalleryConfig::default()
        };
        let heights = vec![100; 12];
        let report = simulate(
            config,
            900,
            &heights,
            SimulationOptions {
                stream_chunk: Some(5),
                resize_to: None,
            },
        )
        .unwrap();

        assert_eq!(report.layout.placements.len(), 12);
        assert_eq!(report.batches, 3);
        assert_eq!(report.data_requests, 3);
        assert!(report.load_state.max_data_reached);
    }

    #[test]
    fn resize_relayouts_at_new_width() {
        let report = simulate(
            GalleryConfig::default(),
            900,
            &[100, 200, 150, 50, 120, 80],
            SimulationOptions {
                stream_chunk: None,
                resize_to: Some(450),
            },
        )
        .unwrap();

        assert_eq!(report.layout.width, 450);
        assert_eq!(report.layout.height, 385);
        assert_eq!(report.columns, 2);
        assert_eq!(report.relayouts, 2);
    }

    #[test]
    fn empty_input_produces_empty_layout() {
        let report = simulate(GalleryConfig::default(), 900, &[], SimulationOptions::default())
            .unwrap();

        assert!(report.layout.placements.is_empty());
        assert_eq!(report.layout.height, 0);
        assert_eq!(report.columns, 1);
        assert_eq!(report.batches, 0);
    }

    #[test]
    fn invalid_config_is_reported() {
        let config = GalleryConfig {
            max_columns: 0,
            ..GalleryConfig::default()
        };
        let result = simulate(config, 900, &[100], SimulationOptions::default());
        assert_eq!(result, Err(ConfigurationError::InvalidMaxColumns(0)));
    }
}
