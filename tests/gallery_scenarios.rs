//! End-to-end gallery scenarios driven through the public API.
//!
//! A scripted host owns a scroll window. Subscribed items become visible when
//! their provisional or final top edge falls inside the window, the way an
//! intersection observer would report them.

use mosaic::config::GalleryConfig;
use mosaic::engine::{Collaborators, Gallery, ScrollHost, ViewportObserver};
use mosaic::model::{ContainerSize, ItemIndex, LayoutSnapshot, Phase, StreamIdentity};
use mosaic::pagination::MoreData;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

const VIEWPORT_HEIGHT: u32 = 800;

/// Observed indices, shared between the engine and the host.
#[derive(Clone, Default)]
struct Observed(Rc<RefCell<BTreeSet<usize>>>);

impl ViewportObserver for Observed {
    fn observe(&mut self, index: ItemIndex) {
        self.0.borrow_mut().insert(index.get());
    }

    fn unobserve(&mut self, index: ItemIndex) {
        self.0.borrow_mut().remove(&index.get());
    }

    fn disconnect(&mut self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Clone, Default)]
struct Scroll(Rc<Cell<f64>>);

impl ScrollHost for Scroll {
    fn scroll_offset(&self) -> f64 {
        self.0.get()
    }

    fn scroll_to(&mut self, offset: f64) {
        self.0.set(offset);
    }
}

struct Host {
    gallery: Gallery<u32>,
    observed: Observed,
    scroll: Scroll,
    layouts: Rc<RefCell<Vec<LayoutSnapshot>>>,
}

impl Host {
    fn new(config: GalleryConfig, width: u32, items: Vec<u32>, collaborators: Collaborators) -> Self {
        let observed = Observed::default();
        let scroll = Scroll::default();
        let collaborators = collaborators
            .with_viewport(observed.clone())
            .with_scroll_host(scroll.clone());
        let mut gallery = Gallery::initialize(
            config,
            ContainerSize::new(width, VIEWPORT_HEIGHT),
            items,
            collaborators,
        )
        .unwrap();

        let layouts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&layouts);
        gallery.on_layout_complete(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

        Self {
            gallery,
            observed,
            scroll,
            layouts,
        }
    }

    /// Render pass: every placed item reports its own value as its height.
    fn render(&mut self) {
        let items = self.gallery.items().to_vec();
        for (i, height) in items.into_iter().enumerate() {
            self.gallery.report_item_height(ItemIndex::new(i), height);
        }
    }

    /// Report every observed item whose top edge is inside the scroll window.
    fn intersect(&mut self) {
        let offset = self.scroll.0.get() as u32;
        let window = offset..offset + VIEWPORT_HEIGHT;
        let visible: Vec<usize> = self
            .observed
            .0
            .borrow()
            .iter()
            .copied()
            .filter(|i| window.contains(&self.gallery.placements()[*i].top))
            .collect();
        for index in visible {
            self.gallery.notify_viewport_visible(ItemIndex::new(index));
        }
    }

    fn scroll_to_bottom(&mut self) {
        let bottom = self.gallery.total_height().saturating_sub(VIEWPORT_HEIGHT);
        self.scroll.0.set(f64::from(bottom));
    }
}

fn tall_items(n: usize) -> Vec<u32> {
    (0..n as u32).map(|i| 200 + (i % 4) * 50).collect()
}

#[test]
fn scrolling_down_reveals_batches_until_exhausted() {
    let mut host = Host::new(GalleryConfig::default(), 900, tall_items(50), Collaborators::new());

    let mut rounds = 0;
    while !host.gallery.load_state().max_elements_reached {
        host.render();
        for _ in 0..10 {
            host.intersect();
            host.scroll.0.set(host.scroll.0.get() + f64::from(VIEWPORT_HEIGHT / 2));
        }
        host.scroll_to_bottom();
        rounds += 1;
        assert!(rounds < 20, "pagination did not terminate");
    }
    host.render();

    assert_eq!(host.gallery.placements().len(), 50);
    assert!(host.gallery.placements().iter().all(|p| p.is_visible()));
    assert!(host.gallery.load_state().is_settled_at_end());
    assert_eq!(host.gallery.phase(), Phase::Exhausted);
    assert!(host.observed.0.borrow().is_empty());
    assert_eq!(host.layouts.borrow().len(), 4);
}

#[test]
fn unviewed_items_hold_back_the_next_batch() {
    let mut host = Host::new(GalleryConfig::default(), 900, tall_items(50), Collaborators::new());
    host.render();

    // Only the first screen is ever looked at.
    host.intersect();

    assert_eq!(host.gallery.placements().len(), 15);
    assert!(!host.observed.0.borrow().is_empty());
    assert_eq!(host.gallery.phase(), Phase::AwaitingViewport);
}

#[test]
fn stream_host_requests_more_when_caught_up() {
    let requests = Rc::new(Cell::new(0));
    let counter = Rc::clone(&requests);
    let config = GalleryConfig {
        stream_mode: true,
        stream_identity: Some(StreamIdentity::new("feed-1")),
        batch_size: 4,
        ..GalleryConfig::default()
    };
    let collaborators = Collaborators::new().with_data_source(move || {
        counter.set(counter.get() + 1);
        MoreData::MayExist
    });
    let mut host = Host::new(config, 900, vec![100; 3], collaborators);

    host.render();
    host.intersect();
    assert_eq!(requests.get(), 1);

    let mut feed = vec![100; 3];
    feed.extend(vec![120; 6]);
    host.gallery.supply_data(feed);

    // Batch of four on top of the three already placed.
    assert_eq!(host.gallery.placements().len(), 7);
    assert_eq!(requests.get(), 1);

    host.render();
    host.intersect();
    assert_eq!(host.gallery.placements().len(), 9);
    host.render();
    host.intersect();
    assert_eq!(requests.get(), 2);

    host.gallery
        .set_stream_identity(StreamIdentity::new("feed-2"));
    assert!(host.gallery.placements().is_empty());
    assert!(host.observed.0.borrow().is_empty());
}

#[test]
fn resize_keeps_relative_scroll_position() {
    let mut host = Host::new(GalleryConfig::default(), 1200, tall_items(15), Collaborators::new());
    host.render();
    let before = host.gallery.total_height();
    host.scroll.0.set(f64::from(before) / 2.0);

    let start = Instant::now();
    for (step, width) in [1100, 900, 700, 600].into_iter().enumerate() {
        host.gallery.notify_container_resized(
            ContainerSize::new(width, VIEWPORT_HEIGHT),
            start + Duration::from_millis(step as u64),
        );
    }
    let deadline = host.gallery.next_deadline().unwrap();
    host.gallery.tick(deadline);

    let after = host.gallery.total_height();
    assert_eq!(host.gallery.column_count(), 2);
    assert!(after > before);
    assert_eq!(host.layouts.borrow().len(), 2);
    assert!((host.scroll.0.get() - f64::from(after) / 2.0).abs() < 1e-6);
}
