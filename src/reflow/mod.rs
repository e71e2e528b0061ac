//! ResizeReflowController - debounced reaction to container size changes
//!
//! A drag-resize produces a burst of notifications; only the last one in a
//! quiet period is acted on, and only if the width actually changed. Height
//! changes alone never reflow a column layout.

use crate::model::ContainerSize;
use crate::timing::Debouncer;
use std::time::{Duration, Instant};

/// A container size that outlived its quiet period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The width changed: columns must be recomputed.
    Reflow(ContainerSize),
    /// Only the height changed; the layout stays as it is.
    HeightOnly(ContainerSize),
}

/// Debounces resize notifications and separates out height-only changes.
#[derive(Debug, Clone)]
pub struct ResizeReflowController {
    debouncer: Debouncer<ContainerSize>,
    applied_width: u32,
    preserve_scroll: bool,
}

impl ResizeReflowController {
    /// Controller for a container currently `initial_width` pixels wide.
    pub fn new(quiet: Duration, initial_width: u32, preserve_scroll: bool) -> Self {
        Self {
            debouncer: Debouncer::new(quiet),
            applied_width: initial_width,
            preserve_scroll,
        }
    }

    /// Width of the last applied reflow (or the initial width).
    pub fn applied_width(&self) -> u32 {
        self.applied_width
    }

    /// Whether scroll offsets are rescaled after a reflow.
    pub fn preserves_scroll(&self) -> bool {
        self.preserve_scroll
    }

    /// Record a size notification.
    pub fn notify(&mut self, size: ContainerSize, now: Instant) {
        self.debouncer.schedule(size, now);
    }

    /// Release the settled size once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<Settled> {
        let size = self.debouncer.poll(now)?;
        if size.width == self.applied_width {
            return Some(Settled::HeightOnly(size));
        }
        self.applied_width = size.width;
        Some(Settled::Reflow(size))
    }

    /// When the pending notification becomes deliverable.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Drop any pending notification.
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    /// Scroll offset that keeps the same relative position after the
    /// content height changed from `old_total` to `new_total`.
    ///
    /// `offset * new_total / old_total`; unchanged when `old_total` is 0.
    pub fn rescale_scroll(offset: f64, old_total: u32, new_total: u32) -> f64 {
        if old_total == 0 {
            return offset;
        }
        offset * f64::from(new_total) / f64::from(old_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(5);

    fn size(width: u32, height: u32) -> ContainerSize {
        ContainerSize::new(width, height)
    }

    #[test]
    fn burst_of_resizes_yields_one_reflow() {
        let start = Instant::now();
        let mut controller = ResizeReflowController::new(QUIET, 900, true);

        for (step, width) in [880, 820, 700, 450].into_iter().enumerate() {
            controller.notify(size(width, 600), start + Duration::from_millis(step as u64));
        }

        assert_eq!(controller.poll(start + Duration::from_millis(4)), None);
        assert_eq!(
            controller.poll(start + Duration::from_millis(8)),
            Some(Settled::Reflow(size(450, 600)))
        );
        assert_eq!(controller.poll(start + Duration::from_millis(50)), None);
        assert_eq!(controller.applied_width(), 450);
    }

    #[test]
    fn height_only_change_does_not_reflow() {
        let start = Instant::now();
        let mut controller = ResizeReflowController::new(QUIET, 900, true);
        controller.notify(size(900, 300), start);

        assert_eq!(
            controller.poll(start + QUIET),
            Some(Settled::HeightOnly(size(900, 300)))
        );
        assert_eq!(controller.deadline(), None);
        assert_eq!(controller.applied_width(), 900);
    }

    #[test]
    fn returning_to_original_width_within_burst_does_not_reflow() {
        let start = Instant::now();
        let mut controller = ResizeReflowController::new(QUIET, 900, true);
        controller.notify(size(600, 600), start);
        controller.notify(size(900, 600), start + Duration::from_millis(1));

        assert_eq!(
            controller.poll(start + Duration::from_millis(10)),
            Some(Settled::HeightOnly(size(900, 600)))
        );
    }

    #[test]
    fn cancel_drops_pending_notification() {
        let start = Instant::now();
        let mut controller = ResizeReflowController::new(QUIET, 900, true);
        controller.notify(size(450, 600), start);

        assert!(controller.cancel());
        assert_eq!(controller.poll(start + QUIET), None);
        assert_eq!(controller.applied_width(), 900);
    }

    #[test]
    fn rescale_keeps_relative_position() {
        assert_eq!(ResizeReflowController::rescale_scroll(500.0, 2000, 4000), 1000.0);
        assert_eq!(ResizeReflowController::rescale_scroll(500.0, 2000, 1000), 250.0);
    }

    #[test]
    fn rescale_from_empty_layout_keeps_offset() {
        assert_eq!(ResizeReflowController::rescale_scroll(120.0, 0, 4000), 120.0);
    }
}
