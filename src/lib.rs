//! Mosaic - masonry gallery layout and pagination engine
//!
//! Places items of unknown height into balanced columns, reveals them in
//! batches as the viewport reaches the end of what is already placed, and
//! reflows the grid when the container is resized.
//!
//! The core is pure and single-threaded: the host feeds events into a
//! [`engine::Gallery`] and receives layouts through observers and
//! accessors. Browser-style concerns (visibility tracking, scrolling, data
//! fetching) sit behind the traits in [`engine::collaborators`].

pub mod config;
pub mod engine;
pub mod layout;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod reflow;
pub mod simulate;
pub mod source;
pub mod timing;
