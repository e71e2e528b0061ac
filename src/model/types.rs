//! Core layout newtypes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an item in the data sequence. 0-indexed.
///
/// The engine never inspects item payloads; an item is identified only by
/// where it sits in the sequence the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Create a new ItemIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the next item index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for ItemIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Container dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ContainerSize {
    /// Create new container dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Caller-supplied token naming a logical stream.
///
/// A change of token means "this is a different stream" and resets the
/// engine to a fresh epoch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamIdentity(String);

impl StreamIdentity {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_index_round_trips_raw_value() {
        let index = ItemIndex::new(7);
        assert_eq!(index.get(), 7);
        assert_eq!(ItemIndex::from(7), index);
    }

    #[test]
    fn item_index_next_increments() {
        assert_eq!(ItemIndex::new(3).next(), ItemIndex::new(4));
    }

    #[test]
    fn item_index_display_uses_hash_prefix() {
        assert_eq!(ItemIndex::new(12).to_string(), "#12");
    }

    #[test]
    fn stream_identity_equality_is_by_token() {
        assert_eq!(StreamIdentity::new("feed-a"), StreamIdentity::new("feed-a"));
        assert_ne!(StreamIdentity::new("feed-a"), StreamIdentity::new("feed-b"));
    }
}
