//! Structural change detection for caller-supplied data sequences.
//!
//! Items are compared with their own `PartialEq`, which for derived impls is
//! a deep structural comparison over nested fields, maps and sequences.

/// How a newly supplied sequence relates to the one the engine already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceChange {
    /// Same length, same items.
    Unchanged,
    /// The previous sequence is a strict prefix of the new one.
    Extended {
        /// Length of the previous sequence.
        from: usize,
        /// Length of the new sequence.
        to: usize,
    },
    /// Anything else: shrinkage, reordering, or an edited item.
    Replaced,
}

impl SequenceChange {
    /// Classify `next` against `previous`.
    ///
    /// An empty previous sequence counts as replaced, not extended: there is
    /// no epoch to extend.
    pub fn classify<T: PartialEq>(previous: &[T], next: &[T]) -> Self {
        if previous == next {
            return Self::Unchanged;
        }

        if !previous.is_empty()
            && next.len() > previous.len()
            && next[..previous.len()] == *previous
        {
            return Self::Extended {
                from: previous.len(),
                to: next.len(),
            };
        }

        Self::Replaced
    }
}
