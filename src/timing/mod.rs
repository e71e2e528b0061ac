//! Time-driven primitives.
//!
//! The engine is single-threaded and never sleeps: time is passed in by the
//! host as an `Instant`, which keeps every timer deterministic under test.

pub mod debounce;

pub use debounce::Debouncer;
