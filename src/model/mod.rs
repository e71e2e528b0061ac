//! Domain model types (pure).
//!
//! All types in this module are plain data; behaviour lives in the layout,
//! pagination and engine modules.

pub mod error;
pub mod load_state;
pub mod placement;
pub mod sequence;
pub mod types;

// Re-export for convenience
pub use error::{AppError, ConfigurationError, InputError};
pub use load_state::{LoadState, Phase};
pub use placement::{LayoutSnapshot, Placement, Visibility};
pub use sequence::SequenceChange;
pub use types::{ContainerSize, ItemIndex, StreamIdentity};
