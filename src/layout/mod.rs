//! Layout layer - column balancing and height reconciliation
//!
//! # Module Structure
//!
//! - `columns`: ColumnBalancer - column count, placement rule, per-column heights
//! - `heights`: HeightReconciler - collects measured heights, decides when to relayout

pub mod columns;
pub mod heights;

pub use columns::{column_count, ColumnBalancer, ColumnGeometry, ColumnState, PlacementRule};
pub use heights::{HeightMap, HeightReconciler, ReportOutcome};
