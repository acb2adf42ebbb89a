//! Size comparison between two builds
//!
//! Joins two [`SizeTable`](crate::size::SizeTable)s on filename, computes
//! byte and percentage deltas, tallies per-file direction and ranks files by
//! relative change.

pub mod engine;
pub mod record;

pub use engine::{Direction, SizeComparison, SizeSummary};
pub use record::{signed_delta, Change, DiffRecord, Percentage};
