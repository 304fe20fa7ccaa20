//! Deviation Event Segmentation
//!
//! Turns the ordered stream of per-frame deviation samples into events:
//! - Run-length grouping over exactly contiguous frame indices
//! - Minimum persistence filtering
//! - Per-event timing, angle statistics and tabular rows
//!
//! Segmentation depends on frame adjacency and always runs sequentially over
//! the fully ordered sample stream.

mod event;
mod persistence;
mod segmenter;
mod statistics;

pub use event::{DeviationEvent, DeviationRow, TimeRange};
pub use persistence::PersistenceFilter;
pub use segmenter::EventSegmenter;
pub use statistics::AngleStatistics;
