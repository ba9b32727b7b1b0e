//! Long-press drag-to-reorder gesture machinery.
//!
//! This module provides:
//! - [`DragReorderEngine`]: the per-list gesture state machine turning
//!   pointer samples into single-step reorders
//! - [`SectionBoard`]: cross-section drop tracking for moving a task
//!   between time-of-day buckets

mod engine;
mod sections;

pub use engine::{DragPhase, DragReorderEngine, DragSession};
pub use sections::SectionBoard;
