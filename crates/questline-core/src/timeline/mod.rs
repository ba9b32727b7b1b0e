//! Day-timeline composition: synthetic marker rows mixed with
//! scheduled tasks in one ordered sequence.
//!
//! This module provides:
//! - [`placeholder_minutes`] / [`emphasis_map`]: marker selection and
//!   visual weighting
//! - [`build_timeline_rows`]: the pure `(tasks, now)` -> rows function
//! - [`MinuteTicker`]: minute-rollover detection for the now-marker

mod marker;
mod rows;

pub use marker::{emphasis_map, placeholder_minutes};
pub use rows::{build_timeline_rows, day_window, MarkerKind, MinuteTicker, TimelineRow};
