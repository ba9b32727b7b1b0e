//! Drag-to-reschedule: continuous time dragging with a floating
//! overlay, pane clamping and edge-hold acceleration.
//!
//! This module provides:
//! - [`RescheduleController`]: the gesture state machine
//! - [`EdgeHold`] / [`EdgeHoldTier`]: boundary-pinned acceleration
//! - [`RowSnapshot`] / [`PaneBounds`]: the layout inputs

mod controller;
mod edge_hold;

pub use controller::{PaneBounds, RescheduleController, RescheduleSession, RowSnapshot};
pub use edge_hold::{EdgeHold, EdgeHoldTier};
