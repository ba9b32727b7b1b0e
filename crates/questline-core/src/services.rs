//! Collaborator seams consumed by the gesture engines.
//!
//! The core talks to its surroundings through these narrow traits:
//! autoscroll, haptic feedback and time snapping. Each has a no-op or
//! fixed default so the engines work standalone in tests and the CLI.

use serde::{Deserialize, Serialize};

use crate::time::clamp_snap_minute;

/// Haptic impact strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Light,
    Medium,
}

/// Fire-and-forget feedback sink for swap/drop/conflict moments.
///
/// Implementations must swallow device failures; feedback never blocks
/// or fails a gesture.
pub trait HapticSink {
    fn impact(&mut self, impact: Impact);
}

/// Default sink: does nothing.
#[derive(Debug, Default)]
pub struct NoopHaptics;

impl HapticSink for NoopHaptics {
    fn impact(&mut self, _impact: Impact) {}
}

/// Test/diagnostic sink that records every impact.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pub impacts: Vec<Impact>,
}

impl HapticSink for RecordingHaptics {
    fn impact(&mut self, impact: Impact) {
        self.impacts.push(impact);
    }
}

// Shared-handle impls so a host (or test) can keep a handle to a sink
// while an engine owns another.
impl<T: HapticSink> HapticSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn impact(&mut self, impact: Impact) {
        self.borrow_mut().impact(impact);
    }
}

/// Autoscroll collaborator. The engine reports the live pointer y while
/// dragging; the collaborator owns the scroll timer and edge thresholds.
pub trait AutoscrollSink {
    fn report_pointer_y(&mut self, y: f32);
    fn stop(&mut self);
}

/// Default sink: does nothing.
#[derive(Debug, Default)]
pub struct NoopAutoscroll;

impl AutoscrollSink for NoopAutoscroll {
    fn report_pointer_y(&mut self, _y: f32) {}
    fn stop(&mut self) {}
}

impl<T: AutoscrollSink> AutoscrollSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn report_pointer_y(&mut self, y: f32) {
        self.borrow_mut().report_pointer_y(y);
    }
    fn stop(&mut self) {
        self.borrow_mut().stop();
    }
}

/// Test/diagnostic autoscroll sink that records reported positions.
#[derive(Debug, Default)]
pub struct RecordingAutoscroll {
    pub reported: Vec<f32>,
    pub stopped: bool,
}

impl AutoscrollSink for RecordingAutoscroll {
    fn report_pointer_y(&mut self, y: f32) {
        self.reported.push(y);
        self.stopped = false;
    }
    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// Converts a raw vertical drag offset into a grid-snapped minute.
pub trait SnapGrid {
    /// Snapped preview minute for a drag that started at `origin_minute`
    /// and has moved `offset_y` pixels.
    fn preview_minute(&self, origin_minute: u16, offset_y: f32) -> u16;

    /// Finest time step the grid supports, in minutes. Edge-hold
    /// acceleration advances the preview in multiples of this.
    fn step_minutes(&self) -> u16;
}

/// Fixed-scale snap grid: a constant number of pixels per step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FixedSnapGrid {
    /// Pixels of drag per one snap step.
    pub pixels_per_step: f32,
    /// Snap granularity in minutes.
    pub step_minutes: u16,
}

impl Default for FixedSnapGrid {
    fn default() -> Self {
        Self {
            pixels_per_step: 20.0,
            step_minutes: 5,
        }
    }
}

impl SnapGrid for FixedSnapGrid {
    fn preview_minute(&self, origin_minute: u16, offset_y: f32) -> u16 {
        let pixels = self.pixels_per_step.max(1.0);
        let steps = (offset_y / pixels).round() as i32;
        let delta = steps * self.step_minutes as i32;
        clamp_snap_minute(origin_minute as i32 + delta)
    }

    fn step_minutes(&self) -> u16 {
        self.step_minutes.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_grid_rounds_to_steps() {
        let grid = FixedSnapGrid::default();
        assert_eq!(grid.preview_minute(540, 0.0), 540);
        // 20 px per 5-minute step; 9 px rounds to 0, 11 px rounds to 1.
        assert_eq!(grid.preview_minute(540, 9.0), 540);
        assert_eq!(grid.preview_minute(540, 11.0), 545);
        assert_eq!(grid.preview_minute(540, -41.0), 530);
    }

    #[test]
    fn snap_grid_clamps_to_day() {
        let grid = FixedSnapGrid::default();
        assert_eq!(grid.preview_minute(10, -500.0), 0);
        assert_eq!(grid.preview_minute(1430, 500.0), 1435);
    }
}
