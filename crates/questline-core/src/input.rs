//! Input-agnostic pointer events.
//!
//! Mouse, touch and pointer input all adapt to this one shape at the
//! host boundary; the gesture state machines never branch on the
//! physical source.

use serde::{Deserialize, Serialize};

/// Logical phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One pointer sample, timestamped by the host clock in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
    pub at_ms: u64,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, phase: PointerPhase, at_ms: u64) -> Self {
        Self { x, y, phase, at_ms }
    }

    /// Euclidean distance to another sample's position.
    pub fn distance_to(&self, other: &PointerSample) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
