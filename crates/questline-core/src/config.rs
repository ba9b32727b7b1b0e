//! TOML-backed gesture tuning configuration.
//!
//! Every UX constant the engines depend on (long-press delay, swap
//! hysteresis, marker interval, snap scale, edge-hold tiers) lives
//! here so hosts can preserve or adjust the tuning without touching
//! code. Missing fields fall back to the shipped defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::services::FixedSnapGrid;

/// Drag-reorder engine tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReorderTuning {
    /// Long-press delay guarding the pressed -> dragging transition.
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
    /// Movement while pressed beyond this cancels the press (scroll).
    #[serde(default = "default_press_cancel_px")]
    pub press_cancel_px: f32,
    /// Fixed row height the hysteresis is measured against.
    #[serde(default = "default_row_height_px")]
    pub row_height_px: f32,
    /// Fraction of a row height the pointer must travel per swap.
    #[serde(default = "default_hysteresis_ratio")]
    pub hysteresis_ratio: f32,
    /// Drop-bounce feedback duration after a commit.
    #[serde(default = "default_drop_bounce_ms")]
    pub drop_bounce_ms: u64,
}

impl ReorderTuning {
    /// Pixel displacement required to commit one swap.
    pub fn hysteresis_px(&self) -> f32 {
        self.row_height_px * self.hysteresis_ratio
    }
}

impl Default for ReorderTuning {
    fn default() -> Self {
        Self {
            long_press_ms: default_long_press_ms(),
            press_cancel_px: default_press_cancel_px(),
            row_height_px: default_row_height_px(),
            hysteresis_ratio: default_hysteresis_ratio(),
            drop_bounce_ms: default_drop_bounce_ms(),
        }
    }
}

/// Reschedule drag controller tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RescheduleTuning {
    /// Touch hold delay before a reschedule drag activates.
    #[serde(default = "default_touch_hold_ms")]
    pub touch_hold_ms: u64,
    /// Movement while holding beyond this cancels the hold (scroll).
    #[serde(default = "default_touch_cancel_px")]
    pub touch_cancel_px: f32,
    /// Minimum interval between light haptics on preview changes.
    #[serde(default = "default_light_haptic_min_interval_ms")]
    pub light_haptic_min_interval_ms: u64,
    /// Drop-bounce feedback duration after a commit.
    #[serde(default = "default_drop_bounce_ms")]
    pub drop_bounce_ms: u64,
    /// Padding kept between the overlay and the pane edges.
    #[serde(default = "default_clamp_padding_px")]
    pub clamp_padding_px: f32,
    /// Overshoot below this never arms edge-hold acceleration.
    #[serde(default = "default_pin_threshold_px")]
    pub pin_threshold_px: f32,
    /// Delay before acceleration re-arms after a direction change.
    #[serde(default = "default_direction_change_delay_ms")]
    pub direction_change_delay_ms: u64,
}

impl Default for RescheduleTuning {
    fn default() -> Self {
        Self {
            touch_hold_ms: default_touch_hold_ms(),
            touch_cancel_px: default_touch_cancel_px(),
            light_haptic_min_interval_ms: default_light_haptic_min_interval_ms(),
            drop_bounce_ms: default_drop_bounce_ms(),
            clamp_padding_px: default_clamp_padding_px(),
            pin_threshold_px: default_pin_threshold_px(),
            direction_change_delay_ms: default_direction_change_delay_ms(),
        }
    }
}

/// Timeline marker generation tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkerTuning {
    /// Placeholder alignment interval in minutes.
    #[serde(default = "default_marker_interval_min")]
    pub interval_min: u16,
    /// Timeline anchor when no task is scheduled (06:00).
    #[serde(default = "default_anchor_minute")]
    pub default_anchor_minute: u16,
    /// Emphasis floor for background placeholders.
    #[serde(default = "default_emphasis_min")]
    pub emphasis_min: f32,
    /// Emphasis for the markers nearest the current minute.
    #[serde(default = "default_emphasis_max")]
    pub emphasis_max: f32,
}

impl Default for MarkerTuning {
    fn default() -> Self {
        Self {
            interval_min: default_marker_interval_min(),
            default_anchor_minute: default_anchor_minute(),
            emphasis_min: default_emphasis_min(),
            emphasis_max: default_emphasis_max(),
        }
    }
}

/// Complete tuning profile, stored as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuningConfig {
    #[serde(default)]
    pub reorder: ReorderTuning,
    #[serde(default)]
    pub reschedule: RescheduleTuning,
    #[serde(default)]
    pub markers: MarkerTuning,
    #[serde(default)]
    pub snap: FixedSnapGrid,
}

impl TuningConfig {
    /// Load a tuning profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the tuning profile as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn default_long_press_ms() -> u64 {
    500
}
fn default_press_cancel_px() -> f32 {
    10.0
}
fn default_row_height_px() -> f32 {
    56.0
}
fn default_hysteresis_ratio() -> f32 {
    0.6
}
fn default_drop_bounce_ms() -> u64 {
    300
}
fn default_touch_hold_ms() -> u64 {
    180
}
fn default_touch_cancel_px() -> f32 {
    8.0
}
fn default_light_haptic_min_interval_ms() -> u64 {
    45
}
fn default_clamp_padding_px() -> f32 {
    8.0
}
fn default_pin_threshold_px() -> f32 {
    0.5
}
fn default_direction_change_delay_ms() -> u64 {
    160
}
fn default_marker_interval_min() -> u16 {
    180
}
fn default_anchor_minute() -> u16 {
    360
}
fn default_emphasis_min() -> f32 {
    0.2
}
fn default_emphasis_max() -> f32 {
    1.0
}
