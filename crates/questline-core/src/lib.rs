//! # Questline Core Library
//!
//! This library provides the interactive daily-timeline engine for the
//! Questline quest tracker. It implements a CLI-first philosophy where
//! all operations are exercisable via a standalone CLI binary, with any
//! GUI shell being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Section Classifier**: pure time-of-day bucketing and stable
//!   per-section ordering of the day's tasks
//! - **Drag-Reorder Engine**: a caller-driven gesture state machine
//!   turning pointer samples into single-step list reorders
//! - **Timeline Composer**: a pure `(tasks, now)` -> rows function that
//!   mixes scheduled tasks with synthetic marker rows
//! - **Reschedule Controller**: continuous time dragging with grid
//!   snapping, pane clamping and edge-hold acceleration
//!
//! All engines are wall-clock based: the host feeds pointer samples and
//! periodically invokes `tick()`; nothing here spawns threads or timers.
//!
//! ## Key Components
//!
//! - [`DragReorderEngine`]: long-press drag-to-reorder state machine
//! - [`RescheduleController`]: drag-to-reschedule state machine
//! - [`build_timeline_rows`]: timeline row composition
//! - [`SectionedTasks`]: time-of-day grouping
//! - [`TuningConfig`]: TOML-backed gesture tuning

pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod overlap;
pub mod reorder;
pub mod reschedule;
pub mod section;
pub mod services;
pub mod task;
pub mod time;
pub mod timeline;

pub use config::{MarkerTuning, ReorderTuning, RescheduleTuning, TuningConfig};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use input::{PointerPhase, PointerSample};
pub use overlap::{IntervalOverlapResolver, LaneAssignment, OverlapResolver};
pub use reorder::{DragPhase, DragReorderEngine, DragSession, SectionBoard};
pub use reschedule::{
    EdgeHoldTier, PaneBounds, RescheduleController, RescheduleSession, RowSnapshot,
};
pub use section::{section_cmp, SectionedTasks, TimeSection};
pub use services::{
    AutoscrollSink, FixedSnapGrid, HapticSink, Impact, NoopAutoscroll, NoopHaptics, SnapGrid,
};
pub use task::{validate_working_set, Task};
pub use timeline::{build_timeline_rows, day_window, MarkerKind, MinuteTicker, TimelineRow};
