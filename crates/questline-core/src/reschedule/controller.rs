//! Reschedule drag controller.
//!
//! Moves a *scheduled* row to a new time: the unit of change is a
//! continuous minute value snapped to the grid, not a list index. The
//! dragged row renders as a floating overlay positioned from a layout
//! snapshot captured at drag start, clamped inside the scrollable
//! pane; pushing past the clamp arms edge-hold acceleration.

use chrono::Utc;

use crate::config::RescheduleTuning;
use crate::events::Event;
use crate::input::{PointerPhase, PointerSample};
use crate::overlap::OverlapResolver;
use crate::services::{HapticSink, Impact, NoopHaptics, SnapGrid};
use crate::task::Task;
use crate::time::{clamp_snap_minute, format_hhmm};

use super::edge_hold::EdgeHold;

/// On-screen bounding box of the dragged row at drag start, used to
/// place the floating overlay outside normal layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSnapshot {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Vertical bounds of the scrollable pane the overlay is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneBounds {
    pub top: f32,
    pub bottom: f32,
    /// Top edge of a fixed navigation bar overlaying the pane bottom.
    pub nav_bar_top: Option<f32>,
}

impl PaneBounds {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self {
            top,
            bottom,
            nav_bar_top: None,
        }
    }

    pub fn with_nav_bar(mut self, nav_bar_top: f32) -> Self {
        self.nav_bar_top = Some(nav_bar_top);
        self
    }

    /// Lowest edge the overlay may reach: the nav bar wins when it
    /// sits above the pane bottom.
    pub fn effective_bottom(&self) -> f32 {
        match self.nav_bar_top {
            Some(nav) => nav.min(self.bottom),
            None => self.bottom,
        }
    }
}

#[derive(Debug)]
struct HoldState {
    task: Task,
    origin: PointerSample,
    fire_at_ms: u64,
}

/// Ephemeral per-drag state.
#[derive(Debug)]
pub struct RescheduleSession {
    task: Task,
    origin_minute: u16,
    origin_y: f32,
    clamped_offset_y: f32,
    snapshot: Option<RowSnapshot>,
    /// Accumulated edge-hold advance, in minutes.
    edge_minutes: i32,
    preview_minute: u16,
    last_light_ms: Option<u64>,
    edge_hold: EdgeHold,
}

impl RescheduleSession {
    pub fn task_id(&self) -> &str {
        &self.task.id
    }

    pub fn origin_minute(&self) -> u16 {
        self.origin_minute
    }
}

enum Phase {
    Idle,
    Holding(HoldState),
    Dragging(RescheduleSession),
}

/// Drag-to-reschedule state machine. Caller-driven like the reorder
/// engine: pointer samples through `press`/`start`/`update`, wall
/// clock through `tick`.
pub struct RescheduleController {
    tuning: RescheduleTuning,
    snap: Box<dyn SnapGrid>,
    haptics: Box<dyn HapticSink>,
    bounds: Option<PaneBounds>,
    phase: Phase,
    just_dropped: Option<(String, u64)>,
}

impl RescheduleController {
    pub fn new(tuning: RescheduleTuning, snap: impl SnapGrid + 'static) -> Self {
        Self {
            tuning,
            snap: Box::new(snap),
            haptics: Box::new(NoopHaptics),
            bounds: None,
            phase: Phase::Idle,
            just_dropped: None,
        }
    }

    pub fn with_haptics(mut self, haptics: impl HapticSink + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    /// Set (or refresh) the pane bounds the overlay clamps into.
    pub fn set_pane_bounds(&mut self, bounds: PaneBounds) {
        self.bounds = Some(bounds);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn session(&self) -> Option<&RescheduleSession> {
        match &self.phase {
            Phase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Snapped preview minute of the in-flight drag.
    pub fn preview_minute(&self) -> Option<u16> {
        self.session().map(|s| s.preview_minute)
    }

    /// Snapped preview as `HH:MM` for the host's floating label.
    pub fn preview_time(&self) -> Option<String> {
        self.preview_minute().map(format_hhmm)
    }

    /// Overlay rectangle: the captured snapshot shifted by the clamped
    /// drag offset. `None` until a snapshot is provided, in which case
    /// the drag degrades to the in-place row transform.
    pub fn overlay_rect(&self) -> Option<RowSnapshot> {
        let session = self.session()?;
        let snapshot = session.snapshot?;
        Some(RowSnapshot {
            top: snapshot.top + session.clamped_offset_y,
            ..snapshot
        })
    }

    /// True while dragging without a captured snapshot; the host should
    /// attempt capture on its next frame and call `provide_snapshot`.
    pub fn needs_snapshot(&self) -> bool {
        self.session().is_some_and(|s| s.snapshot.is_none())
    }

    pub fn just_dropped_id(&self) -> Option<&str> {
        self.just_dropped.as_ref().map(|(id, _)| id.as_str())
    }

    /// True while any deadline (hold, edge-hold, drop bounce) is armed.
    pub fn has_armed_deadline(&self) -> bool {
        let phase_armed = match &self.phase {
            Phase::Holding(_) => true,
            Phase::Dragging(session) => session.edge_hold.is_armed(),
            Phase::Idle => false,
        };
        phase_armed || self.just_dropped.is_some()
    }

    /// Ids of tasks that would conflict with the current preview slot.
    pub fn live_conflicts(&self, tasks: &[Task], resolver: &dyn OverlapResolver) -> Vec<String> {
        let Some(session) = self.session() else {
            return Vec::new();
        };
        resolver.overlapping_ids(tasks, &session.task.id, Some(session.preview_minute))
    }

    // ── Gesture input ────────────────────────────────────────────────

    /// Touch path: arm the hold gate; the drag activates from `tick`
    /// after the hold delay unless a scroll-sized move cancels it.
    pub fn press(&mut self, task: &Task, sample: PointerSample) {
        if !matches!(self.phase, Phase::Idle) || task.scheduled_minute().is_none() {
            return;
        }
        self.phase = Phase::Holding(HoldState {
            task: task.clone(),
            origin: sample,
            fire_at_ms: sample.at_ms.saturating_add(self.tuning.touch_hold_ms),
        });
    }

    /// Mouse path: activate immediately, no hold gate.
    pub fn start(&mut self, task: &Task, sample: PointerSample) -> Option<Event> {
        if !matches!(self.phase, Phase::Idle) {
            return None;
        }
        let origin_minute = task.scheduled_minute()?;
        self.activate(task.clone(), origin_minute, sample.y)
    }

    /// Supply the row's layout snapshot. Capture may be deferred past
    /// drag start; a snapshot arriving mid-drag attaches retroactively.
    pub fn provide_snapshot(&mut self, snapshot: RowSnapshot) {
        if let Phase::Dragging(session) = &mut self.phase {
            session.snapshot = Some(snapshot);
        }
    }

    /// Feed a move/end-ish sample. `End` must go through [`Self::release`]
    /// so the commit can see the task set; an `End` arriving here only
    /// tears the hold gate down.
    pub fn update(&mut self, sample: PointerSample) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(event) = self.maybe_fire_hold(sample.at_ms) {
            events.push(event);
        }

        match sample.phase {
            PointerPhase::Start => {}
            PointerPhase::Move => self.handle_move(sample),
            PointerPhase::End => {
                if matches!(self.phase, Phase::Holding(_)) {
                    self.phase = Phase::Idle;
                }
            }
            PointerPhase::Cancel => {
                if let Some(event) = self.cancel() {
                    events.push(event);
                }
            }
        }
        events
    }

    /// Finish the drag and commit the previewed slot. A preview equal
    /// to the original time commits nothing.
    pub fn release(
        &mut self,
        sample: PointerSample,
        tasks: &[Task],
        resolver: &dyn OverlapResolver,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(mut session) => {
                session.edge_hold.stop();
                self.just_dropped = Some((
                    session.task.id.clone(),
                    sample.at_ms.saturating_add(self.tuning.drop_bounce_ms),
                ));
                if session.preview_minute != session.origin_minute {
                    let conflicts = resolver.overlapping_ids(
                        tasks,
                        &session.task.id,
                        Some(session.preview_minute),
                    );
                    self.haptics.impact(Impact::Medium);
                    events.push(Event::TaskRescheduled {
                        task_id: session.task.id,
                        new_time: format_hhmm(session.preview_minute),
                        conflict_count: conflicts.len(),
                        at: Utc::now(),
                    });
                }
            }
            Phase::Holding(_) | Phase::Idle => {}
        }
        events
    }

    /// Call periodically: fires the hold gate, advances edge-hold
    /// acceleration and clears expired drop feedback.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if let Some((_, until)) = &self.just_dropped {
            if now_ms >= *until {
                self.just_dropped = None;
            }
        }
        if let Phase::Dragging(session) = &mut self.phase {
            let steps = session.edge_hold.poll(now_ms);
            if steps != 0 {
                session.edge_minutes += steps * self.snap.step_minutes() as i32;
                Self::refresh_preview(
                    session,
                    self.snap.as_ref(),
                    self.haptics.as_mut(),
                    &self.tuning,
                    now_ms,
                );
            }
        }
        self.maybe_fire_hold(now_ms)
    }

    /// Discard the in-flight gesture; every deadline dies with it.
    pub fn cancel(&mut self) -> Option<Event> {
        self.just_dropped = None;
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(mut session) => {
                session.edge_hold.stop();
                Some(Event::DragCancelled {
                    task_id: session.task.id,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn activate(&mut self, task: Task, origin_minute: u16, origin_y: f32) -> Option<Event> {
        let task_id = task.id.clone();
        self.haptics.impact(Impact::Medium);
        self.phase = Phase::Dragging(RescheduleSession {
            task,
            origin_minute,
            origin_y,
            clamped_offset_y: 0.0,
            snapshot: None,
            edge_minutes: 0,
            preview_minute: origin_minute,
            last_light_ms: None,
            edge_hold: EdgeHold::new(
                self.tuning.pin_threshold_px,
                self.tuning.direction_change_delay_ms,
            ),
        });
        Some(Event::DragStarted {
            task_id,
            at: Utc::now(),
        })
    }

    fn maybe_fire_hold(&mut self, now_ms: u64) -> Option<Event> {
        let fire = matches!(&self.phase, Phase::Holding(hold) if now_ms >= hold.fire_at_ms);
        if !fire {
            return None;
        }
        let Phase::Holding(hold) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            unreachable!();
        };
        let origin_minute = hold.task.scheduled_minute()?;
        self.activate(hold.task, origin_minute, hold.origin.y)
    }

    fn handle_move(&mut self, sample: PointerSample) {
        match &mut self.phase {
            Phase::Holding(hold) => {
                // A scroll-sized move before the hold fires means the
                // user is scrolling the pane.
                if sample.distance_to(&hold.origin) > self.tuning.touch_cancel_px {
                    self.phase = Phase::Idle;
                }
            }
            Phase::Dragging(session) => {
                let requested = sample.y - session.origin_y;
                let clamped = Self::clamp_offset(
                    requested,
                    session.snapshot.as_ref(),
                    self.bounds.as_ref(),
                    self.tuning.clamp_padding_px,
                );
                session.clamped_offset_y = clamped;
                session.edge_hold.update(requested - clamped, sample.at_ms);
                Self::refresh_preview(
                    session,
                    self.snap.as_ref(),
                    self.haptics.as_mut(),
                    &self.tuning,
                    sample.at_ms,
                );
            }
            Phase::Idle => {}
        }
    }

    fn clamp_offset(
        requested: f32,
        snapshot: Option<&RowSnapshot>,
        bounds: Option<&PaneBounds>,
        padding: f32,
    ) -> f32 {
        let (Some(snapshot), Some(bounds)) = (snapshot, bounds) else {
            // Without a snapshot or bounds there is nothing to clamp
            // against; the overlay is not rendered in that case anyway.
            return requested;
        };
        let min = bounds.top + padding - snapshot.top;
        let max = bounds.effective_bottom() - padding - (snapshot.top + snapshot.height);
        if min > max {
            return 0.0;
        }
        requested.clamp(min, max)
    }

    fn refresh_preview(
        session: &mut RescheduleSession,
        snap: &dyn SnapGrid,
        haptics: &mut dyn HapticSink,
        tuning: &RescheduleTuning,
        now_ms: u64,
    ) {
        let snapped = snap.preview_minute(session.origin_minute, session.clamped_offset_y);
        let preview = clamp_snap_minute(snapped as i32 + session.edge_minutes);
        if preview == session.preview_minute {
            return;
        }
        session.preview_minute = preview;
        // Light tap on every snap change, rate-limited so fast drags
        // do not buzz continuously.
        let due = session
            .last_light_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= tuning.light_haptic_min_interval_ms);
        if due {
            haptics.impact(Impact::Light);
            session.last_light_ms = Some(now_ms);
        }
    }
}
