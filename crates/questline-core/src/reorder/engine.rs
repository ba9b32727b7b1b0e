//! Drag-reorder gesture state machine.
//!
//! The engine is caller-driven, in the same style as a wall-clock
//! timer: the host adapts each physical input source into
//! [`PointerSample`]s, feeds them through [`DragReorderEngine::press`]
//! and [`DragReorderEngine::update`], and calls
//! [`DragReorderEngine::tick`] periodically so armed deadlines
//! (long-press, drop bounce) can fire. No internal threads or timers.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Pressed (long-press armed) -> Dragging -> Idle
//! ```
//!
//! A move beyond a small threshold while `Pressed` cancels the press
//! silently (the gesture was a scroll). Once `Dragging`, every move
//! sample commits at most ONE adjacent swap, gated by a hysteresis
//! threshold of 60% of a row height, and then re-anchors the delta
//! origin at the current pointer position. The visual offset is the
//! raw pointer delta and is independent of the discrete swap state.

use chrono::Utc;

use crate::config::ReorderTuning;
use crate::events::Event;
use crate::input::{PointerPhase, PointerSample};
use crate::services::{AutoscrollSink, HapticSink, Impact, NoopAutoscroll, NoopHaptics};

/// Which state the engine currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
}

#[derive(Debug)]
struct PressState {
    task_id: String,
    order: Vec<String>,
    origin: PointerSample,
    fire_at_ms: u64,
}

/// Ephemeral per-gesture state. Created on long-press activation,
/// destroyed on release or cancel; never persisted.
#[derive(Debug)]
pub struct DragSession {
    task_id: String,
    origin_index: usize,
    current_index: usize,
    origin_y: f32,
    pointer_y: f32,
    /// Reference position the next swap's delta is measured from.
    anchor_y: f32,
    original: Vec<String>,
    working: Vec<String>,
}

impl DragSession {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The in-flight order, dragged item included at its current index.
    pub fn working_order(&self) -> &[String] {
        &self.working
    }
}

enum Phase {
    Idle,
    Pressed(PressState),
    Dragging(DragSession),
}

/// Generic, list-agnostic drag-reorder engine over a list of item ids.
pub struct DragReorderEngine {
    tuning: ReorderTuning,
    disabled: bool,
    phase: Phase,
    haptics: Box<dyn HapticSink>,
    autoscroll: Box<dyn AutoscrollSink>,
    /// Dropped row id and the deadline its bounce feedback clears at.
    just_dropped: Option<(String, u64)>,
}

impl DragReorderEngine {
    pub fn new(tuning: ReorderTuning) -> Self {
        Self {
            tuning,
            disabled: false,
            phase: Phase::Idle,
            haptics: Box::new(NoopHaptics),
            autoscroll: Box::new(NoopAutoscroll),
            just_dropped: None,
        }
    }

    pub fn with_haptics(mut self, haptics: impl HapticSink + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    pub fn with_autoscroll(mut self, autoscroll: impl AutoscrollSink + 'static) -> Self {
        self.autoscroll = Box::new(autoscroll);
        self
    }

    /// Disable the whole state machine; presses are ignored.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> DragPhase {
        match self.phase {
            Phase::Idle => DragPhase::Idle,
            Phase::Pressed(_) => DragPhase::Pressed,
            Phase::Dragging(_) => DragPhase::Dragging,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Raw pointer delta since drag start. Rendering feedback only:
    /// recomputed from the live pointer, not from the swap state.
    pub fn visual_offset_y(&self) -> f32 {
        match &self.phase {
            Phase::Dragging(session) => session.pointer_y - session.origin_y,
            _ => 0.0,
        }
    }

    /// Row id currently playing its drop-bounce feedback.
    pub fn just_dropped_id(&self) -> Option<&str> {
        self.just_dropped.as_ref().map(|(id, _)| id.as_str())
    }

    /// True while any deadline (long-press, drop bounce) is armed.
    /// Teardown must leave this false.
    pub fn has_armed_deadline(&self) -> bool {
        matches!(self.phase, Phase::Pressed(_)) || self.just_dropped.is_some()
    }

    // ── Gesture input ────────────────────────────────────────────────

    /// Begin a press on `task_id` within the given list order.
    ///
    /// Bypassed entirely when the engine is disabled or the list has
    /// fewer than two items: those lists have no drag affordance.
    pub fn press(&mut self, task_id: &str, order: &[String], sample: PointerSample) {
        if self.disabled || order.len() < 2 {
            return;
        }
        if !matches!(self.phase, Phase::Idle) {
            return;
        }
        if !order.iter().any(|id| id == task_id) {
            return;
        }
        self.phase = Phase::Pressed(PressState {
            task_id: task_id.to_string(),
            order: order.to_vec(),
            origin: sample,
            fire_at_ms: sample.at_ms.saturating_add(self.tuning.long_press_ms),
        });
    }

    /// Feed a move/end/cancel sample. Returns the events it produced,
    /// in order.
    pub fn update(&mut self, sample: PointerSample) -> Vec<Event> {
        let mut events = Vec::new();
        // A move sample arriving after the long-press deadline promotes
        // the press first, then drags.
        if let Some(event) = self.maybe_fire_long_press(sample.at_ms) {
            events.push(event);
        }

        match sample.phase {
            PointerPhase::Start => {} // presses go through press()
            PointerPhase::Move => self.handle_move(sample, &mut events),
            PointerPhase::End => self.handle_end(sample, &mut events),
            PointerPhase::Cancel => {
                if let Some(event) = self.cancel() {
                    events.push(event);
                }
            }
        }
        events
    }

    /// Call periodically. Fires the long-press deadline and clears
    /// expired drop-bounce feedback.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if let Some((_, until)) = &self.just_dropped {
            if now_ms >= *until {
                self.just_dropped = None;
            }
        }
        self.maybe_fire_long_press(now_ms)
    }

    /// Discard any in-flight gesture. Every armed deadline dies with
    /// the session; nothing is committed.
    pub fn cancel(&mut self) -> Option<Event> {
        self.just_dropped = None;
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(session) => {
                self.autoscroll.stop();
                Some(Event::DragCancelled {
                    task_id: session.task_id,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn maybe_fire_long_press(&mut self, now_ms: u64) -> Option<Event> {
        let fire = matches!(&self.phase, Phase::Pressed(press) if now_ms >= press.fire_at_ms);
        if !fire {
            return None;
        }
        let Phase::Pressed(press) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            unreachable!();
        };
        let origin_index = press
            .order
            .iter()
            .position(|id| *id == press.task_id)
            .unwrap_or(0);
        self.haptics.impact(Impact::Medium);
        let task_id = press.task_id.clone();
        self.phase = Phase::Dragging(DragSession {
            task_id: press.task_id,
            origin_index,
            current_index: origin_index,
            origin_y: press.origin.y,
            pointer_y: press.origin.y,
            anchor_y: press.origin.y,
            original: press.order.clone(),
            working: press.order,
        });
        Some(Event::DragStarted {
            task_id,
            at: Utc::now(),
        })
    }

    fn handle_move(&mut self, sample: PointerSample, events: &mut Vec<Event>) {
        match &mut self.phase {
            Phase::Pressed(press) => {
                // Moving early means the user is scrolling, not dragging.
                if sample.distance_to(&press.origin) > self.tuning.press_cancel_px {
                    self.phase = Phase::Idle;
                }
            }
            Phase::Dragging(session) => {
                session.pointer_y = sample.y;
                self.autoscroll.report_pointer_y(sample.y);

                let threshold = self.tuning.hysteresis_px();
                let delta = sample.y - session.anchor_y;
                if delta.abs() < threshold {
                    return;
                }

                // Exactly one adjacent step per sample, however far the
                // pointer travelled, then re-anchor.
                let step: isize = if delta > 0.0 { 1 } else { -1 };
                let from = session.current_index;
                let to = from
                    .saturating_add_signed(step)
                    .min(session.working.len() - 1);
                if to != from {
                    let id = session.working.remove(from);
                    session.working.insert(to, id);
                    session.current_index = to;
                    session.anchor_y = sample.y;
                    self.haptics.impact(Impact::Light);
                    events.push(Event::RowSwapped {
                        task_id: session.task_id.clone(),
                        from_index: from,
                        to_index: to,
                        at: Utc::now(),
                    });
                } else {
                    // Clamped at a list boundary: re-anchor anyway so a
                    // reversal still travels one full hysteresis
                    // distance instead of the whole accumulated delta.
                    session.anchor_y = sample.y;
                }
            }
            Phase::Idle => {}
        }
    }

    fn handle_end(&mut self, sample: PointerSample, events: &mut Vec<Event>) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(session) => {
                self.autoscroll.stop();
                let changed = session.working != session.original;
                if changed {
                    self.haptics.impact(Impact::Medium);
                }
                self.just_dropped = Some((
                    session.task_id.clone(),
                    sample.at_ms.saturating_add(self.tuning.drop_bounce_ms),
                ));
                // The commit is idempotent: a drag that never crossed
                // the threshold reports the input order unchanged.
                events.push(Event::ReorderCommitted {
                    ordered_ids: session.working,
                    changed,
                    at: Utc::now(),
                });
            }
            // Released before the long press fired: a plain tap.
            Phase::Pressed(_) | Phase::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::services::{RecordingAutoscroll, RecordingHaptics};

    const ROW: f32 = 56.0;
    const THRESHOLD: f32 = ROW * 0.6;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample(y: f32, phase: PointerPhase, at_ms: u64) -> PointerSample {
        PointerSample::new(0.0, y, phase, at_ms)
    }

    fn dragging_engine(order: &[&str]) -> DragReorderEngine {
        let mut engine = DragReorderEngine::new(ReorderTuning::default());
        engine.press("b", &ids(order), sample(100.0, PointerPhase::Start, 0));
        let fired = engine.tick(500);
        assert!(matches!(fired, Some(Event::DragStarted { .. })));
        engine
    }

    #[test]
    fn long_press_promotes_to_dragging() {
        let mut engine = DragReorderEngine::new(ReorderTuning::default());
        engine.press("a", &ids(&["a", "b"]), sample(10.0, PointerPhase::Start, 0));
        assert_eq!(engine.phase(), DragPhase::Pressed);

        assert!(engine.tick(499).is_none());
        assert!(engine.tick(500).is_some());
        assert_eq!(engine.phase(), DragPhase::Dragging);
    }

    #[test]
    fn early_move_cancels_press_silently() {
        let mut engine = DragReorderEngine::new(ReorderTuning::default());
        engine.press("a", &ids(&["a", "b"]), sample(10.0, PointerPhase::Start, 0));
        let events = engine.update(sample(30.0, PointerPhase::Move, 100));
        assert!(events.is_empty());
        assert_eq!(engine.phase(), DragPhase::Idle);
        // The long-press deadline died with the press.
        assert!(engine.tick(600).is_none());
    }

    #[test]
    fn jitter_below_cancel_threshold_keeps_press() {
        let mut engine = DragReorderEngine::new(ReorderTuning::default());
        engine.press("a", &ids(&["a", "b"]), sample(10.0, PointerPhase::Start, 0));
        engine.update(sample(15.0, PointerPhase::Move, 100));
        assert_eq!(engine.phase(), DragPhase::Pressed);
    }

    #[test]
    fn single_step_even_for_huge_delta() {
        let mut engine = dragging_engine(&["a", "b", "c", "d", "e"]);
        // One sample jumps four row heights; only one swap commits.
        let events = engine.update(sample(100.0 + ROW * 4.0, PointerPhase::Move, 600));
        let swaps = events
            .iter()
            .filter(|e| matches!(e, Event::RowSwapped { .. }))
            .count();
        assert_eq!(swaps, 1);
        assert_eq!(
            engine.session().unwrap().working_order(),
            ids(&["a", "c", "b", "d", "e"])
        );
    }

    #[test]
    fn swap_requires_hysteresis_distance() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        let events = engine.update(sample(100.0 + THRESHOLD - 1.0, PointerPhase::Move, 600));
        assert!(events.is_empty());
        let events = engine.update(sample(100.0 + THRESHOLD, PointerPhase::Move, 620));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn reanchor_means_successive_swaps_need_full_threshold_each() {
        let mut engine = dragging_engine(&["a", "b", "c", "d"]);
        engine.update(sample(100.0 + THRESHOLD, PointerPhase::Move, 600));
        assert_eq!(engine.session().unwrap().current_index(), 2);
        // Another half-threshold from the new anchor: no swap yet.
        let events = engine.update(sample(100.0 + THRESHOLD * 1.5, PointerPhase::Move, 620));
        assert!(events.is_empty());
        let events = engine.update(sample(100.0 + THRESHOLD * 2.0, PointerPhase::Move, 640));
        assert_eq!(events.len(), 1);
        assert_eq!(engine.session().unwrap().current_index(), 3);
    }

    #[test]
    fn direction_reversal_travels_threshold_from_new_anchor() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        engine.update(sample(100.0 + THRESHOLD, PointerPhase::Move, 600));
        assert_eq!(engine.session().unwrap().current_index(), 2);
        // Reverse: a full threshold from the re-anchored position.
        let y = 100.0 + THRESHOLD;
        let events = engine.update(sample(y - THRESHOLD + 1.0, PointerPhase::Move, 620));
        assert!(events.is_empty());
        let events = engine.update(sample(y - THRESHOLD, PointerPhase::Move, 640));
        assert_eq!(events.len(), 1);
        assert_eq!(engine.session().unwrap().current_index(), 1);
    }

    #[test]
    fn boundary_clamp_does_not_walk_the_anchor_away() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        // Drag b to the end, then keep pushing far past it.
        engine.update(sample(100.0 + THRESHOLD, PointerPhase::Move, 600));
        engine.update(sample(100.0 + ROW * 10.0, PointerPhase::Move, 620));
        assert_eq!(engine.session().unwrap().current_index(), 2);
        // One threshold back up should immediately swap again.
        let y = 100.0 + ROW * 10.0;
        let events = engine.update(sample(y - THRESHOLD, PointerPhase::Move, 640));
        assert_eq!(events.len(), 1);
        assert_eq!(engine.session().unwrap().current_index(), 1);
    }

    #[test]
    fn noop_commit_is_idempotent() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        engine.update(sample(105.0, PointerPhase::Move, 600));
        let events = engine.update(sample(105.0, PointerPhase::End, 700));
        match &events[0] {
            Event::ReorderCommitted {
                ordered_ids,
                changed,
                ..
            } => {
                assert_eq!(*ordered_ids, ids(&["a", "b", "c"]));
                assert!(!changed);
            }
            other => panic!("expected ReorderCommitted, got {:?}", other),
        }
        assert_eq!(engine.phase(), DragPhase::Idle);
    }

    #[test]
    fn commit_reports_final_working_order() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        engine.update(sample(100.0 + THRESHOLD, PointerPhase::Move, 600));
        let events = engine.update(sample(100.0 + THRESHOLD, PointerPhase::End, 700));
        match &events[0] {
            Event::ReorderCommitted {
                ordered_ids,
                changed,
                ..
            } => {
                assert_eq!(*ordered_ids, ids(&["a", "c", "b"]));
                assert!(changed);
            }
            other => panic!("expected ReorderCommitted, got {:?}", other),
        }
    }

    #[test]
    fn visual_offset_tracks_pointer_independent_of_swaps() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        engine.update(sample(112.5, PointerPhase::Move, 600));
        assert!((engine.visual_offset_y() - 12.5).abs() < f32::EPSILON);
        // Well past a swap; offset still follows the raw pointer.
        engine.update(sample(100.0 + ROW * 2.0, PointerPhase::Move, 620));
        assert!((engine.visual_offset_y() - ROW * 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn drop_bounce_clears_after_deadline() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        engine.update(sample(100.0, PointerPhase::End, 700));
        assert_eq!(engine.just_dropped_id(), Some("b"));
        engine.tick(999);
        assert_eq!(engine.just_dropped_id(), Some("b"));
        engine.tick(1000);
        assert_eq!(engine.just_dropped_id(), None);
    }

    #[test]
    fn cancel_discards_session_without_commit() {
        let mut engine = dragging_engine(&["a", "b", "c"]);
        engine.update(sample(100.0 + ROW, PointerPhase::Move, 600));
        let events = engine.update(sample(100.0 + ROW, PointerPhase::Cancel, 700));
        assert!(events
            .iter()
            .all(|e| !matches!(e, Event::ReorderCommitted { .. })));
        assert_eq!(engine.phase(), DragPhase::Idle);
        assert!(!engine.has_armed_deadline());
    }

    #[test]
    fn teardown_mid_press_leaves_no_deadlines() {
        let mut engine = DragReorderEngine::new(ReorderTuning::default());
        engine.press("a", &ids(&["a", "b"]), sample(10.0, PointerPhase::Start, 0));
        assert!(engine.has_armed_deadline());
        engine.cancel();
        assert!(!engine.has_armed_deadline());
        assert_eq!(engine.phase(), DragPhase::Idle);
    }

    #[test]
    fn disabled_and_short_lists_bypass_the_machine() {
        let mut engine = DragReorderEngine::new(ReorderTuning::default());
        engine.set_disabled(true);
        engine.press("a", &ids(&["a", "b"]), sample(0.0, PointerPhase::Start, 0));
        assert_eq!(engine.phase(), DragPhase::Idle);

        let mut engine = DragReorderEngine::new(ReorderTuning::default());
        engine.press("a", &ids(&["a"]), sample(0.0, PointerPhase::Start, 0));
        assert_eq!(engine.phase(), DragPhase::Idle);
    }

    #[test]
    fn autoscroll_sees_live_pointer_and_stop() {
        let autoscroll = Rc::new(RefCell::new(RecordingAutoscroll::default()));
        let mut engine = DragReorderEngine::new(ReorderTuning::default())
            .with_autoscroll(Rc::clone(&autoscroll));
        engine.press("a", &ids(&["a", "b"]), sample(100.0, PointerPhase::Start, 0));
        engine.tick(500);
        engine.update(sample(140.0, PointerPhase::Move, 600));
        engine.update(sample(180.0, PointerPhase::Move, 620));
        engine.update(sample(180.0, PointerPhase::End, 700));

        let recorded = autoscroll.borrow();
        assert_eq!(recorded.reported, vec![140.0, 180.0]);
        assert!(recorded.stopped);
    }

    #[test]
    fn haptics_fire_on_swap_and_changed_drop() {
        let haptics = Rc::new(RefCell::new(RecordingHaptics::default()));
        let mut engine =
            DragReorderEngine::new(ReorderTuning::default()).with_haptics(Rc::clone(&haptics));
        engine.press("a", &ids(&["a", "b"]), sample(100.0, PointerPhase::Start, 0));
        engine.tick(500);
        engine.update(sample(100.0 + THRESHOLD, PointerPhase::Move, 600));
        engine.update(sample(100.0 + THRESHOLD, PointerPhase::End, 700));

        let recorded = haptics.borrow();
        // Medium on drag start, light on the swap, medium on the drop.
        assert_eq!(
            recorded.impacts,
            vec![Impact::Medium, Impact::Light, Impact::Medium]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn at_most_one_swap_per_sample(
                deltas in proptest::collection::vec(-500.0f32..500.0, 1..30),
            ) {
                let mut engine = dragging_engine(&["a", "b", "c", "d", "e", "f"]);
                let mut y = 100.0f32;
                for (i, delta) in deltas.iter().enumerate() {
                    y += delta;
                    let before = engine.session().unwrap().current_index();
                    let events =
                        engine.update(sample(y, PointerPhase::Move, 600 + i as u64 * 16));
                    let after = engine.session().unwrap().current_index();
                    let swaps = events
                        .iter()
                        .filter(|e| matches!(e, Event::RowSwapped { .. }))
                        .count();
                    prop_assert!(swaps <= 1);
                    prop_assert!(before.abs_diff(after) <= 1);
                    // The dragged item never leaves the working copy.
                    prop_assert!(engine
                        .session()
                        .unwrap()
                        .working_order()
                        .iter()
                        .any(|id| id == "b"));
                }
            }
        }
    }
}
