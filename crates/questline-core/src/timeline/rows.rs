//! Timeline row composition.
//!
//! Rows are never stored: [`build_timeline_rows`] recomputes the whole
//! sequence from `(tasks, now)` on every call, so there is no cache to
//! invalidate. The host re-renders from the returned rows and polls
//! [`MinuteTicker`] to know when the now-marker moved.

use serde::{Deserialize, Serialize};

use crate::config::MarkerTuning;
use crate::overlap::{LaneAssignment, OverlapResolver};
use crate::section::section_cmp;
use crate::task::Task;
use crate::time::clamp_minute;

use super::marker::{emphasis_map, placeholder_minutes};

/// What a synthetic marker row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Interval-aligned time placeholder.
    Placeholder,
    /// The live current-time indicator.
    Now,
}

/// One row of the composed timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "lowercase")]
pub enum TimelineRow {
    Marker {
        minute: u16,
        kind: MarkerKind,
        /// Visual weight in the configured emphasis range.
        emphasis: f32,
    },
    Task {
        task: Task,
        /// Lane assignment for scheduled rows; `None` renders at the
        /// default horizontal position (offset 0).
        lane: Option<LaneAssignment>,
    },
}

impl TimelineRow {
    fn sort_key(&self) -> (u16, u8) {
        // Markers sort before tasks at the same minute, placeholders
        // before the now-marker.
        match self {
            TimelineRow::Marker {
                minute,
                kind: MarkerKind::Placeholder,
                ..
            } => (*minute, 0),
            TimelineRow::Marker {
                minute,
                kind: MarkerKind::Now,
                ..
            } => (*minute, 1),
            TimelineRow::Task { task, .. } => (task.scheduled_minute().unwrap_or(u16::MAX), 2),
        }
    }
}

/// Compose the day's row sequence from tasks and the current minute.
///
/// Pass `now = Some(minute)` when composing today; the now-marker and
/// the emphasis interpolation both key off it. Pure and deterministic.
pub fn build_timeline_rows(
    tasks: &[Task],
    now: Option<u16>,
    tuning: &MarkerTuning,
    resolver: &dyn OverlapResolver,
) -> Vec<TimelineRow> {
    let now = now.map(clamp_minute);
    let mut scheduled: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.scheduled_minute().is_some())
        .collect();
    scheduled.sort_by(|a, b| section_cmp(a, b));
    let mut unscheduled: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.scheduled_minute().is_none())
        .collect();
    unscheduled.sort_by(|a, b| section_cmp(a, b));

    let minutes: Vec<u16> = scheduled.iter().filter_map(|t| t.scheduled_minute()).collect();
    let placeholders = placeholder_minutes(&minutes, now, tuning);
    let emphasis = emphasis_map(&placeholders, now, tuning);

    let lanes = resolver.assign_lanes(tasks);

    let mut rows: Vec<TimelineRow> = Vec::with_capacity(placeholders.len() + tasks.len() + 1);
    for minute in placeholders {
        rows.push(TimelineRow::Marker {
            minute,
            kind: MarkerKind::Placeholder,
            emphasis: emphasis.get(&minute).copied().unwrap_or(tuning.emphasis_min),
        });
    }
    if let Some(now) = now {
        rows.push(TimelineRow::Marker {
            minute: now,
            kind: MarkerKind::Now,
            emphasis: tuning.emphasis_max,
        });
    }
    for task in &scheduled {
        rows.push(TimelineRow::Task {
            task: (*task).clone(),
            lane: lanes.get(&task.id).copied(),
        });
    }

    // Scheduled content interleaves by minute; a stable sort keeps the
    // section comparator's order between same-minute tasks.
    rows.sort_by_key(TimelineRow::sort_key);

    // Unscheduled tasks trail the timeline, never interleaved.
    for task in &unscheduled {
        rows.push(TimelineRow::Task {
            task: (*task).clone(),
            lane: None,
        });
    }
    rows
}

/// Visible hour window for the day column: the scheduled span padded by
/// an hour each side, never narrower than the 06:00..22:00 default.
pub fn day_window(tasks: &[Task]) -> (u16, u16) {
    const DEFAULT: (u16, u16) = (6, 22);
    let hours: Vec<u16> = tasks
        .iter()
        .filter_map(|t| t.scheduled_minute())
        .map(|m| m / 60)
        .collect();
    let Some((&min, &max)) = hours.iter().min().zip(hours.iter().max()) else {
        return DEFAULT;
    };
    (
        DEFAULT.0.min(min.saturating_sub(1)),
        DEFAULT.1.max((max + 1).min(23)),
    )
}

/// Detects minute rollovers for the periodic now-marker refresh.
///
/// The host polls this from its coarse tick (once a second is plenty);
/// a `true` return means the timeline should be recomposed.
#[derive(Debug, Default)]
pub struct MinuteTicker {
    last: Option<u16>,
}

impl MinuteTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `minute` differs from the last observed one.
    pub fn poll(&mut self, minute: u16) -> bool {
        let minute = clamp_minute(minute);
        let changed = self.last != Some(minute);
        self.last = Some(minute);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::IntervalOverlapResolver;

    fn tuning() -> MarkerTuning {
        MarkerTuning::default()
    }

    fn task(id: &str, time: &str) -> Task {
        Task::new(id, id).with_time(time)
    }

    fn compose(tasks: &[Task], now: Option<u16>) -> Vec<TimelineRow> {
        build_timeline_rows(tasks, now, &tuning(), &IntervalOverlapResolver)
    }

    fn minutes_of_markers(rows: &[TimelineRow], kind: MarkerKind) -> Vec<u16> {
        rows.iter()
            .filter_map(|r| match r {
                TimelineRow::Marker { minute, kind: k, .. } if *k == kind => Some(*minute),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rows_sort_by_minute_with_markers_first() {
        let rows = compose(&[task("a", "09:00"), task("b", "15:00")], None);
        let mut last_key = (0, 0);
        for row in &rows {
            let key = row.sort_key();
            assert!(key >= last_key, "rows out of order at {:?}", row);
            last_key = key;
        }
        // The 09:00 placeholder precedes the 09:00 task.
        let at_540: Vec<_> = rows
            .iter()
            .filter(|r| r.sort_key().0 == 540)
            .collect();
        assert!(matches!(at_540[0], TimelineRow::Marker { .. }));
        assert!(matches!(at_540[1], TimelineRow::Task { .. }));
    }

    #[test]
    fn midpoint_placeholder_between_nine_and_three() {
        let rows = compose(&[task("a", "09:00"), task("b", "15:00")], None);
        let placeholders = minutes_of_markers(&rows, MarkerKind::Placeholder);
        let in_gap: Vec<_> = placeholders.iter().filter(|&&m| m > 540 && m < 900).collect();
        assert_eq!(in_gap, vec![&720]);
    }

    #[test]
    fn now_marker_suppresses_gap_placeholders() {
        let rows = compose(&[task("a", "09:00"), task("b", "10:00")], Some(570));
        let placeholders = minutes_of_markers(&rows, MarkerKind::Placeholder);
        assert!(placeholders.iter().all(|&m| m <= 540 || m >= 600));
        assert_eq!(minutes_of_markers(&rows, MarkerKind::Now), vec![570]);
    }

    #[test]
    fn now_marker_is_clamped_and_unique() {
        let rows = compose(&[task("a", "09:00")], Some(5000));
        assert_eq!(minutes_of_markers(&rows, MarkerKind::Now), vec![1439]);
    }

    #[test]
    fn unscheduled_tasks_trail_everything() {
        let rows = compose(
            &[
                Task::new("u1", "someday"),
                task("a", "21:00"),
                Task::new("u2", "whenever"),
            ],
            None,
        );
        let trailing: Vec<_> = rows
            .iter()
            .rev()
            .take(2)
            .filter_map(|r| match r {
                TimelineRow::Task { task, .. } => Some(task.id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(trailing, vec!["u2", "u1"]);
    }

    #[test]
    fn overlapping_tasks_carry_lane_assignments() {
        let tasks = vec![
            task("a", "09:00").with_duration(60),
            task("b", "09:30").with_duration(60),
        ];
        let rows = compose(&tasks, None);
        let lanes: Vec<_> = rows
            .iter()
            .filter_map(|r| match r {
                TimelineRow::Task { task, lane } => Some((task.id.as_str(), lane.unwrap())),
                _ => None,
            })
            .collect();
        assert_eq!(lanes[0].1.lane_index, 0);
        assert_eq!(lanes[1].1.lane_index, 1);
        assert_eq!(lanes[1].1.offset_px(), 8.0);
    }

    #[test]
    fn composition_is_pure() {
        let tasks = vec![task("a", "09:00"), task("b", "15:00"), Task::new("u", "later")];
        let first = compose(&tasks, Some(640));
        let second = compose(&tasks, Some(640));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_day_still_has_structure() {
        let rows = compose(&[], Some(700));
        assert!(!minutes_of_markers(&rows, MarkerKind::Placeholder).is_empty());
        assert_eq!(minutes_of_markers(&rows, MarkerKind::Now), vec![700]);
    }

    #[test]
    fn day_window_defaults_and_pads() {
        assert_eq!(day_window(&[]), (6, 22));
        assert_eq!(day_window(&[task("a", "09:00")]), (6, 22));
        assert_eq!(day_window(&[task("a", "04:30")]), (3, 22));
        assert_eq!(day_window(&[task("a", "23:10")]), (6, 23));
    }

    #[test]
    fn minute_ticker_fires_once_per_minute() {
        let mut ticker = MinuteTicker::new();
        assert!(ticker.poll(570));
        assert!(!ticker.poll(570));
        assert!(ticker.poll(571));
        assert!(!ticker.poll(571));
    }
}
