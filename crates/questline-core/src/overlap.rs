//! Schedule conflict detection and lane assignment.
//!
//! The row composer and the reschedule controller consume this through
//! the [`OverlapResolver`] seam: lane indices separate overlapping rows
//! visually, and overlap sets become conflict counts on drop. Lanes
//! never affect ordering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Horizontal pixel offset applied per lane index when rendering.
pub const LANE_OFFSET_PX: f32 = 8.0;

/// Visual lane slot for one task among time-overlapping neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneAssignment {
    /// Zero-based lane within the overlap cluster.
    pub lane_index: usize,
    /// Number of lanes the cluster needed.
    pub lane_count: usize,
    /// Number of tasks in the overlap cluster (1 = no overlap).
    pub overlap_count: usize,
}

impl LaneAssignment {
    /// A task with no overlapping neighbors.
    pub fn solo() -> Self {
        Self {
            lane_index: 0,
            lane_count: 1,
            overlap_count: 1,
        }
    }

    /// Horizontal rendering offset for this lane.
    pub fn offset_px(&self) -> f32 {
        self.lane_index as f32 * LANE_OFFSET_PX
    }
}

/// Conflict/overlap collaborator.
pub trait OverlapResolver {
    /// Lane assignment per scheduled task id.
    fn assign_lanes(&self, tasks: &[Task]) -> HashMap<String, LaneAssignment>;

    /// Ids of tasks overlapping `task_id`, optionally pretending that
    /// task starts at `override_minute` (a reschedule drag in flight).
    fn overlapping_ids(
        &self,
        tasks: &[Task],
        task_id: &str,
        override_minute: Option<u16>,
    ) -> Vec<String>;
}

#[derive(Debug, Clone, Copy)]
struct Interval<'a> {
    id: &'a str,
    start: i64,
    end: i64,
}

/// Default resolver: each task occupies `[minute, minute + duration)`
/// and overlap is plain interval intersection. Lanes are assigned
/// greedily in start order, lowest free lane first.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalOverlapResolver;

impl IntervalOverlapResolver {
    fn intervals<'a>(tasks: &'a [Task]) -> Vec<Interval<'a>> {
        let mut intervals: Vec<Interval<'a>> = tasks
            .iter()
            .filter_map(|t| {
                let start = t.scheduled_minute()? as i64;
                Some(Interval {
                    id: t.id.as_str(),
                    start,
                    end: start + t.effective_minutes().max(1),
                })
            })
            .collect();
        intervals.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(b.id)));
        intervals
    }
}

impl OverlapResolver for IntervalOverlapResolver {
    fn assign_lanes(&self, tasks: &[Task]) -> HashMap<String, LaneAssignment> {
        let intervals = Self::intervals(tasks);
        let mut out = HashMap::new();

        // Sweep transitive overlap clusters in start order.
        let mut idx = 0;
        while idx < intervals.len() {
            let mut cluster_end = intervals[idx].end;
            let mut end = idx + 1;
            while end < intervals.len() && intervals[end].start < cluster_end {
                cluster_end = cluster_end.max(intervals[end].end);
                end += 1;
            }

            let cluster = &intervals[idx..end];
            // lane_ends[i] = end minute of the last task placed on lane i.
            let mut lane_ends: Vec<i64> = Vec::new();
            let mut lanes: Vec<usize> = Vec::with_capacity(cluster.len());
            for item in cluster {
                let lane = lane_ends
                    .iter()
                    .position(|&lane_end| lane_end <= item.start)
                    .unwrap_or_else(|| {
                        lane_ends.push(0);
                        lane_ends.len() - 1
                    });
                lane_ends[lane] = item.end;
                lanes.push(lane);
            }

            let lane_count = lane_ends.len();
            for (item, lane) in cluster.iter().zip(lanes) {
                out.insert(
                    item.id.to_string(),
                    LaneAssignment {
                        lane_index: lane,
                        lane_count,
                        overlap_count: cluster.len(),
                    },
                );
            }
            idx = end;
        }
        out
    }

    fn overlapping_ids(
        &self,
        tasks: &[Task],
        task_id: &str,
        override_minute: Option<u16>,
    ) -> Vec<String> {
        let Some(target) = tasks.iter().find(|t| t.id == task_id) else {
            return Vec::new();
        };
        let start = match override_minute.map(i64::from).or_else(|| {
            target.scheduled_minute().map(i64::from)
        }) {
            Some(start) => start,
            None => return Vec::new(),
        };
        let end = start + target.effective_minutes().max(1);

        let mut ids: Vec<String> = tasks
            .iter()
            .filter(|t| t.id != task_id)
            .filter_map(|t| {
                let other_start = t.scheduled_minute()? as i64;
                let other_end = other_start + t.effective_minutes().max(1);
                (start < other_end && end > other_start).then(|| t.id.clone())
            })
            .collect();
        ids.sort();
        ids
    }
}
