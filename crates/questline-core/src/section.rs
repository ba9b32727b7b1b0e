//! Time-of-day section classification and grouping.
//!
//! Sections are derived from a task's scheduled time, never stored.
//! Grouping applies a three-level comparator within each section so
//! that ordering is reproducible regardless of input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::time::parse_hhmm;

/// Coarse time-of-day bucket for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSection {
    Morning,
    Afternoon,
    Evening,
    Unscheduled,
}

impl TimeSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Unscheduled => "unscheduled",
        }
    }

    /// Classify a scheduled time into a section.
    ///
    /// Total and pure: absent or unparsable times are `Unscheduled`.
    pub fn classify(scheduled_time: Option<&str>) -> Self {
        let Some(minute) = scheduled_time.and_then(parse_hhmm) else {
            return Self::Unscheduled;
        };
        match minute / 60 {
            0..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    /// Sections in canonical board order: unscheduled first, then the
    /// day in chronological order.
    pub const ORDER: [TimeSection; 4] = [
        TimeSection::Unscheduled,
        TimeSection::Morning,
        TimeSection::Afternoon,
        TimeSection::Evening,
    ];
}

/// Three-level comparator used within a section:
/// sort-order ascending (missing last), scheduled minute ascending
/// (present before absent), id as the final deterministic tiebreak.
pub fn section_cmp(a: &Task, b: &Task) -> Ordering {
    let order = |t: &Task| (t.sort_order.is_none(), t.sort_order);
    order(a)
        .cmp(&order(b))
        .then_with(|| {
            let minute = |t: &Task| (t.scheduled_minute().is_none(), t.scheduled_minute());
            minute(a).cmp(&minute(b))
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// A day's tasks grouped into sections, each sorted by [`section_cmp`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionedTasks {
    pub morning: Vec<Task>,
    pub afternoon: Vec<Task>,
    pub evening: Vec<Task>,
    pub unscheduled: Vec<Task>,
}

impl SectionedTasks {
    /// Group and sort tasks into sections.
    pub fn group(tasks: &[Task]) -> Self {
        let mut grouped = Self::default();
        for task in tasks {
            grouped
                .section_mut(TimeSection::classify(task.scheduled_time.as_deref()))
                .push(task.clone());
        }
        for section in TimeSection::ORDER {
            grouped.section_mut(section).sort_by(section_cmp);
        }
        grouped
    }

    pub fn section(&self, section: TimeSection) -> &[Task] {
        match section {
            TimeSection::Morning => &self.morning,
            TimeSection::Afternoon => &self.afternoon,
            TimeSection::Evening => &self.evening,
            TimeSection::Unscheduled => &self.unscheduled,
        }
    }

    fn section_mut(&mut self, section: TimeSection) -> &mut Vec<Task> {
        match section {
            TimeSection::Morning => &mut self.morning,
            TimeSection::Afternoon => &mut self.afternoon,
            TimeSection::Evening => &mut self.evening,
            TimeSection::Unscheduled => &mut self.unscheduled,
        }
    }

    /// Flatten sections back into one list in board order, replacing one
    /// section's contents with a reordered run. Used to report a full-list
    /// order to the host after a within-section reorder.
    pub fn flatten_with(&self, reordered_section: TimeSection, reordered: &[Task]) -> Vec<Task> {
        let mut all = Vec::new();
        for section in TimeSection::ORDER {
            if section == reordered_section {
                all.extend(reordered.iter().cloned());
            } else {
                all.extend(self.section(section).iter().cloned());
            }
        }
        all
    }

    /// Flatten sections into one list in board order.
    pub fn flatten(&self) -> Vec<Task> {
        let mut all = Vec::new();
        for section in TimeSection::ORDER {
            all.extend(self.section(section).iter().cloned());
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn task(id: &str, time: Option<&str>, order: Option<i32>) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            scheduled_time: time.map(Into::into),
            sort_order: order,
            estimated_minutes: None,
            completed: false,
            ritual: false,
        }
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(TimeSection::classify(Some("00:00")), TimeSection::Morning);
        assert_eq!(TimeSection::classify(Some("11:59")), TimeSection::Morning);
        assert_eq!(TimeSection::classify(Some("12:00")), TimeSection::Afternoon);
        assert_eq!(TimeSection::classify(Some("16:59")), TimeSection::Afternoon);
        assert_eq!(TimeSection::classify(Some("17:00")), TimeSection::Evening);
        assert_eq!(TimeSection::classify(Some("23:59")), TimeSection::Evening);
        assert_eq!(TimeSection::classify(None), TimeSection::Unscheduled);
        assert_eq!(TimeSection::classify(Some("25:00")), TimeSection::Unscheduled);
        assert_eq!(TimeSection::classify(Some("nope")), TimeSection::Unscheduled);
    }

    #[test]
    fn comparator_levels() {
        let a = task("a", Some("10:00"), Some(2));
        let b = task("b", Some("08:00"), Some(1));
        let c = task("c", Some("08:00"), None);
        let d = task("d", None, None);

        let mut tasks = vec![a.clone(), c.clone(), d.clone(), b.clone()];
        tasks.sort_by(section_cmp);
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        // Explicit orders first, then by time, then time-less.
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn grouping_is_stable_across_input_order() {
        let tasks = vec![
            task("a", Some("09:00"), None),
            task("b", Some("09:00"), None),
            task("c", Some("13:00"), Some(1)),
            task("d", None, None),
            task("e", Some("bad-time"), None),
        ];
        let mut reversed = tasks.clone();
        reversed.reverse();

        let first = SectionedTasks::group(&tasks);
        let second = SectionedTasks::group(&reversed);
        for section in TimeSection::ORDER {
            let lhs: Vec<_> = first.section(section).iter().map(|t| &t.id).collect();
            let rhs: Vec<_> = second.section(section).iter().map(|t| &t.id).collect();
            assert_eq!(lhs, rhs, "section {:?} order differs", section);
        }
        // Malformed time lands in unscheduled, never an error.
        assert!(first.unscheduled.iter().any(|t| t.id == "e"));
    }

    #[test]
    fn flatten_with_replaces_one_section() {
        let tasks = vec![
            task("m1", Some("08:00"), Some(0)),
            task("m2", Some("09:00"), Some(1)),
            task("u1", None, None),
        ];
        let grouped = SectionedTasks::group(&tasks);
        let swapped = vec![grouped.morning[1].clone(), grouped.morning[0].clone()];
        let flat = grouped.flatten_with(TimeSection::Morning, &swapped);
        let ids: Vec<_> = flat.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "m2", "m1"]);
    }

    proptest! {
        #[test]
        fn classify_is_total(input in ".*") {
            // Any string classifies into exactly one section, no panic.
            let _ = TimeSection::classify(Some(&input));
        }

        #[test]
        fn grouping_applied_twice_is_identical(
            ids in proptest::collection::vec("[a-z]{1,6}", 0..12),
        ) {
            let tasks: Vec<Task> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    let time = match i % 3 {
                        0 => Some(format!("{:02}:00", (i * 5) % 24)),
                        1 => None,
                        _ => Some("garbage".to_string()),
                    };
                    Task {
                        id: format!("{id}-{i}"),
                        title: id.clone(),
                        scheduled_time: time,
                        sort_order: if i % 2 == 0 { Some(i as i32) } else { None },
                        estimated_minutes: None,
                        completed: false,
                        ritual: false,
                    }
                })
                .collect();
            let once = SectionedTasks::group(&tasks);
            let twice = SectionedTasks::group(&tasks);
            prop_assert_eq!(once.flatten(), twice.flatten());
        }
    }
}
