//! Cross-section drop tracking.
//!
//! While a reorder drag is active the host hit-tests the pointer
//! against the section headers and reports enter/leave transitions
//! here. On release, a drop over a section other than the task's own
//! commits a section move instead of a within-section reorder.

use chrono::Utc;

use crate::events::Event;
use crate::section::TimeSection;
use crate::services::{HapticSink, Impact, NoopHaptics};
use crate::task::Task;

/// Tracks which section a dragged task hovers over and turns a drop on
/// a foreign section into a [`Event::TaskMovedToSection`].
pub struct SectionBoard {
    haptics: Box<dyn HapticSink>,
    active: Option<SectionDrag>,
}

#[derive(Debug)]
struct SectionDrag {
    task_id: String,
    from_section: TimeSection,
    hovered: Option<TimeSection>,
}

impl Default for SectionBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionBoard {
    pub fn new() -> Self {
        Self {
            haptics: Box::new(NoopHaptics),
            active: None,
        }
    }

    pub fn with_haptics(mut self, haptics: impl HapticSink + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    /// Begin tracking a drag of `task_id`. The task's home section is
    /// derived from its scheduled time at drag start.
    pub fn begin(&mut self, task_id: &str, tasks: &[Task]) {
        let from_section = tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| TimeSection::classify(t.scheduled_time.as_deref()))
            .unwrap_or(TimeSection::Unscheduled);
        self.active = Some(SectionDrag {
            task_id: task_id.to_string(),
            from_section,
            hovered: None,
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Section the pointer currently hovers, if any.
    pub fn hovered(&self) -> Option<TimeSection> {
        self.active.as_ref().and_then(|drag| drag.hovered)
    }

    /// True when dropping now would move the task to a new section.
    /// Drives the host's drop-target highlight.
    pub fn would_move(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|drag| drag.hovered.is_some_and(|s| s != drag.from_section))
    }

    /// Report the pointer entering a section header or body.
    pub fn enter_section(&mut self, section: TimeSection) {
        let Some(drag) = &mut self.active else {
            return;
        };
        if drag.hovered == Some(section) {
            return;
        }
        drag.hovered = Some(section);
        // A tap of feedback when crossing into a foreign section.
        if section != drag.from_section {
            self.haptics.impact(Impact::Light);
        }
    }

    /// Report the pointer leaving all section targets.
    pub fn leave_section(&mut self) {
        if let Some(drag) = &mut self.active {
            drag.hovered = None;
        }
    }

    /// Finish the drag. A drop over a foreign section commits a move;
    /// anywhere else the drop is the within-section reorder's business
    /// and this returns `None`.
    pub fn drop_task(&mut self) -> Option<Event> {
        let drag = self.active.take()?;
        let target = drag.hovered?;
        if target == drag.from_section {
            return None;
        }
        self.haptics.impact(Impact::Medium);
        Some(Event::TaskMovedToSection {
            task_id: drag.task_id,
            section: target,
            at: Utc::now(),
        })
    }

    /// Discard tracking state without committing anything.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::services::RecordingHaptics;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("m", "morning task").with_time("09:00"),
            Task::new("e", "evening task").with_time("19:30"),
            Task::new("u", "someday"),
        ]
    }

    #[test]
    fn drop_on_foreign_section_commits_move() {
        let mut board = SectionBoard::new();
        board.begin("m", &tasks());
        board.enter_section(TimeSection::Evening);
        assert!(board.would_move());

        match board.drop_task() {
            Some(Event::TaskMovedToSection {
                task_id, section, ..
            }) => {
                assert_eq!(task_id, "m");
                assert_eq!(section, TimeSection::Evening);
            }
            other => panic!("expected TaskMovedToSection, got {:?}", other),
        }
        assert!(!board.is_active());
    }

    #[test]
    fn drop_on_home_section_is_not_a_move() {
        let mut board = SectionBoard::new();
        board.begin("m", &tasks());
        board.enter_section(TimeSection::Morning);
        assert!(!board.would_move());
        assert!(board.drop_task().is_none());
    }

    #[test]
    fn drop_outside_any_section_is_not_a_move() {
        let mut board = SectionBoard::new();
        board.begin("m", &tasks());
        board.enter_section(TimeSection::Evening);
        board.leave_section();
        assert!(board.drop_task().is_none());
    }

    #[test]
    fn unknown_task_defaults_to_unscheduled_home() {
        let mut board = SectionBoard::new();
        board.begin("ghost", &tasks());
        board.enter_section(TimeSection::Unscheduled);
        assert!(!board.would_move());
        board.enter_section(TimeSection::Morning);
        assert!(board.would_move());
    }

    #[test]
    fn cancel_discards_without_commit() {
        let mut board = SectionBoard::new();
        board.begin("m", &tasks());
        board.enter_section(TimeSection::Evening);
        board.cancel();
        assert!(board.drop_task().is_none());
        assert!(!board.is_active());
    }

    #[test]
    fn haptics_on_foreign_entry_and_commit_only() {
        let haptics = Rc::new(RefCell::new(RecordingHaptics::default()));
        let mut board = SectionBoard::new().with_haptics(Rc::clone(&haptics));
        board.begin("m", &tasks());
        board.enter_section(TimeSection::Morning); // home: silent
        board.enter_section(TimeSection::Afternoon); // foreign: light
        board.enter_section(TimeSection::Afternoon); // repeat: silent
        board.enter_section(TimeSection::Evening); // foreign: light
        board.drop_task(); // commit: medium

        assert_eq!(
            haptics.borrow().impacts,
            vec![Impact::Light, Impact::Light, Impact::Medium]
        );
    }
}
