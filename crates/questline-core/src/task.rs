//! Task types shared by the section classifier, the gesture engines and
//! the row composer.
//!
//! Tasks are read-mostly external entities: the core never persists
//! them and never mints ids. The host owns storage and identity.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::parse_hhmm;

/// Default effective duration when a task has no estimate, in minutes.
pub const DEFAULT_DURATION_MIN: i64 = 30;

/// A single quest or ritual on the day's working set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Stable identifier, unique within the day's working set.
    pub id: String,
    pub title: String,
    /// Scheduled time as `HH:MM`, or `None` for unscheduled tasks.
    #[serde(default)]
    pub scheduled_time: Option<String>,
    /// Explicit ordering within a section. Missing sorts last.
    #[serde(default)]
    pub sort_order: Option<i32>,
    /// Estimated duration in minutes.
    #[serde(default)]
    pub estimated_minutes: Option<i64>,
    #[serde(default)]
    pub completed: bool,
    /// Recurring ritual (habit-sourced) vs a one-off quest.
    #[serde(default)]
    pub ritual: bool,
}

impl Task {
    /// Create an unscheduled task with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            scheduled_time: None,
            sort_order: None,
            estimated_minutes: None,
            completed: false,
            ritual: false,
        }
    }

    /// Set the scheduled time (`HH:MM`).
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.scheduled_time = Some(time.into());
        self
    }

    /// Set the explicit sort order.
    pub fn with_sort_order(mut self, order: i32) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Set the estimated duration in minutes.
    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    /// Scheduled minute-of-day, if the time is present and parsable.
    pub fn scheduled_minute(&self) -> Option<u16> {
        self.scheduled_time.as_deref().and_then(parse_hhmm)
    }

    /// Effective duration in minutes (estimate or the 30-minute default).
    pub fn effective_minutes(&self) -> i64 {
        self.estimated_minutes
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_DURATION_MIN)
    }
}

/// Check that every task id in a day's working set is unique.
///
/// The gesture engines key sessions and lane assignments by id, so a
/// duplicated id is host data the core cannot work with.
pub fn validate_working_set(tasks: &[Task]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}
