use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::section::TimeSection;

/// Committed gesture outcomes reported to the host.
///
/// Every event is a notification of something that already happened;
/// the host is never queried for permission mid-gesture, and each
/// commit is forwarded exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A long-press matured into an active drag.
    DragStarted {
        task_id: String,
        at: DateTime<Utc>,
    },
    /// One discrete adjacent swap inside the working order.
    RowSwapped {
        task_id: String,
        from_index: usize,
        to_index: usize,
        at: DateTime<Utc>,
    },
    /// Final working order on release. Emitted even when nothing moved
    /// (`changed == false`) so the host callback is idempotent.
    ReorderCommitted {
        ordered_ids: Vec<String>,
        changed: bool,
        at: DateTime<Utc>,
    },
    /// A task was dropped on a different time section.
    TaskMovedToSection {
        task_id: String,
        section: TimeSection,
        at: DateTime<Utc>,
    },
    /// A reschedule drag committed a new time slot.
    TaskRescheduled {
        task_id: String,
        new_time: String,
        conflict_count: usize,
        at: DateTime<Utc>,
    },
    /// The gesture was cancelled; its session was discarded uncommitted.
    DragCancelled {
        task_id: String,
        at: DateTime<Utc>,
    },
}
