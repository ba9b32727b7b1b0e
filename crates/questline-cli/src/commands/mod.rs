pub mod config;
pub mod demo;
pub mod sections;
pub mod timeline;

use std::path::Path;

use questline_core::{validate_working_set, Task};

/// Load a day's tasks from a JSON file (an array of task objects).
pub(crate) fn load_tasks(path: &Path) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let tasks: Vec<Task> = serde_json::from_str(&raw)?;
    validate_working_set(&tasks)?;
    Ok(tasks)
}
