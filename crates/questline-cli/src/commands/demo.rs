use std::path::PathBuf;

use clap::Subcommand;
use questline_core::time::parse_hhmm;
use questline_core::{
    DragReorderEngine, FixedSnapGrid, IntervalOverlapResolver, PointerPhase, PointerSample,
    RescheduleController, ReorderTuning, RescheduleTuning, SectionedTasks, Task, TimeSection,
};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum DemoAction {
    /// Print a sample day of tasks as JSON (pipe into a file)
    Seed,
    /// Simulate a long-press reorder drag and print the emitted events
    Reorder {
        /// JSON file containing the day's tasks
        file: PathBuf,
        /// Id of the task to drag
        task_id: String,
        /// Adjacent steps to drag: positive is down, negative is up
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        steps: i32,
    },
    /// Simulate a reschedule drag to a target time and print the events
    Reschedule {
        /// JSON file containing the day's tasks
        file: PathBuf,
        /// Id of the scheduled task to drag
        task_id: String,
        /// Target time as HH:MM
        #[arg(long)]
        to: String,
    },
}

pub fn run(action: DemoAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DemoAction::Seed => seed(),
        DemoAction::Reorder {
            file,
            task_id,
            steps,
        } => reorder(&file, &task_id, steps),
        DemoAction::Reschedule { file, task_id, to } => reschedule(&file, &task_id, &to),
    }
}

fn seed() -> Result<(), Box<dyn std::error::Error>> {
    let tasks = vec![
        Task::new(Uuid::new_v4().to_string(), "Morning stretch")
            .with_time("07:00")
            .with_duration(15),
        Task::new(Uuid::new_v4().to_string(), "Deep work")
            .with_time("09:00")
            .with_duration(90),
        Task::new(Uuid::new_v4().to_string(), "Standup")
            .with_time("10:00")
            .with_duration(30),
        Task::new(Uuid::new_v4().to_string(), "Errands")
            .with_time("15:00")
            .with_duration(45),
        Task::new(Uuid::new_v4().to_string(), "Evening review")
            .with_time("21:00")
            .with_duration(20),
        Task::new(Uuid::new_v4().to_string(), "Read a chapter"),
    ];
    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}

fn reorder(
    file: &std::path::Path,
    task_id: &str,
    steps: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = super::load_tasks(file)?;
    let grouped = SectionedTasks::group(&tasks);
    let section = tasks
        .iter()
        .find(|t| t.id == task_id)
        .map(|t| TimeSection::classify(t.scheduled_time.as_deref()))
        .ok_or_else(|| format!("no task with id {task_id}"))?;
    let order: Vec<String> = grouped
        .section(section)
        .iter()
        .map(|t| t.id.clone())
        .collect();

    let tuning = ReorderTuning::default();
    let step_px = tuning.row_height_px * if steps >= 0 { 1.0 } else { -1.0 };
    let mut engine = DragReorderEngine::new(tuning);
    let mut events = Vec::new();

    let start = PointerSample::new(0.0, 0.0, PointerPhase::Start, 0);
    engine.press(task_id, &order, start);
    let mut now_ms = tuning.long_press_ms;
    events.extend(engine.tick(now_ms));

    let mut y = 0.0;
    for _ in 0..steps.unsigned_abs() {
        y += step_px;
        now_ms += 50;
        events.extend(engine.update(PointerSample::new(0.0, y, PointerPhase::Move, now_ms)));
    }
    events.extend(engine.update(PointerSample::new(0.0, y, PointerPhase::End, now_ms + 50)));

    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

fn reschedule(
    file: &std::path::Path,
    task_id: &str,
    to: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = super::load_tasks(file)?;
    let task = tasks
        .iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| format!("no task with id {task_id}"))?;
    let origin = task
        .scheduled_minute()
        .ok_or("task has no scheduled time; only scheduled tasks can be rescheduled")?;
    let target = parse_hhmm(to).ok_or_else(|| format!("not a valid HH:MM time: {to}"))?;

    let grid = FixedSnapGrid::default();
    // Drive the drag the same way a pointer would: pixels, not minutes.
    let offset_y = (target as i32 - origin as i32) as f32 / grid.step_minutes as f32
        * grid.pixels_per_step;

    let mut controller = RescheduleController::new(RescheduleTuning::default(), grid);
    let mut events = Vec::new();
    events.extend(controller.start(task, PointerSample::new(0.0, 0.0, PointerPhase::Start, 0)));
    events.extend(controller.update(PointerSample::new(0.0, offset_y, PointerPhase::Move, 50)));
    events.extend(controller.release(
        PointerSample::new(0.0, offset_y, PointerPhase::End, 100),
        &tasks,
        &IntervalOverlapResolver,
    ));

    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}
