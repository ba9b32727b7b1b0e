use std::path::PathBuf;

use clap::Subcommand;
use questline_core::time::{format_12h, minute_of, parse_hhmm};
use questline_core::{
    build_timeline_rows, day_window, IntervalOverlapResolver, MarkerKind, MarkerTuning,
    TimelineRow,
};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Compose and print the day's timeline rows
    Rows {
        /// JSON file containing the day's tasks
        file: PathBuf,
        /// Current time as HH:MM; defaults to the wall clock.
        /// Pass --no-now to compose a day that is not today.
        #[arg(long)]
        now: Option<String>,
        /// Compose without a now-marker
        #[arg(long)]
        no_now: bool,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the visible hour window for a task file
    Window {
        /// JSON file containing the day's tasks
        file: PathBuf,
    },
}

pub fn run(action: TimelineAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimelineAction::Rows {
            file,
            now,
            no_now,
            json,
        } => {
            let tasks = super::load_tasks(&file)?;
            let now = if no_now {
                None
            } else {
                match now {
                    Some(raw) => parse_hhmm(&raw),
                    None => Some(minute_of(&chrono::Local::now())),
                }
            };
            let rows = build_timeline_rows(
                &tasks,
                now,
                &MarkerTuning::default(),
                &IntervalOverlapResolver,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    print_row(row);
                }
            }
        }
        TimelineAction::Window { file } => {
            let tasks = super::load_tasks(&file)?;
            let (start, end) = day_window(&tasks);
            println!("{:02}:00..{:02}:00", start, end);
        }
    }
    Ok(())
}

fn print_row(row: &TimelineRow) {
    match row {
        TimelineRow::Marker {
            minute,
            kind,
            emphasis,
        } => {
            let label = match kind {
                MarkerKind::Placeholder => "----",
                MarkerKind::Now => "now ",
            };
            println!("{:>8} {} (emphasis {:.2})", format_12h(*minute), label, emphasis);
        }
        TimelineRow::Task { task, lane } => {
            let time = task
                .scheduled_minute()
                .map(format_12h)
                .unwrap_or_else(|| "anytime".to_string());
            match lane {
                Some(lane) if lane.overlap_count > 1 => println!(
                    "{:>8} task {} (lane {}/{}, {} overlapping)",
                    time, task.title, lane.lane_index, lane.lane_count, lane.overlap_count
                ),
                _ => println!("{:>8} task {}", time, task.title),
            }
        }
    }
}
