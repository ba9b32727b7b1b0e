use std::path::PathBuf;

use clap::Subcommand;
use questline_core::{SectionedTasks, TimeSection};

#[derive(Subcommand)]
pub enum SectionsAction {
    /// Classify a single HH:MM time into its section
    Classify {
        /// Scheduled time, e.g. 09:30 (anything unparsable is unscheduled)
        time: String,
    },
    /// Group a task file into sections
    Group {
        /// JSON file containing the day's tasks
        file: PathBuf,
        /// Print the full grouped structure as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SectionsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SectionsAction::Classify { time } => {
            let section = TimeSection::classify(Some(&time));
            println!("{}", section.as_str());
        }
        SectionsAction::Group { file, json } => {
            let tasks = super::load_tasks(&file)?;
            let grouped = SectionedTasks::group(&tasks);
            if json {
                println!("{}", serde_json::to_string_pretty(&grouped)?);
            } else {
                for section in TimeSection::ORDER {
                    let tasks = grouped.section(section);
                    if tasks.is_empty() {
                        continue;
                    }
                    println!("{}:", section.as_str());
                    for task in tasks {
                        let time = task.scheduled_time.as_deref().unwrap_or("--:--");
                        println!("  {} {} ({})", time, task.title, task.id);
                    }
                }
            }
        }
    }
    Ok(())
}
