use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "questline-cli", version, about = "Questline timeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time-of-day section classification and grouping
    Sections {
        #[command(subcommand)]
        action: commands::sections::SectionsAction,
    },
    /// Timeline row composition
    Timeline {
        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },
    /// Gesture engine simulations
    Demo {
        #[command(subcommand)]
        action: commands::demo::DemoAction,
    },
    /// Tuning configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Sections { action } => commands::sections::run(action),
        Commands::Timeline { action } => commands::timeline::run(action),
        Commands::Demo { action } => commands::demo::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
