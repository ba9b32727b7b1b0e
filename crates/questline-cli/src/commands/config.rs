use std::path::PathBuf;

use clap::Subcommand;
use questline_core::TuningConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the tuning profile as TOML (defaults if no file given)
    Show {
        /// Tuning file to read
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Write the default tuning profile to a file
    Init {
        /// Destination tuning file
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { path } => {
            let config = match path {
                Some(path) => TuningConfig::load(&path)?,
                None => TuningConfig::default(),
            };
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            TuningConfig::default().save(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
