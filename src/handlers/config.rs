use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::ConfigCommands;
use crate::config::{expand_home, Config};
use crate::domain::breathing::{session_seconds, MAX_SESSION_MINUTES};

pub fn handle_config(subcommand: Option<ConfigCommands>, config_dir: &Path) -> Result<()> {
    let mut config = Config::load(config_dir)?;

    match subcommand {
        None => {
            println!("\nCurrent Configuration:");
            println!("  Data Directory: {}", config.data_dir.display());
            println!("  Corrupt Policy: {:?}", config.corrupt_policy);
            println!("  Breathing Session: {} minutes", config.breathing_minutes);
        }
        Some(ConfigCommands::DataDir { path }) => {
            let expanded_path = expand_home(&PathBuf::from(path))?;

            config.data_dir = expanded_path.clone();
            config.save(config_dir)?;
            println!("✓ Data directory updated to: {}", expanded_path.display());
        }
        Some(ConfigCommands::CorruptPolicy { policy }) => {
            config.corrupt_policy = policy;
            config.save(config_dir)?;
            println!("✓ Corrupt policy updated to: {:?}", policy);
        }
        Some(ConfigCommands::BreathingMinutes { minutes }) => {
            if session_seconds(minutes).is_none() {
                anyhow::bail!(
                    "Breathing session must be between 1 and {} minutes",
                    MAX_SESSION_MINUTES
                );
            }
            config.breathing_minutes = minutes;
            config.save(config_dir)?;
            println!("✓ Breathing session updated to: {} minutes", minutes);
        }
    }

    Ok(())
}
