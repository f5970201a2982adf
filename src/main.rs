mod cli;
mod config;
mod domain;
mod handlers;
mod infrastructure;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{expand_home, get_config_dir, Config};
use domain::CollectionKind;
use handlers::completion::handle_completion;
use handlers::config::handle_config;
use handlers::learn::handle_learn;
use handlers::progress::ProgressPage;
use handlers::relax::handle_relax;
use handlers::transfer::{handle_export, handle_import};
use handlers::{handle_history, handle_record};
use infrastructure::RecordStore;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config_dir = get_config_dir()?;

    let command = match cli.command {
        Commands::Config { subcommand } => return handle_config(subcommand, &config_dir),
        Commands::Completion { shell } => return handle_completion(&shell),
        Commands::Learn { lesson, quiz } => return handle_learn(lesson, quiz),
        command => command,
    };

    let config = Config::load(&config_dir)?;

    if let Commands::Relax { minutes } = command {
        return handle_relax(minutes.unwrap_or(config.breathing_minutes));
    }

    let data_dir = match cli.data_dir {
        Some(path) => expand_home(&path)?,
        None => config.data_dir.clone(),
    };
    log::debug!("Using data directory {}", data_dir.display());
    let store = RecordStore::open(&data_dir, config.corrupt_policy)?;

    match command {
        Commands::Thought { action } => {
            handle_record(CollectionKind::ThoughtRecords, action, &store)
        }
        Commands::Activity { action } => {
            handle_record(CollectionKind::BehavioralActivation, action, &store)
        }
        Commands::Problem { action } => {
            handle_record(CollectionKind::ProblemSolving, action, &store)
        }
        Commands::History { kind } => handle_history(kind, &store),
        Commands::Trends => ProgressPage::new(&store, None).show_trends(),
        Commands::Export { file } => handle_export(&file, &store),
        Commands::Import { file, overwrite } => handle_import(&file, overwrite, &store),
        Commands::Config { .. }
        | Commands::Completion { .. }
        | Commands::Learn { .. }
        | Commands::Relax { .. } => unreachable!("handled before the store is opened"),
    }
}
