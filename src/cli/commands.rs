use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::CollectionKind;
use crate::infrastructure::CorruptPolicy;

#[derive(Parser)]
#[command(name = "mindsync")]
#[command(about = "Your CBT companion: thought records, activity planning and problem solving", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Use this data directory instead of the configured one")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Challenge an unhelpful thought with a thought record")]
    Thought {
        #[command(subcommand)]
        action: RecordAction,
    },

    #[command(about = "Plan and review an activity (behavioral activation)")]
    Activity {
        #[command(subcommand)]
        action: RecordAction,
    },

    #[command(about = "Work through a problem-solving worksheet")]
    Problem {
        #[command(subcommand)]
        action: RecordAction,
    },

    #[command(about = "List saved entries, oldest first")]
    History {
        #[arg(value_enum, help = "Only show one kind of entry")]
        kind: Option<CollectionKind>,
    },

    #[command(about = "Show trends across your entries")]
    Trends,

    #[command(about = "Read a CBT lesson and take its quiz")]
    Learn {
        #[arg(help = "Lesson number (omit to list lessons)")]
        lesson: Option<usize>,

        #[arg(short, long, help = "Take the quiz after reading")]
        quiz: bool,
    },

    #[command(about = "Guided 4-7-8 breathing exercise")]
    Relax {
        #[arg(short, long, help = "Session length in minutes")]
        minutes: Option<u64>,
    },

    #[command(about = "Export every entry to a JSON file")]
    Export {
        #[arg(help = "Output file path")]
        file: PathBuf,
    },

    #[command(about = "Import entries from an exported JSON file")]
    Import {
        #[arg(help = "Input file path")]
        file: PathBuf,

        #[arg(long, help = "Replace entries that already exist")]
        overwrite: bool,
    },

    #[command(about = "Show or change configuration")]
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigCommands>,
    },

    #[command(about = "Generate shell completion script")]
    Completion {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Subcommand)]
pub enum RecordAction {
    #[command(about = "Start a new entry")]
    New,

    #[command(about = "Edit an existing entry")]
    Edit {
        #[arg(help = "Entry ID (its creation timestamp)")]
        id: String,
    },

    #[command(about = "Show every field of an entry")]
    Show {
        #[arg(help = "Entry ID (its creation timestamp)")]
        id: String,
    },

    #[command(about = "Delete an entry")]
    Rm {
        #[arg(help = "Entry ID (its creation timestamp)")]
        id: String,

        #[arg(short, long, help = "Skip confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Set the data directory")]
    DataDir {
        #[arg(help = "Directory holding the collection files")]
        path: String,
    },

    #[command(about = "Choose how unreadable collection files are handled")]
    CorruptPolicy {
        #[arg(value_enum)]
        policy: CorruptPolicy,
    },

    #[command(about = "Set the default breathing session length")]
    BreathingMinutes {
        #[arg(help = "Length in minutes")]
        minutes: u64,
    },
}
