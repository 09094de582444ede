use super::commands::{AuthCommands, EditCommands};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "survey-cli")]
#[command(about = "Author surveys, generate drafts from a description and collect responses")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bearer token management
    Auth(AuthCommands),
    /// Create an empty draft
    New {
        /// Draft file to create
        draft: PathBuf,
        /// Survey title
        #[arg(long)]
        title: Option<String>,
        /// Survey description
        #[arg(long)]
        description: Option<String>,
        /// Overwrite an existing draft
        #[arg(short, long)]
        force: bool,
    },
    /// Generate a survey from a free-text description
    Generate {
        /// What the survey should be about; defaults to the draft's description, then its title
        description: Option<String>,
        /// Draft file to write the result to
        #[arg(short, long, default_value = "survey.json")]
        out: PathBuf,
    },
    /// Show a draft's outline and response progress
    Show {
        /// Draft file
        draft: PathBuf,
    },
    /// Apply one edit to a draft
    Edit(EditCommands),
    /// Answer a draft interactively
    Respond {
        /// Draft file
        draft: PathBuf,
        /// Write the submitted responses here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
