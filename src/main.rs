use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;

use cli::commands::{auth_command, edit_command, generate_command, new_command, respond_command, show_command};
use cli::{Cli, Commands};
use survey_cli::api::ClientManager;
use survey_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("survey-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting survey-cli");

    match cli.command {
        Commands::Auth(args) => {
            let config = Config::load()?;
            let manager = ClientManager::from_config(&config)?;
            auth_command(args, &config, &manager).await
        }
        Commands::New {
            draft,
            title,
            description,
            force,
        } => new_command(&draft, title.as_deref(), description.as_deref(), force),
        Commands::Generate { description, out } => {
            let config = Config::load()?;
            let manager = ClientManager::from_config(&config)?;
            generate_command(description.as_deref(), &out, &manager).await
        }
        Commands::Show { draft } => show_command(&draft),
        Commands::Edit(args) => edit_command(args),
        Commands::Respond { draft, out } => respond_command(&draft, out.as_deref()),
    }
}
