//! Token management commands

use crate::cli::output;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use survey_cli::api::ClientManager;
use survey_cli::config::Config;

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: Option<AuthSubcommands>,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Fetch a new bearer token with the configured login
    Login,
    /// Forget the stored bearer token
    Logout,
    /// Display authentication status
    Status,
}

pub async fn auth_command(args: AuthCommands, config: &Config, manager: &ClientManager) -> Result<()> {
    match args.command.unwrap_or(AuthSubcommands::Status) {
        AuthSubcommands::Login => login_command(config, manager).await,
        AuthSubcommands::Logout => {
            manager.auth().clear_token().await;
            output::success("Signed out");
            Ok(())
        }
        AuthSubcommands::Status => status_command(config, manager).await,
    }
}

async fn login_command(config: &Config, manager: &ClientManager) -> Result<()> {
    println!("Signing in as {} at {}", config.login.email.bright_yellow(), config.backend.base_url.bright_blue());

    match manager.auth().fetch_token().await {
        Ok(_) => {
            output::success("Signed in");
            Ok(())
        }
        Err(e) => {
            output::failure(&format!("Sign-in failed: {}", e));
            Err(e.into())
        }
    }
}

async fn status_command(config: &Config, manager: &ClientManager) -> Result<()> {
    println!("{}", "Authentication Status".bold().underline());
    println!("Backend: {}", config.backend.base_url.bright_blue());
    println!("Login:   {}", config.login.email.bright_yellow());

    if manager.auth().is_authenticated().await {
        println!("Token:   {}", "present".bright_green().bold());
    } else {
        println!("Token:   {}", "none".bright_red().bold());
        println!("{}", "Run 'survey-cli auth login' to sign in".dimmed());
    }
    Ok(())
}
