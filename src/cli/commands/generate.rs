use crate::cli::output;
use anyhow::{Result, anyhow};
use colored::*;
use log::{error, info};
use std::path::Path;
use survey_cli::api::{ApiError, ClientManager};
use survey_cli::survey::draft::{load_draft, save_draft};
use survey_cli::survey::{Survey, SurveyStore};

const SESSION_EXPIRED: &str = "Session expired. Please try again.";
const GENERATION_FAILED: &str = "Failed to generate survey. Please try again.";

/// Generate a survey and write it into `out`
///
/// An existing draft at `out` is loaded first so that its title survives
/// when the generated payload has none. Without an explicit description the
/// draft's description is used, then its title.
pub async fn generate_command(description: Option<&str>, out: &Path, manager: &ClientManager) -> Result<()> {
    let store = if out.exists() {
        SurveyStore::from_survey(load_draft(out)?)
    } else {
        SurveyStore::new()
    };

    let description = match description {
        Some(text) => text.to_string(),
        None => draft_prompt(&store.snapshot()),
    };

    let ticket = store.begin_generation();
    println!("{}", "Generating survey...".bright_blue());

    let payload = match manager.client().generate_survey(&description).await {
        Ok(payload) => payload,
        Err(ApiError::Validation(message)) => {
            output::failure(&message);
            return Err(anyhow!(message));
        }
        Err(e) if e.is_unauthorized() => {
            error!("Generation rejected: {}", e);
            output::failure(SESSION_EXPIRED);
            return Err(anyhow!(SESSION_EXPIRED));
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            output::failure(GENERATION_FAILED);
            return Err(anyhow!(GENERATION_FAILED));
        }
    };

    if !store.finish_generation(ticket, payload) {
        info!("Generation result superseded, draft left unchanged");
        return Ok(());
    }

    let survey = store.snapshot();
    save_draft(out, &survey)?;
    output::success(&format!(
        "Generated '{}' with {} questions into {}",
        survey.display_title(),
        survey.questions().len(),
        out.display()
    ));
    Ok(())
}

/// Text to generate from when no description is given on the command line
fn draft_prompt(survey: &Survey) -> String {
    if survey.description().trim().is_empty() {
        survey.title().to_string()
    } else {
        survey.description().to_string()
    }
}
