use crate::cli::{output, prompts};
use anyhow::{Context, Result, bail};
use colored::*;
use is_terminal::IsTerminal;
use log::info;
use std::path::Path;
use survey_cli::survey::draft::{load_draft, save_draft};
use survey_cli::survey::{Mode, SurveyError, SurveyStore};

pub fn respond_command(draft: &Path, out: Option<&Path>) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        bail!("Responding requires an interactive terminal");
    }

    let store = SurveyStore::from_survey(load_draft(draft)?);
    store.set_mode(Mode::Respond);

    let survey = store.snapshot();
    if survey.questions().is_empty() {
        bail!("Draft {:?} has no questions", draft);
    }
    let unanswerable = survey.unanswerable_questions();
    if !unanswerable.is_empty() {
        let positions: Vec<String> = unanswerable.iter().map(|p| p.to_string()).collect();
        bail!(
            "Question(s) {} have no options to choose from; add options with 'survey-cli edit {} add-option <question>'",
            positions.join(", "),
            draft.display()
        );
    }
    println!("{}", survey.display_title().bright_cyan().bold());
    if !survey.description().is_empty() {
        println!("{}", survey.description().dimmed());
    }
    println!();

    loop {
        let survey = store.snapshot();
        let pending: Vec<_> = survey
            .questions()
            .iter()
            .filter(|q| !survey.is_question_answered(q))
            .cloned()
            .collect();

        for question in &pending {
            let current = store.snapshot().answer(&question.id).cloned();
            let answer = match prompts::prompt_answer(question, current.as_ref()) {
                Ok(answer) => answer,
                Err(e) => {
                    save_draft(draft, &store.snapshot())?;
                    return Err(e.context(format!("Answers so far were saved to {:?}", draft)));
                }
            };
            if let Some(answer) = answer {
                store.set_answer(question.id.clone(), answer);
            }
            println!("{}", output::progress_line(&store.snapshot().progress()));
        }

        match store.snapshot().validate_submission() {
            Ok(_) => break,
            Err(SurveyError::Incomplete { answered, total }) => {
                println!(
                    "{} {} of {} questions still need an answer",
                    "!".bright_yellow().bold(),
                    total - answered,
                    total
                );
                if !prompts::prompt_confirmation("Answer the remaining questions?", true)? {
                    save_draft(draft, &store.snapshot())?;
                    bail!("Submission incomplete; answers so far were saved to {:?}", draft);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    let survey = store.snapshot();
    save_draft(draft, &survey)?;
    let json = serde_json::to_string_pretty(survey.responses()).context("Failed to serialize responses")?;

    match out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write responses: {:?}", path))?;
            output::success(&format!("Responses written to {}", path.display()));
        }
        None => println!("{}", json),
    }
    info!("Submitted {} responses for {:?}", survey.responses().len(), draft);
    Ok(())
}
