//! Single-edit commands applied to a draft file
//!
//! Question and option positions are 1-based on the command line.

use crate::cli::output;
use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use log::info;
use std::path::PathBuf;
use survey_cli::survey::draft::{load_draft, save_draft};
use survey_cli::survey::{Mode, QuestionKind, SurveyStore};

#[derive(Args)]
pub struct EditCommands {
    /// Draft file to edit
    pub draft: PathBuf,
    #[command(subcommand)]
    pub op: EditOp,
}

#[derive(Subcommand)]
pub enum EditOp {
    /// Set the survey title
    Title { text: String },
    /// Set the survey description
    Description { text: String },
    /// Append a question of the given type
    Add {
        /// singleChoice, multipleChoice, openQuestion, shortAnswer, scale or npsScore
        kind: QuestionKind,
    },
    /// Set a question's title
    QuestionTitle { question: usize, text: String },
    /// Change a question's type
    QuestionType { question: usize, kind: QuestionKind },
    /// Set the text of one option
    Option { question: usize, option: usize, text: String },
    /// Append a placeholder option to a choice question
    AddOption { question: usize },
    /// Remove one option
    DeleteOption { question: usize, option: usize },
    /// Insert a copy of a question right after it
    Duplicate { question: usize },
    /// Remove a question
    Delete { question: usize },
    /// Lock a question against edits
    Lock { question: usize },
    /// Unlock a question
    Unlock { question: usize },
    /// Move a question to a new position
    Move { from: usize, to: usize },
    /// Switch between edit and respond mode
    Mode { mode: Mode },
    /// Clear the survey, or only its answers
    Reset {
        /// Keep questions and clear responses only
        #[arg(long)]
        answers: bool,
    },
}

/// Convert a 1-based position from the command line
fn index(position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Positions start at 1"),
    }
}

pub fn edit_command(args: EditCommands) -> Result<()> {
    let store = SurveyStore::from_survey(load_draft(&args.draft)?);

    let message = match args.op {
        EditOp::Title { text } => {
            store.set_title(&text);
            "Title updated".to_string()
        }
        EditOp::Description { text } => {
            store.set_description(&text);
            "Description updated".to_string()
        }
        EditOp::Add { kind } => {
            store.add_question(kind);
            format!("Added question {} ({})", store.snapshot().questions().len(), kind.label())
        }
        EditOp::QuestionTitle { question, text } => {
            store.set_question_title(index(question)?, &text)?;
            format!("Question {} renamed", question)
        }
        EditOp::QuestionType { question, kind } => {
            store.set_question_type(index(question)?, kind)?;
            format!("Question {} is now {}", question, kind.label())
        }
        EditOp::Option { question, option, text } => {
            store.set_option_text(index(question)?, index(option)?, &text)?;
            format!("Option {} of question {} updated", option, question)
        }
        EditOp::AddOption { question } => {
            store.add_option(index(question)?)?;
            format!("Option added to question {}", question)
        }
        EditOp::DeleteOption { question, option } => {
            store.delete_option(index(question)?, index(option)?)?;
            format!("Option {} removed from question {}", option, question)
        }
        EditOp::Duplicate { question } => {
            store.duplicate_question(index(question)?)?;
            format!("Question {} duplicated", question)
        }
        EditOp::Delete { question } => {
            store.delete_question(index(question)?)?;
            format!("Question {} deleted", question)
        }
        EditOp::Lock { question } => {
            store.toggle_saved(index(question)?, true)?;
            format!("Question {} locked", question)
        }
        EditOp::Unlock { question } => {
            store.toggle_saved(index(question)?, false)?;
            format!("Question {} unlocked", question)
        }
        EditOp::Move { from, to } => {
            store.reorder(index(from)?, index(to)?)?;
            format!("Moved question {} to position {}", from, to)
        }
        EditOp::Mode { mode } => {
            store.set_mode(mode);
            format!("Switched to {} mode", mode)
        }
        EditOp::Reset { answers } => {
            if answers {
                store.reset_answers();
                "Responses cleared".to_string()
            } else {
                store.reset_survey();
                "Survey reset".to_string()
            }
        }
    };

    save_draft(&args.draft, &store.snapshot())?;
    info!("{}: {}", args.draft.display(), message);
    output::success(&message);
    Ok(())
}
