use anyhow::{Context, Result, bail};
use dialoguer::{Input, MultiSelect, Select};
use survey_cli::survey::{Answer, Question, QuestionKind};

/// Ask one question with the widget matching its type
///
/// Returns `None` when the respondent leaves a text answer empty.
pub fn prompt_answer(question: &Question, current: Option<&Answer>) -> Result<Option<Answer>> {
    let title = if question.title.trim().is_empty() {
        "Untitled question"
    } else {
        question.title.as_str()
    };

    if question.kind.is_choice() && question.options.is_empty() {
        bail!("'{}' has no options to choose from", title);
    }

    match question.kind {
        QuestionKind::SingleChoice => {
            let items: Vec<&str> = question.options.iter().map(|o| o.text.as_str()).collect();
            let default = match current {
                Some(Answer::Text(text)) => items.iter().position(|i| i == text).unwrap_or(0),
                _ => 0,
            };
            let selection = Select::new()
                .with_prompt(title)
                .items(&items)
                .default(default)
                .interact()
                .context("Selection cancelled")?;
            Ok(Some(Answer::Text(items[selection].to_string())))
        }
        QuestionKind::MultipleChoice => {
            let items: Vec<&str> = question.options.iter().map(|o| o.text.as_str()).collect();
            let checked: Vec<bool> = items
                .iter()
                .map(|item| matches!(current, Some(Answer::Choices(c)) if c.iter().any(|s| s == item)))
                .collect();
            let selections = MultiSelect::new()
                .with_prompt(format!("{} (space to toggle)", title))
                .items(&items)
                .defaults(&checked)
                .interact()
                .context("Selection cancelled")?;
            let chosen = selections.into_iter().map(|i| items[i].to_string()).collect();
            Ok(Some(Answer::Choices(chosen)))
        }
        QuestionKind::OpenQuestion | QuestionKind::ShortAnswer => {
            let text: String = Input::new()
                .with_prompt(title)
                .allow_empty(true)
                .interact_text()?;
            if text.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(Answer::Text(text)))
            }
        }
        QuestionKind::Scale | QuestionKind::NpsScore => {
            let (min, max) = question.kind.score_range().unwrap_or((0, 10));
            let scores: Vec<String> = (min..=max).map(|n| n.to_string()).collect();
            let default = match current {
                Some(Answer::Number(n)) if (min..=max).contains(n) => (n - min) as usize,
                _ => 0,
            };
            let selection = Select::new()
                .with_prompt(format!("{} ({}-{})", title, min, max))
                .items(&scores)
                .default(default)
                .interact()
                .context("Selection cancelled")?;
            Ok(Some(Answer::Number(min + selection as i64)))
        }
    }
}

pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}
