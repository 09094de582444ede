use crate::cli::output;
use anyhow::{Result, bail};
use std::path::Path;
use survey_cli::survey::SurveyStore;
use survey_cli::survey::draft::{load_draft, save_draft};

pub fn new_command(draft: &Path, title: Option<&str>, description: Option<&str>, force: bool) -> Result<()> {
    if draft.exists() && !force {
        bail!("Draft {:?} already exists (use --force to overwrite)", draft);
    }

    let store = SurveyStore::new();
    if let Some(title) = title {
        store.set_title(title);
    }
    if let Some(description) = description {
        store.set_description(description);
    }

    save_draft(draft, &store.snapshot())?;
    output::success(&format!("Created draft {}", draft.display()));
    Ok(())
}

pub fn show_command(draft: &Path) -> Result<()> {
    let survey = load_draft(draft)?;
    output::print_survey(&survey);
    Ok(())
}
