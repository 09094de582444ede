//! Survey drafts on disk

use super::document::Survey;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Read a draft file written by [`save_draft`]
pub fn load_draft(path: &Path) -> Result<Survey> {
    debug!("Loading draft from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft file: {:?}", path))?;
    let survey: Survey = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse draft file: {:?}", path))?;

    debug!("Loaded draft with {} questions", survey.questions().len());
    Ok(survey)
}

pub fn save_draft(path: &Path, survey: &Survey) -> Result<()> {
    debug!("Saving draft to: {:?}", path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create draft directory: {:?}", parent))?;
    }

    let content = serde_json::to_string_pretty(survey).context("Failed to serialize draft")?;
    fs::write(path, content).with_context(|| format!("Failed to write draft file: {:?}", path))?;

    info!("Draft saved to {:?}", path);
    Ok(())
}
