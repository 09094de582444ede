//! Terminal rendering of drafts and progress

use colored::*;
use survey_cli::survey::{Progress, Survey};

pub fn success(message: &str) {
    println!("{} {}", "✓".bright_green().bold(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".bright_red().bold(), message);
}

pub fn progress_line(progress: &Progress) -> String {
    let counter = format!("{}/{} answered", progress.answered, progress.total);
    let percent = format!("{}%", progress.percent);
    if progress.is_complete() {
        format!("{} {}", counter.bright_green(), percent.bright_green().bold())
    } else {
        format!("{} {}", counter.bright_yellow(), percent.bright_yellow().bold())
    }
}

pub fn print_survey(survey: &Survey) {
    println!("{}", survey.display_title().bright_cyan().bold());
    if !survey.description().is_empty() {
        println!("{}", survey.description().dimmed());
    }
    println!("Mode: {}", survey.mode().to_string().bright_blue());
    println!();

    let outline = survey.outline();
    if outline.is_empty() {
        println!("{}", "No questions yet".dimmed());
        return;
    }

    for entry in &outline {
        let lock = if entry.saved { "🔒" } else { "  " };
        let answered = if entry.answered {
            "✓".bright_green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {} {:>2}. {} {}",
            answered,
            lock,
            entry.position,
            entry.title.bold(),
            format!("[{}]", entry.kind.label()).dimmed()
        );

        if let Some(question) = survey.question(entry.position - 1) {
            for (i, option) in question.options.iter().enumerate() {
                println!("          {}. {}", i + 1, option.text);
            }
        }
    }

    println!();
    println!("{}", progress_line(&survey.progress()));
}
