//! Answer validation and progress

use super::ids::ItemId;
use super::model::{Answer, Question, QuestionKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Answers keyed by question id
pub type ResponseMap = BTreeMap<ItemId, Answer>;

/// Whether `answer` satisfies the type-specific rule for `question`
pub fn is_answered(question: &Question, answer: Option<&Answer>) -> bool {
    let Some(answer) = answer else {
        return false;
    };

    match (question.kind, answer) {
        (QuestionKind::SingleChoice, Answer::Text(selected)) => !selected.is_empty(),
        (QuestionKind::MultipleChoice, Answer::Choices(selected)) => !selected.is_empty(),
        (QuestionKind::OpenQuestion | QuestionKind::ShortAnswer, Answer::Text(text)) => {
            !text.trim().is_empty()
        }
        (QuestionKind::Scale | QuestionKind::NpsScore, Answer::Number(score)) => question
            .kind
            .score_range()
            .is_some_and(|(low, high)| (low..=high).contains(score)),
        _ => false,
    }
}

/// Answered / total counts with a rounded percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    pub fn new(answered: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            // round(100 * answered / total), half-up
            ((200 * answered + total) / (2 * total)) as u8
        };

        Self {
            answered,
            total,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.answered == self.total
    }
}
