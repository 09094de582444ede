use thiserror::Error;

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Rejections raised by survey state operations.
///
/// A failed operation never changes the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    #[error("question index {index} is out of range (survey has {len} questions)")]
    QuestionIndex { index: usize, len: usize },
    #[error("option index {index} is out of range (question {question} has {len} options)")]
    OptionIndex {
        question: usize,
        index: usize,
        len: usize,
    },
    #[error("question {index} is locked; unlock it before editing")]
    Locked { index: usize },
    #[error("question {index} is not a choice question")]
    NotChoice { index: usize },
    #[error("question {index} needs at least one option before it can be locked")]
    NoOptions { index: usize },
    #[error("Please answer all questions before submitting ({answered}/{total} answered)")]
    Incomplete { answered: usize, total: usize },
}
