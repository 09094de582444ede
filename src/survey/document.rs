use super::error::{SurveyError, SurveyResult};
use super::ids::ItemId;
use super::model::{
    Answer, ChoiceOption, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS, Mode, Question, QuestionKind,
    truncate_chars,
};
use super::payload::{PayloadQuestion, SurveyPayload};
use super::responses::{Progress, ResponseMap, is_answered};
use serde::{Deserialize, Serialize};

const UNTITLED_SURVEY: &str = "Untitled Survey";
const UNTITLED_QUESTION: &str = "Untitled question";

/// One snapshot of a survey: content, mode and collected answers.
///
/// Snapshots are handed out as `Arc<Survey>` by
/// [`SurveyStore`](super::SurveyStore) and are never edited after that; the
/// mutators below are only called on the store's private working copy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Survey {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    mode: Mode,
    #[serde(default)]
    responses: ResponseMap,
}

/// Sidebar-style entry for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub position: usize,
    pub id: ItemId,
    pub title: String,
    pub kind: QuestionKind,
    pub saved: bool,
    pub answered: bool,
}

impl Survey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title for display, with a placeholder when empty
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_SURVEY
        } else {
            &self.title
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn answer(&self, id: &ItemId) -> Option<&Answer> {
        self.responses.get(id)
    }

    pub fn is_question_answered(&self, question: &Question) -> bool {
        is_answered(question, self.responses.get(&question.id))
    }

    pub fn progress(&self) -> Progress {
        let answered = self
            .questions
            .iter()
            .filter(|q| self.is_question_answered(q))
            .count();
        Progress::new(answered, self.questions.len())
    }

    pub fn is_complete(&self) -> bool {
        self.progress().is_complete()
    }

    /// The response map, if every question is answered
    pub fn validate_submission(&self) -> SurveyResult<&ResponseMap> {
        let progress = self.progress();
        if progress.is_complete() {
            Ok(&self.responses)
        } else {
            Err(SurveyError::Incomplete {
                answered: progress.answered,
                total: progress.total,
            })
        }
    }

    /// 1-based positions of choice questions left with no options to pick
    pub fn unanswerable_questions(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.kind.is_choice() && q.options.is_empty())
            .map(|(index, _)| index + 1)
            .collect()
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, q)| OutlineEntry {
                position: index + 1,
                id: q.id.clone(),
                title: if q.title.is_empty() {
                    UNTITLED_QUESTION.to_string()
                } else {
                    q.title.clone()
                },
                kind: q.kind,
                saved: q.saved,
                answered: self.is_question_answered(q),
            })
            .collect()
    }

    /// Best-effort export in the generation payload shape
    pub fn to_payload(&self) -> SurveyPayload {
        SurveyPayload {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            questions: self
                .questions
                .iter()
                .map(|q| PayloadQuestion {
                    kind: q.kind,
                    title: q.title.clone(),
                    options: q.options.iter().map(|o| o.text.clone()).collect(),
                })
                .collect(),
        }
    }

    // Mutators. Each one validates before touching anything so a failed
    // call leaves the working copy as it was.

    pub(crate) fn set_title(&mut self, title: &str) {
        self.title = truncate_chars(title, MAX_TITLE_CHARS);
    }

    pub(crate) fn set_description(&mut self, description: &str) {
        self.description = truncate_chars(description, MAX_DESCRIPTION_CHARS);
    }

    pub(crate) fn add_question(&mut self, kind: QuestionKind) -> ItemId {
        let question = Question::new(kind);
        let id = question.id.clone();
        self.questions.push(question);
        id
    }

    pub(crate) fn set_question_title(&mut self, index: usize, title: &str) -> SurveyResult<()> {
        self.editable_question(index)?.title = title.to_string();
        Ok(())
    }

    pub(crate) fn set_question_kind(&mut self, index: usize, kind: QuestionKind) -> SurveyResult<()> {
        self.editable_question(index)?.change_kind(kind);
        Ok(())
    }

    pub(crate) fn set_option_text(
        &mut self,
        question_index: usize,
        option_index: usize,
        text: &str,
    ) -> SurveyResult<()> {
        let question = self.editable_question(question_index)?;
        let len = question.options.len();
        let option = question
            .options
            .get_mut(option_index)
            .ok_or(SurveyError::OptionIndex {
                question: question_index,
                index: option_index,
                len,
            })?;
        option.text = text.to_string();
        Ok(())
    }

    pub(crate) fn add_option(&mut self, question_index: usize) -> SurveyResult<ItemId> {
        let question = self.editable_question(question_index)?;
        if !question.kind.is_choice() {
            return Err(SurveyError::NotChoice {
                index: question_index,
            });
        }
        let option = ChoiceOption::placeholder(question.options.len());
        let id = option.id.clone();
        question.options.push(option);
        Ok(id)
    }

    pub(crate) fn delete_option(&mut self, question_index: usize, option_index: usize) -> SurveyResult<()> {
        let question = self.editable_question(question_index)?;
        if option_index >= question.options.len() {
            return Err(SurveyError::OptionIndex {
                question: question_index,
                index: option_index,
                len: question.options.len(),
            });
        }
        question.options.remove(option_index);
        Ok(())
    }

    pub(crate) fn duplicate_question(&mut self, index: usize) -> SurveyResult<ItemId> {
        let copy = self.question_at(index)?.duplicate();
        let id = copy.id.clone();
        self.questions.insert(index + 1, copy);
        Ok(id)
    }

    pub(crate) fn delete_question(&mut self, index: usize) -> SurveyResult<Question> {
        self.question_at(index)?;
        let removed = self.questions.remove(index);
        self.responses.remove(&removed.id);
        Ok(removed)
    }

    pub(crate) fn set_saved(&mut self, index: usize, saved: bool) -> SurveyResult<()> {
        let question = self.question_at_mut(index)?;
        if saved && question.kind.is_choice() && question.options.is_empty() {
            return Err(SurveyError::NoOptions { index });
        }
        question.saved = saved;
        Ok(())
    }

    pub(crate) fn reorder(&mut self, from: usize, to: usize) -> SurveyResult<()> {
        if from == to {
            return Ok(());
        }
        self.question_at(from)?;
        self.question_at(to)?;
        let moved = self.questions.remove(from);
        self.questions.insert(to, moved);
        Ok(())
    }

    /// Replace content with an imported draft and switch to respond mode
    pub(crate) fn load_payload(&mut self, payload: SurveyPayload) {
        if let Some(title) = payload.title.filter(|t| !t.is_empty()) {
            self.set_title(&title);
        }
        self.set_description(payload.description.as_deref().unwrap_or_default());

        self.questions = payload
            .questions
            .into_iter()
            .map(|incoming| {
                let mut options: Vec<ChoiceOption> =
                    incoming.options.into_iter().map(ChoiceOption::new).collect();
                if incoming.kind.is_choice() && options.is_empty() {
                    options.push(ChoiceOption::placeholder(0));
                }
                if !incoming.kind.is_choice() {
                    options.clear();
                }
                Question {
                    id: ItemId::fresh(),
                    kind: incoming.kind,
                    title: incoming.title,
                    options,
                    saved: true,
                }
            })
            .collect();

        self.responses.clear();
        self.mode = Mode::Respond;
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.responses.clear();
        }
    }

    pub(crate) fn set_answer(&mut self, id: ItemId, answer: Answer) {
        self.responses.insert(id, answer);
    }

    /// Add or remove one multiple-choice selection
    pub(crate) fn toggle_choice(&mut self, id: &ItemId, text: &str, checked: bool) {
        let mut selected = match self.responses.remove(id) {
            Some(Answer::Choices(current)) => current,
            _ => Vec::new(),
        };
        if checked {
            if !selected.iter().any(|s| s == text) {
                selected.push(text.to_string());
            }
        } else {
            selected.retain(|s| s != text);
        }
        self.responses.insert(id.clone(), Answer::Choices(selected));
    }

    pub(crate) fn reset_answers(&mut self) {
        self.responses.clear();
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn question_at(&self, index: usize) -> SurveyResult<&Question> {
        self.questions.get(index).ok_or(SurveyError::QuestionIndex {
            index,
            len: self.questions.len(),
        })
    }

    fn question_at_mut(&mut self, index: usize) -> SurveyResult<&mut Question> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(SurveyError::QuestionIndex { index, len })
    }

    fn editable_question(&mut self, index: usize) -> SurveyResult<&mut Question> {
        let question = self.question_at_mut(index)?;
        if question.saved {
            return Err(SurveyError::Locked { index });
        }
        Ok(question)
    }
}
