use super::document::Survey;
use super::error::SurveyResult;
use super::ids::ItemId;
use super::model::{Answer, Mode, Question, QuestionKind};
use super::payload::SurveyPayload;
use arc_swap::ArcSwap;
use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handle for one in-flight generation request.
///
/// Only the most recently issued ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Single source of truth for survey state.
///
/// The current snapshot lives in an `ArcSwap`, so reads are lock-free and
/// always see a complete snapshot. Writes clone the snapshot, apply one edit
/// and publish the result; a mutex keeps concurrent writers from dropping
/// each other's edits.
pub struct SurveyStore {
    current: ArcSwap<Survey>,
    write_lock: Mutex<()>,
    generation: AtomicU64,
}

impl Default for SurveyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyStore {
    pub fn new() -> Self {
        Self::from_survey(Survey::new())
    }

    pub fn from_survey(survey: Survey) -> Self {
        Self {
            current: ArcSwap::from_pointee(survey),
            write_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<Survey> {
        self.current.load_full()
    }

    fn try_update<T>(
        &self,
        op: &str,
        edit: impl FnOnce(&mut Survey) -> SurveyResult<T>,
    ) -> SurveyResult<T> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = Survey::clone(&self.current.load());
        let result = edit(&mut next);
        match &result {
            Ok(_) => {
                debug!("Survey store: {}", op);
                self.current.store(Arc::new(next));
            }
            Err(e) => debug!("Survey store: {} rejected: {}", op, e),
        }
        result
    }

    fn update<T>(&self, op: &str, edit: impl FnOnce(&mut Survey) -> T) -> T {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = Survey::clone(&self.current.load());
        let value = edit(&mut next);
        debug!("Survey store: {}", op);
        self.current.store(Arc::new(next));
        value
    }

    pub fn set_title(&self, title: &str) {
        self.update("set title", |s| s.set_title(title));
    }

    pub fn set_description(&self, description: &str) {
        self.update("set description", |s| s.set_description(description));
    }

    /// Append a new question, returning its id
    pub fn add_question(&self, kind: QuestionKind) -> ItemId {
        self.update("add question", |s| s.add_question(kind))
    }

    pub fn set_question_title(&self, index: usize, title: &str) -> SurveyResult<()> {
        self.try_update("set question title", |s| s.set_question_title(index, title))
    }

    pub fn set_question_type(&self, index: usize, kind: QuestionKind) -> SurveyResult<()> {
        self.try_update("set question type", |s| s.set_question_kind(index, kind))
    }

    pub fn set_option_text(
        &self,
        question_index: usize,
        option_index: usize,
        text: &str,
    ) -> SurveyResult<()> {
        self.try_update("set option text", |s| {
            s.set_option_text(question_index, option_index, text)
        })
    }

    pub fn add_option(&self, question_index: usize) -> SurveyResult<ItemId> {
        self.try_update("add option", |s| s.add_option(question_index))
    }

    pub fn delete_option(&self, question_index: usize, option_index: usize) -> SurveyResult<()> {
        self.try_update("delete option", |s| s.delete_option(question_index, option_index))
    }

    pub fn duplicate_question(&self, index: usize) -> SurveyResult<ItemId> {
        self.try_update("duplicate question", |s| s.duplicate_question(index))
    }

    pub fn delete_question(&self, index: usize) -> SurveyResult<Question> {
        self.try_update("delete question", |s| s.delete_question(index))
    }

    pub fn toggle_saved(&self, index: usize, saved: bool) -> SurveyResult<()> {
        self.try_update("toggle saved", |s| s.set_saved(index, saved))
    }

    pub fn reorder(&self, from: usize, to: usize) -> SurveyResult<()> {
        if from == to {
            return Ok(());
        }
        self.try_update("reorder", |s| s.reorder(from, to))
    }

    /// Replace title, description and questions from a sanitized payload
    pub fn load_from_payload(&self, payload: SurveyPayload) {
        self.update("load from payload", |s| s.load_payload(payload));
    }

    pub fn set_mode(&self, mode: Mode) {
        self.update("set mode", |s| s.set_mode(mode));
    }

    pub fn set_answer(&self, question_id: ItemId, answer: Answer) {
        self.update("set answer", |s| s.set_answer(question_id, answer));
    }

    pub fn toggle_choice(&self, question_id: &ItemId, text: &str, checked: bool) {
        self.update("toggle choice", |s| s.toggle_choice(question_id, text, checked));
    }

    pub fn reset_answers(&self) {
        self.update("reset answers", |s| s.reset_answers());
    }

    /// Clear title, description, questions, mode and responses in one step
    pub fn reset_survey(&self) {
        self.update("reset survey", |s| s.reset());
    }

    /// Start a generation request; any earlier ticket becomes stale
    pub fn begin_generation(&self) -> GenerationTicket {
        GenerationTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply a generated draft if `ticket` is still the latest one.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn finish_generation(&self, ticket: GenerationTicket, payload: SurveyPayload) -> bool {
        // The ticket is compared under the write lock so a newer result
        // applied in between cannot be overwritten.
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let latest = self.generation.load(Ordering::SeqCst);
        if ticket.0 != latest {
            warn!(
                "Discarding stale generation result #{} (latest is #{})",
                ticket.0, latest
            );
            return false;
        }

        let mut next = Survey::clone(&self.current.load());
        next.load_payload(payload);
        debug!("Survey store: apply generation result #{}", ticket.0);
        self.current.store(Arc::new(next));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshots_are_immutable() {
        let store = SurveyStore::new();
        let before = store.snapshot();
        store.add_question(QuestionKind::Scale);
        let after = store.snapshot();

        assert!(before.questions().is_empty());
        assert_eq!(after.questions().len(), 1);
    }

    #[test]
    fn test_failed_edit_keeps_snapshot() {
        let store = SurveyStore::new();
        store.add_question(QuestionKind::Scale);
        let before = store.snapshot();

        assert!(store.set_question_title(5, "nope").is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let store = SurveyStore::new();
        let first = store.begin_generation();
        let second = store.begin_generation();

        let newer = SurveyPayload {
            title: Some("Newer".into()),
            ..Default::default()
        };
        let older = SurveyPayload {
            title: Some("Older".into()),
            ..Default::default()
        };

        assert!(store.finish_generation(second, newer));
        assert!(!store.finish_generation(first, older));
        assert_eq!(store.snapshot().title(), "Newer");
    }

    #[test]
    fn test_ticket_checked_after_waiting_for_writer() {
        let store = Arc::new(SurveyStore::new());
        let first = store.begin_generation();

        let guard = store.write_lock.lock().unwrap();
        let pending = {
            let store = store.clone();
            std::thread::spawn(move || {
                let payload = SurveyPayload {
                    title: Some("Older".into()),
                    ..Default::default()
                };
                store.finish_generation(first, payload)
            })
        };
        // A newer request starts while the first result waits for the lock
        let second = store.begin_generation();
        drop(guard);

        assert!(!pending.join().unwrap());
        assert_eq!(store.snapshot().title(), "");

        let newer = SurveyPayload {
            title: Some("Newer".into()),
            ..Default::default()
        };
        assert!(store.finish_generation(second, newer));
        assert_eq!(store.snapshot().title(), "Newer");
    }
}
