//! Survey authoring and response model
//!
//! The survey state container is split into a plain snapshot type
//! ([`Survey`]) and a store ([`SurveyStore`]) that owns the current snapshot
//! and is the only way to change it. Every store operation produces a new
//! snapshot; readers hold on to an `Arc<Survey>` and never observe a partial
//! edit.

pub mod document;
pub mod draft;
pub mod error;
pub mod ids;
pub mod model;
pub mod payload;
pub mod responses;
pub mod store;

pub use document::{OutlineEntry, Survey};
pub use error::{SurveyError, SurveyResult};
pub use ids::ItemId;
pub use model::{
    Answer, ChoiceOption, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS, Mode, Question, QuestionKind,
};
pub use payload::{PayloadError, PayloadQuestion, SurveyPayload};
pub use responses::{Progress, ResponseMap};
pub use store::{GenerationTicket, SurveyStore};
