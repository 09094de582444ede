use super::ids::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum survey title length, in characters
pub const MAX_TITLE_CHARS: usize = 120;

/// Maximum survey description length, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Closed set of question types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    OpenQuestion,
    ShortAnswer,
    /// Numeric scale, 1 to 10
    Scale,
    /// Net promoter score, 0 to 10
    NpsScore,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 6] = [
        QuestionKind::SingleChoice,
        QuestionKind::MultipleChoice,
        QuestionKind::OpenQuestion,
        QuestionKind::ShortAnswer,
        QuestionKind::Scale,
        QuestionKind::NpsScore,
    ];

    /// Wire name used by the generation endpoint and draft files
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "singleChoice",
            QuestionKind::MultipleChoice => "multipleChoice",
            QuestionKind::OpenQuestion => "openQuestion",
            QuestionKind::ShortAnswer => "shortAnswer",
            QuestionKind::Scale => "scale",
            QuestionKind::NpsScore => "npsScore",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "Single choice",
            QuestionKind::MultipleChoice => "Multiple choice",
            QuestionKind::OpenQuestion => "Open question",
            QuestionKind::ShortAnswer => "Short answer",
            QuestionKind::Scale => "Scale (1-10)",
            QuestionKind::NpsScore => "NPS (0-10)",
        }
    }

    /// Choice questions carry an option list
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultipleChoice)
    }

    /// Inclusive answer range for the numeric types
    pub fn score_range(&self) -> Option<(i64, i64)> {
        match self {
            QuestionKind::Scale => Some((1, 10)),
            QuestionKind::NpsScore => Some((0, 10)),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = QuestionKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown question type '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: ItemId,
    pub text: String,
}

impl ChoiceOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::fresh(),
            text: text.into(),
        }
    }

    /// Placeholder option text for the given zero-based position
    pub fn placeholder(position: usize) -> Self {
        Self::new(format!("Option {}", position + 1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Locked questions are read-only while editing
    #[serde(default)]
    pub saved: bool,
}

impl Question {
    /// New unlocked question with type-appropriate default options
    pub fn new(kind: QuestionKind) -> Self {
        let options = if kind.is_choice() {
            vec![ChoiceOption::placeholder(0), ChoiceOption::placeholder(1)]
        } else {
            Vec::new()
        };

        Self {
            id: ItemId::fresh(),
            kind,
            title: String::new(),
            options,
            saved: false,
        }
    }

    /// Deep copy with fresh ids for the question and every option, unlocked
    pub fn duplicate(&self) -> Self {
        Self {
            id: ItemId::fresh(),
            kind: self.kind,
            title: self.title.clone(),
            options: self
                .options
                .iter()
                .map(|option| ChoiceOption::new(option.text.clone()))
                .collect(),
            saved: false,
        }
    }

    /// Change type, re-deriving the option list
    pub(crate) fn change_kind(&mut self, kind: QuestionKind) {
        self.kind = kind;
        if kind.is_choice() {
            if self.options.is_empty() {
                self.options.push(ChoiceOption::placeholder(0));
            }
        } else {
            self.options.clear();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Edit,
    Respond,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Edit => f.write_str("edit"),
            Mode::Respond => f.write_str("respond"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit" => Ok(Mode::Edit),
            "respond" => Ok(Mode::Respond),
            other => Err(format!("unknown mode '{}' (expected edit or respond)", other)),
        }
    }
}

/// One answer value; its shape depends on the question type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Single-choice selection, short answer or open text
    Text(String),
    /// Multiple-choice selections
    Choices(Vec<String>),
    /// Scale or NPS score
    Number(i64),
}

/// Cut `value` down to at most `max` characters
pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((byte_index, _)) => value[..byte_index].to_string(),
        None => value.to_string(),
    }
}
