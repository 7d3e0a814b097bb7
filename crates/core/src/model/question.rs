use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{FolderId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("answer option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("explanation cannot be empty")]
    EmptyExplanation,

    #[error("a question needs at least one answer option")]
    NoOptions,

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuestionError::UnknownDifficulty(other.to_string())),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice study question.
///
/// Questions are immutable once built; `correct_index` is always a valid
/// index into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
    difficulty: Difficulty,
    folder_id: FolderId,
}

impl Question {
    /// Builds a question, enforcing the correct-index bounds.
    ///
    /// Text fields are taken as-is; use [`QuestionDraft::validate`] for
    /// trimming and non-empty checks.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoOptions` when `options` is empty and
    /// `QuestionError::CorrectIndexOutOfRange` when `correct_index` is not a
    /// valid index into `options`.
    pub fn new(
        id: QuestionId,
        folder_id: FolderId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt: prompt.into(),
            options,
            correct_index,
            explanation: explanation.into(),
            difficulty,
            folder_id,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn folder_id(&self) -> &FolderId {
        &self.folder_id
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Editable question as captured by the authoring form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub folder_id: FolderId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl QuestionDraft {
    /// Number of option slots the authoring form starts with.
    pub const DEFAULT_OPTION_SLOTS: usize = 4;

    /// Blank draft with four empty options, first option marked correct.
    #[must_use]
    pub fn new(folder_id: FolderId) -> Self {
        Self {
            folder_id,
            prompt: String::new(),
            options: vec![String::new(); Self::DEFAULT_OPTION_SLOTS],
            correct_index: 0,
            explanation: String::new(),
            difficulty: Difficulty::default(),
        }
    }

    /// True when every required field has non-blank text.
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.prompt.trim().is_empty()
            && !self.options.is_empty()
            && self.options.iter().all(|opt| !opt.trim().is_empty())
            && !self.explanation.trim().is_empty()
    }

    /// Trim and validate into a `Question` with the given id.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found: blank prompt, no options,
    /// blank option, blank explanation, or an out-of-range correct index.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut options = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.into_iter().enumerate() {
            let trimmed = option.trim();
            if trimmed.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            options.push(trimmed.to_string());
        }

        let explanation = self.explanation.trim().to_string();
        if explanation.is_empty() {
            return Err(QuestionError::EmptyExplanation);
        }

        Question::new(
            id,
            self.folder_id,
            prompt,
            options,
            self.correct_index,
            explanation,
            self.difficulty,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> QuestionDraft {
        QuestionDraft {
            folder_id: FolderId::new("math"),
            prompt: "  What is the derivative of e^x? ".into(),
            options: vec!["e^x".into(), " x ".into(), "ln(x)".into(), "1/x".into()],
            correct_index: 0,
            explanation: "e^x is its own derivative.".into(),
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn question_rejects_out_of_range_correct_index() {
        let err = Question::new(
            QuestionId::new("1"),
            FolderId::new("math"),
            "Q",
            vec!["a".into(), "b".into()],
            2,
            "because",
            Difficulty::Medium,
        )
        .unwrap_err();

        assert_eq!(err, QuestionError::CorrectIndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn question_rejects_empty_options() {
        let err = Question::new(
            QuestionId::new("1"),
            FolderId::new("math"),
            "Q",
            Vec::new(),
            0,
            "because",
            Difficulty::Medium,
        )
        .unwrap_err();

        assert_eq!(err, QuestionError::NoOptions);
    }

    #[test]
    fn draft_trims_fields() {
        let question = filled_draft().validate(QuestionId::new("q")).unwrap();
        assert_eq!(question.prompt(), "What is the derivative of e^x?");
        assert_eq!(question.options()[1], "x");
        assert!(question.is_correct(0));
        assert!(!question.is_correct(1));
    }

    #[test]
    fn draft_reports_blank_option_index() {
        let mut draft = filled_draft();
        draft.options[2] = "   ".into();
        let err = draft.validate(QuestionId::new("q")).unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption { index: 2 });
    }

    #[test]
    fn draft_requires_explanation() {
        let mut draft = filled_draft();
        draft.explanation = String::new();
        assert!(!draft.can_save());
        assert_eq!(
            draft.validate(QuestionId::new("q")).unwrap_err(),
            QuestionError::EmptyExplanation
        );
    }

    #[test]
    fn new_draft_matches_authoring_defaults() {
        let draft = QuestionDraft::new(FolderId::new("general"));
        assert_eq!(draft.options.len(), 4);
        assert_eq!(draft.correct_index, 0);
        assert_eq!(draft.difficulty, Difficulty::Medium);
        assert!(!draft.can_save());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
