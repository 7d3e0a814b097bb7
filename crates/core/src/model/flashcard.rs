use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{FlashcardId, FolderId};

/// A two-sided memorization card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    id: FlashcardId,
    folder_id: FolderId,
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
}

impl Flashcard {
    pub const QUESTION_PLACEHOLDER: &'static str = "New Flashcard";
    pub const ANSWER_PLACEHOLDER: &'static str = "No answer";

    #[must_use]
    pub fn blank(id: FlashcardId, folder_id: FolderId, now: DateTime<Utc>) -> Self {
        Self::new(id, folder_id, "", "", now)
    }

    #[must_use]
    pub fn new(
        id: FlashcardId,
        folder_id: FolderId,
        question: impl Into<String>,
        answer: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            folder_id,
            question: question.into(),
            answer: answer.into(),
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &FlashcardId {
        &self.id
    }

    #[must_use]
    pub fn folder_id(&self) -> &FolderId {
        &self.folder_id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn edit(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.question = question.into();
        self.answer = answer.into();
    }

    /// Question text for list display, with a placeholder when blank.
    #[must_use]
    pub fn question_label(&self) -> &str {
        if self.question.is_empty() {
            Self::QUESTION_PLACEHOLDER
        } else {
            &self.question
        }
    }

    /// Answer text for list display, with a placeholder when blank.
    #[must_use]
    pub fn answer_label(&self) -> &str {
        if self.answer.is_empty() {
            Self::ANSWER_PLACEHOLDER
        } else {
            &self.answer
        }
    }
}
