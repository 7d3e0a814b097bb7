use study_core::model::{FolderId, Note, Question, QuestionDraft, QuestionId};
use tracing::{debug, info};

use crate::error::{AuthoringError, GenerationError};

/// Turns authoring-form drafts into study questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionAuthoring;

impl QuestionAuthoring {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate `draft` and assign it a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Question` when the draft does not pass
    /// `QuestionDraft::validate`.
    pub fn save(&self, draft: QuestionDraft) -> Result<Question, AuthoringError> {
        let id = QuestionId::generate();
        let question = draft.validate(id)?;
        debug!(
            question = %question.id(),
            folder = %question.folder_id(),
            options = question.option_count(),
            "question authored"
        );
        Ok(question)
    }
}

/// Source of generated questions for a folder.
pub trait QuestionGenerator {
    /// # Errors
    ///
    /// Returns `GenerationError` when the generator cannot produce questions.
    fn generate(&self, folder: &FolderId, notes: &[Note]) -> Result<Vec<Question>, GenerationError>;
}

/// Placeholder for the "generate from notes" action. Never yields questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotesQuestionGenerator;

impl NotesQuestionGenerator {
    pub const UNAVAILABLE_MESSAGE: &'static str =
        "AI question generation would integrate with your notes here!";
}

impl QuestionGenerator for NotesQuestionGenerator {
    fn generate(&self, folder: &FolderId, notes: &[Note]) -> Result<Vec<Question>, GenerationError> {
        info!(folder = %folder, notes = notes.len(), "question generation requested");
        Err(GenerationError::Unavailable(Self::UNAVAILABLE_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::{Difficulty, QuestionError};

    #[test]
    fn save_assigns_fresh_ids() {
        let mut draft = QuestionDraft::new(FolderId::new("science"));
        draft.prompt = "What is H2O?".into();
        draft.options = vec!["Water".into(), "Salt".into()];
        draft.explanation = "Two hydrogens and one oxygen.".into();
        draft.difficulty = Difficulty::Easy;

        let authoring = QuestionAuthoring::new();
        let first = authoring.save(draft.clone()).unwrap();
        let second = authoring.save(draft).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.folder_id().as_str(), "science");
        assert_eq!(first.correct_index(), 0);
    }

    #[test]
    fn save_surfaces_validation_errors() {
        let draft = QuestionDraft::new(FolderId::new("science"));
        let err = QuestionAuthoring::new().save(draft).unwrap_err();
        assert_eq!(err, AuthoringError::Question(QuestionError::EmptyPrompt));
    }

    #[test]
    fn notes_generator_is_unavailable() {
        let err = NotesQuestionGenerator
            .generate(&FolderId::new("math"), &[])
            .unwrap_err();
        assert_eq!(err.to_string(), NotesQuestionGenerator::UNAVAILABLE_MESSAGE);
    }
}
