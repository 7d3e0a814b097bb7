use study_core::Clock;
use study_core::model::{FlashcardId, FolderId, NoteId, Question, QuestionDraft, QuestionId};
use tracing::debug;

use crate::error::{AuthoringError, FolderListError, GenerationError};
use crate::flashcards::FlashcardDeck;
use crate::folders::FolderList;
use crate::notes::NoteBook;
use crate::questions::{NotesQuestionGenerator, QuestionAuthoring, QuestionGenerator};
use crate::sessions::{AnswerFeedback, StudySession};
use crate::stats::{DashboardSnapshot, SharedDashboard};
use crate::starter_content;

/// Everything one study workspace holds in memory.
///
/// The folder list drives the question session, and every note, flashcard
/// or answer change is reflected in the shared dashboard.
#[derive(Debug)]
pub struct StudyApp {
    clock: Clock,
    folders: FolderList,
    notes: NoteBook,
    flashcards: FlashcardDeck,
    session: StudySession,
    authoring: QuestionAuthoring,
    dashboard: SharedDashboard,
}

impl StudyApp {
    #[must_use]
    pub fn new(
        clock: Clock,
        folders: FolderList,
        notes: NoteBook,
        flashcards: FlashcardDeck,
        questions: Vec<Question>,
    ) -> Self {
        let dashboard = SharedDashboard::default();
        let session =
            StudySession::new(questions, folders.active().clone()).with_sink(dashboard.clone());
        let app = Self {
            clock,
            folders,
            notes,
            flashcards,
            session,
            authoring: QuestionAuthoring::new(),
            dashboard,
        };
        app.refresh_counts();
        app
    }

    /// Default folders plus the sample notes, flashcards and questions.
    #[must_use]
    pub fn with_starter_content(clock: Clock) -> Self {
        Self::new(
            clock,
            FolderList::with_defaults(),
            NoteBook::with_notes(clock, starter_content::notes()),
            FlashcardDeck::with_cards(clock, starter_content::flashcards()),
            starter_content::questions(),
        )
    }

    #[must_use]
    pub fn folders(&self) -> &FolderList {
        &self.folders
    }

    pub fn folders_mut(&mut self) -> &mut FolderList {
        &mut self.folders
    }

    #[must_use]
    pub fn active_folder(&self) -> &FolderId {
        self.folders.active()
    }

    /// Point both the folder list and the question session at `folder`.
    pub fn select_folder(&mut self, folder: impl Into<FolderId>) {
        let folder = folder.into();
        self.folders.select(folder.clone());
        self.session.select_folder(folder);
    }

    /// Delete a folder, following the folder list if it moves the selection.
    ///
    /// # Errors
    ///
    /// Propagates `FolderListError` from [`FolderList::delete`].
    pub fn delete_folder(&mut self, id: &FolderId) -> Result<(), FolderListError> {
        let active = self.folders.delete(id)?.clone();
        if &active != self.session.active_folder() {
            self.session.select_folder(active);
        }
        Ok(())
    }

    //
    // ─── NOTES ─────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn notes(&self) -> &NoteBook {
        &self.notes
    }

    pub fn create_note(&mut self) -> NoteId {
        let id = self.notes.create(self.folders.active());
        self.refresh_counts();
        id
    }

    pub fn save_note(&mut self, id: &NoteId, title: &str, content: &str) -> bool {
        self.notes.save(id, title, content)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> bool {
        let removed = self.notes.delete(id);
        self.refresh_counts();
        removed
    }

    //
    // ─── FLASHCARDS ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn flashcards(&self) -> &FlashcardDeck {
        &self.flashcards
    }

    pub fn flashcards_mut(&mut self) -> &mut FlashcardDeck {
        &mut self.flashcards
    }

    pub fn create_flashcard(&mut self) -> FlashcardId {
        let id = self.flashcards.create(self.folders.active());
        self.refresh_counts();
        id
    }

    pub fn delete_flashcard(&mut self, id: &FlashcardId) -> bool {
        let removed = self.flashcards.delete(id);
        self.refresh_counts();
        removed
    }

    //
    // ─── QUESTIONS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    /// Navigation and option selection go straight to the session.
    pub fn session_mut(&mut self) -> &mut StudySession {
        &mut self.session
    }

    /// Validate an authored draft and make it part of the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError` when the draft is incomplete.
    pub fn add_question(&mut self, draft: QuestionDraft) -> Result<QuestionId, AuthoringError> {
        let question = self.authoring.save(draft)?;
        let id = question.id().clone();
        self.session.append_question(question);
        Ok(id)
    }

    /// Submit the pending answer and count today as a study day.
    pub fn submit_answer(&mut self) -> Option<AnswerFeedback> {
        let feedback = self.session.submit_answer()?;
        let today = self.clock.today();
        self.dashboard.update(|dashboard| dashboard.record_study_day(today));
        Some(feedback)
    }

    /// Ask for questions generated from the active folder's notes.
    ///
    /// # Errors
    ///
    /// Currently always `GenerationError::Unavailable`.
    pub fn generate_questions(&mut self) -> Result<usize, GenerationError> {
        let folder = self.folders.active().clone();
        let notes: Vec<_> = self.notes.list_in_folder(&folder).cloned().collect();
        let generated = NotesQuestionGenerator.generate(&folder, &notes)?;
        let mut added = 0;
        for question in generated {
            if self.session.append_question(question) {
                added += 1;
            }
        }
        Ok(added)
    }

    //
    // ─── DASHBOARD ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn dashboard(&self) -> &SharedDashboard {
        &self.dashboard
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.dashboard.snapshot()
    }

    fn refresh_counts(&self) {
        let notes = self.notes.count();
        let cards = self.flashcards.count();
        self.dashboard.update(|dashboard| {
            dashboard.set_note_count(notes);
            dashboard.set_flashcard_count(cards);
        });
        debug!(notes, flashcards = cards, "dashboard counts refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_clock;

    #[test]
    fn starter_app_counts_content() {
        let app = StudyApp::with_starter_content(fixed_clock());
        let snapshot = app.snapshot();
        assert_eq!(snapshot.note_count, 2);
        assert_eq!(snapshot.flashcard_count, 2);
        assert_eq!(app.active_folder().as_str(), "general");
        assert!(app.session().is_empty());
    }

    #[test]
    fn selecting_folder_drives_session() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        app.select_folder("math");
        assert_eq!(app.folders().active().as_str(), "math");
        assert_eq!(app.session().len(), 2);
    }

    #[test]
    fn submitting_updates_dashboard_and_streak() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        app.select_folder("math");
        app.session_mut().select_option(1);
        let feedback = app.submit_answer().unwrap();
        assert!(feedback.is_correct);

        let snapshot = app.snapshot();
        assert_eq!(snapshot.questions_answered, 1);
        assert_eq!(snapshot.correct_answers, 1);
        assert_eq!(snapshot.study_streak_days, 1);
        assert!(app.submit_answer().is_none());
    }

    #[test]
    fn note_and_flashcard_mutations_refresh_counts() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        let note = app.create_note();
        app.create_flashcard();
        assert_eq!(app.snapshot().note_count, 3);
        assert_eq!(app.snapshot().flashcard_count, 3);

        assert!(app.delete_note(&note));
        assert_eq!(app.snapshot().note_count, 2);
    }

    #[test]
    fn authored_question_joins_active_folder() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        app.select_folder("history");
        let mut draft = QuestionDraft::new(app.active_folder().clone());
        draft.prompt = "When did the Berlin Wall fall?".into();
        draft.options = vec!["1989".into(), "1991".into()];
        draft.explanation = "November 1989.".into();

        let id = app.add_question(draft).unwrap();
        assert_eq!(app.session().current_question().unwrap().id(), &id);
    }

    #[test]
    fn deleting_active_folder_moves_session() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        app.select_folder("science");
        app.delete_folder(&FolderId::new("science")).unwrap();
        assert_eq!(app.active_folder().as_str(), "general");
        assert_eq!(app.session().active_folder().as_str(), "general");
    }

    #[test]
    fn generation_is_unavailable() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        assert!(matches!(
            app.generate_questions(),
            Err(GenerationError::Unavailable(_))
        ));
    }
}
