use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use study_core::model::{FolderId, Question, QuestionId, StudyStats};
use tracing::{debug, info, warn};

use super::progress::SessionProgress;
use super::sink::StatsSink;

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Outcome of a successful `submit_answer` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub stats: StudyStats,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Folder-scoped study session over multiple-choice questions.
///
/// The session owns the full question set and presents the subset whose
/// folder matches the active folder, one question at a time. Every question
/// can be answered exactly once; the answer history survives navigation and
/// folder switches, and aggregate stats are always recomputed from it.
///
/// Misuse (navigating out of range, submitting without a selection,
/// re-submitting, acting on an empty folder) is a silent no-op.
pub struct StudySession {
    questions: Vec<Question>,
    positions: HashMap<QuestionId, usize>,
    active_folder: FolderId,
    view: Vec<usize>,
    current: usize,
    pending: Option<usize>,
    revealed: bool,
    answers: HashMap<QuestionId, usize>,
    sink: Option<Box<dyn StatsSink>>,
}

impl StudySession {
    /// Create a session over `questions` with `folder` active.
    ///
    /// Questions whose id repeats an earlier one are dropped.
    #[must_use]
    pub fn new(questions: Vec<Question>, folder: impl Into<FolderId>) -> Self {
        let mut session = Self {
            questions: Vec::with_capacity(questions.len()),
            positions: HashMap::with_capacity(questions.len()),
            active_folder: folder.into(),
            view: Vec::new(),
            current: 0,
            pending: None,
            revealed: false,
            answers: HashMap::new(),
            sink: None,
        };
        for question in questions {
            session.insert_question(question);
        }
        session.rebuild_view();
        session.arrive();
        session
    }

    /// Attach the sink that receives stats after each submission.
    #[must_use]
    pub fn with_sink(mut self, sink: impl StatsSink + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink(&mut self, sink: impl StatsSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    #[must_use]
    pub fn active_folder(&self) -> &FolderId {
        &self.active_folder
    }

    /// Every question known to the session, across all folders.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions of the active folder, in session order.
    pub fn folder_questions(&self) -> impl Iterator<Item = &Question> {
        self.view.iter().map(|&pos| &self.questions[pos])
    }

    /// Number of questions in the active folder.
    #[must_use]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Position within the active folder; `None` when the folder is empty.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        if self.view.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.view.get(self.current).map(|&pos| &self.questions[pos])
    }

    /// True once the current question has been answered.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Selected option for the current question, committed or not.
    #[must_use]
    pub fn pending_selection(&self) -> Option<usize> {
        self.pending
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.pending.is_some() && !self.revealed
    }

    #[must_use]
    pub fn recorded_answer(&self, id: &QuestionId) -> Option<usize> {
        self.answers.get(id).copied()
    }

    /// Switch the active folder.
    ///
    /// Resets the position to the first question of the new folder and drops
    /// any uncommitted selection. Recorded answers are kept.
    pub fn select_folder(&mut self, folder: impl Into<FolderId>) {
        self.active_folder = folder.into();
        self.rebuild_view();
        self.current = 0;
        self.pending = None;
        self.revealed = false;
        self.arrive();
        debug!(
            folder = %self.active_folder,
            questions = self.view.len(),
            "study session folder selected"
        );
    }

    /// Move to `index` within the active folder.
    ///
    /// Returns `false` (and changes nothing) when `index` is out of range or
    /// already current.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.view.len() || index == self.current {
            return false;
        }
        self.current = index;
        self.arrive();
        true
    }

    pub fn next(&mut self) -> bool {
        match self.current.checked_add(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Choose an option for the current question without committing it.
    ///
    /// Ignored once the question is revealed or when `option` is not one of
    /// its options.
    pub fn select_option(&mut self, option: usize) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if self.revealed || option >= question.option_count() {
            return false;
        }
        self.pending = Some(option);
        true
    }

    /// Commit the pending selection for the current question.
    ///
    /// Writes the answer history exactly once per question, reveals the
    /// question, and publishes the recomputed stats to the sink. Returns
    /// `None` without side effects when there is nothing to submit.
    pub fn submit_answer(&mut self) -> Option<AnswerFeedback> {
        let selected = self.pending?;
        if self.revealed {
            return None;
        }
        let (question_id, correct_index) = {
            let question = self.current_question()?;
            (question.id().clone(), question.correct_index())
        };

        match self.answers.entry(question_id.clone()) {
            Entry::Occupied(_) => return None,
            Entry::Vacant(slot) => {
                slot.insert(selected);
            }
        }
        self.revealed = true;

        let stats = self.stats();
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(stats);
        }

        let is_correct = selected == correct_index;
        info!(
            question = %question_id,
            selected,
            is_correct,
            answered = stats.questions_answered,
            correct = stats.correct_answers,
            "answer submitted"
        );

        Some(AnswerFeedback {
            question_id,
            selected,
            correct_index,
            is_correct,
            stats,
        })
    }

    /// Add a newly authored question.
    ///
    /// A question in the active folder becomes reachable at the end of the
    /// current folder without moving the position. Returns `false` if a
    /// question with the same id already exists.
    pub fn append_question(&mut self, question: Question) -> bool {
        let in_active_folder = question.folder_id() == &self.active_folder;
        let Some(pos) = self.insert_question(question) else {
            return false;
        };
        if in_active_folder {
            let was_empty = self.view.is_empty();
            self.view.push(pos);
            if was_empty {
                self.arrive();
            }
        }
        true
    }

    /// Aggregate stats across every folder, recomputed from answer history.
    #[must_use]
    pub fn stats(&self) -> StudyStats {
        let correct = self
            .answers
            .iter()
            .filter(|(id, selected)| {
                self.positions
                    .get(*id)
                    .is_some_and(|&pos| self.questions[pos].is_correct(**selected))
            })
            .count();
        StudyStats::new(saturating_u32(self.answers.len()), saturating_u32(correct))
    }

    /// Answered and correct counts within the active folder.
    #[must_use]
    pub fn folder_stats(&self) -> StudyStats {
        let mut answered = 0_usize;
        let mut correct = 0_usize;
        for question in self.folder_questions() {
            if let Some(&selected) = self.answers.get(question.id()) {
                answered += 1;
                if question.is_correct(selected) {
                    correct += 1;
                }
            }
        }
        StudyStats::new(saturating_u32(answered), saturating_u32(correct))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        if self.view.is_empty() {
            return SessionProgress::empty();
        }
        let folder = self.folder_stats();
        SessionProgress {
            position: self.current + 1,
            total: self.view.len(),
            answered: folder.questions_answered as usize,
            correct: folder.correct_answers as usize,
        }
    }

    fn insert_question(&mut self, question: Question) -> Option<usize> {
        let pos = self.questions.len();
        match self.positions.entry(question.id().clone()) {
            Entry::Occupied(_) => {
                warn!(question = %question.id(), "ignoring question with duplicate id");
                None
            }
            Entry::Vacant(slot) => {
                slot.insert(pos);
                self.questions.push(question);
                Some(pos)
            }
        }
    }

    fn rebuild_view(&mut self) {
        self.view = self
            .questions
            .iter()
            .enumerate()
            .filter(|(_, question)| question.folder_id() == &self.active_folder)
            .map(|(pos, _)| pos)
            .collect();
    }

    fn arrive(&mut self) {
        let recorded = self
            .current_question()
            .and_then(|question| self.answers.get(question.id()).copied());
        self.pending = recorded;
        self.revealed = recorded.is_some();
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("active_folder", &self.active_folder)
            .field("questions_len", &self.questions.len())
            .field("view_len", &self.view.len())
            .field("current", &self.current)
            .field("pending", &self.pending)
            .field("revealed", &self.revealed)
            .field("answers_len", &self.answers.len())
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
