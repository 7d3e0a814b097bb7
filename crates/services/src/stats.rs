use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use serde::Serialize;
use study_core::model::{StudyStats, percent_of};

use crate::sessions::StatsSink;

/// Weekly target for answered questions.
pub const WEEKLY_QUESTION_GOAL: u32 = 50;
/// Weekly target for created notes.
pub const WEEKLY_NOTE_GOAL: u32 = 10;
/// Weekly target for reviewed flashcards.
pub const WEEKLY_FLASHCARD_GOAL: u32 = 20;

/// One capped progress bar on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub label: &'static str,
    pub done: u32,
    pub goal: u32,
}

impl GoalProgress {
    fn capped(label: &'static str, count: u32, goal: u32) -> Self {
        Self {
            label,
            done: count.min(goal),
            goal,
        }
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        percent_of(self.done, self.goal)
    }
}

/// Plain snapshot of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub note_count: u32,
    pub flashcard_count: u32,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub accuracy_percent: u32,
    pub accuracy_trend: i8,
    pub weekly_progress_percent: u32,
    pub study_streak_days: u32,
    pub goals: [GoalProgress; 3],
}

/// Study overview counters and the arithmetic derived from them.
#[derive(Debug, Clone, Default)]
pub struct StatsDashboard {
    note_count: u32,
    flashcard_count: u32,
    study: StudyStats,
    study_days: BTreeSet<NaiveDate>,
}

impl StatsDashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_note_count(&mut self, count: usize) {
        self.note_count = u32::try_from(count).unwrap_or(u32::MAX);
    }

    pub fn set_flashcard_count(&mut self, count: usize) {
        self.flashcard_count = u32::try_from(count).unwrap_or(u32::MAX);
    }

    /// Replace the question counters with the latest aggregate.
    pub fn set_study_stats(&mut self, stats: StudyStats) {
        self.study = stats;
    }

    pub fn record_study_day(&mut self, day: NaiveDate) {
        self.study_days.insert(day);
    }

    #[must_use]
    pub fn note_count(&self) -> u32 {
        self.note_count
    }

    #[must_use]
    pub fn flashcard_count(&self) -> u32 {
        self.flashcard_count
    }

    #[must_use]
    pub fn study_stats(&self) -> StudyStats {
        self.study
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        self.study.accuracy_percent()
    }

    /// Trend badge: +5 at 70% accuracy or better, -3 otherwise.
    #[must_use]
    pub fn accuracy_trend(&self) -> i8 {
        if self.accuracy_percent() >= 70 { 5 } else { -3 }
    }

    /// Answered questions against the weekly goal. Not capped at 100.
    #[must_use]
    pub fn weekly_progress_percent(&self) -> u32 {
        percent_of(self.study.questions_answered, WEEKLY_QUESTION_GOAL)
    }

    /// Consecutive study days ending at the most recent recorded day.
    #[must_use]
    pub fn study_streak_days(&self) -> u32 {
        let mut days = self.study_days.iter().rev();
        let Some(mut expected) = days.next().copied() else {
            return 0;
        };
        let mut streak = 1_u32;
        for day in days {
            let Some(prev) = expected.pred_opt() else {
                break;
            };
            if *day != prev {
                break;
            }
            streak = streak.saturating_add(1);
            expected = prev;
        }
        streak
    }

    #[must_use]
    pub fn goals(&self) -> [GoalProgress; 3] {
        [
            GoalProgress::capped("Notes Created", self.note_count, WEEKLY_NOTE_GOAL),
            GoalProgress::capped(
                "Flashcards Reviewed",
                self.flashcard_count,
                WEEKLY_FLASHCARD_GOAL,
            ),
            GoalProgress::capped(
                "Questions Answered",
                self.study.questions_answered,
                WEEKLY_QUESTION_GOAL,
            ),
        ]
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            note_count: self.note_count,
            flashcard_count: self.flashcard_count,
            questions_answered: self.study.questions_answered,
            correct_answers: self.study.correct_answers,
            accuracy_percent: self.accuracy_percent(),
            accuracy_trend: self.accuracy_trend(),
            weekly_progress_percent: self.weekly_progress_percent(),
            study_streak_days: self.study_streak_days(),
            goals: self.goals(),
        }
    }
}

impl StatsSink for StatsDashboard {
    fn publish(&mut self, stats: StudyStats) {
        self.set_study_stats(stats);
    }
}

/// Cloneable handle so the session and the app can share one dashboard.
#[derive(Debug, Clone, Default)]
pub struct SharedDashboard(Arc<Mutex<StatsDashboard>>);

impl SharedDashboard {
    #[must_use]
    pub fn new(dashboard: StatsDashboard) -> Self {
        Self(Arc::new(Mutex::new(dashboard)))
    }

    /// Run `f` with exclusive access to the dashboard.
    pub fn update<R>(&self, f: impl FnOnce(&mut StatsDashboard) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.update(|dashboard| dashboard.snapshot())
    }
}

impl StatsSink for SharedDashboard {
    fn publish(&mut self, stats: StudyStats) {
        self.update(|dashboard| dashboard.publish(stats));
    }
}
