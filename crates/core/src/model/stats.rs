use serde::{Deserialize, Serialize};

/// Aggregate question stats derived from answer history.
///
/// Consumers treat these as replacement values, never as deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub questions_answered: u32,
    pub correct_answers: u32,
}

impl StudyStats {
    #[must_use]
    pub fn new(questions_answered: u32, correct_answers: u32) -> Self {
        Self {
            questions_answered,
            correct_answers,
        }
    }

    /// Rounded percentage of correct answers, 0 when nothing is answered.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        percent_of(self.correct_answers, self.questions_answered)
    }
}

/// `round(part / whole * 100)`, or 0 for an empty whole.
#[must_use]
pub fn percent_of(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = u64::from(part) * 100;
    let whole = u64::from(whole);
    let rounded = (scaled + whole / 2) / whole;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
