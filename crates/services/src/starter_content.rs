//! Sample notes, flashcards and questions shown on first launch.

use chrono::{DateTime, NaiveDate, Utc};
use study_core::model::{
    Difficulty, Flashcard, FlashcardId, FolderId, Note, NoteId, Question, QuestionId,
};
use tracing::warn;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

#[must_use]
pub fn notes() -> Vec<Note> {
    vec![
        Note::from_parts(
            NoteId::new("1"),
            FolderId::new("math"),
            "Introduction to Calculus",
            "Calculus is the mathematical study of continuous change. It has two main \
             branches: differential calculus and integral calculus.",
            date(2024, 1, 15),
            date(2024, 1, 15),
        ),
        Note::from_parts(
            NoteId::new("2"),
            FolderId::new("science"),
            "Newton's Laws of Motion",
            "First Law: An object at rest stays at rest and an object in motion stays in \
             motion unless acted upon by an unbalanced force.",
            date(2024, 1, 14),
            date(2024, 1, 16),
        ),
    ]
}

#[must_use]
pub fn flashcards() -> Vec<Flashcard> {
    vec![
        Flashcard::new(
            FlashcardId::new("1"),
            FolderId::new("math"),
            "What is the derivative of x²?",
            "The derivative of x² is 2x",
            date(2024, 1, 15),
        ),
        Flashcard::new(
            FlashcardId::new("2"),
            FolderId::new("science"),
            "State Newton's First Law of Motion",
            "An object at rest stays at rest and an object in motion stays in motion \
             unless acted upon by an unbalanced force.",
            date(2024, 1, 14),
        ),
    ]
}

struct Sample {
    id: &'static str,
    folder: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
    explanation: &'static str,
    difficulty: Difficulty,
}

const QUESTIONS: [Sample; 3] = [
    Sample {
        id: "1",
        folder: "math",
        prompt: "What is the limit of (sin x)/x as x approaches 0?",
        options: ["0", "1", "∞", "Does not exist"],
        correct: 1,
        explanation: "This is a fundamental limit in calculus. As x approaches 0, \
                      (sin x)/x approaches 1.",
        difficulty: Difficulty::Medium,
    },
    Sample {
        id: "2",
        folder: "science",
        prompt: "Which of Newton's laws describes the relationship between force, mass, \
                 and acceleration?",
        options: ["First Law", "Second Law", "Third Law", "Law of Gravitation"],
        correct: 1,
        explanation: "Newton's Second Law states that F = ma, describing the relationship \
                      between force, mass, and acceleration.",
        difficulty: Difficulty::Easy,
    },
    Sample {
        id: "3",
        folder: "math",
        prompt: "What is the derivative of e^x?",
        options: ["e^x", "x·e^(x-1)", "ln(x)", "1/x"],
        correct: 0,
        explanation: "The derivative of e^x is e^x itself, which is one of the unique \
                      properties of the exponential function.",
        difficulty: Difficulty::Easy,
    },
];

#[must_use]
pub fn questions() -> Vec<Question> {
    QUESTIONS
        .iter()
        .filter_map(|sample| {
            Question::new(
                QuestionId::new(sample.id),
                FolderId::new(sample.folder),
                sample.prompt,
                sample.options.iter().map(|opt| (*opt).to_string()).collect(),
                sample.correct,
                sample.explanation,
                sample.difficulty,
            )
            .inspect_err(|err| warn!(id = sample.id, error = %err, "skipping starter question"))
            .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_starter_question_is_valid() {
        let questions = questions();
        assert_eq!(questions.len(), 3);
        let math = questions
            .iter()
            .filter(|q| q.folder_id().as_str() == "math")
            .count();
        assert_eq!(math, 2);
    }

    #[test]
    fn starter_notes_keep_their_dates() {
        let notes = notes();
        assert_eq!(notes[1].updated_at(), date(2024, 1, 16));
        assert!(notes[0].created_at() > notes[1].created_at());
    }

    #[test]
    fn starter_flashcards_span_two_folders() {
        let cards = flashcards();
        assert_eq!(cards.len(), 2);
        assert_ne!(cards[0].folder_id(), cards[1].folder_id());
    }
}
