mod controller;
mod progress;
mod sink;

// Public API of the study-session subsystem.
pub use controller::{AnswerFeedback, StudySession};
pub use progress::SessionProgress;
pub use sink::StatsSink;
