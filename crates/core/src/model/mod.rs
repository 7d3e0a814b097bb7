mod flashcard;
mod folder;
mod ids;
mod note;
mod question;
mod stats;
mod subscription;

pub use ids::{FlashcardId, FolderId, NoteId, ParseIdError, QuestionId};

pub use flashcard::Flashcard;
pub use folder::{Folder, FolderError};
pub use note::Note;
pub use question::{Difficulty, Question, QuestionDraft, QuestionError};
pub use stats::{StudyStats, percent_of};
pub use subscription::{ParseTierError, SubscriptionTier};
