#![forbid(unsafe_code)]

pub mod app_services;
pub mod app_state;
pub mod checkout;
pub mod error;
pub mod flashcards;
pub mod folders;
pub mod notes;
pub mod questions;
pub mod sessions;
pub mod starter_content;
pub mod stats;
pub mod subscription_service;

pub use study_core::Clock;

pub use app_services::AppServices;
pub use app_state::StudyApp;
pub use checkout::{CheckoutReceipt, CheckoutService, PaymentDetails, PremiumPlan};
pub use error::{
    AppServicesError, AuthoringError, CheckoutError, FolderListError, GenerationError,
    SubscriptionError,
};
pub use flashcards::{CardSide, FlashcardDeck, FlashcardReview};
pub use folders::{DEFAULT_FOLDER_ID, FolderList};
pub use notes::NoteBook;
pub use questions::{NotesQuestionGenerator, QuestionAuthoring, QuestionGenerator};
pub use sessions::{AnswerFeedback, SessionProgress, StatsSink, StudySession};
pub use stats::{DashboardSnapshot, GoalProgress, SharedDashboard, StatsDashboard};
pub use subscription_service::SubscriptionService;
