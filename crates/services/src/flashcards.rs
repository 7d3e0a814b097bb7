use study_core::Clock;
use study_core::model::{Flashcard, FlashcardId, FolderId};
use tracing::debug;

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// In-memory flashcard collection with a single open editor.
///
/// New cards are prepended and opened for editing straight away.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    clock: Clock,
    cards: Vec<Flashcard>,
    editing: Option<FlashcardId>,
}

impl FlashcardDeck {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::with_cards(clock, Vec::new())
    }

    #[must_use]
    pub fn with_cards(clock: Clock, cards: Vec<Flashcard>) -> Self {
        Self {
            clock,
            cards,
            editing: None,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn get(&self, id: &FlashcardId) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn cards_in_folder<'a>(
        &'a self,
        folder: &'a FolderId,
    ) -> impl Iterator<Item = &'a Flashcard> + 'a {
        self.cards.iter().filter(move |card| card.folder_id() == folder)
    }

    pub fn create(&mut self, folder: &FolderId) -> FlashcardId {
        let id = FlashcardId::generate();
        let card = Flashcard::blank(id.clone(), folder.clone(), self.clock.now());
        self.cards.insert(0, card);
        self.editing = Some(id.clone());
        debug!(card = %id, folder = %folder, "flashcard created");
        id
    }

    /// Card currently open in the editor.
    #[must_use]
    pub fn editing(&self) -> Option<&Flashcard> {
        self.editing.as_ref().and_then(|id| self.get(id))
    }

    pub fn begin_edit(&mut self, id: &FlashcardId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.editing = Some(id.clone());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Write both sides of a card and close the editor.
    pub fn save_edit(&mut self, id: &FlashcardId, question: &str, answer: &str) -> bool {
        let Some(card) = self.cards.iter_mut().find(|card| card.id() == id) else {
            return false;
        };
        card.edit(question, answer);
        self.editing = None;
        true
    }

    pub fn delete(&mut self, id: &FlashcardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id() != id);
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }
        self.cards.len() != before
    }

    /// Start a review over every card in the deck.
    #[must_use]
    pub fn start_review(&self) -> Option<FlashcardReview> {
        FlashcardReview::start(self.cards.clone())
    }

    /// Start a review over the cards of one folder.
    #[must_use]
    pub fn start_folder_review(&self, folder: &FolderId) -> Option<FlashcardReview> {
        FlashcardReview::start(self.cards_in_folder(folder).cloned().collect())
    }
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSide {
    Question,
    Answer,
}

/// Study-mode walk over a fixed set of cards.
///
/// Unlike question sessions, navigation wraps around in both directions.
#[derive(Debug, Clone)]
pub struct FlashcardReview {
    cards: Vec<Flashcard>,
    current: usize,
    side: CardSide,
}

impl FlashcardReview {
    /// Returns `None` when there is nothing to study.
    #[must_use]
    pub fn start(cards: Vec<Flashcard>) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        Some(Self {
            cards,
            current: 0,
            side: CardSide::Question,
        })
    }

    #[must_use]
    pub fn current(&self) -> &Flashcard {
        &self.cards[self.current]
    }

    #[must_use]
    pub fn side(&self) -> CardSide {
        self.side
    }

    /// Text of the side currently facing up.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self.side {
            CardSide::Question => self.current().question(),
            CardSide::Answer => self.current().answer(),
        }
    }

    /// 1-based position and total.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.cards.len())
    }

    pub fn flip(&mut self) {
        self.side = match self.side {
            CardSide::Question => CardSide::Answer,
            CardSide::Answer => CardSide::Question,
        };
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.cards.len();
        self.side = CardSide::Question;
    }

    pub fn previous(&mut self) {
        self.current = (self.current + self.cards.len() - 1) % self.cards.len();
        self.side = CardSide::Question;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::{fixed_clock, fixed_now};

    fn sample_deck() -> FlashcardDeck {
        FlashcardDeck::with_cards(
            fixed_clock(),
            vec![
                Flashcard::new(
                    FlashcardId::new("1"),
                    FolderId::new("math"),
                    "What is the derivative of x²?",
                    "The derivative of x² is 2x",
                    fixed_now(),
                ),
                Flashcard::new(
                    FlashcardId::new("2"),
                    FolderId::new("science"),
                    "State Newton's First Law of Motion",
                    "An object at rest stays at rest.",
                    fixed_now(),
                ),
            ],
        )
    }

    #[test]
    fn create_prepends_blank_card_and_opens_editor() {
        let mut deck = sample_deck();
        let id = deck.create(&FolderId::new("math"));
        assert_eq!(deck.cards()[0].id(), &id);
        assert_eq!(deck.editing().unwrap().question_label(), Flashcard::QUESTION_PLACEHOLDER);

        assert!(deck.save_edit(&id, "2 + 2?", "4"));
        assert!(deck.editing().is_none());
        assert_eq!(deck.get(&id).unwrap().answer(), "4");
    }

    #[test]
    fn delete_closes_editor_for_that_card() {
        let mut deck = sample_deck();
        let first = FlashcardId::new("1");
        assert!(deck.begin_edit(&first));
        assert!(deck.delete(&first));
        assert!(deck.editing().is_none());
        assert_eq!(deck.count(), 1);
    }

    #[test]
    fn cancel_edit_keeps_card_unchanged() {
        let mut deck = sample_deck();
        let first = FlashcardId::new("1");
        deck.begin_edit(&first);
        deck.cancel_edit();
        assert!(deck.editing().is_none());
        assert_eq!(deck.get(&first).unwrap().answer(), "The derivative of x² is 2x");
    }

    #[test]
    fn review_requires_cards() {
        let deck = FlashcardDeck::new(fixed_clock());
        assert!(deck.start_review().is_none());
        assert!(
            sample_deck()
                .start_folder_review(&FolderId::new("history"))
                .is_none()
        );
    }

    #[test]
    fn review_wraps_and_hides_answer() {
        let mut review = sample_deck().start_review().unwrap();
        assert_eq!(review.position(), (1, 2));

        review.flip();
        assert_eq!(review.side(), CardSide::Answer);
        assert_eq!(review.visible_text(), "The derivative of x² is 2x");

        review.previous();
        assert_eq!(review.position(), (2, 2));
        assert_eq!(review.side(), CardSide::Question);

        review.next();
        assert_eq!(review.position(), (1, 2));
    }

    #[test]
    fn folder_review_only_includes_folder_cards() {
        let review = sample_deck()
            .start_folder_review(&FolderId::new("science"))
            .unwrap();
        assert_eq!(review.position(), (1, 1));
        assert_eq!(review.current().id().as_str(), "2");
    }
}
