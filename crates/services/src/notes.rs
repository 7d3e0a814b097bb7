use study_core::Clock;
use study_core::model::{FolderId, Note, NoteId};
use tracing::debug;

/// In-memory note collection with a single selected note.
///
/// Notes are kept newest-first: created notes are prepended.
#[derive(Debug, Clone)]
pub struct NoteBook {
    clock: Clock,
    notes: Vec<Note>,
    selected: Option<NoteId>,
}

impl NoteBook {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::with_notes(clock, Vec::new())
    }

    #[must_use]
    pub fn with_notes(clock: Clock, notes: Vec<Note>) -> Self {
        Self {
            clock,
            notes,
            selected: None,
        }
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    /// Prepend an untitled note in `folder`, select it, and return its id.
    pub fn create(&mut self, folder: &FolderId) -> NoteId {
        let id = NoteId::generate();
        let note = Note::untitled(id.clone(), folder.clone(), self.clock.now());
        self.notes.insert(0, note);
        self.selected = Some(id.clone());
        debug!(note = %id, folder = %folder, "note created");
        id
    }

    /// Select an existing note. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &NoteId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Note> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Save edits to a note; a blank title becomes "Untitled Note".
    pub fn save(&mut self, id: &NoteId, title: &str, content: &str) -> bool {
        let now = self.clock.now();
        let Some(note) = self.notes.iter_mut().find(|note| note.id() == id) else {
            return false;
        };
        note.edit(title, content, now);
        true
    }

    /// Remove a note, clearing the selection if it pointed at it.
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id() != id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        let removed = self.notes.len() != before;
        if removed {
            debug!(note = %id, "note deleted");
        }
        removed
    }

    /// Notes whose title or content contains `term`, ignoring case.
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a Note> + 'a {
        self.notes.iter().filter(move |note| note.matches(term))
    }

    pub fn search_in_folder<'a>(
        &'a self,
        folder: &'a FolderId,
        term: &'a str,
    ) -> impl Iterator<Item = &'a Note> + 'a {
        self.search(term).filter(move |note| note.folder_id() == folder)
    }

    pub fn list_in_folder<'a>(&'a self, folder: &'a FolderId) -> impl Iterator<Item = &'a Note> + 'a {
        self.notes.iter().filter(move |note| note.folder_id() == folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use study_core::time::{fixed_clock, fixed_now};

    fn sample_book() -> NoteBook {
        let now = fixed_now();
        NoteBook::with_notes(
            fixed_clock(),
            vec![
                Note::from_parts(
                    NoteId::new("1"),
                    FolderId::new("math"),
                    "Introduction to Calculus",
                    "Calculus is the mathematical study of continuous change.",
                    now,
                    now,
                ),
                Note::from_parts(
                    NoteId::new("2"),
                    FolderId::new("science"),
                    "Newton's Laws of Motion",
                    "An object at rest stays at rest.",
                    now,
                    now,
                ),
            ],
        )
    }

    #[test]
    fn create_prepends_and_selects() {
        let mut book = sample_book();
        let id = book.create(&FolderId::new("math"));

        assert_eq!(book.count(), 3);
        assert_eq!(book.notes()[0].id(), &id);
        assert_eq!(book.selected().unwrap().title(), Note::UNTITLED);
    }

    #[test]
    fn save_updates_title_content_and_timestamp() {
        let mut book = NoteBook::new(Clock::fixed(fixed_now() + Duration::days(1)));
        let id = book.create(&FolderId::new("history"));

        assert!(book.save(&id, "", "Rome was not built in a day."));
        let note = book.get(&id).unwrap();
        assert_eq!(note.title(), Note::UNTITLED);
        assert_eq!(note.content(), "Rome was not built in a day.");
        assert_eq!(note.updated_at(), fixed_now() + Duration::days(1));
        assert!(!book.save(&NoteId::new("missing"), "t", "c"));
    }

    #[test]
    fn delete_clears_selection() {
        let mut book = sample_book();
        assert!(book.select(&NoteId::new("1")));
        assert!(book.delete(&NoteId::new("1")));
        assert!(book.selected().is_none());
        assert_eq!(book.count(), 1);
        assert!(!book.delete(&NoteId::new("1")));
    }

    #[test]
    fn delete_other_note_keeps_selection() {
        let mut book = sample_book();
        book.select(&NoteId::new("1"));
        book.delete(&NoteId::new("2"));
        assert_eq!(book.selected().unwrap().id().as_str(), "1");
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let book = sample_book();
        let hits: Vec<_> = book.search("REST").map(|n| n.id().as_str()).collect();
        assert_eq!(hits, ["2"]);
        assert_eq!(book.search("").count(), 2);
        assert_eq!(book.search("motion").count(), 1);
    }

    #[test]
    fn folder_scoped_search() {
        let book = sample_book();
        let math = FolderId::new("math");
        assert_eq!(book.search_in_folder(&math, "calculus").count(), 1);
        assert_eq!(book.search_in_folder(&math, "newton").count(), 0);
        assert_eq!(book.list_in_folder(&math).count(), 1);
    }
}
