use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{FolderId, NoteId};

/// A free-form study note inside a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    folder_id: FolderId,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Title used for new notes and for saves with a blank title.
    pub const UNTITLED: &'static str = "Untitled Note";

    /// A fresh, empty note.
    #[must_use]
    pub fn untitled(id: NoteId, folder_id: FolderId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            folder_id,
            title: Self::UNTITLED.to_string(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a note with explicit text and timestamps.
    #[must_use]
    pub fn from_parts(
        id: NoteId,
        folder_id: FolderId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            folder_id,
            title: title_or_untitled(title.into()),
            content: content.into(),
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    #[must_use]
    pub fn folder_id(&self) -> &FolderId {
        &self.folder_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace title and content. A blank title falls back to [`Note::UNTITLED`].
    pub fn edit(&mut self, title: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) {
        self.title = title_or_untitled(title.into());
        self.content = content.into();
        self.updated_at = now;
    }

    /// Case-insensitive substring match against title or content.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle) || self.content.to_lowercase().contains(&needle)
    }
}

fn title_or_untitled(title: String) -> String {
    if title.trim().is_empty() {
        Note::UNTITLED.to_string()
    } else {
        title
    }
}
