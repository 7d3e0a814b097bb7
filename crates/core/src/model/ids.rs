use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a subject folder.
///
/// Folder ids are compared by exact, case-sensitive string equality.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    /// Creates a new `FolderId`. Any string is accepted, including the empty one.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh `folder-<uuid>` identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("folder-{}", Uuid::new_v4()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a Note
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a new `NoteId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a Flashcard
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashcardId(String);

impl FlashcardId {
    /// Creates a new `FlashcardId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a study Question
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FolderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FolderId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for FolderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FolderId({:?})", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({:?})", self.0)
    }
}

impl fmt::Debug for FlashcardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlashcardId({:?})", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({:?})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FlashcardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from an empty string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

fn parse_non_empty(s: &str, kind: &str) -> Result<String, ParseIdError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseIdError {
            kind: kind.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

impl FromStr for FolderId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_non_empty(s, "FolderId").map(FolderId)
    }
}

impl FromStr for NoteId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_non_empty(s, "NoteId").map(NoteId)
    }
}

impl FromStr for FlashcardId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_non_empty(s, "FlashcardId").map(FlashcardId)
    }
}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_non_empty(s, "QuestionId").map(QuestionId)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_id_display() {
        let id = FolderId::new("math");
        assert_eq!(id.to_string(), "math");
    }

    #[test]
    fn test_folder_id_accepts_empty_via_new() {
        let id = FolderId::new("");
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn test_folder_id_from_str_rejects_blank() {
        let result = "   ".parse::<FolderId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_generated_folder_id_is_prefixed() {
        let id = FolderId::generate();
        assert!(id.as_str().starts_with("folder-"));
        assert_ne!(id, FolderId::generate());
    }

    #[test]
    fn test_question_id_from_str() {
        let id: QuestionId = "q-1".parse().unwrap();
        assert_eq!(id, QuestionId::new("q-1"));
    }

    #[test]
    fn test_question_id_debug() {
        let id = QuestionId::new("7");
        assert_eq!(format!("{id:?}"), "QuestionId(\"7\")");
    }

    #[test]
    fn test_note_and_flashcard_ids_generate_unique() {
        assert_ne!(NoteId::generate(), NoteId::generate());
        assert_ne!(FlashcardId::generate(), FlashcardId::generate());
    }

    #[test]
    fn test_folder_id_is_case_sensitive() {
        assert_ne!(FolderId::new("Math"), FolderId::new("math"));
    }
}
