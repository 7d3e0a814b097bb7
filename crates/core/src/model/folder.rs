use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::FolderId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FolderError {
    #[error("folder name cannot be empty")]
    EmptyName,
}

/// A user-defined subject used to partition notes, flashcards, and questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    id: FolderId,
    name: String,
}

impl Folder {
    /// Name given to folders created from the sidebar "add" action.
    pub const DEFAULT_NAME: &'static str = "New Subject";

    /// Creates a folder with a trimmed, non-empty name.
    ///
    /// # Errors
    ///
    /// Returns `FolderError::EmptyName` if the name is blank.
    pub fn new(id: FolderId, name: impl Into<String>) -> Result<Self, FolderError> {
        let name = normalize_name(name.into())?;
        Ok(Self { id, name })
    }

    #[must_use]
    pub fn id(&self) -> &FolderId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the folder, keeping the old name on failure.
    ///
    /// # Errors
    ///
    /// Returns `FolderError::EmptyName` if the new name is blank.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), FolderError> {
        self.name = normalize_name(name.into())?;
        Ok(())
    }
}

fn normalize_name(name: String) -> Result<String, FolderError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FolderError::EmptyName);
    }
    Ok(trimmed.to_string())
}
