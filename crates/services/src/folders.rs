use study_core::model::{Folder, FolderId};
use tracing::debug;

use crate::error::FolderListError;

/// Id of the folder selected on startup and used as the last-resort fallback.
pub const DEFAULT_FOLDER_ID: &str = "general";

/// Subject folders and the currently active one.
///
/// The active folder is any string, so a folder that was deleted or never
/// existed can still be selected; it simply matches no content.
#[derive(Debug, Clone)]
pub struct FolderList {
    folders: Vec<Folder>,
    active: FolderId,
}

impl FolderList {
    /// Starter subjects: General, Mathematics, Science, History.
    #[must_use]
    pub fn with_defaults() -> Self {
        let folders = [
            ("general", "General"),
            ("math", "Mathematics"),
            ("science", "Science"),
            ("history", "History"),
        ]
        .into_iter()
        .filter_map(|(id, name)| Folder::new(FolderId::new(id), name).ok())
        .collect();

        Self {
            folders,
            active: FolderId::new(DEFAULT_FOLDER_ID),
        }
    }

    /// A list with exactly the given folders; the first one is active.
    #[must_use]
    pub fn from_folders(folders: Vec<Folder>) -> Self {
        let active = folders
            .first()
            .map_or_else(|| FolderId::new(DEFAULT_FOLDER_ID), |f| f.id().clone());
        Self { folders, active }
    }

    #[must_use]
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id() == id)
    }

    #[must_use]
    pub fn active(&self) -> &FolderId {
        &self.active
    }

    pub fn select(&mut self, id: impl Into<FolderId>) {
        self.active = id.into();
        debug!(folder = %self.active, "folder selected");
    }

    /// Append a "New Subject" folder and return its id.
    pub fn add(&mut self) -> FolderId {
        let id = FolderId::generate();
        // DEFAULT_NAME is non-blank, so construction always succeeds
        if let Ok(folder) = Folder::new(id.clone(), Folder::DEFAULT_NAME) {
            self.folders.push(folder);
        }
        debug!(folder = %id, "folder added");
        id
    }

    /// Rename a folder.
    ///
    /// # Errors
    ///
    /// Returns `FolderListError::NotFound` for unknown ids and
    /// `FolderListError::Folder` if the name is blank.
    pub fn rename(&mut self, id: &FolderId, name: &str) -> Result<(), FolderListError> {
        let folder = self
            .folders
            .iter_mut()
            .find(|folder| folder.id() == id)
            .ok_or(FolderListError::NotFound)?;
        folder.rename(name)?;
        Ok(())
    }

    /// Delete a folder, keeping at least one.
    ///
    /// If the active folder is deleted, the first remaining folder becomes
    /// active. Returns the active folder after deletion.
    ///
    /// # Errors
    ///
    /// Returns `FolderListError::LastFolder` when only one folder remains and
    /// `FolderListError::NotFound` for unknown ids.
    pub fn delete(&mut self, id: &FolderId) -> Result<&FolderId, FolderListError> {
        if self.folders.len() <= 1 {
            return Err(FolderListError::LastFolder);
        }
        let index = self
            .folders
            .iter()
            .position(|folder| folder.id() == id)
            .ok_or(FolderListError::NotFound)?;
        self.folders.remove(index);

        if &self.active == id {
            self.active = self
                .folders
                .first()
                .map_or_else(|| FolderId::new(DEFAULT_FOLDER_ID), |f| f.id().clone());
        }
        debug!(folder = %id, active = %self.active, "folder deleted");
        Ok(&self.active)
    }
}

impl Default for FolderList {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::FolderError;

    #[test]
    fn defaults_start_on_general() {
        let list = FolderList::with_defaults();
        assert_eq!(list.len(), 4);
        assert_eq!(list.active().as_str(), "general");
        assert_eq!(list.get(&FolderId::new("math")).unwrap().name(), "Mathematics");
    }

    #[test]
    fn add_appends_new_subject() {
        let mut list = FolderList::with_defaults();
        let id = list.add();
        assert_eq!(list.len(), 5);
        assert_eq!(list.folders().last().unwrap().id(), &id);
        assert_eq!(list.get(&id).unwrap().name(), Folder::DEFAULT_NAME);
    }

    #[test]
    fn rename_rejects_blank_and_unknown() {
        let mut list = FolderList::with_defaults();
        let math = FolderId::new("math");
        assert_eq!(
            list.rename(&math, "  "),
            Err(FolderListError::Folder(FolderError::EmptyName))
        );
        assert_eq!(
            list.rename(&FolderId::new("art"), "Art"),
            Err(FolderListError::NotFound)
        );
        list.rename(&math, " Calculus ").unwrap();
        assert_eq!(list.get(&math).unwrap().name(), "Calculus");
    }

    #[test]
    fn deleting_active_folder_retargets_first_remaining() {
        let mut list = FolderList::with_defaults();
        list.select("science");
        let active = list.delete(&FolderId::new("science")).unwrap().clone();
        assert_eq!(active.as_str(), "general");

        let active = list.delete(&FolderId::new("general")).unwrap().clone();
        assert_eq!(active.as_str(), "math");
    }

    #[test]
    fn deleting_inactive_folder_keeps_selection() {
        let mut list = FolderList::with_defaults();
        list.select("math");
        list.delete(&FolderId::new("history")).unwrap();
        assert_eq!(list.active().as_str(), "math");
    }

    #[test]
    fn last_folder_cannot_be_deleted() {
        let mut list = FolderList::from_folders(vec![
            Folder::new(FolderId::new("only"), "Only").unwrap(),
        ]);
        assert_eq!(
            list.delete(&FolderId::new("only")),
            Err(FolderListError::LastFolder)
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn any_string_can_be_selected() {
        let mut list = FolderList::with_defaults();
        list.select("does-not-exist");
        assert_eq!(list.active().as_str(), "does-not-exist");
    }
}
