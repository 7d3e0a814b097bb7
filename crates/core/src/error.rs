use thiserror::Error;

use crate::model::{FolderError, ParseIdError, ParseTierError, QuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error(transparent)]
    Tier(#[from] ParseTierError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
