use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ExtensionList;

/// Error type for enumeration, selection, and decode failures.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("folder '{}' cannot be found or is not a directory", folder.display())]
    FolderNotFound { folder: PathBuf },
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    #[error("no text files found in '{}' for extensions {extensions:?}", folder.display())]
    NoCandidates {
        folder: PathBuf,
        extensions: ExtensionList,
    },
    #[error("cannot read file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("file '{}' is not valid {encoding}", path.display())]
    DecodeFailure { path: PathBuf, encoding: String },
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
