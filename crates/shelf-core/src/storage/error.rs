//! Storage errors
//!
//! Every variant is something `FileStorage` (or a test adapter) can
//! actually report. Callers of the favorites store never see these; they are
//! logged and turned into a non-blocking notice.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// The key cannot be used as a file name in the data directory
    #[error("'{key}' is not a usable storage key (use letters, digits, '-', '_' or '.')")]
    InvalidKey { key: String },

    /// The data directory could not be created
    #[error("Cannot create shelf data directory '{path}': {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stored value exists but could not be read
    #[error("Cannot read stored value '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No write permission on the value file or its directory
    #[error("No permission to save '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The device or quota is full
    #[error("No space left to save '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other failure while writing or replacing the value file
    #[error("Cannot save '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Storage refuses writes (read-only or disabled)
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Classify a failed write to `path`
    pub fn from_write(error: io::Error, path: PathBuf) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied {
                path,
                source: error,
            }
        } else if is_out_of_space(&error) {
            StorageError::DiskFull {
                path,
                source: error,
            }
        } else {
            StorageError::Write {
                path,
                source: error,
            }
        }
    }

    /// Whether the user can fix this without changing configuration
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::DiskFull { .. }
                | StorageError::PermissionDenied { .. }
                | StorageError::Unavailable(_)
        )
    }

    /// What to tell the user about favorites after this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::InvalidKey { .. } => {
                Some("Set favorites_key to a plain name such as 'designBookshelfFavorites'.")
            }
            StorageError::DataDir { .. } => {
                Some("Point data_dir at a writable directory with `shelf config set data_dir`.")
            }
            StorageError::PermissionDenied { .. } => {
                Some("Make the shelf data directory writable to keep favorites between runs.")
            }
            StorageError::DiskFull { .. } => {
                Some("Free some disk space; favorites are saved again on the next change.")
            }
            StorageError::Unavailable(_) => {
                Some("Favorites are kept for this session but will not survive a restart.")
            }
            StorageError::Read { .. } | StorageError::Write { .. } => None,
        }
    }
}

fn is_out_of_space(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    ["no space left", "disk full", "quota exceeded", "not enough space"]
        .iter()
        .any(|needle| msg.contains(needle))
}

pub type StorageResult<T> = Result<T, StorageError>;
