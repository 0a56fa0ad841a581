use std::io;
use thiserror::Error;

/// Result type for utilkit operations
pub type Result<T> = std::result::Result<T, UtilError>;

/// Unified error type for all utilkit operations
#[derive(Debug, Error)]
pub enum UtilError {
    // Archive errors
    #[error("no entry name given (cannot add raw content to archive)")]
    MissingEntryName,

    #[error("archive error: {0}")]
    Archive(String),

    // Registry errors
    #[error("unknown module: {0}")]
    UnknownModule(String),

    #[error("module '{module}' does not define an object named '{object}'")]
    UnknownObject { module: String, object: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<zip::result::ZipError> for UtilError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => UtilError::Io(e),
            other => UtilError::Archive(other.to_string()),
        }
    }
}
