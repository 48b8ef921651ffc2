//! Error types for file-level operations.
//!
//! Translation of a line never fails; these cover discovering, reading and
//! writing files.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for cpp2java file operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// IO operation failed on a specific path
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input path does not exist
    #[error("Not a file or directory: {}", .0.display())]
    NotFound(PathBuf),

    /// Directory contained no C++ sources
    #[error("No C++ sources found under {}", .0.display())]
    NoSources(PathBuf),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
