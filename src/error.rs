use std::path::PathBuf;
use thiserror::Error;

/// Conditions callers may want to match on. Everything else (malformed
/// archives, unreadable files) travels as a plain `anyhow::Error` with the
/// underlying library's message intact.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("EPUB file not found at path: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Directory {} does not exist.", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("No files found in {}.", path.display())]
    NoFiles { path: PathBuf },
}
