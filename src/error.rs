use std::path::PathBuf;

/// All errors produced by lfs-warden.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    #[error("invalid extension: {0}")]
    InvalidExtension(String),

    #[error("invalid exempt prefix: {0}")]
    InvalidPrefix(String),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

impl Error {
    pub fn repository_not_found(path: impl Into<String>) -> Self {
        Self::RepositoryNotFound(path.into())
    }

    pub fn revision_not_found(rev: impl Into<String>) -> Self {
        Self::RevisionNotFound(rev.into())
    }

    pub fn invalid_extension(ext: impl Into<String>) -> Self {
        Self::InvalidExtension(ext.into())
    }

    pub fn invalid_prefix(prefix: impl Into<String>) -> Self {
        Self::InvalidPrefix(prefix.into())
    }

    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.into().display(), err),
        ))
    }
}
