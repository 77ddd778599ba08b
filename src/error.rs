use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read manifest {}: {reason}", path.display())]
    Detection { path: PathBuf, reason: String },
    #[error("workspace root {} is not a directory", .0.display())]
    RootNotFound(PathBuf),
    #[error("failed to enumerate workspace roots: {0}")]
    Workspace(String),
    #[error("invalid {ecosystem} pattern: {source}")]
    Pattern {
        ecosystem: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("background task failed: {0}")]
    Task(String),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
