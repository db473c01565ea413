//! Error taxonomy shared by every command

use std::io;
use std::path::Path;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Something the run depends on is missing or wrong; nothing was changed.
    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The user answered "no" to a required confirmation.
    #[error("Aborted.")]
    UserDeclined,

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        SyncError::PreconditionFailed(msg.into())
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        SyncError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn io_at(action: &str, path: &Path, source: io::Error) -> Self {
        SyncError::Io {
            context: format!("Failed to {} '{}'", action, path.display()),
            source,
        }
    }

    /// Process exit code for this failure. Declining is a graceful no-op.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::UserDeclined => 0,
            _ => 1,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, SyncError::UserDeclined)
    }
}

/// Attach path context to raw io results.
pub trait IoContext<T> {
    fn at_path(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at_path(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| SyncError::io_at(action, path, e))
    }
}
