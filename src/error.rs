//! Error taxonomy for study folder provisioning.
//!
//! Every variant except `Io` is raised before the first filesystem mutation.
//! Policy file failures are deliberately absent: they are reported through
//! [`crate::policy::PolicyStatus::Failed`] and never abort a run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Target directory does not exist: {}", path.display())]
    TargetUnavailable { path: PathBuf },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Malformed folder name '{name}': {reason}")]
    MalformedName { name: String, reason: String },
    #[error("Failed to parse {}: {reason}", path.display())]
    InputParseFailure { path: PathBuf, reason: String },
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(name: &str, reason: impl Into<String>) -> Self {
        Self::MalformedName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(path: &Path, reason: impl ToString) -> Self {
        Self::InputParseFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
