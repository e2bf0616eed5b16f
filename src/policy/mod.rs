//! FOLDER_POLICY.md lifecycle at the root of a study folder.
//!
//! The policy file is created on first provisioning. Later runs leave it
//! untouched unless overwrite is requested, in which case the previous
//! version is copied to `FOLDER_POLICY.md.bak.<YYYYMMDD_HHMMSS>` first.
//!
//! Failures here never abort provisioning: a failed backup is logged as a
//! warning and the write still happens, a failed write is logged as an
//! error and reported as [`PolicyStatus::Failed`]. Either way the intended
//! path is returned.

mod render;

pub use render::{render_access_rows, render_policy, PolicyMetadata};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{error, info, warn};

use crate::access::AccessRecord;

pub const POLICY_FILE: &str = "FOLDER_POLICY.md";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyStatus {
    Created,
    /// Existing file kept because overwrite was not requested.
    Skipped,
    /// Existing file replaced; `backup` is `None` when the copy failed.
    Replaced { backup: Option<PathBuf> },
    /// Write failed; the message is the underlying I/O error.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOutcome {
    pub path: PathBuf,
    pub status: PolicyStatus,
}

/// Path of the policy file for a study root.
pub fn policy_path(root: &Path) -> PathBuf {
    root.join(POLICY_FILE)
}

/// Creates, skips or replaces `root/FOLDER_POLICY.md`.
pub fn write_policy(
    root: &Path,
    metadata: &PolicyMetadata,
    records: &[AccessRecord],
    overwrite: bool,
) -> PolicyOutcome {
    let path = policy_path(root);
    let exists = path.exists();

    if exists && !overwrite {
        info!(path = %path.display(), "policy file already exists, skipping");
        return PolicyOutcome {
            path,
            status: PolicyStatus::Skipped,
        };
    }

    let backup = if exists { backup_policy(&path) } else { None };

    let content = render_policy(metadata, records, Local::now().date_naive());
    let status = match fs::write(&path, content) {
        Ok(()) if exists => {
            info!(path = %path.display(), "updated policy file");
            PolicyStatus::Replaced { backup }
        }
        Ok(()) => {
            info!(path = %path.display(), "created policy file");
            PolicyStatus::Created
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to write policy file");
            PolicyStatus::Failed(err.to_string())
        }
    };
    PolicyOutcome { path, status }
}

fn backup_policy(path: &Path) -> Option<PathBuf> {
    let backup = next_backup_path(path);
    match fs::copy(path, &backup) {
        Ok(_) => {
            info!(backup = %backup.display(), "backed up existing policy file");
            Some(backup)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not back up existing policy file");
            None
        }
    }
}

/// `FOLDER_POLICY.md.bak.<timestamp>`, suffixed `_1`, `_2`, ... when a
/// backup from the same second already exists.
fn next_backup_path(path: &Path) -> PathBuf {
    let stem = format!(
        "{POLICY_FILE}.bak.{}",
        Local::now().format(BACKUP_TIMESTAMP_FORMAT)
    );
    let mut candidate = path.with_file_name(&stem);
    let mut counter = 1;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{stem}_{counter}"));
        counter += 1;
    }
    candidate
}
