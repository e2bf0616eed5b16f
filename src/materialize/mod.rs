//! Non-destructive creation of a resolved structure on disk.
//!
//! Directories are created when absent and left alone otherwise. Files
//! declared by the structure (including generated READMEs) are rewritten on
//! every run. Nothing is ever removed, renamed or truncated outside those
//! declared paths, so re-running over a partial or user-modified tree is
//! safe and simply fills in what is missing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};
use crate::structure::{NodeKind, ResolvedEntry};

pub const README_FILE: &str = "README.md";

/// Paths touched by one materialization run.
#[derive(Debug, Clone, Default)]
pub struct MaterializeReport {
    /// Directories that did not exist before the run.
    pub created: Vec<PathBuf>,
    /// Directories that were already present.
    pub existing: Vec<PathBuf>,
    /// Files written from the structure definition.
    pub written: Vec<PathBuf>,
}

/// Creates resolved structures below an existing target directory.
#[derive(Debug, Clone)]
pub struct TreeMaterializer {
    target: PathBuf,
}

impl TreeMaterializer {
    /// Fails with `TargetUnavailable` unless `target` is an existing directory.
    pub fn new(target: &Path) -> Result<Self> {
        if !target.is_dir() {
            return Err(ScaffoldError::TargetUnavailable {
                path: target.to_path_buf(),
            });
        }
        Ok(Self {
            target: target.to_path_buf(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Ensures `root` and then every planned entry, in plan order.
    pub fn materialize(&self, root: &Path, plan: &[ResolvedEntry]) -> Result<MaterializeReport> {
        let mut report = MaterializeReport::default();
        ensure_dir(root, &mut report)?;
        for entry in plan {
            match &entry.kind {
                NodeKind::Directory => ensure_dir(&entry.path, &mut report)?,
                NodeKind::FileWrite(content) => write_file(&entry.path, content, &mut report)?,
                NodeKind::DirectoryWithReadme(content) => {
                    ensure_dir(&entry.path, &mut report)?;
                    write_file(&entry.path.join(README_FILE), content, &mut report)?;
                }
            }
        }
        info!(
            root = %root.display(),
            created = report.created.len(),
            existing = report.existing.len(),
            written = report.written.len(),
            "structure materialized"
        );
        Ok(report)
    }
}

fn ensure_dir(path: &Path, report: &mut MaterializeReport) -> Result<()> {
    if path.is_dir() {
        debug!(path = %path.display(), "directory already exists");
        report.existing.push(path.to_path_buf());
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|err| ScaffoldError::io(path, err))?;
    info!(path = %path.display(), "created directory");
    report.created.push(path.to_path_buf());
    Ok(())
}

fn write_file(path: &Path, content: &str, report: &mut MaterializeReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.is_dir() {
            fs::create_dir_all(parent).map_err(|err| ScaffoldError::io(parent, err))?;
            info!(path = %parent.display(), "created directory");
            report.created.push(parent.to_path_buf());
        }
    }
    let existed = path.exists();
    fs::write(path, content).map_err(|err| ScaffoldError::io(path, err))?;
    if existed {
        info!(path = %path.display(), "regenerated file");
    } else {
        info!(path = %path.display(), "created file");
    }
    report.written.push(path.to_path_buf());
    Ok(())
}

/// Sorted relative paths of everything below `root`.
pub fn inventory(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| ScaffoldError::io(root, io::Error::from(err)))?;
        if let Ok(relative) = entry.path().strip_prefix(root) {
            paths.push(relative.to_path_buf());
        }
    }
    Ok(paths)
}
