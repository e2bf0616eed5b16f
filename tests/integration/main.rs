use researchdrive::{StudyConfig, ToolConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp workspace holding a target directory plus input files.
pub struct IntegrationHarness {
    workspace: TempDir,
    target: PathBuf,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        let target = workspace.path().join("drive");
        fs::create_dir(&target).expect("failed to create target directory");
        Self { workspace, target }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Writes an input file next to (not inside) the target directory.
    pub fn write_input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.workspace.path().join(name);
        fs::write(&path, content).expect("failed to write input file");
        path
    }

    pub fn settings(&self) -> ToolConfig {
        ToolConfig::default()
    }

    pub fn study(&self) -> StudyConfig {
        StudyConfig {
            workpackage: Some("WP1".into()),
            investigation_label: Some("CXR9".into()),
            study_label: Some("STU2".into()),
            study_title: Some("Test Study".into()),
            ..StudyConfig::default()
        }
    }
}

mod folder_names;
mod study_folder_idempotence;
mod study_folder_policy;
mod study_record;

#[test]
fn harness_target_starts_empty() {
    let harness = IntegrationHarness::new();
    assert!(harness.target().is_dir());
    assert_eq!(fs::read_dir(harness.target()).unwrap().count(), 0);
}
