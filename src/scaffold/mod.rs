//! End-to-end provisioning flows.
//!
//! [`create_study_folder`] derives the study root from a [`StudyConfig`],
//! materializes its labeled structure and writes the folder policy.
//! [`scaffold_isa_project`] expands an ISA template directly into a target
//! directory and adds a project README.
//!
//! All validation (target exists, folder name derivable, inputs parse)
//! happens before the first filesystem mutation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::config::{parse_document, StudyConfig, ToolConfig};
use crate::error::{Result, ScaffoldError};
use crate::materialize::{MaterializeReport, TreeMaterializer, README_FILE};
use crate::naming::resolve_folder_path;
use crate::policy::{write_policy, PolicyMetadata, PolicyOutcome};
use crate::structure::{interpolate, render_project_readme, resolve, StructureMap, TemplateLabels};

/// Run switches that are not part of the study description.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldOptions {
    /// Replace an existing FOLDER_POLICY.md (after backing it up).
    pub overwrite_policy: bool,
    /// Nest the study folder inside its investigation folder.
    pub create_investigation_folder: bool,
}

impl ScaffoldOptions {
    pub fn from_settings(settings: &ToolConfig) -> Self {
        Self {
            overwrite_policy: false,
            create_investigation_folder: settings.layout.create_investigation_folder,
        }
    }
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self::from_settings(&ToolConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct ScaffoldOutcome {
    pub root: PathBuf,
    pub report: MaterializeReport,
    pub policy: PolicyOutcome,
}

/// Provisions one study folder below `target`.
///
/// Never deletes anything; only FOLDER_POLICY.md is replaced, and only when
/// `options.overwrite_policy` is set.
pub fn create_study_folder(
    target: &Path,
    config: &StudyConfig,
    settings: &ToolConfig,
    options: &ScaffoldOptions,
) -> Result<ScaffoldOutcome> {
    let materializer = TreeMaterializer::new(target)?;
    let folder = resolve_folder_path(config, options.create_investigation_folder)?;
    let root = target.join(&folder);
    info!(root = %root.display(), "provisioning study folder");

    let structure = match &config.structure {
        Some(structure) => structure.clone(),
        None => StructureMap::from_leaves(settings.layout.default_structure.iter().cloned()),
    };
    let plan = resolve(&root, &structure, config.label_pair());
    let report = materializer.materialize(&root, &plan)?;

    let metadata = PolicyMetadata::from_study(config, &settings.policy);
    let policy = write_policy(
        &root,
        &metadata,
        &config.authorized_users,
        options.overwrite_policy,
    );

    Ok(ScaffoldOutcome {
        root,
        report,
        policy,
    })
}

#[derive(Debug, Clone)]
pub struct IsaOutcome {
    pub readme: PathBuf,
    pub report: MaterializeReport,
}

/// Reads an ISA template file, interpolates `labels` and parses the result.
pub fn load_isa_template(path: &Path, labels: &TemplateLabels) -> Result<StructureMap> {
    let raw = fs::read_to_string(path).map_err(|err| ScaffoldError::io(path, err))?;
    parse_document(path, &interpolate(&raw, labels))
}

/// Materializes `structure` directly inside `target` and writes the project README.
pub fn scaffold_isa_project(
    target: &Path,
    structure: &StructureMap,
    labels: &TemplateLabels,
) -> Result<IsaOutcome> {
    let materializer = TreeMaterializer::new(target)?;
    info!(
        investigation = %labels.investigation,
        target = %materializer.target().display(),
        "creating ISA model directory structure"
    );
    // Root `_readme` text goes into the project README instead of its own file.
    let plan: Vec<_> = resolve(target, structure, None)
        .into_iter()
        .filter(|entry| entry.path.as_path() != target)
        .collect();
    let report = materializer.materialize(target, &plan)?;

    let readme = target.join(README_FILE);
    let content = render_project_readme(labels, structure, Local::now().date_naive());
    fs::write(&readme, content).map_err(|err| ScaffoldError::io(&readme, err))?;
    info!(path = %readme.display(), "created project README");

    Ok(IsaOutcome { readme, report })
}
