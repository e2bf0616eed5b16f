//! Canonical folder naming for investigation and study roots.
//!
//! A study root is named `i_<workpackage>_<investigation>/s_<investigation>-<study>_<slug>`
//! when investigation nesting is enabled, or just the study segment when it
//! is not. [`parse_canonical_name`] recovers the labels from the two-segment
//! form.

use std::path::PathBuf;

use crate::config::StudyConfig;
use crate::error::{Result, ScaffoldError};

const INVESTIGATION_PREFIX: &str = "i_";
const STUDY_PREFIX: &str = "s_";

/// Labels identifying a study inside its investigation and workpackage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyLabels {
    pub workpackage: String,
    pub investigation_label: String,
    pub study_label: String,
}

impl StudyLabels {
    pub fn new(
        workpackage: impl Into<String>,
        investigation_label: impl Into<String>,
        study_label: impl Into<String>,
    ) -> Self {
        Self {
            workpackage: workpackage.into(),
            investigation_label: investigation_label.into(),
            study_label: study_label.into(),
        }
    }

    pub fn investigation_folder(&self) -> String {
        investigation_folder(&self.workpackage, &self.investigation_label)
    }

    pub fn study_folder(&self, slug: &str) -> String {
        study_folder(&self.investigation_label, &self.study_label, slug)
    }

    /// Two-segment canonical name, always joined with `/`.
    pub fn canonical_name(&self, slug: &str) -> String {
        format!("{}/{}", self.investigation_folder(), self.study_folder(slug))
    }
}

/// Lowercase, spaces to hyphens, anything outside `[a-z0-9-]` dropped.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Slug derived from the study title, falling back to the lowercased label.
pub fn study_slug(study_title: Option<&str>, study_label: &str) -> String {
    study_title
        .map(slugify)
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| study_label.to_lowercase())
}

pub fn investigation_folder(workpackage: &str, investigation_label: &str) -> String {
    format!("{INVESTIGATION_PREFIX}{workpackage}_{investigation_label}")
}

pub fn study_folder(investigation_label: &str, study_label: &str, slug: &str) -> String {
    format!("{STUDY_PREFIX}{investigation_label}-{study_label}_{slug}")
}

/// Recovers `(workpackage, investigation, study)` from a two-segment name.
pub fn parse_canonical_name(name: &str) -> Result<StudyLabels> {
    let segments: Vec<&str> = name.split('/').collect();
    let [investigation, study] = segments.as_slice() else {
        return Err(ScaffoldError::malformed(
            name,
            "Invalid folder name format, expected 'i_<WP>_<LABEL1>/s_<LABEL1>-<LABEL2>_<slug>'",
        ));
    };
    let investigation = investigation.strip_prefix(INVESTIGATION_PREFIX).ok_or_else(|| {
        ScaffoldError::malformed(
            name,
            "Invalid folder name format, investigation part should start with 'i_'",
        )
    })?;
    let (workpackage, investigation_label) = investigation
        .split_once('_')
        .filter(|(wp, label)| !wp.is_empty() && !label.is_empty())
        .ok_or_else(|| {
            ScaffoldError::malformed(name, "Invalid investigation format, expected 'i_<WP>_<LABEL1>'")
        })?;

    let study = study
        .strip_prefix(STUDY_PREFIX)
        .ok_or_else(|| ScaffoldError::malformed(name, "Study part should start with 's_'"))?;
    let (labels, slug) = study.split_once('_').ok_or_else(|| {
        ScaffoldError::malformed(name, "Invalid study format, expected 's_<LABEL1>-<LABEL2>_<slug>'")
    })?;
    if slug.is_empty() {
        return Err(ScaffoldError::malformed(
            name,
            "Invalid study format, expected 's_<LABEL1>-<LABEL2>_<slug>'",
        ));
    }
    // The investigation label is known from the first segment and may itself contain '-'.
    let study_label = match labels.strip_prefix(&format!("{investigation_label}-")) {
        Some(study_label) if !study_label.is_empty() => study_label,
        Some(_) => {
            return Err(ScaffoldError::malformed(
                name,
                "Invalid study format, expected 's_<LABEL1>-<LABEL2>_<slug>'",
            ))
        }
        None => {
            let Some((study_investigation, _)) = labels.split_once('-') else {
                return Err(ScaffoldError::malformed(
                    name,
                    "Invalid study format, expected 's_<LABEL1>-<LABEL2>_<slug>'",
                ));
            };
            return Err(ScaffoldError::malformed(
                name,
                format!(
                    "Investigation label mismatch: '{investigation_label}' vs '{study_investigation}'"
                ),
            ));
        }
    };

    Ok(StudyLabels::new(workpackage, investigation_label, study_label))
}

/// Folder path of the study root relative to the target directory.
///
/// An explicit `folder_name` wins over the generated name; see the nesting
/// rules on [`custom_folder_path`].
pub fn resolve_folder_path(config: &StudyConfig, nest_investigation: bool) -> Result<PathBuf> {
    match config.folder_name() {
        Some(folder_name) => custom_folder_path(config, folder_name, nest_investigation),
        None => {
            let (labels, slug) = full_tuple(config).ok_or_else(|| {
                ScaffoldError::InvalidConfiguration(
                    "Either folder_name must be provided, or all of workpackage, \
                     investigation_label, study_label and study_slug must be provided"
                        .into(),
                )
            })?;
            let study = labels.study_folder(&slug);
            if nest_investigation {
                Ok(PathBuf::from(labels.investigation_folder()).join(study))
            } else {
                Ok(PathBuf::from(study))
            }
        }
    }
}

fn custom_folder_path(
    config: &StudyConfig,
    folder_name: &str,
    nest_investigation: bool,
) -> Result<PathBuf> {
    let two_segment = folder_name.starts_with(INVESTIGATION_PREFIX) && folder_name.contains('/');
    if nest_investigation {
        if two_segment {
            return Ok(split_segments(folder_name));
        }
        let (Some(workpackage), Some(investigation_label)) =
            (config.workpackage(), config.investigation_label())
        else {
            return Err(ScaffoldError::InvalidConfiguration(
                "workpackage and investigation_label are required to nest a custom folder \
                 inside its investigation folder"
                    .into(),
            ));
        };
        return Ok(PathBuf::from(investigation_folder(workpackage, investigation_label))
            .join(split_segments(folder_name)));
    }

    if !two_segment {
        return Ok(split_segments(folder_name));
    }
    let study_segment = folder_name.rsplit('/').next().unwrap_or(folder_name);
    let expected_prefix = config
        .investigation_label()
        .map(|label| format!("{STUDY_PREFIX}{label}-"));
    match expected_prefix {
        Some(prefix) if study_segment.starts_with(&prefix) => Ok(PathBuf::from(study_segment)),
        _ => {
            let (labels, slug) = full_tuple(config).ok_or_else(|| {
                ScaffoldError::InvalidConfiguration(
                    "workpackage, investigation_label, study_label and study_slug are required \
                     to rebuild the study folder name"
                        .into(),
                )
            })?;
            let rebuilt = labels.study_folder(&slug);
            tracing::debug!(folder = %rebuilt, "rebuilt study folder name");
            Ok(PathBuf::from(rebuilt))
        }
    }
}

fn full_tuple(config: &StudyConfig) -> Option<(StudyLabels, String)> {
    let workpackage = config.workpackage()?;
    let investigation_label = config.investigation_label()?;
    let study_label = config.study_label()?;
    let slug = config
        .study_slug()
        .map(str::to_string)
        .unwrap_or_else(|| study_slug(config.study_title(), study_label));
    Some((
        StudyLabels::new(workpackage, investigation_label, study_label),
        slug,
    ))
}

fn split_segments(name: &str) -> PathBuf {
    name.split('/').filter(|segment| !segment.is_empty()).collect()
}
