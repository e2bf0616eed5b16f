use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::access::{parse_from_study_record, AccessRecord};
use crate::error::{Result, ScaffoldError};
use crate::structure::StructureMap;

/// Data sensitivity recorded in the policy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum SensitivityLevel {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl SensitivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitivityLevel::Public => "PUBLIC",
            SensitivityLevel::Internal => "INTERNAL",
            SensitivityLevel::Confidential => "CONFIDENTIAL",
            SensitivityLevel::Restricted => "RESTRICTED",
        }
    }
}

impl fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensitivityLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "PUBLIC" => Ok(SensitivityLevel::Public),
            "INTERNAL" => Ok(SensitivityLevel::Internal),
            "CONFIDENTIAL" => Ok(SensitivityLevel::Confidential),
            "RESTRICTED" => Ok(SensitivityLevel::Restricted),
            other => Err(format!(
                "unknown sensitivity level '{other}' (expected PUBLIC, INTERNAL, CONFIDENTIAL or RESTRICTED)"
            )),
        }
    }
}

impl TryFrom<String> for SensitivityLevel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable description of one study folder to provision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudyConfig {
    #[serde(default)]
    pub workpackage: Option<String>,
    #[serde(default)]
    pub investigation_label: Option<String>,
    #[serde(default)]
    pub study_label: Option<String>,
    #[serde(default)]
    pub study_title: Option<String>,
    #[serde(default)]
    pub study_slug: Option<String>,
    #[serde(default)]
    pub sensitivity_level: Option<SensitivityLevel>,
    #[serde(default)]
    pub authorized_users: Vec<AccessRecord>,
    #[serde(default)]
    pub pi_name: Option<String>,
    #[serde(default)]
    pub pi_email: Option<String>,
    /// Overrides the generated folder name.
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub structure: Option<StructureMap>,
}

impl StudyConfig {
    /// Maps a portal study record onto a provisioning config.
    pub fn from_study_record(record: &StudyRecord) -> Self {
        Self {
            workpackage: record.investigation_work_package.clone(),
            investigation_label: record.investigation_accession_code.clone(),
            study_label: record.accession_code.clone(),
            study_title: record.title.clone(),
            study_slug: record.slug.clone(),
            sensitivity_level: record
                .security_level
                .as_deref()
                .and_then(|level| level.parse().ok()),
            authorized_users: parse_from_study_record(record),
            pi_name: record.effective_principal_investigator_name.clone(),
            pi_email: record.effective_principal_investigator_email.clone(),
            folder_name: record.folder_name.clone(),
            structure: None,
        }
    }

    pub fn workpackage(&self) -> Option<&str> {
        non_empty(&self.workpackage)
    }

    pub fn investigation_label(&self) -> Option<&str> {
        non_empty(&self.investigation_label)
    }

    pub fn study_label(&self) -> Option<&str> {
        non_empty(&self.study_label)
    }

    pub fn study_title(&self) -> Option<&str> {
        non_empty(&self.study_title)
    }

    pub fn study_slug(&self) -> Option<&str> {
        non_empty(&self.study_slug)
    }

    pub fn folder_name(&self) -> Option<&str> {
        non_empty(&self.folder_name)
    }

    pub fn pi_name(&self) -> Option<&str> {
        non_empty(&self.pi_name)
    }

    pub fn pi_email(&self) -> Option<&str> {
        non_empty(&self.pi_email)
    }

    /// Both labels, which enable first-level prefixing.
    pub fn label_pair(&self) -> Option<(&str, &str)> {
        Some((self.investigation_label()?, self.study_label()?))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Study metadata as exported by the research portal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyRecord {
    #[serde(default)]
    pub accession_code: Option<String>,
    #[serde(default)]
    pub investigation_accession_code: Option<String>,
    #[serde(default)]
    pub investigation_work_package: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub security_level: Option<String>,
    #[serde(default)]
    pub effective_principal_investigator_name: Option<String>,
    #[serde(default)]
    pub effective_principal_investigator_email: Option<String>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub readers: Vec<String>,
    #[serde(default)]
    pub folder_name: Option<String>,
}

pub fn load_study_config(path: &Path) -> Result<StudyConfig> {
    read_document(path)
}

pub fn load_study_record(path: &Path) -> Result<StudyRecord> {
    read_document(path)
}

/// Reads a JSON (`.json`) or YAML (anything else) document.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|err| ScaffoldError::io(path, err))?;
    parse_document(path, &raw)
}

pub(crate) fn parse_document<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<T> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(raw).map_err(|err| ScaffoldError::parse(path, err))
    } else {
        serde_yaml::from_str(raw).map_err(|err| ScaffoldError::parse(path, err))
    }
}
