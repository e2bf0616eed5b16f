use chrono::NaiveDate;

use crate::access::{filter_privileged, AccessRecord};
use crate::config::{PolicySettings, SensitivityLevel, StudyConfig};

const PLACEHOLDER_ROW: &str =
    "| [Name] | [Role] | [READ/READ-WRITE] | [YYYY-MM-DD or PERMANENT] |";
const SENSITIVITY_PLACEHOLDER: &str = "[SELECT ONE: PUBLIC / INTERNAL / CONFIDENTIAL / RESTRICTED]";

/// Study facts rendered into FOLDER_POLICY.md.
#[derive(Debug, Clone, Default)]
pub struct PolicyMetadata {
    pub study_title: Option<String>,
    pub investigation_label: Option<String>,
    pub study_label: Option<String>,
    pub workpackage: Option<String>,
    pub pi_name: Option<String>,
    pub pi_email: Option<String>,
    pub sensitivity_level: Option<SensitivityLevel>,
    pub settings: PolicySettings,
}

impl PolicyMetadata {
    pub fn from_study(config: &StudyConfig, settings: &PolicySettings) -> Self {
        Self {
            study_title: config.study_title().map(str::to_string),
            investigation_label: config.investigation_label().map(str::to_string),
            study_label: config.study_label().map(str::to_string),
            workpackage: config.workpackage().map(str::to_string),
            pi_name: config.pi_name().map(str::to_string),
            pi_email: config.pi_email().map(str::to_string),
            sensitivity_level: config.sensitivity_level,
            settings: settings.clone(),
        }
    }
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().unwrap_or(placeholder)
}

/// One markdown table row per privileged record, or a placeholder row.
pub fn render_access_rows(records: &[AccessRecord]) -> Vec<String> {
    let rows: Vec<String> = filter_privileged(records)
        .iter()
        .map(|record| {
            format!(
                "| {} | {} | {} | {} |",
                record.name, record.role, record.access_level, record.expiration
            )
        })
        .collect();
    if rows.is_empty() {
        vec![PLACEHOLDER_ROW.to_string()]
    } else {
        rows
    }
}

/// Full policy document. Missing fields become bracketed placeholders.
pub fn render_policy(
    metadata: &PolicyMetadata,
    records: &[AccessRecord],
    created_on: NaiveDate,
) -> String {
    let inv = or_placeholder(&metadata.investigation_label, "[LABEL1]");
    let study = or_placeholder(&metadata.study_label, "[LABEL2]");
    let prefix = format!("{inv}-{study}_");
    let sensitivity = metadata
        .sensitivity_level
        .map(|level| level.as_str())
        .unwrap_or(SENSITIVITY_PLACEHOLDER);
    let organisation = &metadata.settings.organisation;
    let access_rows = render_access_rows(records).join("\n");

    format!(
        "# FOLDER POLICY

## Study Information
- **Study Title**: {title}
- **Investigation Label**: {inv}
- **Study Label**: {study}
- **Workpackage**: {workpackage}
- **Date Created**: {date}
- **Project Lead**: {pi_name}
- **Contact Email**: {pi_email}

## Data Sensitivity Classification
**Current Sensitivity Level**: {sensitivity}

### Sensitivity Level Definitions
- **PUBLIC**: Data that can be freely shared with the public.
- **INTERNAL**: Data that can be shared within the organization ({organisation}) but not externally.
- **RESTRICTED**: Sensitive data with limited access even within the organization.
- **CONFIDENTIAL**: Highly sensitive data with strictly controlled access and not listed in data catalogue.

## Access Control

### Access
The following individuals or groups have READ-WRITE-SHARE access to this folder structure:

| Name | Role | Access Level | Expiration Date |
|------|------|--------------|-----------------|
{access_rows}

## Folder Naming Convention
All folders within this project follow a strict naming convention:

- All first-level folders are prefixed with: **{prefix}**
- Examples:
  - Raw data folder: **{prefix}raw**
  - Processed data folder: **{prefix}processed**
  - Metadata folder: **{prefix}metadata**
  - Analysis folder: **{prefix}analysis**
  - Documentation folder: **{prefix}documentation**

## Data Handling Policies

### Raw Data
- Raw data must never be modified
- All raw data files must be stored in the **{prefix}raw** folder

### Other Data Folders
- All first-level folders follow the naming convention **{prefix}[FOLDER_TYPE]**
- Files within these folders should maintain consistent naming where applicable
- Cross-references between folders should maintain traceability to original data sources

## Metadata Guidelines
- Metadata should be comprehensive and follow applicable standards
- All metadata should be stored in the metadata folder
- File naming should maintain consistency with data files

## Questions and Support
For questions regarding this policy or data management assistance, please contact:
- Data Engineering Team: {contact}

",
        title = or_placeholder(&metadata.study_title, "[Study Title]"),
        workpackage = or_placeholder(&metadata.workpackage, "[Workpackage ID]"),
        date = created_on.format("%Y-%m-%d"),
        pi_name = or_placeholder(&metadata.pi_name, "[Name]"),
        pi_email = or_placeholder(&metadata.pi_email, "[Email]"),
        contact = metadata.settings.support_contact,
    )
}
