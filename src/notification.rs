//! Plain-text announcement sent to privileged users of a new study folder.

use std::path::Path;

use chrono::NaiveDate;

use crate::access::{filter_privileged, AccessRecord};
use crate::config::{PolicySettings, StudyConfig};

pub fn render_notification(
    config: &StudyConfig,
    folder_path: &Path,
    settings: &PolicySettings,
    sent_on: NaiveDate,
) -> String {
    let privileged = filter_privileged(&config.authorized_users);
    let user_list = if privileged.is_empty() {
        "  - No users with READ-WRITE-SHARE access found".to_string()
    } else {
        privileged
            .iter()
            .map(|record| match record.contact() {
                (name, Some(email)) => format!("  - {name} ({email}) ({})", record.role),
                (name, None) => format!("  - {name} ({})", record.role),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let folder_name = folder_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder_path.display().to_string());
    let na = |value: Option<&str>| value.unwrap_or("N/A").to_string();
    let sensitivity = config
        .sensitivity_level
        .map(|level| level.to_string())
        .unwrap_or_else(|| "Not specified".into());
    let organisation = &settings.organisation;

    format!(
        "Dear Researchers,

Your study folder has been successfully created in the {organisation} Research Drive.

Study Details:
- Study Title: {title}
- Investigation Label: {inv}
- Study Label: {study}
- Workpackage: {workpackage}
- Folder Name: {folder_name}
- Date Created: {date}
- Principal Investigator: {pi_name}
- Contact Email: {pi_email}
- Data Sensitivity Level: {sensitivity}

Access Rights:
The following users have been granted READ-WRITE-SHARE access to this folder:
{user_list}

Important Notes:
- Please review the FOLDER_POLICY.md file in your study folder for detailed access control and data handling policies
- Raw data must never be modified and should be stored in the designated raw data folder
- All folder naming follows the convention: {label1}-{label2}_[FOLDER_TYPE]
- For any questions or support, contact the Data Engineering Team at {contact}

Best regards,
{organisation} Data Management Team",
        title = na(config.study_title()),
        inv = na(config.investigation_label()),
        study = na(config.study_label()),
        workpackage = na(config.workpackage()),
        date = sent_on.format("%Y-%m-%d"),
        pi_name = na(config.pi_name()),
        pi_email = na(config.pi_email()),
        label1 = config.investigation_label().unwrap_or("LABEL1"),
        label2 = config.study_label().unwrap_or("LABEL2"),
        contact = settings.support_contact,
    )
}
