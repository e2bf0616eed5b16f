use super::support::{policy_backups, USERS_JSON};
use super::IntegrationHarness;
use anyhow::Result;
use researchdrive::access::load_users_file;
use researchdrive::config::SensitivityLevel;
use researchdrive::{create_study_folder, PolicyStatus, ScaffoldOptions};
use std::fs;

#[test]
fn policy_lists_only_privileged_users() -> Result<()> {
    let harness = IntegrationHarness::new();
    let settings = harness.settings();
    let mut study = harness.study();
    study.sensitivity_level = Some(SensitivityLevel::Confidential);
    study.authorized_users = load_users_file(&harness.write_input("users.json", USERS_JSON))?;

    let outcome = create_study_folder(
        harness.target(),
        &study,
        &settings,
        &ScaffoldOptions::from_settings(&settings),
    )?;
    let policy = fs::read_to_string(&outcome.policy.path)?;

    assert!(policy.contains("| Olga Owner (olga@lab.org) | Owner | READ-WRITE-SHARE | PERMANENT |"));
    assert!(policy.contains("| Pat Lead | principal investigator | read-write-share | 2030-12-31 |"));
    assert!(!policy.contains("Cas Contributor"));
    assert!(!policy.contains("Rita Reader"));
    assert!(policy.contains("**Current Sensitivity Level**: CONFIDENTIAL"));
    assert!(policy.contains("- **Study Title**: Test Study"));
    assert!(policy.contains("prefixed with: **CXR9-STU2_**"));
    Ok(())
}

#[test]
fn existing_policy_is_skipped_then_replaced_with_backup() -> Result<()> {
    let harness = IntegrationHarness::new();
    let settings = harness.settings();
    let mut options = ScaffoldOptions::from_settings(&settings);
    let mut study = harness.study();

    let first = create_study_folder(harness.target(), &study, &settings, &options)?;
    assert_eq!(first.policy.status, PolicyStatus::Created);
    fs::write(&first.policy.path, "Initial content")?;

    study.study_title = Some("Renamed".into());
    study.study_slug = Some("test-study".into());
    let skipped = create_study_folder(harness.target(), &study, &settings, &options)?;
    assert_eq!(skipped.policy.status, PolicyStatus::Skipped);
    assert_eq!(fs::read_to_string(&skipped.policy.path)?, "Initial content");
    assert!(policy_backups(&skipped.root).is_empty());

    options.overwrite_policy = true;
    let replaced = create_study_folder(harness.target(), &study, &settings, &options)?;
    let backups = policy_backups(&replaced.root);
    assert_eq!(backups.len(), 1);
    assert_eq!(
        replaced.policy.status,
        PolicyStatus::Replaced {
            backup: Some(backups[0].clone())
        }
    );
    assert_eq!(fs::read_to_string(&backups[0])?, "Initial content");
    assert!(fs::read_to_string(&replaced.policy.path)?.contains("- **Study Title**: Renamed"));
    Ok(())
}

#[test]
fn policy_settings_flow_into_document() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut settings = harness.settings();
    settings.policy.organisation = "PlantLab".into();
    settings.policy.support_contact = "data@plantlab.example".into();

    let outcome = create_study_folder(
        harness.target(),
        &harness.study(),
        &settings,
        &ScaffoldOptions::from_settings(&settings),
    )?;
    let policy = fs::read_to_string(&outcome.policy.path)?;
    assert!(policy.contains("within the organization (PlantLab)"));
    assert!(policy.contains("Data Engineering Team: data@plantlab.example"));
    Ok(())
}
