use super::IntegrationHarness;
use anyhow::Result;
use chrono::NaiveDate;
use researchdrive::config::{load_study_record, SensitivityLevel};
use researchdrive::notification::render_notification;
use researchdrive::{create_study_folder, ScaffoldOptions, StudyConfig};
use std::fs;

const STUDY_JSON: &str = r#"{
  "accession_code": "STU2",
  "investigation_accession_code": "CXR9",
  "investigation_work_package": "WP1",
  "title": "Drought Response",
  "slug": "drought-response",
  "security_level": "internal",
  "effective_principal_investigator_name": "Pat Lead",
  "effective_principal_investigator_email": "pat@lab.org",
  "owners": ["Olga Owner (olga@lab.org)"],
  "contributors": ["Cas Contributor (cas@lab.org)"],
  "readers": ["Rita Reader"]
}"#;

#[test]
fn portal_record_provisions_study_folder() -> Result<()> {
    let harness = IntegrationHarness::new();
    let settings = harness.settings();
    let record = load_study_record(&harness.write_input("study.json", STUDY_JSON))?;
    let study = StudyConfig::from_study_record(&record);
    assert_eq!(study.sensitivity_level, Some(SensitivityLevel::Internal));

    let outcome = create_study_folder(
        harness.target(),
        &study,
        &settings,
        &ScaffoldOptions::from_settings(&settings),
    )?;

    assert_eq!(
        outcome.root,
        harness
            .target()
            .join("i_WP1_CXR9")
            .join("s_CXR9-STU2_drought-response")
    );
    let policy = fs::read_to_string(&outcome.policy.path)?;
    assert!(policy.contains("| Olga Owner (olga@lab.org) | Owner | READ-WRITE-SHARE | PERMANENT |"));
    assert!(policy.contains(
        "| Pat Lead (pat@lab.org) | Principal Investigator | READ-WRITE-SHARE | PERMANENT |"
    ));
    assert!(!policy.contains("Cas Contributor"));
    assert!(policy.contains("- **Project Lead**: Pat Lead"));
    assert!(policy.contains("- **Contact Email**: pat@lab.org"));

    let text = render_notification(
        &study,
        &outcome.root,
        &settings.policy,
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
    );
    assert!(text.contains("- Folder Name: s_CXR9-STU2_drought-response"));
    assert!(text.contains("  - Olga Owner (olga@lab.org) (Owner)\n  - Pat Lead (pat@lab.org) (Principal Investigator)"));
    Ok(())
}

#[test]
fn unknown_security_level_is_dropped() -> Result<()> {
    let harness = IntegrationHarness::new();
    let json = STUDY_JSON.replace("\"internal\"", "\"top-secret\"");
    let record = load_study_record(&harness.write_input("study.json", &json))?;
    assert_eq!(StudyConfig::from_study_record(&record).sensitivity_level, None);
    Ok(())
}

#[test]
fn malformed_record_is_a_parse_failure() {
    let harness = IntegrationHarness::new();
    let path = harness.write_input("study.json", "{ not json");
    let err = load_study_record(&path).unwrap_err();
    assert!(matches!(
        err,
        researchdrive::ScaffoldError::InputParseFailure { .. }
    ));
}
